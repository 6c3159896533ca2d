//! HTTP request handlers.

use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalogue_indexer_repository::opensearch::CATALOGUE_INDEX;
use catalogue_indexer_repository::{IndexDocument, IndexStoreError};
use catalogue_indexer_shared::{BooleanQuery, CatalogueItem, QueryParams};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::server::state::AppState;

/// Body of `POST /api/index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexRequest {
    pub item: CatalogueItem,
}

/// Index store failure rendered as `500` with the error message as body.
#[derive(Debug)]
pub struct ApiError(IndexStoreError);

impl From<IndexStoreError> for ApiError {
    fn from(err: IndexStoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Index a single catalogue item, keyed by its ID, and echo it back.
///
/// The response is sent once the item is visible to searches.
pub async fn index_handler(
    State(state): State<AppState>,
    Json(payload): Json<IndexRequest>,
) -> Result<Json<CatalogueItem>, ApiError> {
    let begin = Instant::now();

    let document = IndexDocument::from_record(payload.item.id.as_str(), &payload.item)?;
    state.index_store.upsert(CATALOGUE_INDEX, document).await?;

    info!(
        item_id = %payload.item.id,
        "Indexed 1 item in {} ms",
        begin.elapsed().as_millis()
    );
    Ok(Json(payload.item))
}

/// Search the catalogue index.
///
/// Every query parameter must match; a parameter repeated with several values
/// matches any of them. No parameters match every document.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let begin = Instant::now();

    let params = QueryParams::from_pairs(pairs);
    let query = BooleanQuery::translate(&params);
    let hits = state.index_store.search(CATALOGUE_INDEX, &query).await?;

    info!(
        keys = params.len(),
        "Found {} matching items in {}ms",
        hits.len(),
        begin.elapsed().as_millis()
    );
    Ok(Json(hits))
}
