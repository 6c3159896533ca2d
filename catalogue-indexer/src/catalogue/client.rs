//! GraphQL client for the catalogue API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::errors::CatalogueError;

/// Trait for fetching the catalogue tree of a tenant.
///
/// Production code uses [`GraphQlCatalogueClient`], while tests can provide
/// canned responses.
#[async_trait]
pub trait CatalogueFetcher: Send + Sync {
    /// Run `query` against the tenant's catalogue and return the raw
    /// `data.catalogue.children` array.
    async fn fetch(&self, tenant: &str, query: &str) -> Result<Value, CatalogueError>;
}

/// Catalogue API client that posts GraphQL queries over HTTP.
///
/// # Example
///
/// ```ignore
/// use catalogue_indexer::catalogue::{queries, CatalogueFetcher, GraphQlCatalogueClient};
///
/// let client = GraphQlCatalogueClient::new("https://api.crystallize.com", Duration::from_secs(60))?;
/// let children = client.fetch("my-tenant", queries::CATALOGUE_QUERY).await?;
/// ```
pub struct GraphQlCatalogueClient {
    base_url: String,
    client: ReqwestClient,
}

impl GraphQlCatalogueClient {
    /// Create a client for the API at `base_url`. `timeout` bounds each request.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogueError> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Endpoint serving the catalogue of `tenant`.
    pub fn endpoint(&self, tenant: &str) -> String {
        format!("{}/{}/catalogue", self.base_url, tenant)
    }
}

#[async_trait]
impl CatalogueFetcher for GraphQlCatalogueClient {
    #[instrument(skip(self, query))]
    async fn fetch(&self, tenant: &str, query: &str) -> Result<Value, CatalogueError> {
        let url = self.endpoint(tenant);
        debug!(url = %url, "Querying catalogue API");

        let response = self
            .client
            .post(&url)
            .json(&json!({ "query": query }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogueError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        extract_children(body)
    }
}

/// Pull `data.catalogue.children` out of a GraphQL response body.
///
/// A non-empty `errors` array fails the fetch even when `data` is present.
/// A `null` children field is an empty catalogue.
pub fn extract_children(mut body: Value) -> Result<Value, CatalogueError> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| {
                    e.get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| e.to_string())
                })
                .collect();
            return Err(CatalogueError::graphql(messages.join("; ")));
        }
    }

    let catalogue = body
        .get_mut("data")
        .and_then(|data| data.get_mut("catalogue"))
        .filter(|catalogue| catalogue.is_object())
        .ok_or_else(|| CatalogueError::malformed("response has no data.catalogue object"))?;

    match catalogue.get_mut("children").map(Value::take) {
        Some(children @ Value::Array(_)) => Ok(children),
        Some(Value::Null) => Ok(Value::Array(Vec::new())),
        Some(other) => Err(CatalogueError::malformed(format!(
            "data.catalogue.children is not an array: {}",
            other
        ))),
        None => Err(CatalogueError::malformed(
            "response has no data.catalogue.children field",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_children() {
        let body = json!({
            "data": { "catalogue": { "children": [{ "id": "1", "type": "folder" }] } }
        });
        let children = extract_children(body).unwrap();
        assert_eq!(children, json!([{ "id": "1", "type": "folder" }]));
    }

    #[test]
    fn test_extract_children_null_is_empty() {
        let body = json!({ "data": { "catalogue": { "children": null } } });
        assert_eq!(extract_children(body).unwrap(), json!([]));
    }

    #[test]
    fn test_extract_children_graphql_errors() {
        let body = json!({
            "data": null,
            "errors": [{ "message": "tenant not found" }, { "message": "second" }]
        });
        match extract_children(body) {
            Err(CatalogueError::GraphQlError(msg)) => assert_eq!(msg, "tenant not found; second"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_extract_children_malformed() {
        assert!(matches!(
            extract_children(json!({ "data": { "catalogue": null } })),
            Err(CatalogueError::MalformedResponse(_))
        ));
        assert!(matches!(
            extract_children(json!({ "data": { "catalogue": {} } })),
            Err(CatalogueError::MalformedResponse(_))
        ));
        assert!(matches!(
            extract_children(json!({ "data": { "catalogue": { "children": "x" } } })),
            Err(CatalogueError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_endpoint() {
        let client =
            GraphQlCatalogueClient::new("https://api.example.com/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.endpoint("acme"),
            "https://api.example.com/acme/catalogue"
        );
    }
}
