//! Reindex pipeline for the catalogue indexer.
//!
//! Coordinates the catalogue fetcher, the processor, and the loader for one
//! task run.

mod task;

pub use task::ReindexTask;

use std::sync::Arc;
use std::time::{Duration, Instant};

use catalogue_indexer_repository::IndexStoreService;
use catalogue_indexer_shared::CatalogueNode;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, instrument, Span};
use uuid::Uuid;

use crate::catalogue::CatalogueFetcher;
use crate::errors::{ReindexError, ReindexStage};
use crate::loader::CatalogueLoader;

/// Progress of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No run has started, or a run has just begun.
    Idle,
    /// The raw tree was fetched.
    Fetched,
    /// The tree was decoded and normalized into documents.
    Normalized,
    /// The target index was dropped (if present) and recreated empty.
    IndexReplaced,
    /// Every document was indexed.
    Done,
    /// The run aborted in the given stage.
    Failed(ReindexStage),
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct ReindexReport {
    pub run_id: Uuid,
    pub task: ReindexTask,
    pub tenant: String,
    pub index: String,
    /// Catalogue nodes in the fetched tree, at every depth.
    pub nodes_fetched: usize,
    pub documents_indexed: usize,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

/// Pipeline that replaces a search index with a fresh copy of the catalogue.
///
/// A run moves through `Idle -> Fetched -> Normalized -> IndexReplaced ->
/// Done`, stopping at the first error in `Failed`. Every stage completes
/// before the next starts and nothing is retried. Failed runs are not rolled
/// back: the index stays in whatever state the last successful step left it.
pub struct ReindexPipeline {
    fetcher: Arc<dyn CatalogueFetcher>,
    loader: CatalogueLoader,
    state: PipelineState,
}

impl ReindexPipeline {
    /// Create a new pipeline with the given components.
    pub fn new(fetcher: Arc<dyn CatalogueFetcher>, service: Arc<IndexStoreService>) -> Self {
        Self {
            fetcher,
            loader: CatalogueLoader::new(service),
            state: PipelineState::Idle,
        }
    }

    /// State reached by the most recent run.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run `task` for `tenant`.
    ///
    /// Runs against the same index must not overlap; the last writer wins.
    #[instrument(skip(self), fields(run_id = tracing::field::Empty))]
    pub async fn run(
        &mut self,
        task: ReindexTask,
        tenant: &str,
    ) -> Result<ReindexReport, ReindexError> {
        let run_id = Uuid::new_v4();
        Span::current().record("run_id", tracing::field::display(run_id));

        self.state = PipelineState::Idle;
        info!(task = %task, tenant = %tenant, "Running task");

        match self.execute(run_id, task, tenant).await {
            Ok(report) => {
                info!(
                    index = %report.index,
                    nodes_fetched = report.nodes_fetched,
                    documents_indexed = report.documents_indexed,
                    "Task completed in {:.3} seconds",
                    report.elapsed.as_secs_f64()
                );
                Ok(report)
            }
            Err(e) => {
                let stage = e.stage();
                self.state = PipelineState::Failed(stage);
                error!(stage = %stage, error = %e, "Task failed");
                Err(e)
            }
        }
    }

    async fn execute(
        &mut self,
        run_id: Uuid,
        task: ReindexTask,
        tenant: &str,
    ) -> Result<ReindexReport, ReindexError> {
        if tenant.trim().is_empty() {
            return Err(ReindexError::MissingTenant);
        }

        let started_at = Utc::now();
        let begin = Instant::now();
        let index = task.index_name();

        let raw = self.fetcher.fetch(tenant, task.query()).await?;
        self.state = PipelineState::Fetched;

        let roots =
            CatalogueNode::decode_forest(raw).map_err(|e| ReindexError::shape(e.to_string()))?;
        let nodes_fetched = count_nodes(&roots);
        let documents = task.normalize(&roots)?;
        drop(roots);
        self.state = PipelineState::Normalized;
        info!(nodes = nodes_fetched, "Queried {} items", documents.len());

        self.loader.replace_index(index).await?;
        self.state = PipelineState::IndexReplaced;

        info!("Indexing {} items", documents.len());
        let documents_indexed = self.loader.load(index, documents).await?;
        self.state = PipelineState::Done;
        debug!(index = %index, documents_indexed, "Index replaced");

        Ok(ReindexReport {
            run_id,
            task,
            tenant: tenant.to_string(),
            index: index.to_string(),
            nodes_fetched,
            documents_indexed,
            started_at,
            elapsed: begin.elapsed(),
        })
    }
}

fn count_nodes(roots: &[CatalogueNode]) -> usize {
    roots
        .iter()
        .map(|node| 1 + count_nodes(node.children()))
        .sum()
}
