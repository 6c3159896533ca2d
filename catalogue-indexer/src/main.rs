//! Catalogue Indexer Main Entry Point
//!
//! Runs a single reindex task (`--mode task`) or serves the index and search
//! HTTP endpoints (`--mode server`).

use catalogue_indexer::server::{create_app, run_server, state::AppState};
use catalogue_indexer::{Dependencies, IndexingError, ReindexTask};
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run one reindex task and exit.
    Task,
    /// Serve the HTTP endpoints.
    Server,
}

#[derive(Parser, Debug)]
#[command(name = "catalogue-indexer", version, about = "Catalogue search indexer")]
struct Args {
    /// Mode for the application
    #[arg(long, value_enum, default_value_t = Mode::Server)]
    mode: Mode,

    /// Task to run (catalogue-bulk-index | attributes-bulk-index)
    #[arg(long, default_value = "")]
    task: String,

    /// Tenant identifier
    #[arg(long, default_value = "")]
    tenant: String,
}

/// Initialize tracing/logging.
fn init_tracing() -> Result<(), IndexingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("catalogue_indexer=info,catalogue_indexer_repository=info")
    });

    let json_output = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .try_init()
            .map_err(|e| IndexingError::config(e.to_string()))?;

        info!(
            service_name = "catalogue-indexer",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with JSON format"
        );
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .try_init()
            .map_err(|e| IndexingError::config(e.to_string()))?;

        info!(
            service_name = "catalogue-indexer",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with console output"
        );
    }

    Ok(())
}

async fn run_task(deps: &Dependencies, task: &str, tenant: &str) -> Result<(), IndexingError> {
    let task: ReindexTask = task.parse()?;
    let report = deps.pipeline().run(task, tenant).await?;

    info!(
        run_id = %report.run_id,
        started_at = %report.started_at,
        documents_indexed = report.documents_indexed,
        "Reindex finished"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), IndexingError> {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();

    init_tracing()?;

    info!(mode = ?args.mode, "Starting catalogue indexer");

    let deps = match Dependencies::new().await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let result = match args.mode {
        Mode::Task => run_task(&deps, &args.task, &args.tenant).await,
        Mode::Server => {
            let app = create_app(AppState::new(deps.index_store.clone()));
            run_server(app, deps.server_addr).await
        }
    };

    if let Err(e) = &result {
        error!(error = %e, "Catalogue indexer failed");
    }
    result
}
