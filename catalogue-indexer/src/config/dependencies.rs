//! Dependency initialization and wiring for the catalogue indexer.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::catalogue::{CatalogueFetcher, GraphQlCatalogueClient};
use crate::pipeline::ReindexPipeline;
use crate::IndexingError;
use catalogue_indexer_repository::opensearch::IndexConfig;
use catalogue_indexer_repository::{IndexStoreService, IndexStoreServiceConfig, OpenSearchProvider};

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default catalogue API base URL.
const DEFAULT_CATALOGUE_API_URL: &str = "https://api.crystallize.com";

/// Default catalogue request timeout in seconds.
const DEFAULT_CATALOGUE_TIMEOUT_SECS: u64 = 60;

/// Default HTTP listen address.
const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8090";

/// Default shard and replica counts for created indices.
const DEFAULT_INDEX_SHARDS: u32 = 1;
const DEFAULT_INDEX_REPLICAS: u32 = 1;

/// Settings read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub opensearch_url: String,
    /// Basic auth username and password, set only when both are present.
    pub opensearch_credentials: Option<(String, String)>,
    pub catalogue_api_url: String,
    pub catalogue_timeout: Duration,
    pub server_addr: SocketAddr,
    pub index_config: IndexConfig,
    pub service_config: IndexStoreServiceConfig,
}

impl AppConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `OPENSEARCH_USERNAME` / `OPENSEARCH_PASSWORD`: Basic auth credentials (optional)
    /// - `CATALOGUE_API_URL`: Catalogue API base URL (default: https://api.crystallize.com)
    /// - `CATALOGUE_REQUEST_TIMEOUT_SECS`: Catalogue request timeout (default: 60)
    /// - `SERVER_ADDR`: HTTP listen address (default: 0.0.0.0:8090)
    /// - `INDEX_SHARDS` / `INDEX_REPLICAS`: Settings for created indices (default: 1 / 1)
    /// - `BULK_MAX_BATCH_SIZE`: Maximum documents per bulk request (default: unlimited)
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let opensearch_url =
            lookup("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());
        let opensearch_credentials =
            match (lookup("OPENSEARCH_USERNAME"), lookup("OPENSEARCH_PASSWORD")) {
                (Some(username), Some(password)) => Some((username, password)),
                (Some(_), None) | (None, Some(_)) => {
                    warn!("Only one of OPENSEARCH_USERNAME and OPENSEARCH_PASSWORD is set, ignoring credentials");
                    None
                }
                (None, None) => None,
            };
        let catalogue_api_url =
            lookup("CATALOGUE_API_URL").unwrap_or_else(|| DEFAULT_CATALOGUE_API_URL.to_string());
        let catalogue_timeout = Duration::from_secs(parse_or(
            &lookup,
            "CATALOGUE_REQUEST_TIMEOUT_SECS",
            DEFAULT_CATALOGUE_TIMEOUT_SECS,
        ));

        let server_addr_raw =
            lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());
        let server_addr = server_addr_raw.parse::<SocketAddr>().map_err(|e| {
            IndexingError::config(format!("Invalid SERVER_ADDR '{}': {}", server_addr_raw, e))
        })?;

        let index_config = IndexConfig::new(
            parse_or(&lookup, "INDEX_SHARDS", DEFAULT_INDEX_SHARDS),
            parse_or(&lookup, "INDEX_REPLICAS", DEFAULT_INDEX_REPLICAS),
        );

        let service_config = match lookup("BULK_MAX_BATCH_SIZE") {
            Some(raw) => {
                let max_batch_size = raw.parse::<usize>().map_err(|e| {
                    IndexingError::config(format!("Invalid BULK_MAX_BATCH_SIZE '{}': {}", raw, e))
                })?;
                IndexStoreServiceConfig::with_max_batch_size(max_batch_size)
            }
            None => IndexStoreServiceConfig::unlimited(),
        };

        Ok(Self {
            opensearch_url,
            opensearch_credentials,
            catalogue_api_url,
            catalogue_timeout,
            server_addr,
            index_config,
            service_config,
        })
    }
}

/// Parse a variable, falling back to `default` when unset or invalid.
fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw.parse::<T>().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "Invalid value, using default");
            default
        }),
        None => default,
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Shared handle to the index store.
    pub index_store: Arc<IndexStoreService>,
    /// Catalogue API client.
    pub fetcher: Arc<dyn CatalogueFetcher>,
    /// Address the HTTP server listens on.
    pub server_addr: SocketAddr,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// See [`AppConfig::from_env`] for the variables read.
    pub async fn new() -> Result<Self, IndexingError> {
        Self::from_config(AppConfig::from_env()?).await
    }

    /// Initialize all dependencies from an explicit configuration.
    pub async fn from_config(config: AppConfig) -> Result<Self, IndexingError> {
        info!(
            opensearch_url = %config.opensearch_url,
            catalogue_api_url = %config.catalogue_api_url,
            server_addr = %config.server_addr,
            basic_auth = config.opensearch_credentials.is_some(),
            max_batch_size = ?config.service_config.max_batch_size,
            "Initializing dependencies"
        );

        let provider = OpenSearchProvider::new(
            &config.opensearch_url,
            config.opensearch_credentials,
            config.index_config,
        )
        .await
        .map_err(|e| {
            IndexingError::config(format!("Failed to create OpenSearch provider: {}", e))
        })?;

        let index_store = Arc::new(IndexStoreService::with_config(
            Box::new(provider),
            config.service_config,
        ));

        let fetcher =
            GraphQlCatalogueClient::new(&config.catalogue_api_url, config.catalogue_timeout)
                .map_err(|e| {
                    IndexingError::config(format!("Failed to create catalogue client: {}", e))
                })?;

        Ok(Self {
            index_store,
            fetcher: Arc::new(fetcher),
            server_addr: config.server_addr,
        })
    }

    /// Build a reindex pipeline over these dependencies.
    pub fn pipeline(&self) -> ReindexPipeline {
        ReindexPipeline::new(self.fetcher.clone(), self.index_store.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.opensearch_url, "http://localhost:9200");
        assert_eq!(config.opensearch_credentials, None);
        assert_eq!(config.catalogue_api_url, "https://api.crystallize.com");
        assert_eq!(config.catalogue_timeout, Duration::from_secs(60));
        assert_eq!(config.server_addr.port(), 8090);
        assert_eq!(config.index_config, IndexConfig::new(1, 1));
        assert_eq!(config.service_config.max_batch_size, None);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("OPENSEARCH_URL", "https://search:9200"),
            ("OPENSEARCH_USERNAME", "admin"),
            ("OPENSEARCH_PASSWORD", "secret"),
            ("SERVER_ADDR", "127.0.0.1:3000"),
            ("INDEX_SHARDS", "3"),
            ("INDEX_REPLICAS", "0"),
            ("BULK_MAX_BATCH_SIZE", "500"),
            ("CATALOGUE_REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.opensearch_url, "https://search:9200");
        assert_eq!(
            config.opensearch_credentials,
            Some(("admin".to_string(), "secret".to_string()))
        );
        assert_eq!(config.server_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.index_config, IndexConfig::new(3, 0));
        assert_eq!(config.service_config.max_batch_size, Some(500));
        assert_eq!(config.catalogue_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_partial_credentials_ignored() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("OPENSEARCH_USERNAME", "admin")])).unwrap();
        assert_eq!(config.opensearch_credentials, None);
    }

    #[test]
    fn test_invalid_values() {
        assert!(AppConfig::from_lookup(lookup_from(&[("SERVER_ADDR", "nowhere")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("BULK_MAX_BATCH_SIZE", "many")])).is_err());

        let config = AppConfig::from_lookup(lookup_from(&[("INDEX_SHARDS", "x")])).unwrap();
        assert_eq!(config.index_config.number_of_shards, 1);
    }
}
