use std::sync::Arc;

use surfcast_aggregate::SurfcastConfig;
use surfcast_client::{ClientError, DiskCache, Fetcher};

/// State shared across requests.
///
/// Only the configuration, the HTTP client and the disk cache handle are
/// shared; the graph built for a report lives and dies with its request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SurfcastConfig>,
    pub cache: DiskCache,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: SurfcastConfig) -> Result<Self, ClientError> {
        let http = Fetcher::build_http_client(&config.user_agent, config.http_timeout)?;
        let cache = DiskCache::new(config.cache_root.clone());
        Ok(Self {
            config: Arc::new(config),
            cache,
            http,
        })
    }
}
