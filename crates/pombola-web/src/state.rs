//! Application State
//!
//! Arc-wrapped state shared across handlers.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use pombola_core::api::ApiClient;
use pombola_core::attendance::CACHE_REGION;
use pombola_core::cache::{CacheManager, CacheRegion};
use pombola_core::positions::JsonPositionStore;
use pombola_core::Config;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: Config,
    client: ApiClient,
    cache: CacheRegion,
    positions: JsonPositionStore,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClient::with_timeout(config.api_timeout)?;
        let cache = CacheManager::new(config.cache_dir.clone())?.region(CACHE_REGION)?;
        let positions = JsonPositionStore::load(&config.positions_file)?;

        info!(
            cache_dir = %config.cache_dir.display(),
            positions = positions.len(),
            "Initialized state"
        );

        Ok(Self {
            inner: Arc::new(InnerState {
                config,
                client,
                cache,
                positions,
            }),
        })
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    pub fn cache(&self) -> &CacheRegion {
        &self.inner.cache
    }

    pub fn positions(&self) -> &JsonPositionStore {
        &self.inner.positions
    }
}
