//! 共享应用状态

use std::sync::Arc;

use edge_ddns_core::traits::{DefaultProviderFactory, InMemoryCacheStore, TokioTaskScheduler};
use edge_ddns_core::UpdateService;

use crate::config::AppConfig;

pub struct AppState {
    pub service: Arc<UpdateService>,
    pub docs_url: String,
    pub peer_addr_fallback: bool,
}

impl AppState {
    pub fn new(service: UpdateService, docs_url: impl Into<String>, peer_addr_fallback: bool) -> Self {
        Self {
            service: Arc::new(service),
            docs_url: docs_url.into(),
            peer_addr_fallback,
        }
    }

    /// Real providers, in-memory cache (if enabled), tokio scheduler.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let factory = DefaultProviderFactory::new(config.client_options());
        let mut service = UpdateService::new(Arc::new(factory), config.update_service_config()?);
        if config.ddns.cache_enabled {
            service = service
                .with_cache(Arc::new(InMemoryCacheStore::new()))
                .with_scheduler(Arc::new(TokioTaskScheduler));
        }
        Ok(Self::new(
            service,
            config.server.docs_url.clone(),
            config.server.peer_addr_fallback,
        ))
    }
}
