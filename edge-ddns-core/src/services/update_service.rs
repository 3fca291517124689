//! Reconciliation pipeline: one inbound update → one [`UpdateOutcome`]

use std::sync::Arc;
use std::time::Duration;

use edge_ddns_provider::{ProviderError, ProviderKind};
use futures::FutureExt;

use crate::services::detector::{detect_provider, normalize_credential};
use crate::services::encoder::encode;
use crate::services::normalizer::normalize_request;
use crate::services::whitelist::DomainWhitelist;
use crate::traits::{CacheStore, ProviderFactory, TaskScheduler};
use crate::types::{
    Credential, EncodedResponse, InboundRequest, ResponseDialect, UpdateOutcome, UpdateRequest,
};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Lower-cased fragments that mark an upstream error as an auth failure even
/// when the adapter could not map it to [`ProviderError::InvalidCredentials`].
const AUTH_ERROR_MARKERS: &[&str] = &[
    "invalidaccesskeyid",
    "authfailure",
    "unauthorized",
    "authentication error",
];

/// Pipeline settings.
#[derive(Debug, Clone)]
pub struct UpdateServiceConfig {
    pub whitelist: DomainWhitelist,
    /// Used when neither the credential nor the request names a provider.
    pub default_provider: Option<ProviderKind>,
    pub cache_ttl: Duration,
}

impl Default for UpdateServiceConfig {
    fn default() -> Self {
        Self {
            whitelist: DomainWhitelist::allow_all(),
            default_provider: Some(ProviderKind::Aliyun),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// DDNS 更新服务
pub struct UpdateService {
    factory: Arc<dyn ProviderFactory>,
    cache: Option<Arc<dyn CacheStore>>,
    scheduler: Option<Arc<dyn TaskScheduler>>,
    config: UpdateServiceConfig,
}

impl UpdateService {
    #[must_use]
    pub fn new(factory: Arc<dyn ProviderFactory>, config: UpdateServiceConfig) -> Self {
        Self {
            factory,
            cache: None,
            scheduler: None,
            config,
        }
    }

    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Cache writes go through `scheduler` instead of delaying the response.
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: Arc<dyn TaskScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn config(&self) -> &UpdateServiceConfig {
        &self.config
    }

    /// `DDNS:<provider-id>:<hostname>`
    pub fn cache_key(kind: ProviderKind, hostname: &str) -> String {
        format!("DDNS:{}:{hostname}", kind.id())
    }

    /// Normalize, reconcile and encode in one go.
    pub async fn handle(&self, inbound: &InboundRequest) -> EncodedResponse {
        let req = normalize_request(inbound);
        let outcome = self.process(&req).await;
        encode(
            ResponseDialect::from_path(&inbound.path),
            outcome,
            req.ip.as_deref().unwrap_or_default(),
        )
    }

    /// Run the pipeline for one normalized request.
    pub async fn process(&self, req: &UpdateRequest) -> UpdateOutcome {
        if req.username.is_none() && req.password.is_none() {
            log::debug!("Rejecting update without credentials");
            return UpdateOutcome::AuthFailed;
        }
        let Some(hostname) = req.hostname.as_deref() else {
            log::debug!("Rejecting update without hostname");
            return UpdateOutcome::BadInput;
        };
        let Some(ip) = req.ip.as_deref() else {
            log::warn!("Could not determine client IP for {hostname}");
            return UpdateOutcome::TransportError;
        };

        if !self.config.whitelist.is_allowed(hostname) {
            log::warn!("Domain {hostname} rejected by whitelist");
            return UpdateOutcome::DomainRejected;
        }

        let credential = Credential::from(req);
        let Some(kind) = self.resolve_provider(req, &credential) else {
            log::info!("No provider for {hostname} ({credential:?})");
            return UpdateOutcome::AuthFailed;
        };

        let cache_key = Self::cache_key(kind, hostname);
        if self.cached_ip(&cache_key).await.as_deref() == Some(ip) {
            log::info!("[{kind}] {hostname} -> {ip} unchanged (cache hit)");
            return UpdateOutcome::Skipped;
        }

        let credential = normalize_credential(kind, &credential);
        let result = match self.factory.create(kind, &credential) {
            Ok(provider) => provider.sync_record(hostname, ip).await,
            Err(e) => Err(e),
        };

        let outcome = match result {
            Ok(sync) => UpdateOutcome::from(sync),
            Err(e) => {
                if e.is_expected() {
                    log::warn!("API error [{kind}] for {hostname}: {e}");
                } else {
                    log::error!("API error [{kind}] for {hostname}: {e}");
                }
                classify_provider_error(&e)
            }
        };

        if outcome.is_success() {
            self.store_cache(cache_key, ip.to_string()).await;
        }
        outcome
    }

    /// Detected kind → requested provider → configured default.
    ///
    /// A requested provider that cannot be parsed yields `None`.
    fn resolve_provider(&self, req: &UpdateRequest, credential: &Credential) -> Option<ProviderKind> {
        if let Some(kind) = detect_provider(credential) {
            return Some(kind);
        }
        if let Some(requested) = req.requested_provider.as_deref() {
            return match requested.parse() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    log::warn!("{e}");
                    None
                }
            };
        }
        self.config.default_provider
    }

    async fn cached_ip(&self, key: &str) -> Option<String> {
        let cache = self.cache.as_ref()?;
        match cache.get(key).await {
            Ok(value) => value,
            Err(e) => {
                log::debug!("Cache read failed for {key}: {e}");
                None
            }
        }
    }

    async fn store_cache(&self, key: String, ip: String) {
        let Some(cache) = self.cache.clone() else {
            return;
        };
        let ttl = self.config.cache_ttl;
        let task = async move {
            if let Err(e) = cache.put(&key, &ip, ttl).await {
                log::debug!("Cache write failed for {key}: {e}");
            }
        };
        match &self.scheduler {
            Some(scheduler) => scheduler.spawn(task.boxed()),
            None => task.await,
        }
    }
}

/// Map a provider failure onto the client-visible outcome.
pub fn classify_provider_error(error: &ProviderError) -> UpdateOutcome {
    if matches!(error, ProviderError::InvalidCredentials { .. }) {
        return UpdateOutcome::AuthFailed;
    }
    let text = error.to_string().to_lowercase();
    if AUTH_ERROR_MARKERS.iter().any(|m| text.contains(m)) {
        UpdateOutcome::AuthFailed
    } else {
        UpdateOutcome::TransportError
    }
}
