//! Provider 工厂抽象 Trait

use std::sync::Arc;

use edge_ddns_provider::{
    create_provider, ClientOptions, DnsProvider, ProviderCredentials, ProviderKind,
    Result as ProviderResult,
};

use crate::types::Credential;

/// Builds a provider client for one request.
///
/// Clients are cheap and credentials differ per call, so nothing is pooled.
pub trait ProviderFactory: Send + Sync {
    fn create(&self, kind: ProviderKind, credential: &Credential)
        -> ProviderResult<Arc<dyn DnsProvider>>;
}

/// Maps a detected kind plus raw credential onto [`ProviderCredentials`] and
/// delegates to [`create_provider`].
#[derive(Debug, Clone, Default)]
pub struct DefaultProviderFactory {
    options: ClientOptions,
}

impl DefaultProviderFactory {
    #[must_use]
    pub fn new(options: ClientOptions) -> Self {
        Self { options }
    }
}

/// Credential → typed provider credentials.
///
/// Cloudflare takes a single token: the secret when present, else the id.
pub fn provider_credentials(kind: ProviderKind, credential: &Credential) -> ProviderCredentials {
    let Credential { id, secret } = credential.clone();
    match kind {
        ProviderKind::Aliyun => ProviderCredentials::Aliyun {
            access_key_id: id,
            access_key_secret: secret,
        },
        ProviderKind::Tencent => ProviderCredentials::Tencent {
            secret_id: id,
            secret_key: secret,
        },
        ProviderKind::Cloudflare => ProviderCredentials::Cloudflare {
            api_token: if secret.is_empty() { id } else { secret },
            zone_id: None,
        },
    }
}

impl ProviderFactory for DefaultProviderFactory {
    fn create(
        &self,
        kind: ProviderKind,
        credential: &Credential,
    ) -> ProviderResult<Arc<dyn DnsProvider>> {
        create_provider(provider_credentials(kind, credential), &self.options)
    }
}
