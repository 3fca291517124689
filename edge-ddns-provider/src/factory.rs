//! Provider factory.

use std::sync::Arc;

use crate::error::{ProviderError, Result};
use crate::traits::DnsProvider;
use crate::types::{ClientOptions, ProviderCredentials};

#[cfg(feature = "aliyun")]
use crate::providers::AliyunProvider;
#[cfg(feature = "cloudflare")]
use crate::providers::CloudflareProvider;
#[cfg(feature = "dnspod")]
use crate::providers::DnspodProvider;

/// Creates a [`DnsProvider`] for the given credentials.
///
/// The concrete adapter is picked by the [`ProviderCredentials`] variant.
/// A variant whose cargo feature is disabled yields
/// [`ProviderError::InvalidParameter`].
///
/// ```rust,no_run
/// use edge_ddns_provider::{ClientOptions, ProviderCredentials, create_provider};
///
/// let provider = create_provider(
///     ProviderCredentials::Cloudflare {
///         api_token: "your-token".to_string(),
///         zone_id: None,
///     },
///     &ClientOptions::default(),
/// );
/// ```
pub fn create_provider(
    credentials: ProviderCredentials,
    options: &ClientOptions,
) -> Result<Arc<dyn DnsProvider>> {
    let kind = credentials.kind();
    match credentials {
        #[cfg(feature = "aliyun")]
        ProviderCredentials::Aliyun {
            access_key_id,
            access_key_secret,
        } => Ok(Arc::new(
            AliyunProvider::builder(access_key_id, access_key_secret)
                .options(options.clone())
                .build()?,
        )),
        #[cfg(feature = "dnspod")]
        ProviderCredentials::Tencent {
            secret_id,
            secret_key,
        } => Ok(Arc::new(
            DnspodProvider::builder(secret_id, secret_key)
                .options(options.clone())
                .build()?,
        )),
        #[cfg(feature = "cloudflare")]
        ProviderCredentials::Cloudflare { api_token, zone_id } => Ok(Arc::new(
            CloudflareProvider::builder(api_token)
                .zone_id(zone_id)
                .options(options.clone())
                .build()?,
        )),
        #[allow(unreachable_patterns)]
        _ => Err(ProviderError::InvalidParameter {
            provider: kind.id().to_string(),
            param: "provider".to_string(),
            detail: format!("{kind} support is not compiled in"),
        }),
    }
}
