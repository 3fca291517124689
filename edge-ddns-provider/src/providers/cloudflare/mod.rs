//! Cloudflare DNS Provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;
use tokio::sync::OnceCell;

use crate::error::Result;
use crate::providers::common::{create_http_client, parse_endpoint};
use crate::types::ClientOptions;

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// `ttl = 1` means "automatic" on Cloudflare.
pub(crate) const CF_AUTO_TTL: u32 = 1;

/// Cloudflare DNS provider (API token auth).
///
/// The zone id is either supplied up front or looked up once by the
/// registrable domain and then reused for the lifetime of the instance.
pub struct CloudflareProvider {
    pub(crate) client: Client,
    /// API base without trailing slash.
    pub(crate) base_url: String,
    pub(crate) api_token: String,
    pub(crate) zone_id: OnceCell<String>,
    pub(crate) max_retries: u32,
}

pub struct CloudflareProviderBuilder {
    api_token: String,
    zone_id: Option<String>,
    base_url: String,
    options: ClientOptions,
}

impl CloudflareProviderBuilder {
    fn new(api_token: String) -> Self {
        Self {
            api_token,
            zone_id: None,
            base_url: CF_API_BASE.to_string(),
            options: ClientOptions::default(),
        }
    }

    /// Skip the `/zones?name=` lookup.
    pub fn zone_id(mut self, zone_id: Option<String>) -> Self {
        self.zone_id = zone_id.filter(|z| !z.is_empty());
        self
    }

    pub fn endpoint(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.options.max_retries = retries;
        self
    }

    pub fn build(self) -> Result<CloudflareProvider> {
        // 只校验格式；路径前缀原样保留
        parse_endpoint("cloudflare", &self.base_url)?;
        Ok(CloudflareProvider {
            client: create_http_client("cloudflare", &self.options)?,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            api_token: self.api_token,
            zone_id: OnceCell::new_with(self.zone_id),
            max_retries: self.options.max_retries,
        })
    }
}

impl CloudflareProvider {
    pub fn new(api_token: String) -> Result<Self> {
        Self::builder(api_token).build()
    }

    pub fn builder(api_token: String) -> CloudflareProviderBuilder {
        CloudflareProviderBuilder::new(api_token)
    }
}
