//! 阿里云 DNS Provider

mod error;
mod http;
mod provider;
mod sign;
mod types;

use reqwest::{Client, Url};

use crate::error::Result;
use crate::providers::common::{create_http_client, parse_endpoint};
use crate::types::ClientOptions;

pub(crate) const ALIYUN_DNS_ENDPOINT: &str = "https://alidns.aliyuncs.com";
pub(crate) const ALIYUN_DNS_VERSION: &str = "2015-01-09";
pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Aliyun DNS provider.
///
/// Every call is an RPC-style `POST /` with form-encoded parameters in the
/// body, signed with ACS3-HMAC-SHA256.
///
/// ```rust,no_run
/// use edge_ddns_provider::{AliyunProvider, DnsProvider};
///
/// # async fn run() -> edge_ddns_provider::Result<()> {
/// let provider = AliyunProvider::new(
///     "LTAI5tExampleKeyId".to_string(),
///     "example-secret".to_string(),
/// )?;
/// provider.sync_record("home.example.com", "203.0.113.7").await?;
/// # Ok(())
/// # }
/// ```
pub struct AliyunProvider {
    pub(crate) client: Client,
    pub(crate) endpoint: Url,
    /// Signed `host` header value.
    pub(crate) host: String,
    pub(crate) access_key_id: String,
    pub(crate) access_key_secret: String,
    pub(crate) max_retries: u32,
}

/// Builder for [`AliyunProvider`].
pub struct AliyunProviderBuilder {
    access_key_id: String,
    access_key_secret: String,
    endpoint: String,
    options: ClientOptions,
}

impl AliyunProviderBuilder {
    fn new(access_key_id: String, access_key_secret: String) -> Self {
        Self {
            access_key_id,
            access_key_secret,
            endpoint: ALIYUN_DNS_ENDPOINT.to_string(),
            options: ClientOptions::default(),
        }
    }

    /// Override the API endpoint (default `https://alidns.aliyuncs.com`).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Timeouts and retry count.
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.options.max_retries = retries;
        self
    }

    pub fn build(self) -> Result<AliyunProvider> {
        let (endpoint, host) = parse_endpoint("ali", &self.endpoint)?;
        Ok(AliyunProvider {
            client: create_http_client("ali", &self.options)?,
            endpoint,
            host,
            access_key_id: self.access_key_id,
            access_key_secret: self.access_key_secret,
            max_retries: self.options.max_retries,
        })
    }
}

impl AliyunProvider {
    /// Default endpoint, default [`ClientOptions`].
    pub fn new(access_key_id: String, access_key_secret: String) -> Result<Self> {
        Self::builder(access_key_id, access_key_secret).build()
    }

    pub fn builder(access_key_id: String, access_key_secret: String) -> AliyunProviderBuilder {
        AliyunProviderBuilder::new(access_key_id, access_key_secret)
    }
}
