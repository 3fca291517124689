//! 腾讯云 `DNSPod` Provider

mod error;
mod http;
mod provider;
mod sign;
mod types;

use reqwest::{Client, Url};

use crate::error::Result;
use crate::providers::common::{create_http_client, parse_endpoint};
use crate::types::ClientOptions;

pub(crate) const DNSPOD_ENDPOINT: &str = "https://dnspod.tencentcloudapi.com";
pub(crate) const DNSPOD_SERVICE: &str = "dnspod";
pub(crate) const DNSPOD_VERSION: &str = "2021-03-23";
pub(crate) const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
/// 默认线路
pub(crate) const DEFAULT_RECORD_LINE: &str = "默认";

/// Tencent Cloud `DNSPod` provider (API 3.0, TC3-HMAC-SHA256).
pub struct DnspodProvider {
    pub(crate) client: Client,
    pub(crate) endpoint: Url,
    pub(crate) host: String,
    pub(crate) secret_id: String,
    pub(crate) secret_key: String,
    pub(crate) max_retries: u32,
}

/// `DNSPod` Provider Builder
pub struct DnspodProviderBuilder {
    secret_id: String,
    secret_key: String,
    endpoint: String,
    options: ClientOptions,
}

impl DnspodProviderBuilder {
    fn new(secret_id: String, secret_key: String) -> Self {
        Self {
            secret_id,
            secret_key,
            endpoint: DNSPOD_ENDPOINT.to_string(),
            options: ClientOptions::default(),
        }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
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

    pub fn build(self) -> Result<DnspodProvider> {
        let (endpoint, host) = parse_endpoint("tencent", &self.endpoint)?;
        Ok(DnspodProvider {
            client: create_http_client("tencent", &self.options)?,
            endpoint,
            host,
            secret_id: self.secret_id,
            secret_key: self.secret_key,
            max_retries: self.options.max_retries,
        })
    }
}

impl DnspodProvider {
    pub fn new(secret_id: String, secret_key: String) -> Result<Self> {
        Self::builder(secret_id, secret_key).build()
    }

    pub fn builder(secret_id: String, secret_key: String) -> DnspodProviderBuilder {
        DnspodProviderBuilder::new(secret_id, secret_key)
    }
}
