//! Provider 公共工具函数

use hmac::{Hmac, Mac};
use reqwest::{Client, Url};
use sha2::{Digest, Sha256};

use crate::error::{ProviderError, Result};
use crate::types::ClientOptions;

type HmacSha256 = Hmac<Sha256>;

// ============ HTTP Client ============

/// 按 `ClientOptions` 创建带超时配置的 HTTP Client
pub fn create_http_client(provider: &str, options: &ClientOptions) -> Result<Client> {
    Client::builder()
        .connect_timeout(options.connect_timeout)
        .timeout(options.request_timeout)
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("failed to build HTTP client: {e}"),
        })
}

/// 解析 endpoint，并返回参与签名的 host（非默认端口时带端口）
pub fn parse_endpoint(provider: &str, endpoint: &str) -> Result<(Url, String)> {
    let invalid = |detail: String| ProviderError::InvalidParameter {
        provider: provider.to_string(),
        param: "endpoint".to_string(),
        detail,
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(format!("{endpoint}: {e}")))?;
    let host = url
        .host_str()
        .ok_or_else(|| invalid(format!("{endpoint}: missing host")))?;
    let host = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    Ok((url, host))
}

// ============ 哈希 ============

/// HMAC-SHA256（aliyun / dnspod 签名使用）
pub fn hmac_sha256(provider: &str, key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| ProviderError::InvalidParameter {
        provider: provider.to_string(),
        param: "secret".to_string(),
        detail: e.to_string(),
    })?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// 小写 hex 编码的 SHA256
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
