//! Cloudflare HTTP 请求

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::CloudflareProvider;
use super::types::CloudflareResponse;

impl CloudflareProvider {
    /// 构造带 Bearer Token 的请求（不发送）
    pub(crate) fn build_request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> RequestBuilder {
        let request = self
            .client
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(&self.api_token);
        match body {
            Some(body) => request.json(body),
            None => request,
        }
    }

    /// 发送请求并解包 `{"success": .., "result": .., "errors": [..]}`
    pub(crate) async fn call<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        ctx: ErrorContext,
    ) -> Result<T> {
        let label = format!("{method} {path}");
        let (status, text) = HttpUtils::execute_with_retry(
            || Ok(self.build_request(method.clone(), path, body)),
            self.provider_name(),
            &label,
            self.max_retries,
        )
        .await?;

        // 非 2xx 时 Cloudflare 通常仍返回标准信封，解析失败才退化为 HTTP 错误
        let response: CloudflareResponse<T> = if (200..300).contains(&status) {
            HttpUtils::parse_json(&text, self.provider_name())?
        } else {
            serde_json::from_str(&text).map_err(|_| self.http_error(status, &text))?
        };

        if !response.success {
            let raw = response.errors.into_iter().next().map_or_else(
                || RawApiError::new(format!("HTTP {status}: request failed without error detail")),
                |e| RawApiError::with_code(e.code.to_string(), e.message),
            );
            log::warn!("[cloudflare] {label} failed: {:?} - {}", raw.code, raw.message);
            return Err(self.map_error(raw, ctx));
        }

        response
            .result
            .ok_or_else(|| self.parse_error("missing result field"))
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;

    use super::super::CloudflareProvider;
    use super::super::types::DnsRecordBody;

    #[test]
    fn bearer_token_and_json_body() {
        let provider =
            CloudflareProvider::new("cf-token".into()).unwrap_or_else(|e| panic!("{e}"));
        let body = DnsRecordBody {
            record_type: "A",
            name: "www.example.com",
            content: "1.2.3.4",
            ttl: 1,
            proxied: Some(false),
        };
        let request = provider
            .build_request(Method::POST, "/zones/z1/dns_records", Some(&body))
            .build()
            .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(
            request.url().as_str(),
            "https://api.cloudflare.com/client/v4/zones/z1/dns_records"
        );
        assert_eq!(request.headers()["authorization"], "Bearer cf-token");
        assert_eq!(request.headers()["content-type"], "application/json");
    }
}
