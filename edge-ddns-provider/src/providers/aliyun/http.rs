//! 阿里云 HTTP 请求（签名 + 发送 + 错误信封解析）

use chrono::Utc;
use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::AliyunProvider;
use super::types::serialize_form;

impl AliyunProvider {
    /// 构造已签名的请求（不发送），便于单测检查请求头
    pub(crate) fn build_request(
        &self,
        action: &str,
        body: String,
        timestamp: &str,
        nonce: &str,
    ) -> Result<RequestBuilder> {
        let signed = self.sign(action, &body, timestamp, nonce)?;

        let request = signed
            .headers
            .iter()
            .fold(self.client.post(self.endpoint.clone()), |req, (name, value)| {
                req.header(*name, value)
            })
            .header(reqwest::header::AUTHORIZATION, signed.authorization)
            .body(body);

        Ok(request)
    }

    /// 执行一次阿里云 RPC 调用
    pub(crate) async fn request<T: DeserializeOwned, P: Serialize>(
        &self,
        action: &str,
        params: &P,
        ctx: ErrorContext,
    ) -> Result<T> {
        let body = serialize_form(params)?;
        log::debug!("[ali] {action} body: {body}");

        let (status, text) = HttpUtils::execute_with_retry(
            || {
                // ISO 8601，不带毫秒；每次重试都重新签名
                let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
                let nonce = uuid::Uuid::new_v4().to_string();
                self.build_request(action, body.clone(), &timestamp, &nonce)
            },
            self.provider_name(),
            &format!("POST {} (Action: {action})", self.endpoint),
            self.max_retries,
        )
        .await?;

        let value = match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(v) => v,
            Err(_) if !(200..300).contains(&status) => return Err(self.http_error(status, &text)),
            Err(e) => return Err(self.parse_error(e)),
        };

        // 错误信封：{"Code": "...", "Message": "...", "RequestId": "..."}
        if let (Some(code), Some(message)) = (
            value.get("Code").and_then(|v| v.as_str()),
            value.get("Message").and_then(|v| v.as_str()),
        ) {
            log::warn!("[ali] {action} failed: {code} - {message}");
            return Err(self.map_error(RawApiError::with_code(code, message), ctx));
        }

        if !(200..300).contains(&status) {
            return Err(self.http_error(status, &text));
        }

        serde_json::from_value(value).map_err(|e| self.parse_error(e))
    }
}
