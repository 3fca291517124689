//! `DNSPod` HTTP 请求

use chrono::Utc;
use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::types::TencentError;
use super::{DNSPOD_VERSION, DnspodProvider, JSON_CONTENT_TYPE};

impl DnspodProvider {
    /// 构造已签名的请求（不发送）
    ///
    /// Authorization 先按 content-type/host 计算，随后才附加 X-TC-* 头。
    pub(crate) fn build_request(
        &self,
        action: &str,
        payload: String,
        timestamp: i64,
    ) -> Result<RequestBuilder> {
        let authorization = self.sign(&payload, timestamp)?;

        Ok(self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(reqwest::header::HOST, &self.host)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .header("X-TC-Action", action)
            .header("X-TC-Version", DNSPOD_VERSION)
            .header("X-TC-Timestamp", timestamp.to_string())
            .body(payload))
    }

    /// 执行腾讯云 API 请求
    ///
    /// HTTP 200 也可能携带 `Response.Error`，两者都视为失败。
    pub(crate) async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        action: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload = serde_json::to_string(body).map_err(|e| self.serialization_error(e))?;
        log::debug!("[tencent] {action} body: {payload}");

        let (status, text) = HttpUtils::execute_with_retry(
            || self.build_request(action, payload.clone(), Utc::now().timestamp()),
            self.provider_name(),
            &format!("POST {} (Action: {action})", self.endpoint),
            self.max_retries,
        )
        .await?;

        let mut value: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(_) if !(200..300).contains(&status) => return Err(self.http_error(status, &text)),
            Err(e) => return Err(self.parse_error(e)),
        };

        let Some(response) = value.get_mut("Response").map(Value::take) else {
            return Err(if (200..300).contains(&status) {
                self.parse_error("missing Response envelope")
            } else {
                self.http_error(status, &text)
            });
        };

        if let Some(error) = response.get("Error") {
            let error: TencentError =
                serde_json::from_value(error.clone()).map_err(|e| self.parse_error(e))?;
            log::warn!("[tencent] {action} failed: {} - {}", error.code, error.message);
            return Err(self.map_error(RawApiError::with_code(error.code, error.message), ctx));
        }

        if !(200..300).contains(&status) {
            return Err(self.http_error(status, &text));
        }

        serde_json::from_value(response).map_err(|e| self.parse_error(e))
    }
}
