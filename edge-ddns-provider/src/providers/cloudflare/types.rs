//! Cloudflare API 类型定义

use serde::{Deserialize, Serialize};

/// Cloudflare API 通用响应
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<CloudflareError>,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareZone {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareDnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
    #[serde(default)]
    pub proxied: Option<bool>,
}

/// 创建 / 更新记录的请求体
#[derive(Debug, Serialize)]
pub struct DnsRecordBody<'a> {
    #[serde(rename = "type")]
    pub record_type: &'a str,
    pub name: &'a str,
    pub content: &'a str,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failure_envelope() {
        let resp: CloudflareResponse<Vec<CloudflareZone>> = serde_json::from_str(
            r#"{"success":false,"errors":[{"code":10000,"message":"Authentication error"}],"messages":[],"result":null}"#,
        )
        .unwrap_or_else(|e| panic!("{e}"));
        assert!(!resp.success);
        assert_eq!(resp.errors[0].code, 10000);
        assert!(resp.result.is_none());
    }

    #[test]
    fn record_body_omits_unknown_proxied() {
        let body = DnsRecordBody {
            record_type: "A",
            name: "home.example.com",
            content: "1.2.3.4",
            ttl: 1,
            proxied: None,
        };
        let json = serde_json::to_value(&body).unwrap_or_default();
        assert_eq!(json["type"], "A");
        assert_eq!(json["ttl"], 1);
        assert!(json.get("proxied").is_none());
    }
}
