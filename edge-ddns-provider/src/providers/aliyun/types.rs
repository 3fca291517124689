//! 阿里云 API 类型定义和表单编码

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProviderError, Result};

// ============ 请求参数 ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeSubDomainRecordsRequest<'a> {
    pub sub_domain: &'a str,
    #[serde(rename = "Type")]
    pub record_type: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddDomainRecordRequest<'a> {
    pub domain_name: &'a str,
    #[serde(rename = "RR")]
    pub rr: &'a str,
    #[serde(rename = "Type")]
    pub record_type: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateDomainRecordRequest<'a> {
    pub record_id: &'a str,
    #[serde(rename = "RR")]
    pub rr: &'a str,
    #[serde(rename = "Type")]
    pub record_type: &'a str,
    pub value: &'a str,
}

// ============ 响应 ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeSubDomainRecordsResponse {
    #[serde(default)]
    pub domain_records: DomainRecords,
}

#[derive(Debug, Default, Deserialize)]
pub struct DomainRecords {
    #[serde(rename = "Record", default)]
    pub record: Vec<AliyunRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AliyunRecord {
    pub record_id: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    pub value: String,
}

/// `AddDomainRecord` / `UpdateDomainRecord` 的公共响应
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordIdResponse {
    pub record_id: String,
}

// ============ RFC3986 编码 ============

/// RFC3986 percent-encoding（未保留字符原样输出）
pub fn url_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

/// 将参数结构体编码为 `application/x-www-form-urlencoded` 请求体
///
/// 键按字典序排列，`null` 值被省略。
pub fn serialize_form<T: Serialize>(params: &T) -> Result<String> {
    let serialization_error = |detail: String| ProviderError::SerializationError {
        provider: "ali".to_string(),
        detail,
    };

    let value = serde_json::to_value(params).map_err(|e| serialization_error(e.to_string()))?;
    let Value::Object(map) = value else {
        return Err(serialization_error("parameters must be a struct".to_string()));
    };

    let pairs: BTreeMap<String, String> = map
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null => return None,
                Value::String(s) => s,
                other => other.to_string(),
            };
            Some((key, value))
        })
        .collect();

    Ok(pairs
        .iter()
        .map(|(k, v)| format!("{}={}", url_encode(k), url_encode(v)))
        .collect::<Vec<_>>()
        .join("&"))
}
