//! `DNSPod` API 类型定义

use serde::{Deserialize, Serialize};

// ============ 请求 ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeRecordListRequest<'a> {
    pub domain: &'a str,
    pub subdomain: &'a str,
    pub record_type: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateRecordRequest<'a> {
    pub domain: &'a str,
    pub sub_domain: &'a str,
    pub record_type: &'a str,
    pub record_line: &'a str,
    pub value: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModifyRecordRequest<'a> {
    pub domain: &'a str,
    pub record_id: u64,
    pub sub_domain: &'a str,
    pub record_type: &'a str,
    pub record_line: &'a str,
    pub value: &'a str,
}

// ============ 响应 ============

/// `{"Response": {...}}` 中的错误对象
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TencentError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordListResponse {
    #[serde(default)]
    pub record_list: Vec<TencentRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TencentRecord {
    pub record_id: u64,
    #[serde(rename = "Type")]
    pub record_type: String,
    pub value: String,
}

/// `CreateRecord` / `ModifyRecord` 的公共响应
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordIdResponse {
    pub record_id: u64,
}
