//! `DNSPod` DnsProvider trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::{DnsProvider, ErrorContext};
use crate::types::{ExistingRecord, ProviderKind, RecordTarget};

use super::types::{
    CreateRecordRequest, DescribeRecordListRequest, ModifyRecordRequest, RecordIdResponse,
    RecordListResponse,
};
use super::{DEFAULT_RECORD_LINE, DnspodProvider};

impl DnspodProvider {
    /// `DNSPod` 记录 ID 为整数
    fn numeric_record_id(id: &str) -> Result<u64> {
        id.parse().map_err(|_| ProviderError::InvalidParameter {
            provider: "tencent".to_string(),
            param: "record_id".to_string(),
            detail: format!("'{id}' is not a numeric record id"),
        })
    }
}

#[async_trait]
impl DnsProvider for DnspodProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Tencent
    }

    async fn find_record(&self, target: &RecordTarget) -> Result<Option<ExistingRecord>> {
        let record_type = target.record_type.as_str();
        let result = self
            .request::<RecordListResponse, _>(
                "DescribeRecordList",
                &DescribeRecordListRequest {
                    domain: &target.parts.registrable_domain,
                    subdomain: &target.parts.subdomain,
                    record_type,
                },
                ErrorContext::for_domain(&target.parts.registrable_domain),
            )
            .await;

        let resp = match result {
            Ok(resp) => resp,
            // 空列表以 ResourceNotFound.NoDataOfRecord 错误返回
            Err(ProviderError::RecordNotFound { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(resp
            .record_list
            .into_iter()
            .find(|r| r.record_type.eq_ignore_ascii_case(record_type))
            .map(|r| ExistingRecord {
                id: r.record_id.to_string(),
                record_type: target.record_type,
                value: r.value,
                proxied: None,
            }))
    }

    async fn create_record(&self, target: &RecordTarget, value: &str) -> Result<()> {
        let resp: RecordIdResponse = self
            .request(
                "CreateRecord",
                &CreateRecordRequest {
                    domain: &target.parts.registrable_domain,
                    sub_domain: &target.parts.subdomain,
                    record_type: target.record_type.as_str(),
                    record_line: DEFAULT_RECORD_LINE,
                    value,
                },
                ErrorContext::for_domain(&target.parts.registrable_domain),
            )
            .await?;
        log::debug!("[tencent] created record {}", resp.record_id);
        Ok(())
    }

    async fn update_record(
        &self,
        target: &RecordTarget,
        existing: &ExistingRecord,
        value: &str,
    ) -> Result<()> {
        let _: RecordIdResponse = self
            .request(
                "ModifyRecord",
                &ModifyRecordRequest {
                    domain: &target.parts.registrable_domain,
                    record_id: Self::numeric_record_id(&existing.id)?,
                    sub_domain: &target.parts.subdomain,
                    record_type: target.record_type.as_str(),
                    record_line: DEFAULT_RECORD_LINE,
                    value,
                },
                ErrorContext::for_record(&target.parts.registrable_domain, &existing.id),
            )
            .await?;
        Ok(())
    }
}
