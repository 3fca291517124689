//! 阿里云 DnsProvider trait 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{DnsProvider, ErrorContext};
use crate::types::{ExistingRecord, ProviderKind, RecordTarget};

use super::AliyunProvider;
use super::types::{
    AddDomainRecordRequest, DescribeSubDomainRecordsRequest, DescribeSubDomainRecordsResponse,
    RecordIdResponse, UpdateDomainRecordRequest,
};

#[async_trait]
impl DnsProvider for AliyunProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Aliyun
    }

    async fn find_record(&self, target: &RecordTarget) -> Result<Option<ExistingRecord>> {
        let record_type = target.record_type.as_str();
        let resp: DescribeSubDomainRecordsResponse = self
            .request(
                "DescribeSubDomainRecords",
                &DescribeSubDomainRecordsRequest {
                    sub_domain: &target.fqdn,
                    record_type,
                },
                ErrorContext::for_domain(&target.parts.registrable_domain),
            )
            .await?;

        Ok(resp
            .domain_records
            .record
            .into_iter()
            .find(|r| r.record_type.eq_ignore_ascii_case(record_type))
            .map(|r| ExistingRecord {
                id: r.record_id,
                record_type: target.record_type,
                value: r.value,
                proxied: None,
            }))
    }

    async fn create_record(&self, target: &RecordTarget, value: &str) -> Result<()> {
        let resp: RecordIdResponse = self
            .request(
                "AddDomainRecord",
                &AddDomainRecordRequest {
                    domain_name: &target.parts.registrable_domain,
                    rr: &target.parts.subdomain,
                    record_type: target.record_type.as_str(),
                    value,
                },
                ErrorContext::for_domain(&target.parts.registrable_domain),
            )
            .await?;
        log::debug!("[ali] created record {}", resp.record_id);
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
                "UpdateDomainRecord",
                &UpdateDomainRecordRequest {
                    record_id: &existing.id,
                    rr: &target.parts.subdomain,
                    record_type: target.record_type.as_str(),
                    value,
                },
                ErrorContext::for_record(&target.parts.registrable_domain, &existing.id),
            )
            .await?;
        Ok(())
    }
}
