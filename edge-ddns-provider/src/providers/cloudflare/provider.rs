//! Cloudflare DnsProvider trait 实现

use async_trait::async_trait;
use reqwest::Method;

use crate::error::{ProviderError, Result};
use crate::traits::{DnsProvider, ErrorContext};
use crate::types::{ExistingRecord, ProviderKind, RecordTarget};

use super::types::{CloudflareDnsRecord, CloudflareZone, DnsRecordBody};
use super::{CF_AUTO_TTL, CloudflareProvider};

/// 无请求体时的占位类型
type NoBody = ();

impl CloudflareProvider {
    /// 返回 zone id；未配置时按注册域名查询一次并缓存
    pub(crate) async fn zone_id(&self, domain: &str) -> Result<&str> {
        self.zone_id
            .get_or_try_init(|| async {
                let zones: Vec<CloudflareZone> = self
                    .call(
                        Method::GET,
                        &format!(
                            "/zones?name={}&status=active",
                            urlencoding::encode(domain)
                        ),
                        None::<&NoBody>,
                        ErrorContext::for_domain(domain),
                    )
                    .await?;

                let zone = zones
                    .into_iter()
                    .next()
                    .ok_or_else(|| ProviderError::DomainNotFound {
                        provider: "cloudflare".to_string(),
                        domain: domain.to_string(),
                        raw_message: Some("no active zone".to_string()),
                    })?;
                log::debug!("[cloudflare] zone {} -> {}", zone.name, zone.id);
                Ok::<_, ProviderError>(zone.id)
            })
            .await
            .map(String::as_str)
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Cloudflare
    }

    async fn find_record(&self, target: &RecordTarget) -> Result<Option<ExistingRecord>> {
        let domain = &target.parts.registrable_domain;
        let zone_id = self.zone_id(domain).await?;
        let record_type = target.record_type.as_str();

        let records: Vec<CloudflareDnsRecord> = self
            .call(
                Method::GET,
                &format!(
                    "/zones/{zone_id}/dns_records?type={record_type}&name={}",
                    urlencoding::encode(&target.fqdn)
                ),
                None::<&NoBody>,
                ErrorContext::for_domain(domain),
            )
            .await?;

        Ok(records
            .into_iter()
            .find(|r| r.record_type.eq_ignore_ascii_case(record_type))
            .map(|r| ExistingRecord {
                id: r.id,
                record_type: target.record_type,
                value: r.content,
                proxied: r.proxied,
            }))
    }

    async fn create_record(&self, target: &RecordTarget, value: &str) -> Result<()> {
        let domain = &target.parts.registrable_domain;
        let zone_id = self.zone_id(domain).await?;

        let created: CloudflareDnsRecord = self
            .call(
                Method::POST,
                &format!("/zones/{zone_id}/dns_records"),
                Some(&DnsRecordBody {
                    record_type: target.record_type.as_str(),
                    name: &target.fqdn,
                    content: value,
                    ttl: CF_AUTO_TTL,
                    proxied: Some(false),
                }),
                ErrorContext::for_domain(domain),
            )
            .await?;
        log::debug!("[cloudflare] created record {}", created.id);
        Ok(())
    }

    async fn update_record(
        &self,
        target: &RecordTarget,
        existing: &ExistingRecord,
        value: &str,
    ) -> Result<()> {
        let domain = &target.parts.registrable_domain;
        let zone_id = self.zone_id(domain).await?;

        // PUT 覆盖整条记录，proxied 沿用现值
        let _: CloudflareDnsRecord = self
            .call(
                Method::PUT,
                &format!("/zones/{zone_id}/dns_records/{}", existing.id),
                Some(&DnsRecordBody {
                    record_type: target.record_type.as_str(),
                    name: &target.fqdn,
                    content: value,
                    ttl: CF_AUTO_TTL,
                    proxied: existing.proxied,
                }),
                ErrorContext::for_record(domain, &existing.id),
            )
            .await?;
        Ok(())
    }
}
