use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{ExistingRecord, ProviderKind, RecordTarget, SyncOutcome};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（各 Provider 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文（内部使用），映射错误时补充域名/记录信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    pub record_id: Option<String>,
    pub domain: Option<String>,
}

impl ErrorContext {
    pub fn for_domain(domain: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            ..Self::default()
        }
    }

    pub fn for_record(domain: &str, record_id: &str) -> Self {
        Self {
            record_id: Some(record_id.to_string()),
            domain: Some(domain.to_string()),
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
pub(crate) trait ProviderErrorMapper {
    /// Provider 标识符，与 [`ProviderKind::id`] 一致
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    fn serialization_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::SerializationError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 非 2xx 且响应体无法识别时使用
    fn http_error(&self, status: u16, body: &str) -> ProviderError {
        match status {
            401 => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(crate::utils::log_sanitizer::truncate_for_log(body)),
            },
            _ => ProviderError::NetworkError {
                provider: self.provider_name().to_string(),
                detail: format!(
                    "HTTP {status}: {}",
                    crate::utils::log_sanitizer::truncate_for_log(body)
                ),
            },
        }
    }

    /// 未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// A DNS backend able to read and write a single A/AAAA record.
///
/// Adapters implement the three primitives; [`sync_record`](Self::sync_record)
/// drives them and is what callers use.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Canonical provider id (`ali`, `tencent`, `cloudflare`).
    fn id(&self) -> &'static str {
        self.kind().id()
    }

    /// First record of `target.record_type` at `target.fqdn`, if any.
    async fn find_record(&self, target: &RecordTarget) -> Result<Option<ExistingRecord>>;

    async fn create_record(&self, target: &RecordTarget, value: &str) -> Result<()>;

    async fn update_record(
        &self,
        target: &RecordTarget,
        existing: &ExistingRecord,
        value: &str,
    ) -> Result<()>;

    /// Make `hostname` resolve to `ip`.
    ///
    /// Reads the current record first and issues no write when it already
    /// holds `ip`; otherwise updates it in place or creates it.
    async fn sync_record(&self, hostname: &str, ip: &str) -> Result<SyncOutcome> {
        let target = RecordTarget::new(hostname, ip);
        if target.parts.registrable_domain.is_empty() {
            return Err(ProviderError::InvalidParameter {
                provider: self.id().to_string(),
                param: "hostname".to_string(),
                detail: format!("'{hostname}' has no labels"),
            });
        }

        match self.find_record(&target).await? {
            Some(existing) if existing.value == ip => {
                log::info!(
                    "[{}] {} {} already points to {ip}",
                    self.id(),
                    target.fqdn,
                    target.record_type
                );
                Ok(SyncOutcome::Skipped)
            }
            Some(existing) => {
                self.update_record(&target, &existing, ip).await?;
                log::info!(
                    "[{}] {} {} updated {} -> {ip}",
                    self.id(),
                    target.fqdn,
                    target.record_type,
                    existing.value
                );
                Ok(SyncOutcome::Updated)
            }
            None => {
                self.create_record(&target, ip).await?;
                log::info!(
                    "[{}] {} {} created -> {ip}",
                    self.id(),
                    target.fqdn,
                    target.record_type
                );
                Ok(SyncOutcome::Created)
            }
        }
    }
}
