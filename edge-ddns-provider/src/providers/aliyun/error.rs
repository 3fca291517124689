//! 阿里云错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::AliyunProvider;

/// 阿里云错误码映射
/// 参考: <https://api.aliyun.com/document/Alidns/2015-01-09/errorCode>
impl ProviderErrorMapper for AliyunProvider {
    fn provider_name(&self) -> &'static str {
        "ali"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        let Some(code) = raw.code.as_deref() else {
            return self.unknown_error(raw);
        };

        match code {
            // ============ 认证错误 ============
            "InvalidAccessKeyId"
            | "InvalidAccessKeyId.NotFound"
            | "InvalidAccessKeyId.Inactive"
            | "SignatureDoesNotMatch"
            | "IncompleteSignature" => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },

            // ============ 权限 ============
            "Forbidden" | "Forbidden.RAM" | "Forbidden.RiskControl" | "IncorrectDomainUser"
            | "OperationDomain.NoPermission" => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },

            // ============ 域名 / 记录不存在 ============
            "InvalidDomainName.NoExist" | "DomainNotFound" => ProviderError::DomainNotFound {
                provider,
                domain: context.domain.unwrap_or_default(),
                raw_message: Some(raw.message),
            },
            "DomainRecordNotBelongToUser" | "InvalidRecordId.NotFound" => {
                ProviderError::RecordNotFound {
                    provider,
                    record_id: context.record_id.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }

            // ============ 限流 ============
            "Throttling" | "Throttling.User" | "Throttling.Api" => ProviderError::RateLimited {
                provider,
                retry_after: None,
                raw_message: Some(raw.message),
            },

            // ============ 配额 ============
            c if c.starts_with("QuotaExceeded") => ProviderError::QuotaExceeded {
                provider,
                raw_message: Some(raw.message),
            },

            // ============ 参数 ============
            c if c.starts_with("InvalidRR") || c.starts_with("InvalidDomainName") => {
                ProviderError::InvalidParameter {
                    provider,
                    param: if c.starts_with("InvalidRR") { "rr" } else { "domain" }.to_string(),
                    detail: raw.message,
                }
            }

            _ => self.unknown_error(raw),
        }
    }
}
