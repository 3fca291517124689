//! `DNSPod` 错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::DnspodProvider;

/// 查询结果为空时 `DescribeRecordList` 返回的错误码
pub(crate) const NO_DATA_OF_RECORD: &str = "ResourceNotFound.NoDataOfRecord";

/// `DNSPod` 错误码映射
/// 参考: <https://cloud.tencent.com/document/api/1427/56192>
impl ProviderErrorMapper for DnspodProvider {
    fn provider_name(&self) -> &'static str {
        "tencent"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        let Some(code) = raw.code.as_deref() else {
            return self.unknown_error(raw);
        };

        match code {
            // ============ 认证 ============
            c if c.starts_with("AuthFailure")
                || c == "InvalidParameter.InvalidSecretId"
                || c == "InvalidParameter.InvalidSignature" =>
            {
                ProviderError::InvalidCredentials {
                    provider,
                    raw_message: Some(raw.message),
                }
            }

            // ============ 权限 ============
            c if c.starts_with("UnauthorizedOperation")
                || c == "OperationDenied.DomainOwnerAllowedOnly"
                || c == "InvalidParameter.PermissionDenied" =>
            {
                ProviderError::PermissionDenied {
                    provider,
                    raw_message: Some(raw.message),
                }
            }

            // ============ 域名 / 记录不存在 ============
            "ResourceNotFound.NoDataOfDomain"
            | "InvalidParameterValue.DomainNotExists"
            | "InvalidParameter.DomainNotExists" => ProviderError::DomainNotFound {
                provider,
                domain: context.domain.unwrap_or_default(),
                raw_message: Some(raw.message),
            },
            NO_DATA_OF_RECORD | "InvalidParameter.RecordIdInvalid" => {
                ProviderError::RecordNotFound {
                    provider,
                    record_id: context.record_id.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }

            // ============ 频率限制（可重试） ============
            "RequestLimitExceeded" | "FailedOperation.FrequencyLimit" => {
                ProviderError::RateLimited {
                    provider,
                    retry_after: None,
                    raw_message: Some(raw.message),
                }
            }

            // ============ 配额 ============
            c if c.starts_with("LimitExceeded") => ProviderError::QuotaExceeded {
                provider,
                raw_message: Some(raw.message),
            },

            // ============ 参数 ============
            c if c.starts_with("InvalidParameter") => ProviderError::InvalidParameter {
                provider,
                param: c.rsplit('.').next().unwrap_or(c).to_string(),
                detail: raw.message,
            },

            _ => self.unknown_error(raw),
        }
    }
}
