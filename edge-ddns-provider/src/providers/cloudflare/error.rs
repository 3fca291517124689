//! Cloudflare error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::CloudflareProvider;

/// Cloudflare error code mapping
/// Reference: <https://developers.cloudflare.com/fundamentals/api/troubleshooting/>
impl ProviderErrorMapper for CloudflareProvider {
    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match raw.code.as_deref() {
            // 6003/6111: malformed auth headers, 9106/9107: missing or bad token,
            // 9109: unauthorized, 10000: authentication error
            Some("6003" | "6111" | "9106" | "9107" | "9109" | "10000") => {
                ProviderError::InvalidCredentials {
                    provider,
                    raw_message: Some(raw.message),
                }
            }

            // 971: throttled
            Some("971") => ProviderError::RateLimited {
                provider,
                retry_after: None,
                raw_message: Some(raw.message),
            },

            // 7000/7003: no route, usually an unknown zone id
            Some("7000" | "7003") => ProviderError::DomainNotFound {
                provider,
                domain: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // 81044: record does not exist
            Some("81044") => ProviderError::RecordNotFound {
                provider,
                record_id: context.record_id.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // 81045: record quota exceeded
            Some("81045") => ProviderError::QuotaExceeded {
                provider,
                raw_message: Some(raw.message),
            },

            // 1004: DNS validation, 9000: name, 9005/9006: A/AAAA content
            Some(code @ ("1004" | "9000" | "9005" | "9006")) => ProviderError::InvalidParameter {
                provider,
                param: match code {
                    "9000" => "name",
                    "9005" | "9006" => "content",
                    _ => "general",
                }
                .to_string(),
                detail: raw.message,
            },

            _ => self.unknown_error(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(code: &str, ctx: ErrorContext) -> ProviderError {
        let p = CloudflareProvider::new(String::new()).unwrap_or_else(|e| panic!("{e}"));
        p.map_error(RawApiError::with_code(code, "message"), ctx)
    }

    #[test]
    fn auth_codes() {
        for code in ["9109", "10000", "6003", "9106"] {
            assert!(
                matches!(
                    map(code, ErrorContext::default()),
                    ProviderError::InvalidCredentials { .. }
                ),
                "{code}"
            );
        }
    }

    #[test]
    fn zone_route_errors() {
        assert!(matches!(
            map("7003", ErrorContext::for_domain("example.com")),
            ProviderError::DomainNotFound { domain, .. } if domain == "example.com"
        ));
        assert!(matches!(
            map("7000", ErrorContext::default()),
            ProviderError::DomainNotFound { domain, .. } if domain == "<unknown>"
        ));
    }

    #[test]
    fn record_errors() {
        assert!(matches!(
            map("81044", ErrorContext::for_record("example.com", "rec-1")),
            ProviderError::RecordNotFound { record_id, .. } if record_id == "rec-1"
        ));
        assert!(matches!(
            map("81045", ErrorContext::default()),
            ProviderError::QuotaExceeded { .. }
        ));
    }

    #[test]
    fn content_validation() {
        assert!(matches!(
            map("9005", ErrorContext::default()),
            ProviderError::InvalidParameter { param, .. } if param == "content"
        ));
    }

    #[test]
    fn throttled() {
        assert!(matches!(
            map("971", ErrorContext::default()),
            ProviderError::RateLimited { .. }
        ));
    }

    #[test]
    fn fallback() {
        assert!(matches!(
            map("99999", ErrorContext::default()),
            ProviderError::Unknown { raw_code: Some(c), .. } if c == "99999"
        ));
    }
}
