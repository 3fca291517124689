use serde::{Deserialize, Serialize};

/// Error returned by every provider adapter.
///
/// Every variant carries the canonical `provider` id (`ali`, `tencent`,
/// `cloudflare`). `raw_message` / `raw_code` hold whatever the upstream sent,
/// untranslated. Serialized with a `code` tag.
///
/// # Transient errors
///
/// [`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout) and
/// [`RateLimited`](Self::RateLimited) are the only variants the HTTP layer will
/// retry, and only when the adapter was built with `max_retries > 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// Connection refused, DNS failure, unreadable body or an upstream 5xx gateway error.
    NetworkError {
        provider: String,
        detail: String,
    },

    /// The request did not complete within the configured bound.
    Timeout {
        provider: String,
        detail: String,
    },

    /// HTTP 429 or a provider-specific throttling code.
    RateLimited {
        provider: String,
        /// Seconds to wait, when the upstream says so.
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    /// The upstream rejected the key pair or token.
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    /// The credentials are valid but not allowed to touch this zone or record.
    PermissionDenied {
        provider: String,
        raw_message: Option<String>,
    },

    /// The registrable domain is not hosted under this account.
    DomainNotFound {
        provider: String,
        /// Domain name that was looked up.
        domain: String,
        raw_message: Option<String>,
    },

    /// The record id returned by the lookup vanished before the update.
    RecordNotFound {
        provider: String,
        /// Record id used in the update.
        record_id: String,
        raw_message: Option<String>,
    },

    /// The account ran out of records or subdomains.
    QuotaExceeded {
        provider: String,
        raw_message: Option<String>,
    },

    /// A request parameter was rejected (malformed hostname, IP, record type).
    InvalidParameter {
        provider: String,
        /// Name of the rejected parameter.
        param: String,
        detail: String,
    },

    /// The upstream answered with a body we could not decode.
    ParseError {
        provider: String,
        detail: String,
    },

    /// The request body could not be encoded.
    SerializationError {
        provider: String,
        detail: String,
    },

    /// An API error code with no dedicated variant.
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

impl ProviderError {
    /// Canonical id of the provider that raised this error.
    pub fn provider(&self) -> &str {
        match self {
            Self::NetworkError { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::InvalidCredentials { provider, .. }
            | Self::PermissionDenied { provider, .. }
            | Self::DomainNotFound { provider, .. }
            | Self::RecordNotFound { provider, .. }
            | Self::QuotaExceeded { provider, .. }
            | Self::InvalidParameter { provider, .. }
            | Self::ParseError { provider, .. }
            | Self::SerializationError { provider, .. }
            | Self::Unknown { provider, .. } => provider,
        }
    }

    /// 是否为预期行为（凭证错误、域名不存在等），用于日志分级。
    ///
    /// 返回 `true` 时使用 `warn`，否则使用 `error`。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::DomainNotFound { .. }
                | Self::RecordNotFound { .. }
                | Self::QuotaExceeded { .. }
                | Self::InvalidParameter { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => match retry_after {
                Some(secs) => write!(f, "[{provider}] Rate limited (retry after {secs}s)"),
                None => write!(f, "[{provider}] Rate limited"),
            },
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => match raw_message {
                Some(msg) => write!(f, "[{provider}] Invalid credentials: {msg}"),
                None => write!(f, "[{provider}] Invalid credentials"),
            },
            Self::PermissionDenied {
                provider,
                raw_message,
            } => match raw_message {
                Some(msg) => write!(f, "[{provider}] Permission denied: {msg}"),
                None => write!(f, "[{provider}] Permission denied"),
            },
            Self::DomainNotFound {
                provider,
                domain,
                raw_message,
            } => match raw_message {
                Some(msg) => write!(f, "[{provider}] Domain '{domain}' not found: {msg}"),
                None => write!(f, "[{provider}] Domain '{domain}' not found"),
            },
            Self::RecordNotFound {
                provider,
                record_id,
                ..
            } => write!(f, "[{provider}] Record '{record_id}' not found"),
            Self::QuotaExceeded { provider, .. } => write!(f, "[{provider}] Quota exceeded"),
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => write!(f, "[{provider}] Invalid parameter '{param}': {detail}"),
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_code,
                raw_message,
            } => match raw_code {
                Some(code) => write!(f, "[{provider}] {code}: {raw_message}"),
                None => write!(f, "[{provider}] {raw_message}"),
            },
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
