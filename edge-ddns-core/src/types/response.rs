//! 处理结果与响应协议类型

use std::fmt;

use edge_ddns_provider::SyncOutcome;
use serde::Serialize;

pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";
pub const CACHE_CONTROL_NO_STORE: &str = "no-store, no-cache";

/// Result of one reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOutcome {
    Created,
    Updated,
    Skipped,
    AuthFailed,
    DomainRejected,
    BadInput,
    TransportError,
}

impl UpdateOutcome {
    /// The record now holds the requested IP.
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Created | Self::Updated | Self::Skipped)
    }
}

impl From<SyncOutcome> for UpdateOutcome {
    fn from(outcome: SyncOutcome) -> Self {
        match outcome {
            SyncOutcome::Created => Self::Created,
            SyncOutcome::Updated => Self::Updated,
            SyncOutcome::Skipped => Self::Skipped,
        }
    }
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Skipped => "skipped",
            Self::AuthFailed => "auth_failed",
            Self::DomainRejected => "domain_rejected",
            Self::BadInput => "bad_input",
            Self::TransportError => "transport_error",
        };
        f.write_str(s)
    }
}

/// Legacy update-protocol flavour used for the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseDialect {
    #[default]
    DynDns,
    EasyDns,
}

/// Status, body and headers ready to be written by the web layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedResponse {
    pub status: u16,
    pub body: String,
    pub content_type: &'static str,
    pub cache_control: &'static str,
}

impl EncodedResponse {
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            content_type: CONTENT_TYPE_TEXT,
            cache_control: CACHE_CONTROL_NO_STORE,
        }
    }
}
