//! Core error type

use serde::Serialize;
use thiserror::Error;

pub use edge_ddns_provider::ProviderError;

/// Errors raised by the core's collaborators.
///
/// The update pipeline never returns these to the client; they are logged and
/// folded into an [`UpdateOutcome`](crate::types::UpdateOutcome).
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Cache backend unreachable or rejected the operation.
    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// `true` → log at `warn`, `false` → `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Provider(e) => e.is_expected(),
            Self::CacheError(_) => false,
        }
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
