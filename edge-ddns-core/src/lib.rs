//! edge-ddns Core Library
//!
//! Platform-independent half of the DDNS proxy:
//! - request normalization (DynDNS / EasyDNS / router client spellings)
//! - provider detection from credential shape
//! - domain whitelist
//! - the reconciliation pipeline ([`UpdateService`])
//! - DynDNS / EasyDNS response encoding
//!
//! Cache, background tasks and provider construction are reached only through
//! the traits in [`traits`], so the same pipeline can run behind any HTTP
//! frontend.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{UpdateService, UpdateServiceConfig};
pub use traits::{CacheStore, ProviderFactory, TaskScheduler};
