//! # edge-ddns-provider
//!
//! Minimal, SDK-free adapters that read and write a single A/AAAA record on
//! a DNS hosting provider.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [Aliyun DNS](https://www.aliyun.com/product/dns) | `aliyun` | ACS3-HMAC-SHA256 |
//! | [DNSPod (Tencent Cloud)](https://www.dnspod.cn/) | `dnspod` | TC3-HMAC-SHA256 |
//! | [Cloudflare](https://www.cloudflare.com/) | `cloudflare` | Bearer Token |
//!
//! ## Feature Flags
//!
//! - **`all-providers`** *(default)*: all of the above.
//! - **`native-tls`** *(default)* / **`rustls`**: TLS backend for reqwest.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use edge_ddns_provider::{
//!     ClientOptions, ProviderCredentials, SyncOutcome, create_provider,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(
//!         ProviderCredentials::Tencent {
//!             secret_id: "AKIDxxxxxxxxxxxxxxxx".to_string(),
//!             secret_key: "xxxxxxxx".to_string(),
//!         },
//!         &ClientOptions::default(),
//!     )?;
//!
//!     match provider.sync_record("home.example.com", "203.0.113.7").await? {
//!         SyncOutcome::Skipped => println!("already up to date"),
//!         outcome => println!("{outcome:?}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ProviderError>`](ProviderError). API
//! error codes are mapped per provider; authentication failures always surface
//! as [`ProviderError::InvalidCredentials`].

mod domain;
mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use domain::{MULTI_LABEL_SUFFIXES, split_domain};
pub use error::{ProviderError, Result};
pub use factory::create_provider;
pub use traits::DnsProvider;
pub use types::{
    ClientOptions, DomainParts, ExistingRecord, ProviderCredentials, ProviderKind, RecordTarget,
    RecordType, SyncOutcome, UnknownProviderKind,
};
pub use utils::log_sanitizer::mask_secret;

#[cfg(feature = "aliyun")]
pub use providers::{AliyunProvider, AliyunProviderBuilder};
#[cfg(feature = "cloudflare")]
pub use providers::{CloudflareProvider, CloudflareProviderBuilder};
#[cfg(feature = "dnspod")]
pub use providers::{DnspodProvider, DnspodProviderBuilder};
