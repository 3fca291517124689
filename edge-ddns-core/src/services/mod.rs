//! 业务逻辑服务层

mod detector;
mod encoder;
mod normalizer;
mod update_service;
mod whitelist;

pub use detector::{detect_provider, normalize_credential};
pub use encoder::encode;
pub use normalizer::normalize_request;
pub use update_service::{
    classify_provider_error, UpdateService, UpdateServiceConfig, DEFAULT_CACHE_TTL,
};
pub use whitelist::DomainWhitelist;
