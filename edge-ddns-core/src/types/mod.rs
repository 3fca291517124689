//! 类型定义模块

mod request;
mod response;

pub use request::{Credential, InboundRequest, UpdateRequest};
pub use response::{
    EncodedResponse, ResponseDialect, UpdateOutcome, CACHE_CONTROL_NO_STORE, CONTENT_TYPE_TEXT,
};

// Re-export provider 库的公共类型
pub use edge_ddns_provider::{
    ClientOptions, DomainParts, ProviderCredentials, ProviderKind, RecordType, SyncOutcome,
};
