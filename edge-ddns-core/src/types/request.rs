//! 入站请求与归一化后的更新请求

use std::fmt;

use edge_ddns_provider::mask_secret;

/// Framework-neutral view of an inbound update call.
///
/// The web layer fills this from whatever its framework hands it; nothing in
/// the core depends on an HTTP library.
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    pub path: String,
    /// Query pairs in the order they appeared, already percent-decoded.
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    /// Client address reported by an edge platform, if any.
    pub client_addr: Option<String>,
    /// Socket peer address.
    pub peer_addr: Option<String>,
}

impl InboundRequest {
    /// First non-empty value for `name`.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .find(|v| !v.is_empty())
    }

    /// First non-empty value of the first name in `names` that has one.
    pub fn first_query_param(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.query_param(name))
    }

    /// Header lookup, name compared case-insensitively, empty values skipped.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.trim())
            .find(|v| !v.is_empty())
    }
}

/// A normalized update request. Empty strings are stored as `None`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UpdateRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub hostname: Option<String>,
    pub ip: Option<String>,
    /// Provider named by the caller (`provider` / `default_provider` query).
    pub requested_provider: Option<String>,
}

impl fmt::Debug for UpdateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateRequest")
            .field("username", &self.username.as_deref().map(mask_secret))
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("hostname", &self.hostname)
            .field("ip", &self.ip)
            .field("requested_provider", &self.requested_provider)
            .finish()
    }
}

/// Raw `(id, secret)` pair as supplied by the client.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    pub id: String,
    pub secret: String,
}

impl Credential {
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.secret.is_empty()
    }
}

impl From<&UpdateRequest> for Credential {
    fn from(req: &UpdateRequest) -> Self {
        Self::new(
            req.username.clone().unwrap_or_default(),
            req.password.clone().unwrap_or_default(),
        )
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &mask_secret(&self.id))
            .field("secret", &"***")
            .finish()
    }
}
