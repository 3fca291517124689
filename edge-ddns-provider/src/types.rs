use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::split_domain;

// ============ Provider 类型 ============

/// DNS hosting backends the engine knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Aliyun DNS (`alidns`), ACS3-HMAC-SHA256.
    Aliyun,
    /// Tencent Cloud `DNSPod`, TC3-HMAC-SHA256.
    Tencent,
    /// Cloudflare, bearer token.
    Cloudflare,
}

impl ProviderKind {
    /// Every kind, in detection priority order.
    pub const ALL: [Self; 3] = [Self::Aliyun, Self::Tencent, Self::Cloudflare];

    /// Canonical id used in cache keys and log lines.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Aliyun => "ali",
            Self::Tencent => "tencent",
            Self::Cloudflare => "cloudflare",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a provider name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider: {0}")]
pub struct UnknownProviderKind(pub String);

impl FromStr for ProviderKind {
    type Err = UnknownProviderKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ali" | "aliyun" | "alidns" => Ok(Self::Aliyun),
            "tencent" | "tencentcloud" | "dnspod" => Ok(Self::Tencent),
            "cloudflare" | "cf" => Ok(Self::Cloudflare),
            _ => Err(UnknownProviderKind(s.to_string())),
        }
    }
}

// ============ 记录 ============

/// Only address records are ever touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    A,
    #[serde(rename = "AAAA")]
    Aaaa,
}

impl RecordType {
    /// IPv6 iff the address text contains a colon.
    pub fn for_ip(ip: &str) -> Self {
        if ip.contains(':') { Self::Aaaa } else { Self::A }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`split_domain`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainParts {
    /// Host part relative to the zone, `@` for the apex.
    pub subdomain: String,
    /// Zone apex, e.g. `example.co.uk`.
    pub registrable_domain: String,
}

impl DomainParts {
    pub fn is_apex(&self) -> bool {
        self.subdomain == "@"
    }

    /// Rebuild the fully qualified name.
    pub fn fqdn(&self) -> String {
        if self.is_apex() {
            self.registrable_domain.clone()
        } else {
            format!("{}.{}", self.subdomain, self.registrable_domain)
        }
    }
}

/// Everything an adapter needs to address one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTarget {
    /// Hostname without empty labels or trailing dot.
    pub fqdn: String,
    pub parts: DomainParts,
    pub record_type: RecordType,
}

impl RecordTarget {
    pub fn new(hostname: &str, ip: &str) -> Self {
        let parts = split_domain(hostname);
        Self {
            fqdn: parts.fqdn(),
            parts,
            record_type: RecordType::for_ip(ip),
        }
    }
}

/// The record currently served by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingRecord {
    pub id: String,
    pub record_type: RecordType,
    pub value: String,
    /// Cloudflare only.
    pub proxied: Option<bool>,
}

/// What [`DnsProvider::sync_record`](crate::DnsProvider::sync_record) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncOutcome {
    Created,
    Updated,
    Skipped,
}

// ============ 凭证与客户端配置 ============

/// Credentials for one provider, already normalized.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderCredentials {
    Aliyun {
        access_key_id: String,
        access_key_secret: String,
    },
    Tencent {
        secret_id: String,
        secret_key: String,
    },
    Cloudflare {
        api_token: String,
        /// Skips the zone lookup when set.
        zone_id: Option<String>,
    },
}

impl ProviderCredentials {
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Aliyun { .. } => ProviderKind::Aliyun,
            Self::Tencent { .. } => ProviderKind::Tencent,
            Self::Cloudflare { .. } => ProviderKind::Cloudflare,
        }
    }
}

// 手写 Debug，避免密钥进入日志
impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::utils::log_sanitizer::mask_secret;

        match self {
            Self::Aliyun { access_key_id, .. } => f
                .debug_struct("Aliyun")
                .field("access_key_id", &mask_secret(access_key_id))
                .finish_non_exhaustive(),
            Self::Tencent { secret_id, .. } => f
                .debug_struct("Tencent")
                .field("secret_id", &mask_secret(secret_id))
                .finish_non_exhaustive(),
            Self::Cloudflare { zone_id, .. } => f
                .debug_struct("Cloudflare")
                .field("zone_id", zone_id)
                .finish_non_exhaustive(),
        }
    }
}

/// Transport settings shared by every adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub connect_timeout: Duration,
    /// Upper bound for one upstream call, body included.
    pub request_timeout: Duration,
    /// Automatic retries for transient errors (network, timeout, 429).
    pub max_retries: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_retries: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_ids() {
        assert_eq!(ProviderKind::Aliyun.id(), "ali");
        assert_eq!(ProviderKind::Tencent.id(), "tencent");
        assert_eq!(ProviderKind::Cloudflare.id(), "cloudflare");
    }

    #[test]
    fn provider_kind_parses_aliases() {
        assert_eq!("Ali".parse::<ProviderKind>(), Ok(ProviderKind::Aliyun));
        assert_eq!("aliyun".parse::<ProviderKind>(), Ok(ProviderKind::Aliyun));
        assert_eq!("DNSPOD".parse::<ProviderKind>(), Ok(ProviderKind::Tencent));
        assert_eq!(" tencent ".parse::<ProviderKind>(), Ok(ProviderKind::Tencent));
        assert_eq!("cf".parse::<ProviderKind>(), Ok(ProviderKind::Cloudflare));
        assert!("route53".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn record_type_from_ip() {
        assert_eq!(RecordType::for_ip("1.2.3.4"), RecordType::A);
        assert_eq!(RecordType::for_ip("2001:db8::1"), RecordType::Aaaa);
        assert_eq!(RecordType::for_ip("::ffff:1.2.3.4"), RecordType::Aaaa);
    }

    #[test]
    fn record_target_normalizes_hostname() {
        let t = RecordTarget::new("..www.example.com.", "1.2.3.4");
        assert_eq!(t.fqdn, "www.example.com");
        assert_eq!(t.parts.subdomain, "www");
        assert_eq!(t.parts.registrable_domain, "example.com");
        assert_eq!(t.record_type, RecordType::A);
    }

    #[test]
    fn apex_fqdn() {
        let t = RecordTarget::new("example.co.uk", "2001:db8::1");
        assert!(t.parts.is_apex());
        assert_eq!(t.fqdn, "example.co.uk");
        assert_eq!(t.record_type, RecordType::Aaaa);
    }

    #[test]
    fn credentials_debug_hides_secrets() {
        let creds = ProviderCredentials::Aliyun {
            access_key_id: "LTAI5tAbCdEfGhIjKlMn".to_string(),
            access_key_secret: "super-secret-value".to_string(),
        };
        let out = format!("{creds:?}");
        assert!(!out.contains("super-secret-value"));
        assert!(!out.contains("LTAI5tAbCdEfGhIjKlMn"));
        assert_eq!(creds.kind(), ProviderKind::Aliyun);
    }

    #[test]
    fn default_client_options() {
        let opts = ClientOptions::default();
        assert_eq!(opts.connect_timeout, Duration::from_secs(10));
        assert_eq!(opts.request_timeout, Duration::from_secs(30));
        assert_eq!(opts.max_retries, 0);
    }
}
