//! Provider detection from credential shape
//!
//! Rules are evaluated top to bottom and the first match wins. Order matters:
//! a 32-character Tencent compact SecretId would otherwise also satisfy the
//! Cloudflare length rule.

use std::sync::LazyLock;

use edge_ddns_provider::ProviderKind;
use regex::Regex;

use crate::types::Credential;

static ALIYUN_ACCESS_KEY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^LTAI[A-Za-z0-9]{10,}").ok());
static TENCENT_SECRET_ID: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^AKID[A-Za-z0-9]{10,}").ok());
static TENCENT_COMPACT_ID: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{32}$").ok());

/// Tencent SecretIds always carry this prefix on the wire.
const TENCENT_ID_PREFIX: &str = "AKID";
const NUMERIC_ID_MIN_LEN: usize = 5;
const CLOUDFLARE_TOKEN_MIN_LEN: usize = 30;

struct Rule {
    name: &'static str,
    kind: ProviderKind,
    matches: fn(&Credential) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        name: "aliyun-access-key",
        kind: ProviderKind::Aliyun,
        matches: is_aliyun_access_key,
    },
    Rule {
        name: "tencent-secret-id",
        kind: ProviderKind::Tencent,
        matches: is_tencent_secret_id,
    },
    Rule {
        name: "tencent-compact-id",
        kind: ProviderKind::Tencent,
        matches: is_tencent_compact_id,
    },
    Rule {
        name: "tencent-numeric-id",
        kind: ProviderKind::Tencent,
        matches: is_tencent_numeric_id,
    },
    Rule {
        name: "cloudflare-token",
        kind: ProviderKind::Cloudflare,
        matches: is_cloudflare_token,
    },
];

fn is_match(re: &LazyLock<Option<Regex>>, s: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(s))
}

fn is_aliyun_access_key(c: &Credential) -> bool {
    is_match(&ALIYUN_ACCESS_KEY, &c.id)
}

fn is_tencent_secret_id(c: &Credential) -> bool {
    is_match(&TENCENT_SECRET_ID, &c.id)
}

fn is_tencent_compact_id(c: &Credential) -> bool {
    is_match(&TENCENT_COMPACT_ID, &c.id)
}

/// 纯数字 ID 必须带 secret，否则只是个用户名
fn is_tencent_numeric_id(c: &Credential) -> bool {
    c.id.len() >= NUMERIC_ID_MIN_LEN
        && c.id.bytes().all(|b| b.is_ascii_digit())
        && !c.secret.is_empty()
}

fn is_cloudflare_token(c: &Credential) -> bool {
    c.id.chars().count() >= CLOUDFLARE_TOKEN_MIN_LEN
        || c.secret.chars().count() >= CLOUDFLARE_TOKEN_MIN_LEN
}

/// Guess the provider from the credential alone.
pub fn detect_provider(credential: &Credential) -> Option<ProviderKind> {
    if credential.is_empty() {
        return None;
    }
    RULES.iter().find(|rule| (rule.matches)(credential)).map(|rule| {
        log::debug!("Credential matched rule '{}' -> {}", rule.name, rule.kind);
        rule.kind
    })
}

/// Rewrite the credential into the form the provider expects.
///
/// Only Tencent compact SecretIds change: they gain the `AKID` prefix. The
/// secret is never touched.
pub fn normalize_credential(kind: ProviderKind, credential: &Credential) -> Credential {
    if kind == ProviderKind::Tencent
        && !credential.id.starts_with(TENCENT_ID_PREFIX)
        && is_tencent_compact_id(credential)
    {
        return Credential::new(
            format!("{TENCENT_ID_PREFIX}{}", credential.id),
            credential.secret.clone(),
        );
    }
    credential.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(id: &str, secret: &str) -> Option<ProviderKind> {
        detect_provider(&Credential::new(id, secret))
    }

    #[test]
    fn aliyun_access_key_id() {
        assert_eq!(
            detect("LTAI5tAbCdEfGhIjKlMn", "short"),
            Some(ProviderKind::Aliyun)
        );
        // 前缀后不足 10 位
        assert_eq!(detect("LTAI123", "short"), None);
    }

    #[test]
    fn tencent_secret_id() {
        assert_eq!(
            detect("AKIDz8krbsJ5yKBZQpn74WFkmLPx3EXAMPLE", "k"),
            Some(ProviderKind::Tencent)
        );
    }

    #[test]
    fn numeric_id_needs_secret() {
        assert_eq!(detect("123456", "abc123token"), Some(ProviderKind::Tencent));
        assert_eq!(detect("123456", ""), None);
        assert_eq!(detect("1234", "abc123token"), None);
    }

    #[test]
    fn compact_id_is_tencent_not_cloudflare() {
        let id = "0123456789abcdefABCDEF0123456789";
        assert_eq!(id.len(), 32);
        assert_eq!(detect(id, "k"), Some(ProviderKind::Tencent));
    }

    #[test]
    fn long_token_is_cloudflare() {
        let token = "x".repeat(40);
        assert_eq!(detect("", &token), Some(ProviderKind::Cloudflare));
        assert_eq!(detect(&token, ""), Some(ProviderKind::Cloudflare));
        assert_eq!(detect("user", &"y".repeat(30)), Some(ProviderKind::Cloudflare));
    }

    #[test]
    fn short_or_empty_credentials() {
        assert_eq!(detect("", ""), None);
        assert_eq!(detect("user", "pass"), None);
    }

    #[test]
    fn precedence_is_top_to_bottom() {
        // LTAI 前缀 + 超长 secret 仍判定为阿里云
        assert_eq!(
            detect("LTAI5tAbCdEfGhIjKlMn", &"s".repeat(40)),
            Some(ProviderKind::Aliyun)
        );
        // AKID + 超长 secret 仍判定为腾讯云
        assert_eq!(
            detect("AKIDabcdefghij1234", &"s".repeat(40)),
            Some(ProviderKind::Tencent)
        );
    }

    #[test]
    fn compact_id_gains_akid_prefix() {
        let cred = Credential::new("0123456789abcdefABCDEF0123456789", "secret");
        let normalized = normalize_credential(ProviderKind::Tencent, &cred);
        assert_eq!(normalized.id, "AKID0123456789abcdefABCDEF0123456789");
        assert_eq!(normalized.secret, "secret");
    }

    #[test]
    fn other_credentials_unchanged() {
        let akid = Credential::new("AKIDabcdefghij1234", "k");
        assert_eq!(normalize_credential(ProviderKind::Tencent, &akid), akid);

        let numeric = Credential::new("123456", "k");
        assert_eq!(normalize_credential(ProviderKind::Tencent, &numeric), numeric);

        // 非腾讯不改写
        let compact = Credential::new("0123456789abcdefABCDEF0123456789", "k");
        assert_eq!(normalize_credential(ProviderKind::Cloudflare, &compact), compact);
    }
}
