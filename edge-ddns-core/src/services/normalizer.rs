//! Inbound request → [`UpdateRequest`]
//!
//! Accepts the parameter spellings used by the common DDNS clients (DynDNS
//! `nic/update`, EasyDNS `dyn/*.php`, router firmwares).

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::types::{InboundRequest, UpdateRequest};

const USERNAME_PARAMS: &[&str] = &["user", "username"];
const PASSWORD_PARAMS: &[&str] = &["pass", "password"];
const HOSTNAME_PARAMS: &[&str] = &["hostname", "domain", "host_id", "host", "id"];
const IP_PARAMS: &[&str] = &["myip", "ip", "addr"];
const PROVIDER_PARAMS: &[&str] = &["provider", "default_provider"];

/// Standard alphabet, `=` padding optional (some clients strip it).
const BASIC_AUTH: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Normalize a raw request.
///
/// Never fails: missing pieces come back as `None` and are judged by the
/// pipeline.
pub fn normalize_request(req: &InboundRequest) -> UpdateRequest {
    let (mut username, mut password) = basic_auth(req).unwrap_or_default();
    if username.is_empty() {
        username = req
            .first_query_param(USERNAME_PARAMS)
            .unwrap_or_default()
            .to_string();
    }
    if password.is_empty() {
        password = req
            .first_query_param(PASSWORD_PARAMS)
            .unwrap_or_default()
            .to_string();
    }

    UpdateRequest {
        username: non_empty(username),
        password: non_empty(password),
        hostname: req.first_query_param(HOSTNAME_PARAMS).map(str::to_string),
        ip: resolve_ip(req),
        requested_provider: req.first_query_param(PROVIDER_PARAMS).map(str::to_string),
    }
}

/// `Authorization: Basic base64(user:pass)`, split on the first colon.
fn basic_auth(req: &InboundRequest) -> Option<(String, String)> {
    let header = req.header("authorization")?;
    let encoded = header.strip_prefix("Basic ")?.trim();

    let decoded = match BASIC_AUTH.decode(encoded) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Ignoring malformed Basic auth header: {e}");
            return None;
        }
    };
    let decoded = match String::from_utf8(decoded) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("Ignoring non UTF-8 Basic auth header: {e}");
            return None;
        }
    };

    Some(match decoded.split_once(':') {
        Some((user, pass)) => (user.to_string(), pass.to_string()),
        None => (decoded, String::new()),
    })
}

/// Query → edge client address → proxy headers → socket peer.
fn resolve_ip(req: &InboundRequest) -> Option<String> {
    req.first_query_param(IP_PARAMS)
        .or_else(|| req.client_addr.as_deref().filter(|s| !s.is_empty()))
        .or_else(|| req.header("cf-connecting-ip"))
        .or_else(|| req.header("x-client-ip"))
        .or_else(|| {
            req.header("x-forwarded-for")
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .or_else(|| req.header("x-real-ip"))
        .or_else(|| req.peer_addr.as_deref().filter(|s| !s.is_empty()))
        .map(str::to_string)
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}
