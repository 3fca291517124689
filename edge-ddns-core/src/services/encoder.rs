//! [`UpdateOutcome`] → DynDNS / EasyDNS wire response

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{EncodedResponse, ResponseDialect, UpdateOutcome};

static EASYDNS_PATH: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"/dyn/(generic|ez-ipupdate|tomato)\.php").ok());

impl ResponseDialect {
    /// EasyDNS for `/dyn/{generic,ez-ipupdate,tomato}.php`, DynDNS otherwise.
    pub fn from_path(path: &str) -> Self {
        if EASYDNS_PATH.as_ref().is_some_and(|re| re.is_match(path)) {
            Self::EasyDns
        } else {
            Self::DynDns
        }
    }
}

/// Encode an outcome. `ip` is only echoed by DynDNS success bodies.
pub fn encode(dialect: ResponseDialect, outcome: UpdateOutcome, ip: &str) -> EncodedResponse {
    let (status, body) = match dialect {
        ResponseDialect::DynDns => match outcome {
            UpdateOutcome::Created | UpdateOutcome::Updated => (200, format!("good {ip}")),
            UpdateOutcome::Skipped => (200, format!("nochg {ip}")),
            UpdateOutcome::AuthFailed => (401, "badauth".to_string()),
            UpdateOutcome::DomainRejected => (400, "nohost".to_string()),
            UpdateOutcome::BadInput => (400, "badrequest".to_string()),
            UpdateOutcome::TransportError => (500, "911".to_string()),
        },
        ResponseDialect::EasyDns => {
            let (status, code) = match outcome {
                UpdateOutcome::Created | UpdateOutcome::Updated | UpdateOutcome::Skipped => {
                    (200, "NOERROR")
                }
                UpdateOutcome::AuthFailed => (401, "NOACCESS"),
                UpdateOutcome::DomainRejected => (400, "NOHOST"),
                UpdateOutcome::BadInput => (400, "ILLEGAL INPUT"),
                UpdateOutcome::TransportError => (500, "NOSERVICE"),
            };
            (status, format!("{code}\n"))
        }
    };
    EncodedResponse::text(status, body)
}
