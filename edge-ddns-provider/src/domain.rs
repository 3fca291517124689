//! Hostname → (subdomain, registrable domain)

use crate::types::DomainParts;

/// Public suffixes made of two labels. Everything else is treated as a
/// single-label TLD.
pub const MULTI_LABEL_SUFFIXES: &[&str] = &[
    "co.uk", "org.uk", "gov.uk", "ac.uk", //
    "com.cn", "net.cn", "org.cn", "gov.cn", "ac.cn", "edu.cn", //
    "com.tw", "net.tw", "org.tw", "idv.tw", "gov.tw", "edu.tw", //
    "com.hk", "net.hk", "org.hk", "edu.hk", //
    "com.au", "net.au", "org.au", "gov.au", "edu.au", //
    "co.jp", "ne.jp", "or.jp", "ac.jp", "go.jp",
];

/// Split a hostname into the part relative to its zone and the zone apex.
///
/// Empty labels and a trailing dot are ignored. Suffix matching is
/// case-insensitive; the returned labels keep their original case.
///
/// ```
/// use edge_ddns_provider::split_domain;
///
/// let parts = split_domain("test.www.example.co.uk");
/// assert_eq!(parts.subdomain, "test.www");
/// assert_eq!(parts.registrable_domain, "example.co.uk");
/// ```
pub fn split_domain(fqdn: &str) -> DomainParts {
    let labels: Vec<&str> = fqdn.split('.').filter(|l| !l.is_empty()).collect();

    if labels.len() <= 2 {
        return DomainParts {
            subdomain: "@".to_string(),
            registrable_domain: labels.join("."),
        };
    }

    let suffix_len = MULTI_LABEL_SUFFIXES
        .iter()
        .filter_map(|suffix| {
            let n = suffix.split('.').count();
            (n < labels.len() && tail_matches(&labels, suffix, n)).then_some(n)
        })
        .max()
        .unwrap_or(1);

    let boundary = labels.len() - suffix_len - 1;
    let (sub, zone) = labels.split_at(boundary);

    DomainParts {
        subdomain: if sub.is_empty() {
            "@".to_string()
        } else {
            sub.join(".")
        },
        registrable_domain: zone.join("."),
    }
}

fn tail_matches(labels: &[&str], suffix: &str, n: usize) -> bool {
    labels[labels.len() - n..]
        .iter()
        .zip(suffix.split('.'))
        .all(|(label, expected)| label.eq_ignore_ascii_case(expected))
}
