//! 域名后缀白名单

/// Comma-separated suffix whitelist. Empty allows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainWhitelist {
    suffixes: Vec<String>,
}

impl DomainWhitelist {
    /// Parse `"example.com, .example.org"`. Entries are trimmed,
    /// lower-cased and stripped of leading dots; blanks are dropped.
    pub fn parse(list: &str) -> Self {
        let suffixes = list
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { suffixes }
    }

    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Exact match or a label-boundary suffix match.
    pub fn is_allowed(&self, hostname: &str) -> bool {
        if self.suffixes.is_empty() {
            return true;
        }
        let host = hostname.trim_end_matches('.').to_ascii_lowercase();
        self.suffixes.iter().any(|suffix| {
            host == *suffix
                || host
                    .strip_suffix(suffix.as_str())
                    .is_some_and(|rest| rest.ends_with('.'))
        })
    }
}
