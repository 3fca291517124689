//! Log sanitization helpers
//!
//! Upstream bodies can be large and credential ids are sensitive; neither
//! should reach the log sink verbatim.

/// Maximum number of characters kept by [`truncate_for_log`].
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters [`mask_secret`] leaves visible.
const MASK_VISIBLE: usize = 4;

/// Truncate a string for safe logging, counting characters rather than bytes.
pub fn truncate_for_log(s: &str) -> String {
    match s.char_indices().nth(TRUNCATE_LIMIT) {
        None => s.to_string(),
        Some((cut, _)) => format!(
            "{}... [truncated, total {} bytes]",
            &s[..cut],
            s.len()
        ),
    }
}

/// Mask a credential for display: the first few characters followed by `***`.
///
/// Short values are fully masked.
pub fn mask_secret(s: &str) -> String {
    if s.chars().count() <= MASK_VISIBLE * 2 {
        return "***".to_string();
    }
    let visible: String = s.chars().take(MASK_VISIBLE).collect();
    format!("{visible}***")
}
