//! Stored filename generation and public URL construction.

use chrono::Utc;
use intake_core::constants::UPLOADS_ROUTE_PREFIX;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

/// Longest sanitized name kept; the tail (with the extension) is preserved.
const MAX_SANITIZED_LEN: usize = 150;

/// Reduce a client-supplied filename to a safe, flat name.
///
/// The name is NFKD-decomposed so accented letters keep their ASCII base, then
/// anything still non-ASCII is dropped. `/` becomes whitespace, whitespace runs
/// collapse to `_`, anything outside `[A-Za-z0-9_.-]` (backslash included) is removed
/// and leading or trailing `.`/`_` are trimmed. The result can be empty.
pub fn sanitize_filename(filename: &str) -> String {
    let spaced: String = filename
        .nfkd()
        .filter(|c| c.is_ascii())
        .map(|c| if c == '/' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = filtered.trim_matches(|c| c == '.' || c == '_');

    // ASCII only, so byte offsets are char boundaries
    if trimmed.len() > MAX_SANITIZED_LEN {
        trimmed[trimmed.len() - MAX_SANITIZED_LEN..]
            .trim_start_matches(|c| c == '.' || c == '_')
            .to_string()
    } else {
        trimmed.to_string()
    }
}

/// `{millis_since_epoch}_{128-bit random hex}_{sanitized}`
pub fn unique_stored_name(sanitized: &str) -> String {
    format!(
        "{}_{}_{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        sanitized
    )
}

/// `{host_url without trailing slash}/uploads/applications/{stored_name}`
pub fn public_url(host_url: &str, stored_name: &str) -> String {
    format!(
        "{}{}/{}",
        host_url.trim_end_matches('/'),
        UPLOADS_ROUTE_PREFIX,
        stored_name
    )
}
