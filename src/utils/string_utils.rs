//! UTF-8-safe string truncation utilities
//!
//! Page text is full of multi-byte characters (accented place names, the
//! middle-dot separator, emoji in descriptions), so byte slicing for log
//! output would panic. These helpers always cut on a character boundary.

use super::constants::LOG_PREVIEW_CHARS;

/// Safely truncate a string to a maximum number of CHARACTERS (not bytes).
///
/// # Examples
/// ```
/// # use jobhunter_scrape::utils::string_utils::safe_truncate_chars;
/// assert_eq!(safe_truncate_chars("Hello, World!", 5), "Hello");
/// assert_eq!(safe_truncate_chars("São Paulo", 3), "São");
/// assert_eq!(safe_truncate_chars("Hi", 100), "Hi");
/// ```
#[inline]
#[must_use]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

/// Single-line preview of page text for log messages.
///
/// Collapses line breaks to spaces, trims, and truncates to
/// `LOG_PREVIEW_CHARS` characters with a trailing ellipsis when cut.
#[must_use]
pub fn log_preview(s: &str) -> String {
    let flat: String = s
        .trim()
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let cut = safe_truncate_chars(&flat, LOG_PREVIEW_CHARS);
    if cut.len() < flat.len() {
        format!("{cut}…")
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_multibyte_boundaries() {
        let text = "Remote · Posted today";
        assert_eq!(safe_truncate_chars(text, 8), "Remote ·");
    }

    #[test]
    fn test_preview_flattens_newlines() {
        assert_eq!(log_preview("  Role:\n- design\n"), "Role: - design");
    }

    #[test]
    fn test_preview_marks_truncation() {
        let long = "x".repeat(LOG_PREVIEW_CHARS + 10);
        let preview = log_preview(&long);
        assert!(preview.ends_with('…'));
        assert_eq!(preview.chars().count(), LOG_PREVIEW_CHARS + 1);
    }
}
