//! Readiness predicates over a region's text content

/// Default readiness check: the region holds non-whitespace text
///
/// Placeholder skeletons on the target page render the containers empty
/// first and fill them in later, so presence alone is not enough.
#[inline]
#[must_use]
pub fn non_empty_text(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Ready once the region's text contains `needle`
pub fn contains_text(needle: impl Into<String>) -> impl Fn(&str) -> bool + Send + Sync {
    let needle = needle.into();
    move |text: &str| text.contains(needle.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_only_is_not_ready() {
        assert!(!non_empty_text(""));
        assert!(!non_empty_text("  \n\t  "));
        assert!(non_empty_text("\n  Remote  \n"));
    }

    #[test]
    fn test_contains_text() {
        let ready = contains_text("applicants");
        assert!(ready("Remote · 50+ applicants"));
        assert!(!ready("Remote"));
    }
}
