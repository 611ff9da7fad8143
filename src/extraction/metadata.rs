//! Positional parser for the composite metadata line
//!
//! The job card renders location, posting age, applicant count, promoter and
//! application handling as one line joined by middle dots:
//!
//! ```text
//! São Paulo, Brazil · Posted 2 days ago · 50+ applicants · Promoted by John Doe · Easy Apply
//! ```
//!
//! Segment i maps to field i. When the page leaves out an early field
//! without an empty placeholder, every later field shifts left by one; that
//! is accepted behavior and not corrected here.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::schema::JobMetadata;
use crate::utils::{METADATA_DELIMITER, METADATA_DELIMITER_MISENCODED};

/// The separator between metadata segments, plus its alternate byte forms
///
/// Every alias is rewritten to the canonical separator before splitting, so
/// a page that mixes encodings still splits cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDelimiter {
    canonical: String,
    aliases: Vec<String>,
}

impl Default for MetadataDelimiter {
    fn default() -> Self {
        Self {
            canonical: METADATA_DELIMITER.to_string(),
            aliases: vec![METADATA_DELIMITER_MISENCODED.to_string()],
        }
    }
}

impl MetadataDelimiter {
    #[must_use]
    pub fn new(canonical: impl Into<String>, aliases: Vec<String>) -> Self {
        Self {
            canonical: canonical.into(),
            aliases,
        }
    }

    #[must_use]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Rewrite every alias in `text` to the canonical separator
    #[must_use]
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut normalized = Cow::Borrowed(text);
        for alias in &self.aliases {
            if alias.is_empty() || *alias == self.canonical || !normalized.contains(alias.as_str())
            {
                continue;
            }
            normalized = Cow::Owned(normalized.replace(alias.as_str(), &self.canonical));
        }
        normalized
    }

    /// Split `text` into trimmed segments, in order
    ///
    /// An empty canonical separator does not split: the whole text is one
    /// segment.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<String> {
        let normalized = self.normalize(text);
        if self.canonical.is_empty() {
            return vec![normalized.trim().to_string()];
        }
        normalized
            .split(self.canonical.as_str())
            .map(|segment| segment.trim().to_string())
            .collect()
    }
}

/// Parse the metadata line into its five positional fields
///
/// Missing positions become empty strings; segments past the fifth are
/// ignored.
#[must_use]
pub fn parse_metadata(text: &str, delimiter: &MetadataDelimiter) -> JobMetadata {
    let mut segments = delimiter.split(text.trim()).into_iter();
    let mut next = || segments.next().unwrap_or_default();

    JobMetadata {
        location: next(),
        announcement: next(),
        apply_count: next(),
        promoted_by: next(),
        answer_management: next(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> JobMetadata {
        parse_metadata(text, &MetadataDelimiter::default())
    }

    #[test]
    fn test_three_segments_leave_tail_empty() {
        assert_eq!(
            parse("A · B · C"),
            JobMetadata {
                location: "A".into(),
                announcement: "B".into(),
                apply_count: "C".into(),
                promoted_by: String::new(),
                answer_management: String::new(),
            }
        );
    }

    #[test]
    fn test_full_line() {
        let metadata = parse(
            "São Paulo, Brazil · Posted 2 days ago · 50+ applicants · Promoted by John Doe · Easy Apply",
        );
        assert_eq!(metadata.location, "São Paulo, Brazil");
        assert_eq!(metadata.announcement, "Posted 2 days ago");
        assert_eq!(metadata.apply_count, "50+ applicants");
        assert_eq!(metadata.promoted_by, "Promoted by John Doe");
        assert_eq!(metadata.answer_management, "Easy Apply");
    }

    #[test]
    fn test_misencoded_separator_is_normalized() {
        let metadata = parse("Remote Â· Posted today Â· 100+ applicants");
        assert_eq!(metadata.location, "Remote");
        assert_eq!(metadata.announcement, "Posted today");
        assert_eq!(metadata.apply_count, "100+ applicants");
    }

    #[test]
    fn test_mixed_encodings_split_the_same() {
        assert_eq!(
            parse("Remote Â· Posted today · 3 applicants"),
            parse("Remote · Posted today · 3 applicants")
        );
    }

    #[test]
    fn test_empty_text_gives_empty_metadata() {
        assert!(parse("").is_empty());
        assert!(parse("   \n  ").is_empty());
    }

    #[test]
    fn test_extra_segments_are_ignored() {
        let metadata = parse("a · b · c · d · e · f · g");
        assert_eq!(metadata.answer_management, "e");
    }

    #[test]
    fn test_skipped_field_shifts_later_fields() {
        // Location then promoter, with the two fields in between omitted.
        let metadata = parse("Berlin · Promoted by hirer");
        assert_eq!(metadata.location, "Berlin");
        assert_eq!(metadata.announcement, "Promoted by hirer");
        assert_eq!(metadata.promoted_by, "");
    }

    #[test]
    fn test_custom_delimiter() {
        let pipe = MetadataDelimiter::new("|", vec!["¦".to_string()]);
        let metadata = parse_metadata("Lisbon | 1 week ago ¦ 12 applicants", &pipe);
        assert_eq!(metadata.location, "Lisbon");
        assert_eq!(metadata.announcement, "1 week ago");
        assert_eq!(metadata.apply_count, "12 applicants");
    }

    #[test]
    fn test_normalize_borrows_when_nothing_to_rewrite() {
        let delimiter = MetadataDelimiter::default();
        assert!(matches!(delimiter.normalize("Remote · Today"), Cow::Borrowed(_)));
    }
}
