//! Validated CSS locators for page regions

use std::fmt;

use scraper::Selector;

use super::errors::{DomError, DomResult};

/// A parsed CSS selector identifying one region of the page.
///
/// Selectors are parsed once at construction so that every later lookup is
/// infallible. The source text is kept for logs and for backends (Chrome)
/// that take selectors as strings.
#[derive(Debug, Clone)]
pub struct Locator {
    source: String,
    selector: Selector,
}

impl Locator {
    /// Parse a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns `DomError::InvalidSelector` if `selector` is not valid CSS.
    pub fn parse(selector: impl Into<String>) -> DomResult<Self> {
        let source = selector.into();
        let parsed = Selector::parse(&source).map_err(|e| DomError::InvalidSelector {
            selector: source.clone(),
            message: e.to_string(),
        })?;
        Ok(Self {
            source,
            selector: parsed,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for Locator {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Locator {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_class_selector() {
        let locator = Locator::parse(".jobs-description__content").unwrap();
        assert_eq!(locator.as_str(), ".jobs-description__content");
        assert_eq!(locator.to_string(), ".jobs-description__content");
    }

    #[test]
    fn test_parse_rejects_invalid_selector() {
        match Locator::parse("div[") {
            Err(DomError::InvalidSelector { selector, .. }) => assert_eq!(selector, "div["),
            other => panic!("expected InvalidSelector, got {other:?}"),
        }
    }
}
