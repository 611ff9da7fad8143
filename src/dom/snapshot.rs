//! Immutable HTML snapshot documents

use scraper::Html;

use super::document::PageDocument;
use super::errors::DomResult;
use super::locator::Locator;
use super::mutation::MutationSubscription;

/// A page frozen at one point in time, e.g. saved HTML or `page.content()`
#[derive(Debug, Clone, Default)]
pub struct HtmlSnapshot {
    html: String,
}

impl HtmlSnapshot {
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }
}

/// Text content of the first element in `html` matching `locator`
///
/// `scraper::Html` is not `Send`, so it is parsed and dropped inside this
/// synchronous call and never held across an await point.
#[must_use]
pub fn text_content_in(html: &str, locator: &Locator) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(locator.selector())
        .next()
        .map(|element| element.text().collect())
}

impl PageDocument for HtmlSnapshot {
    async fn text_content(&self, locator: &Locator) -> DomResult<Option<String>> {
        Ok(text_content_in(&self.html, locator))
    }

    async fn observe(&self) -> DomResult<MutationSubscription> {
        Ok(MutationSubscription::never())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_concatenates_descendants() {
        let html = r#"<div class="card"><span>Remote</span> · <b>Posted today</b></div>"#;
        let locator = Locator::parse(".card").unwrap();
        assert_eq!(
            text_content_in(html, &locator).as_deref(),
            Some("Remote · Posted today")
        );
    }

    #[test]
    fn test_first_match_wins() {
        let html = r#"<h1 class="t">First</h1><h1 class="t">Second</h1>"#;
        let locator = Locator::parse(".t").unwrap();
        assert_eq!(text_content_in(html, &locator).as_deref(), Some("First"));
    }

    #[test]
    fn test_missing_region_is_none() {
        let locator = Locator::parse(".absent").unwrap();
        assert_eq!(text_content_in("<p>hello</p>", &locator), None);
    }
}
