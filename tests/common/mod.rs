//! Shared fixtures for the jobhunter_scrape test suite

use std::time::Duration;

use jobhunter_scrape::dom::{DomError, DomResult, Locator, MutationSubscription, PageDocument};
use jobhunter_scrape::extraction::{JobExtractor, JobLocators, MetadataDelimiter};

#[allow(dead_code)]
pub const TITLE: &str = ".job-details-jobs-unified-top-card__job-title";
#[allow(dead_code)]
pub const COMPANY: &str = ".job-details-jobs-unified-top-card__company-name";
#[allow(dead_code)]
pub const METADATA: &str = ".job-details-jobs-unified-top-card__primary-description-container";
#[allow(dead_code)]
pub const DESCRIPTION: &str = ".jobs-description__content";

/// A job details page with the given region contents
///
/// `None` leaves the region out of the page entirely.
#[allow(dead_code)]
pub fn job_page(
    title: Option<&str>,
    company: Option<&str>,
    metadata: Option<&str>,
    description: Option<&str>,
) -> String {
    let region = |class: &str, content: Option<&str>| {
        content
            .map(|text| format!(r#"<div class="{}">{}</div>"#, &class[1..], text))
            .unwrap_or_default()
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Job</title></head>
<body>
  <div class="job-details-jobs-unified-top-card">
    {}
    {}
    {}
  </div>
  {}
</body>
</html>"#,
        region(TITLE, title),
        region(COMPANY, company),
        region(METADATA, metadata),
        region(DESCRIPTION, description),
    )
}

/// A fully rendered card, indented the way the live page serves it
#[allow(dead_code)]
pub fn rendered_job_page() -> String {
    job_page(
        Some("\n        Senior Rust Engineer\n      "),
        Some("\n        <a href=\"/company/acme\">Acme Corp</a>\n      "),
        Some(
            "\n        <span>São Paulo, Brazil</span> · <span>Posted 2 days ago</span> · \
             <span>50+ applicants</span> · <span>Promoted by John Doe</span> · \
             <span>Easy Apply</span>\n      ",
        ),
        Some("\n    About the job\n\n    We build   distributed systems.\n  "),
    )
}

/// The card skeleton before the page scripts fill it in
#[allow(dead_code)]
pub fn skeleton_job_page() -> String {
    job_page(Some(""), Some(""), Some("   "), Some(""))
}

#[allow(dead_code)]
pub fn locator(selector: &str) -> Locator {
    Locator::parse(selector).unwrap()
}

/// An extractor over the LinkedIn locators with a short readiness wait
#[allow(dead_code)]
pub fn extractor_with_timeout(timeout: Duration) -> JobExtractor {
    JobExtractor::new(
        JobLocators::linkedin(),
        MetadataDelimiter::default(),
        timeout,
    )
}

/// A document whose every query fails, as a closed tab would
#[allow(dead_code)]
pub struct DetachedDocument;

impl PageDocument for DetachedDocument {
    async fn text_content(&self, _locator: &Locator) -> DomResult<Option<String>> {
        Err(DomError::Detached)
    }

    async fn observe(&self) -> DomResult<MutationSubscription> {
        Ok(MutationSubscription::never())
    }
}
