//! The four regions of a job details card and how to read them

use std::fmt;
use std::sync::LazyLock;

use crate::dom::{Locator, PageDocument};
use crate::utils::{
    JOB_COMPANY_SELECTOR, JOB_DESCRIPTION_SELECTOR, JOB_METADATA_SELECTOR, JOB_TITLE_SELECTOR,
};

use super::errors::{ExtractionError, ExtractionResult};

static TITLE: LazyLock<Locator> = LazyLock::new(|| {
    Locator::parse(JOB_TITLE_SELECTOR).expect("BUG: hardcoded job title selector is invalid")
});

static COMPANY: LazyLock<Locator> = LazyLock::new(|| {
    Locator::parse(JOB_COMPANY_SELECTOR).expect("BUG: hardcoded company selector is invalid")
});

static METADATA: LazyLock<Locator> = LazyLock::new(|| {
    Locator::parse(JOB_METADATA_SELECTOR).expect("BUG: hardcoded metadata selector is invalid")
});

static DESCRIPTION: LazyLock<Locator> = LazyLock::new(|| {
    Locator::parse(JOB_DESCRIPTION_SELECTOR)
        .expect("BUG: hardcoded description selector is invalid")
});

/// A named region of the job details card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Title,
    Company,
    Metadata,
    Description,
}

impl Region {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Region::Title => "title",
            Region::Company => "company",
            Region::Metadata => "metadata",
            Region::Description => "description",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One locator per region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobLocators {
    pub title: Locator,
    pub company: Locator,
    pub metadata: Locator,
    pub description: Locator,
}

impl Default for JobLocators {
    fn default() -> Self {
        Self::linkedin()
    }
}

impl JobLocators {
    /// Locators for the LinkedIn job details top card
    #[must_use]
    pub fn linkedin() -> Self {
        Self {
            title: TITLE.clone(),
            company: COMPANY.clone(),
            metadata: METADATA.clone(),
            description: DESCRIPTION.clone(),
        }
    }

    #[must_use]
    pub fn get(&self, region: Region) -> &Locator {
        match region {
            Region::Title => &self.title,
            Region::Company => &self.company,
            Region::Metadata => &self.metadata,
            Region::Description => &self.description,
        }
    }
}

/// Trimmed text of the first element matching `locator`, or `""` when absent
///
/// # Errors
///
/// Returns `ExtractionError::RegionRead` when the document query itself fails.
pub async fn region_text<D: PageDocument>(
    document: &D,
    region: Region,
    locator: &Locator,
) -> ExtractionResult<String> {
    let text = document
        .text_content(locator)
        .await
        .map_err(|source| ExtractionError::RegionRead {
            region,
            selector: locator.as_str().to_string(),
            source,
        })?;
    Ok(text.map(|t| t.trim().to_string()).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlSnapshot;

    #[test]
    fn test_linkedin_locators_use_card_selectors() {
        let locators = JobLocators::linkedin();
        assert_eq!(locators.get(Region::Title).as_str(), JOB_TITLE_SELECTOR);
        assert_eq!(locators.get(Region::Company).as_str(), JOB_COMPANY_SELECTOR);
        assert_eq!(locators.get(Region::Metadata).as_str(), JOB_METADATA_SELECTOR);
        assert_eq!(
            locators.get(Region::Description).as_str(),
            JOB_DESCRIPTION_SELECTOR
        );
    }

    #[test]
    fn test_region_display() {
        let names: Vec<String> = [
            Region::Title,
            Region::Company,
            Region::Metadata,
            Region::Description,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(names, ["title", "company", "metadata", "description"]);
    }

    #[tokio::test]
    async fn test_region_text_trims_and_defaults() {
        let doc = HtmlSnapshot::new(
            r#"<div class="job-details-jobs-unified-top-card__job-title">
                   Staff Engineer
               </div>"#,
        );
        let locators = JobLocators::linkedin();

        let title = region_text(&doc, Region::Title, &locators.title).await.unwrap();
        assert_eq!(title, "Staff Engineer");

        let company = region_text(&doc, Region::Company, &locators.company)
            .await
            .unwrap();
        assert_eq!(company, "");
    }
}
