//! Job extraction pipeline
//!
//! Waits for the metadata line to be filled in (the last part of the card
//! to render), then reads the four regions in a fixed order and assembles a
//! `JobPosting`. The wait is a synchronization point only: when it times out
//! the regions are read anyway and missing ones come back empty.

use std::time::Duration;

use tracing::{debug, error, info};

use crate::config::{ConfigError, ScrapeConfig};
use crate::dom::PageDocument;
use crate::readiness::{non_empty_text, wait_for_element};
use crate::utils::{DEFAULT_READINESS_TIMEOUT_MS, log_preview};

use super::errors::ExtractionResult;
use super::fields::{JobLocators, Region, region_text};
use super::metadata::{MetadataDelimiter, parse_metadata};
use super::schema::{JobPosting, ScrapedRecord};

/// Reads job postings from a page document
#[derive(Debug, Clone)]
pub struct JobExtractor {
    locators: JobLocators,
    delimiter: MetadataDelimiter,
    readiness_timeout: Duration,
}

impl Default for JobExtractor {
    fn default() -> Self {
        Self::new(
            JobLocators::linkedin(),
            MetadataDelimiter::default(),
            Duration::from_millis(DEFAULT_READINESS_TIMEOUT_MS),
        )
    }
}

impl JobExtractor {
    #[must_use]
    pub fn new(
        locators: JobLocators,
        delimiter: MetadataDelimiter,
        readiness_timeout: Duration,
    ) -> Self {
        Self {
            locators,
            delimiter,
            readiness_timeout,
        }
    }

    /// Build an extractor from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any configured selector is not valid CSS or
    /// the configuration fails validation.
    pub fn from_config(config: &ScrapeConfig) -> Result<Self, ConfigError> {
        let locators = config.validate()?;
        Ok(Self::new(
            locators,
            config.metadata_delimiter(),
            config.readiness_timeout(),
        ))
    }

    #[must_use]
    pub fn locators(&self) -> &JobLocators {
        &self.locators
    }

    #[must_use]
    pub fn delimiter(&self) -> &MetadataDelimiter {
        &self.delimiter
    }

    #[must_use]
    pub fn readiness_timeout(&self) -> Duration {
        self.readiness_timeout
    }

    /// Extract one job posting, capturing any failure into the record
    ///
    /// Never returns an error and never panics on page content. Safe to call
    /// repeatedly on the same document; each call reads the page afresh.
    pub async fn extract<D: PageDocument>(&self, document: &D) -> ScrapedRecord {
        info!("[JobHunter] Extracting data...");
        match self.try_extract(document).await {
            Ok(posting) => {
                info!(
                    "[JobHunter] Extracted '{}' at '{}'",
                    log_preview(&posting.title),
                    log_preview(&posting.company)
                );
                ScrapedRecord::Success(posting)
            }
            Err(e) => {
                error!("[JobHunter] Error extracting data: {}", e);
                ScrapedRecord::failure(&e)
            }
        }
    }

    /// Extract one job posting, surfacing query failures as errors
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::RegionRead` if the document cannot be
    /// queried for one of the regions.
    pub async fn try_extract<D: PageDocument>(&self, document: &D) -> ExtractionResult<JobPosting> {
        let ready = wait_for_element(
            document,
            &self.locators.metadata,
            non_empty_text,
            self.readiness_timeout,
        )
        .await;
        if ready.is_none() {
            debug!("Job card not ready in time, reading whatever is rendered");
        }

        let title = self.read(document, Region::Title).await?;
        let company = self.read(document, Region::Company).await?;
        let metadata_line = self.read(document, Region::Metadata).await?;
        let description = self.read(document, Region::Description).await?;

        Ok(JobPosting {
            title,
            company,
            metadata: parse_metadata(&metadata_line, &self.delimiter),
            description,
        })
    }

    async fn read<D: PageDocument>(&self, document: &D, region: Region) -> ExtractionResult<String> {
        region_text(document, region, self.locators.get(region)).await
    }
}
