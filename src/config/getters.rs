//! Getter methods for `ScrapeConfig`

use std::path::PathBuf;
use std::time::Duration;

use super::types::{JobSelectors, ScrapeConfig};
use crate::extraction::MetadataDelimiter;

impl ScrapeConfig {
    #[must_use]
    pub fn selectors(&self) -> &JobSelectors {
        &self.selectors
    }

    #[must_use]
    pub fn readiness_timeout_ms(&self) -> u64 {
        self.readiness_timeout_ms
    }

    #[must_use]
    pub fn readiness_timeout(&self) -> Duration {
        Duration::from_millis(self.readiness_timeout_ms)
    }

    /// The configured separator and its aliases, ready for parsing
    #[must_use]
    pub fn metadata_delimiter(&self) -> MetadataDelimiter {
        MetadataDelimiter::new(
            self.metadata_delimiter.clone(),
            self.delimiter_aliases.clone(),
        )
    }

    #[must_use]
    pub fn delimiter_aliases(&self) -> &[String] {
        &self.delimiter_aliases
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn page_load_timeout_secs(&self) -> u64 {
        self.page_load_timeout_secs
    }

    #[must_use]
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&PathBuf> {
        self.chrome_data_dir.as_ref()
    }
}
