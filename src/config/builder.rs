//! Fluent builder for `ScrapeConfig`
//!
//! Starts from the defaults; every setter is optional. `build()` runs the
//! same validation as `ScrapeConfig::validate()` so an invalid config never
//! leaves the builder.

use std::path::PathBuf;

use super::errors::ConfigError;
use super::types::{JobSelectors, ScrapeConfig};

#[derive(Debug, Clone, Default)]
pub struct ScrapeConfigBuilder {
    config: ScrapeConfig,
}

impl ScrapeConfig {
    /// Create a builder seeded with the defaults
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder {
        ScrapeConfigBuilder::default()
    }
}

impl From<ScrapeConfig> for ScrapeConfigBuilder {
    /// Continue from an existing config, e.g. one loaded from a file
    fn from(config: ScrapeConfig) -> Self {
        Self { config }
    }
}

impl ScrapeConfigBuilder {
    #[must_use]
    pub fn selectors(mut self, selectors: JobSelectors) -> Self {
        self.config.selectors = selectors;
        self
    }

    #[must_use]
    pub fn title_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.selectors.title = selector.into();
        self
    }

    #[must_use]
    pub fn company_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.selectors.company = selector.into();
        self
    }

    #[must_use]
    pub fn metadata_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.selectors.metadata = selector.into();
        self
    }

    #[must_use]
    pub fn description_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.selectors.description = selector.into();
        self
    }

    /// Set the readiness wait in milliseconds
    ///
    /// # Example
    /// ```rust
    /// # use jobhunter_scrape::config::ScrapeConfig;
    /// # fn main() -> anyhow::Result<()> {
    /// let config = ScrapeConfig::builder()
    ///     .readiness_timeout_ms(10_000) // slow connection
    ///     .build()?;
    /// assert_eq!(config.readiness_timeout_ms(), 10_000);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn readiness_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.readiness_timeout_ms = timeout_ms;
        self
    }

    #[must_use]
    pub fn metadata_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.config.metadata_delimiter = delimiter.into();
        self
    }

    #[must_use]
    pub fn delimiter_aliases(mut self, aliases: Vec<String>) -> Self {
        self.config.delimiter_aliases = aliases;
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    #[must_use]
    pub fn page_load_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.page_load_timeout_secs = timeout_secs;
        self
    }

    #[must_use]
    pub fn chrome_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.config.chrome_data_dir = dir;
        self
    }

    /// Validate and return the config
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a `ConfigError`.
    pub fn build(self) -> Result<ScrapeConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::JOB_TITLE_SELECTOR;

    #[test]
    fn test_defaults_build() {
        let config = ScrapeConfig::builder().build().unwrap();
        assert_eq!(config, ScrapeConfig::default());
        assert_eq!(config.selectors().title, JOB_TITLE_SELECTOR);
        assert_eq!(config.readiness_timeout_ms(), 5_000);
        assert!(config.headless());
    }

    #[test]
    fn test_zero_readiness_timeout_rejected() {
        let err = ScrapeConfig::builder()
            .readiness_timeout_ms(0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroTimeout {
                field: "readiness_timeout_ms"
            }
        ));
    }

    #[test]
    fn test_invalid_selector_names_field() {
        let err = ScrapeConfig::builder()
            .company_selector("div[[")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSelector {
                field: "selectors.company",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let err = ScrapeConfig::builder()
            .metadata_delimiter("")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyDelimiter));
    }

    #[test]
    fn test_builder_from_existing_config() {
        let base = ScrapeConfig::builder().headless(false).build().unwrap();
        let config = ScrapeConfigBuilder::from(base)
            .page_load_timeout_secs(5)
            .build()
            .unwrap();
        assert!(!config.headless());
        assert_eq!(config.page_load_timeout_secs(), 5);
    }
}
