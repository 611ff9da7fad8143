//! Core configuration types for job scraping
//!
//! `ScrapeConfig` is plain data: every field has a default, so a config file
//! only needs to name what it changes. Validation happens in `validate()`,
//! which also compiles the selectors.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use crate::dom::Locator;
use crate::extraction::JobLocators;
use crate::utils::{
    DEFAULT_PAGE_LOAD_TIMEOUT_SECS, DEFAULT_READINESS_TIMEOUT_MS, JOB_COMPANY_SELECTOR,
    JOB_DESCRIPTION_SELECTOR, JOB_METADATA_SELECTOR, JOB_TITLE_SELECTOR, METADATA_DELIMITER,
    METADATA_DELIMITER_MISENCODED,
};

/// CSS selectors for the four regions of a job details card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSelectors {
    pub title: String,
    pub company: String,
    pub metadata: String,
    pub description: String,
}

impl Default for JobSelectors {
    fn default() -> Self {
        Self {
            title: JOB_TITLE_SELECTOR.to_string(),
            company: JOB_COMPANY_SELECTOR.to_string(),
            metadata: JOB_METADATA_SELECTOR.to_string(),
            description: JOB_DESCRIPTION_SELECTOR.to_string(),
        }
    }
}

impl JobSelectors {
    /// Compile all four selectors
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSelector` naming the first field that
    /// does not parse.
    pub fn compile(&self) -> Result<JobLocators, ConfigError> {
        let parse = |field: &'static str, selector: &str| {
            Locator::parse(selector).map_err(|source| ConfigError::InvalidSelector { field, source })
        };
        Ok(JobLocators {
            title: parse("selectors.title", &self.title)?,
            company: parse("selectors.company", &self.company)?,
            metadata: parse("selectors.metadata", &self.metadata)?,
            description: parse("selectors.description", &self.description)?,
        })
    }
}

/// Main configuration struct for scraping operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub(crate) selectors: JobSelectors,

    /// How long extraction waits for the job card to render, in milliseconds
    ///
    /// Default: 5000
    pub(crate) readiness_timeout_ms: u64,

    /// Canonical separator of the metadata line
    pub(crate) metadata_delimiter: String,

    /// Alternate byte forms of the separator, rewritten to the canonical one
    /// before splitting
    pub(crate) delimiter_aliases: Vec<String>,

    pub(crate) headless: bool,

    /// Timeout in seconds for `page.goto()` plus `wait_for_navigation()`
    ///
    /// Default: 30 seconds
    pub(crate) page_load_timeout_secs: u64,

    /// Chrome profile directory; a fresh temp directory when unset
    pub(crate) chrome_data_dir: Option<PathBuf>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            selectors: JobSelectors::default(),
            readiness_timeout_ms: DEFAULT_READINESS_TIMEOUT_MS,
            metadata_delimiter: METADATA_DELIMITER.to_string(),
            delimiter_aliases: vec![METADATA_DELIMITER_MISENCODED.to_string()],
            headless: true,
            page_load_timeout_secs: DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
            chrome_data_dir: None,
        }
    }
}

impl ScrapeConfig {
    /// Load a config from a JSON file and validate it
    ///
    /// Fields missing from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read,
    /// `ConfigError::Parse` if it is not a valid config object, or any
    /// validation error from `validate()`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants and compile the selectors
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a `ConfigError`.
    pub fn validate(&self) -> Result<JobLocators, ConfigError> {
        if self.readiness_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "readiness_timeout_ms",
            });
        }
        if self.page_load_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "page_load_timeout_secs",
            });
        }
        if self.metadata_delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        self.selectors.compile()
    }
}
