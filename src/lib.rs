pub mod browser_session;
pub mod browser_setup;
pub mod config;
pub mod dom;
pub mod extraction;
pub mod messaging;
pub mod readiness;
pub mod utils;

pub use browser_session::BrowserSession;
pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use config::{ConfigError, JobSelectors, ScrapeConfig, ScrapeConfigBuilder};
pub use dom::{
    ChromeDocument, DomError, HtmlSnapshot, LiveDocument, Locator, MutationBatch, MutationKind,
    MutationSubscription, PageDocument,
};
pub use extraction::{
    ExtractionError, ExtractionFailure, JobExtractor, JobLocators, JobMetadata, JobPosting,
    MetadataDelimiter, ScrapedRecord, parse_metadata,
};
pub use messaging::{MessagingError, ScrapeClient, ScrapeCommand, ScrapeListener};
pub use readiness::{ReadyElement, wait_for_element, wait_for_element_default};
