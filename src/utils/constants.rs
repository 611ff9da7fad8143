//! Shared configuration constants for jobhunter_scrape
//!
//! Default values used by the config layer, the readiness detector and the
//! extraction pipeline, kept in one place to avoid magic numbers.

/// Default readiness wait: 5000 ms
///
/// Long enough for the job details card to be injected by the page scripts
/// on a typical connection. After this the detector resolves to "not found"
/// and extraction proceeds with whatever is on the page.
pub const DEFAULT_READINESS_TIMEOUT_MS: u64 = 5_000;

/// Default timeout for `page.goto()` plus `wait_for_navigation()`
pub const DEFAULT_PAGE_LOAD_TIMEOUT_SECS: u64 = 30;

/// Capacity of a live document's mutation broadcast channel
///
/// Observers that fall further behind than this see a lag notification,
/// which the detector treats as a single batch.
pub const MUTATION_CHANNEL_CAPACITY: usize = 256;

/// Capacity of the command channel between `ScrapeClient` and `ScrapeListener`
pub const COMMAND_CHANNEL_CAPACITY: usize = 16;

/// Job title region of the job details top card
pub const JOB_TITLE_SELECTOR: &str = ".job-details-jobs-unified-top-card__job-title";

/// Company name region of the job details top card
pub const JOB_COMPANY_SELECTOR: &str = ".job-details-jobs-unified-top-card__company-name";

/// Composite metadata line (location, posting age, applicants, ...)
///
/// This is the busiest region of the card and the last one to be filled in,
/// so it doubles as the readiness signal for the whole card.
pub const JOB_METADATA_SELECTOR: &str =
    ".job-details-jobs-unified-top-card__primary-description-container";

/// Full job description body
pub const JOB_DESCRIPTION_SELECTOR: &str = ".jobs-description__content";

/// Canonical metadata separator: U+00B7 MIDDLE DOT
pub const METADATA_DELIMITER: &str = "\u{00B7}";

/// Mis-encoded metadata separator: U+00C2 U+00B7
///
/// The target page serves the middle dot as UTF-8 bytes `C2 B7` that end up
/// decoded as Latin-1 in some contexts, which reads as "Â·". Splitting only on
/// the canonical dot would leave the stray "Â" glued to every segment.
pub const METADATA_DELIMITER_MISENCODED: &str = "\u{00C2}\u{00B7}";

/// Maximum characters of page text echoed into log lines
pub const LOG_PREVIEW_CHARS: usize = 80;

/// Chrome user agent string
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
