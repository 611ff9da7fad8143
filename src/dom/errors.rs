//! Error types for page document operations

use chromiumoxide::error::CdpError;

/// Result type alias for document operations
pub type DomResult<T> = Result<T, DomError>;

/// Error types for page document operations
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// Selector text could not be parsed as CSS
    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// Chrome DevTools protocol call failed
    #[error("Browser communication failed: {0}")]
    Browser(#[from] CdpError),

    /// The document was closed or navigated away while being read
    #[error("Document is no longer available")]
    Detached,
}

/// DevTools error messages that mean the tab or its session is gone
const CLOSED_TARGET_MESSAGES: &[&str] = &[
    "No target with given id",
    "Target closed",
    "Session with given id not found",
    "Inspected target navigated or closed",
];

impl DomError {
    /// Classify a DevTools failure, folding a closed tab into `Detached`
    ///
    /// A dropped command channel means the browser handler has shut down,
    /// which leaves the page unreachable as well.
    #[must_use]
    pub fn from_cdp(err: CdpError) -> Self {
        match &err {
            CdpError::ChannelSendError(_) => Self::Detached,
            CdpError::Chrome(chrome)
                if CLOSED_TARGET_MESSAGES
                    .iter()
                    .any(|needle| chrome.message.contains(needle)) =>
            {
                Self::Detached
            }
            _ => Self::Browser(err),
        }
    }
}
