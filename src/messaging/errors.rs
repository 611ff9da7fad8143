//! Error types for the scrape command channel

/// Errors seen by a `ScrapeClient`
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MessagingError {
    /// The listener task has stopped and accepts no more requests
    #[error("Scrape listener is no longer running")]
    ListenerClosed,

    /// The listener dropped the request without answering it
    #[error("Scrape listener dropped the request without a response")]
    NoResponse,
}
