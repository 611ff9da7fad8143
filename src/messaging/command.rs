//! Commands accepted by the scrape listener

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request to the scrape listener
///
/// Wire form: `{"command": "SCRAPE_DATA"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum ScrapeCommand {
    /// Extract the job posting from the current page
    #[serde(rename = "SCRAPE_DATA")]
    ScrapeData,
}

impl ScrapeCommand {
    /// Recognize a command in a raw JSON message
    ///
    /// Anything that is not a known command gives `None`; the listener
    /// shares its inbox with unrelated traffic and stays silent on it.
    #[must_use]
    pub fn from_message(message: &Value) -> Option<Self> {
        Self::deserialize(message).ok()
    }
}
