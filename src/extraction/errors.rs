//! Error types for job extraction

use crate::dom::DomError;

use super::fields::Region;

/// Result type alias for extraction operations
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Errors raised while reading a job posting from a page
///
/// These never leave `JobExtractor::extract`: they are captured into a
/// failure record there. `try_extract` exposes them directly.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// Querying one region of the page failed
    #[error("Failed to read {region} region '{selector}'")]
    RegionRead {
        region: Region,
        selector: String,
        #[source]
        source: DomError,
    },
}

impl ExtractionError {
    /// The region whose read failed
    #[must_use]
    pub fn region(&self) -> Region {
        match self {
            Self::RegionRead { region, .. } => *region,
        }
    }
}
