//! Job posting extraction: record types, metadata parsing and the pipeline

pub mod errors;
pub mod fields;
pub mod metadata;
pub mod pipeline;
pub mod schema;

pub use errors::{ExtractionError, ExtractionResult};
pub use fields::{JobLocators, Region, region_text};
pub use metadata::{MetadataDelimiter, parse_metadata};
pub use pipeline::JobExtractor;
pub use schema::{ExtractionFailure, JobMetadata, JobPosting, RecordShapeError, ScrapedRecord};
