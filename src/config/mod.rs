//! Configuration module for job scraping
//!
//! This module provides the `ScrapeConfig` struct, its builder and JSON file
//! loading, with validation and sensible defaults.

pub mod builder;
pub mod errors;
pub mod getters;
pub mod types;

pub use builder::ScrapeConfigBuilder;
pub use errors::ConfigError;
pub use types::{JobSelectors, ScrapeConfig};
