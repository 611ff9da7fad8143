//! Command channel between a requester and the page being scraped

pub mod command;
pub mod errors;
pub mod listener;

pub use command::ScrapeCommand;
pub use errors::MessagingError;
pub use listener::{PendingScrape, ScrapeClient, ScrapeListener, ScrapeRequest};
