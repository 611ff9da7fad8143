//! Page documents: where extraction reads from and what readiness observes
//!
//! `PageDocument` is implemented by three backends:
//! - `HtmlSnapshot`: static HTML that never changes
//! - `LiveDocument`: an in-memory page that publishes a mutation per change
//! - `ChromeDocument`: a tab in a running Chrome, observed over DevTools

pub mod chrome;
pub mod document;
pub mod errors;
pub mod live;
pub mod locator;
pub mod mutation;
pub mod snapshot;

pub use chrome::ChromeDocument;
pub use document::PageDocument;
pub use errors::{DomError, DomResult};
pub use live::LiveDocument;
pub use locator::Locator;
pub use mutation::{MutationBatch, MutationKind, MutationSubscription};
pub use snapshot::{HtmlSnapshot, text_content_in};
