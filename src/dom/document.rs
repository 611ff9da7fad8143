//! The page document seam
//!
//! Extraction and readiness logic only ever talk to a `PageDocument`, which
//! keeps them independent of where the page lives: a static HTML string, an
//! in-memory page that changes over time, or a tab in a real browser.

use std::future::Future;
use std::sync::Arc;

use super::errors::DomResult;
use super::locator::Locator;
use super::mutation::MutationSubscription;

/// Read-only view of a rendered page plus its change notifications
pub trait PageDocument: Send + Sync {
    /// DOM `textContent` of the first element matching `locator`
    ///
    /// Returns the concatenated text of all descendant text nodes, untrimmed,
    /// or `None` when nothing matches.
    fn text_content(
        &self,
        locator: &Locator,
    ) -> impl Future<Output = DomResult<Option<String>>> + Send;

    /// Subscribe to structural and content mutations anywhere in the page
    ///
    /// The returned subscription is released when dropped.
    fn observe(&self) -> impl Future<Output = DomResult<MutationSubscription>> + Send;
}

impl<D: PageDocument> PageDocument for Arc<D> {
    fn text_content(
        &self,
        locator: &Locator,
    ) -> impl Future<Output = DomResult<Option<String>>> + Send {
        (**self).text_content(locator)
    }

    fn observe(&self) -> impl Future<Output = DomResult<MutationSubscription>> + Send {
        (**self).observe()
    }
}
