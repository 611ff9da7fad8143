//! Mutation notifications and the subscription guard
//!
//! A `MutationSubscription` is the "observer" of a document: while it is
//! alive the document delivers `MutationBatch` values to it, and dropping it
//! unsubscribes. The detector relies on that drop to release observation on
//! every exit path.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use futures::stream::{self, BoxStream, StreamExt};
use serde::{Deserialize, Serialize};

/// Kind of structural or content change observed in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MutationKind {
    /// Child nodes inserted or removed at any depth
    ChildList,
    /// An attribute was added, changed or removed
    Attributes,
    /// Text content of a text node changed
    CharacterData,
    /// The whole document was replaced (navigation, full re-render)
    DocumentReplaced,
}

/// A group of mutations delivered together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationBatch {
    kinds: Vec<MutationKind>,
}

impl MutationBatch {
    #[must_use]
    pub fn new(kinds: Vec<MutationKind>) -> Self {
        Self { kinds }
    }

    #[must_use]
    pub fn single(kind: MutationKind) -> Self {
        Self { kinds: vec![kind] }
    }

    #[must_use]
    pub fn kinds(&self) -> &[MutationKind] {
        &self.kinds
    }

    #[must_use]
    pub fn contains(&self, kind: MutationKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Live subscription to a document's mutation stream
///
/// Ends (yields `None`) when the document goes away. Dropping the
/// subscription releases it.
pub struct MutationSubscription {
    inner: BoxStream<'static, MutationBatch>,
    on_release: Option<Box<dyn FnOnce() + Send>>,
}

impl MutationSubscription {
    /// Wrap any mutation stream as a subscription
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = MutationBatch> + Send + 'static,
    {
        Self {
            inner: stream.boxed(),
            on_release: None,
        }
    }

    /// Run `release` once when the subscription is dropped
    ///
    /// For backends whose observer lives outside the stream itself, such as
    /// a script installed in a browser page.
    #[must_use]
    pub fn on_release<F>(mut self, release: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_release = Some(Box::new(release));
        self
    }

    /// A subscription that stays open but never reports a change
    ///
    /// Used by documents that cannot change, so a waiting caller simply runs
    /// into its deadline.
    #[must_use]
    pub fn never() -> Self {
        Self::from_stream(stream::pending())
    }
}

impl Stream for MutationSubscription {
    type Item = MutationBatch;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl Drop for MutationSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.on_release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for MutationSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationSubscription").finish_non_exhaustive()
    }
}
