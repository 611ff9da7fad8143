//! In-memory documents that change over time
//!
//! `LiveDocument` stands in for a page whose scripts keep rendering after the
//! initial load. Every change publishes a `MutationBatch` on a broadcast
//! channel, one receiver per active subscription, following the same
//! publish/subscribe shape as an event bus.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use ego_tree::NodeId;
use parking_lot::RwLock;
use scraper::node::Text;
use scraper::{Html, Node, Selector, StrTendril};
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tracing::trace;

use super::document::PageDocument;
use super::errors::DomResult;
use super::locator::Locator;
use super::mutation::{MutationBatch, MutationKind, MutationSubscription};
use super::snapshot::text_content_in;
use crate::utils::MUTATION_CHANNEL_CAPACITY;

/// A mutable page that notifies observers of every change
#[derive(Debug)]
pub struct LiveDocument {
    html: RwLock<String>,
    sender: broadcast::Sender<MutationBatch>,
    subscriptions_opened: AtomicUsize,
    revision: AtomicU64,
}

impl LiveDocument {
    /// Create a document from a full HTML page or a body fragment
    #[must_use]
    pub fn new(html: &str) -> Self {
        let (sender, _) = broadcast::channel(MUTATION_CHANNEL_CAPACITY);
        Self {
            html: RwLock::new(Html::parse_document(html).html()),
            sender,
            subscriptions_opened: AtomicUsize::new(0),
            revision: AtomicU64::new(0),
        }
    }

    /// Current serialized HTML
    #[must_use]
    pub fn html(&self) -> String {
        self.html.read().clone()
    }

    /// Number of subscriptions currently alive
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Number of subscriptions ever opened on this document
    #[must_use]
    pub fn subscriptions_opened(&self) -> usize {
        self.subscriptions_opened.load(Ordering::Acquire)
    }

    /// Number of mutations applied so far
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    /// Replace the whole body
    pub fn set_body(&self, body: &str) {
        let rendered = Html::parse_document(&format!("<html><head></head><body>{body}</body></html>"));
        *self.html.write() = rendered.html();
        self.publish(MutationKind::ChildList);
    }

    /// Append an HTML fragment as the last children of `<body>`
    ///
    /// The page is re-rendered from `<head>` and `<body>` contents, so
    /// attributes on `<html>` and `<body>` themselves are not preserved.
    pub fn append_to_body(&self, fragment: &str) {
        {
            let mut html = self.html.write();
            let document = Html::parse_document(&html);
            let head = inner_html_of(&document, "head");
            let body = inner_html_of(&document, "body");
            let rendered = Html::parse_document(&format!(
                "<html><head>{head}</head><body>{body}{fragment}</body></html>"
            ));
            *html = rendered.html();
        }
        self.publish(MutationKind::ChildList);
    }

    /// Replace the children of the first match with a single text node
    ///
    /// Returns `false` and publishes nothing when `locator` matches nothing.
    pub fn set_text(&self, locator: &Locator, text: &str) -> bool {
        let changed = self.edit(locator, |document, id| {
            let Some(mut node) = document.tree.get_mut(id) else {
                return false;
            };
            while let Some(mut child) = node.first_child() {
                child.detach();
            }
            node.append(Node::Text(Text {
                text: StrTendril::from(text.to_owned()),
            }));
            true
        });
        if changed {
            self.publish(MutationKind::CharacterData);
        }
        changed
    }

    /// Remove the first match from the page
    ///
    /// Returns `false` and publishes nothing when `locator` matches nothing.
    pub fn remove(&self, locator: &Locator) -> bool {
        let changed = self.edit(locator, |document, id| match document.tree.get_mut(id) {
            Some(mut node) => {
                node.detach();
                true
            }
            None => false,
        });
        if changed {
            self.publish(MutationKind::ChildList);
        }
        changed
    }

    fn edit<F>(&self, locator: &Locator, apply: F) -> bool
    where
        F: FnOnce(&mut Html, NodeId) -> bool,
    {
        let mut html = self.html.write();
        let mut document = Html::parse_document(&html);
        let Some(id) = document.select(locator.selector()).next().map(|el| el.id()) else {
            return false;
        };
        if !apply(&mut document, id) {
            return false;
        }
        *html = document.html();
        true
    }

    fn publish(&self, kind: MutationKind) {
        self.revision.fetch_add(1, Ordering::AcqRel);
        // No observers is the normal case outside of a wait.
        let delivered = self.sender.send(MutationBatch::single(kind)).unwrap_or(0);
        trace!("Published {:?} mutation to {} observer(s)", kind, delivered);
    }
}

fn inner_html_of(document: &Html, tag: &str) -> String {
    Selector::parse(tag)
        .ok()
        .and_then(|selector| document.select(&selector).next().map(|el| el.inner_html()))
        .unwrap_or_default()
}

impl PageDocument for LiveDocument {
    async fn text_content(&self, locator: &Locator) -> DomResult<Option<String>> {
        let html = self.html.read().clone();
        Ok(text_content_in(&html, locator))
    }

    async fn observe(&self) -> DomResult<MutationSubscription> {
        let receiver = self.sender.subscribe();
        self.subscriptions_opened.fetch_add(1, Ordering::AcqRel);
        let stream = BroadcastStream::new(receiver).map(|item| match item {
            Ok(batch) => batch,
            // Missed batches collapse into one empty batch: "something changed".
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                trace!("Mutation observer lagged, {} batches skipped", skipped);
                MutationBatch::new(Vec::new())
            }
        });
        Ok(MutationSubscription::from_stream(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_replaces_children() {
        let doc = LiveDocument::new(r#"<div class="meta"><span>old</span></div>"#);
        let locator = Locator::parse(".meta").unwrap();
        assert!(doc.set_text(&locator, "Remote · Posted today"));
        let text = text_content_in(&doc.html(), &locator);
        assert_eq!(text.as_deref(), Some("Remote · Posted today"));
        assert_eq!(doc.revision(), 1);
    }

    #[test]
    fn test_edits_on_missing_region_publish_nothing() {
        let doc = LiveDocument::new("<p>hello</p>");
        let locator = Locator::parse(".missing").unwrap();
        assert!(!doc.set_text(&locator, "x"));
        assert!(!doc.remove(&locator));
        assert_eq!(doc.revision(), 0);
    }

    #[test]
    fn test_append_keeps_existing_body() {
        let doc = LiveDocument::new(r#"<h1 class="t">Title</h1>"#);
        doc.append_to_body(r#"<div class="d">Body</div>"#);
        let html = doc.html();
        assert!(html.contains("Title"));
        assert!(html.contains("Body"));
    }

    #[tokio::test]
    async fn test_observer_receives_batches_and_releases_on_drop() {
        let doc = LiveDocument::new("<p>hello</p>");
        let mut subscription = doc.observe().await.unwrap();
        assert_eq!(doc.observer_count(), 1);

        doc.set_body("<p>bye</p>");
        let batch = subscription.next().await.unwrap();
        assert!(batch.contains(MutationKind::ChildList));

        drop(subscription);
        assert_eq!(doc.observer_count(), 0);
        assert_eq!(doc.subscriptions_opened(), 1);
    }
}
