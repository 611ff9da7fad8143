//! Documents backed by a live Chrome tab
//!
//! Reads go through `page.content()` and the same selector engine as the
//! snapshot backend, so a region resolves identically whether the HTML came
//! from disk or from the browser.
//!
//! Mutations are observed inside the page. Each subscription installs a
//! `MutationObserver` on `document` (subtree, childList, attributes,
//! characterData) that reports record types through a `Runtime.addBinding`
//! callback. The same script is registered to run at the start of every new
//! document, where it first reports `documentReplaced`. Chrome's own `DOM`
//! domain events only cover nodes already pushed to the client, so they miss
//! content rendered after the first tree request.

use std::sync::atomic::{AtomicU64, Ordering};

use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::page::{
    AddScriptToEvaluateOnNewDocumentParams, RemoveScriptToEvaluateOnNewDocumentParams,
};
use chromiumoxide::cdp::js_protocol::runtime::{AddBindingParams, EventBindingCalled};
use futures::future;
use futures::stream::StreamExt;
use serde::Deserialize;
use tracing::debug;

use super::document::PageDocument;
use super::errors::{DomError, DomResult};
use super::locator::Locator;
use super::mutation::{MutationBatch, MutationKind, MutationSubscription};
use super::snapshot::text_content_in;

/// Page-global function the observer script reports through
pub const MUTATION_BINDING: &str = "__jobhunterMutation";

/// Page-global registry of installed observers, keyed by subscription id
const OBSERVER_REGISTRY: &str = "__jobhunterObservers";

static NEXT_OBSERVER_ID: AtomicU64 = AtomicU64::new(1);

/// A page open in Chrome, viewed as a `PageDocument`
#[derive(Debug, Clone)]
pub struct ChromeDocument {
    page: Page,
}

impl ChromeDocument {
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }
}

impl PageDocument for ChromeDocument {
    async fn text_content(&self, locator: &Locator) -> DomResult<Option<String>> {
        let html = self.page.content().await.map_err(DomError::from_cdp)?;
        Ok(text_content_in(&html, locator))
    }

    async fn observe(&self) -> DomResult<MutationSubscription> {
        let id = NEXT_OBSERVER_ID.fetch_add(1, Ordering::Relaxed);

        // Listener first so no report sent during installation is lost.
        let calls = self
            .page
            .event_listener::<EventBindingCalled>()
            .await
            .map_err(DomError::from_cdp)?;
        self.page
            .execute(AddBindingParams::new(MUTATION_BINDING))
            .await
            .map_err(DomError::from_cdp)?;

        let on_new_document = self
            .page
            .execute(AddScriptToEvaluateOnNewDocumentParams::new(observer_script(
                id, true,
            )))
            .await
            .map_err(DomError::from_cdp)?;
        let script_id = on_new_document.result.identifier.clone();

        self.page
            .evaluate(observer_script(id, false))
            .await
            .map_err(DomError::from_cdp)?;
        debug!(observer = id, "Mutation observer installed in page");

        let batches = calls
            .filter_map(move |call| future::ready(observer_batch(&call.name, &call.payload, id)));

        let page = self.page.clone();
        Ok(MutationSubscription::from_stream(batches).on_release(move || {
            let Ok(runtime) = tokio::runtime::Handle::try_current() else {
                return;
            };
            runtime.spawn(async move {
                let removed = page
                    .execute(RemoveScriptToEvaluateOnNewDocumentParams::new(script_id))
                    .await;
                let disconnected = page.evaluate(disconnect_script(id)).await;
                if removed.is_err() || disconnected.is_err() {
                    debug!(observer = id, "Page closed before observer cleanup");
                }
            });
        }))
    }
}

/// Body of one binding call from the observer script
#[derive(Debug, Deserialize)]
struct ObserverReport {
    id: u64,
    kinds: Vec<MutationKind>,
}

/// Decode a binding call into a batch for subscription `id`
///
/// Calls for other bindings, other subscriptions or with an unreadable body
/// yield `None`. `MutationRecord.type` values map directly onto
/// `MutationKind` names.
fn observer_batch(name: &str, payload: &str, id: u64) -> Option<MutationBatch> {
    if name != MUTATION_BINDING {
        return None;
    }
    match serde_json::from_str::<ObserverReport>(payload) {
        Ok(report) if report.id == id && !report.kinds.is_empty() => {
            Some(MutationBatch::new(report.kinds))
        }
        Ok(_) => None,
        Err(e) => {
            debug!(observer = id, error = %e, "Ignoring malformed mutation report");
            None
        }
    }
}

/// Script installing observer `id` on the current document
///
/// With `on_new_document` set it runs before any page script and reports
/// the fresh document as `documentReplaced`.
fn observer_script(id: u64, on_new_document: bool) -> String {
    let announce = if on_new_document {
        r#"report(["documentReplaced"]);"#
    } else {
        ""
    };
    format!(
        r#"(() => {{
  const registry = (window.{OBSERVER_REGISTRY} = window.{OBSERVER_REGISTRY} || {{}});
  if (registry[{id}]) {{ return; }}
  const report = (kinds) => {{
    if (typeof window.{MUTATION_BINDING} === "function") {{
      window.{MUTATION_BINDING}(JSON.stringify({{ id: {id}, kinds }}));
    }}
  }};
  const observer = new MutationObserver((records) => report(records.map((r) => r.type)));
  observer.observe(document, {{ childList: true, subtree: true, attributes: true, characterData: true }});
  registry[{id}] = observer;
  {announce}
}})()"#
    )
}

/// Script disconnecting observer `id` if it is still installed
fn disconnect_script(id: u64) -> String {
    format!(
        r#"(() => {{
  const registry = window.{OBSERVER_REGISTRY};
  if (registry && registry[{id}]) {{
    registry[{id}].disconnect();
    delete registry[{id}];
  }}
}})()"#
    )
}
