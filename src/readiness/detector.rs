//! Wait for a page region to be rendered, bounded by a timeout
//!
//! Job pages inject their content after the initial load, and the parts of
//! the card arrive at different times. The detector checks the region once
//! up front and, only if it is not ready yet, subscribes to the document's
//! mutation stream and re-checks after every batch until the predicate holds
//! or the deadline passes.
//!
//! The subscription is a guard owned by this function. It is dropped on
//! every exit path: success, timeout, end of stream, and cancellation of
//! the returned future.

use std::time::Duration;

use futures::StreamExt;
use serde::Serialize;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, trace, warn};

use crate::dom::{Locator, PageDocument};
use crate::utils::{DEFAULT_READINESS_TIMEOUT_MS, log_preview};

/// A region that satisfied its readiness predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadyElement {
    /// Selector the region was found with
    pub selector: String,
    /// Text content of the region at the moment it became ready
    pub text: String,
}

/// Wait for the first element matching `locator` whose text satisfies `predicate`.
///
/// Resolves to `None` when nothing qualifies before `timeout`. That is a
/// normal outcome, not an error: callers that only use the wait as a
/// synchronization point go on and read whatever the page has.
///
/// Query errors while waiting count as "not ready" for that batch. A failed
/// subscription or a mutation stream that ends resolves to `None` at once,
/// since no further change can be observed.
///
/// A panicking predicate unwinds through this function; the subscription is
/// still released.
pub async fn wait_for_element<D, P>(
    document: &D,
    locator: &Locator,
    predicate: P,
    timeout: Duration,
) -> Option<ReadyElement>
where
    D: PageDocument,
    P: Fn(&str) -> bool + Send + Sync,
{
    let deadline = Instant::now() + timeout;

    if let Some(found) = probe(document, locator, &predicate).await {
        debug!("Region {} already ready, no observer needed", locator);
        return Some(found);
    }

    let mut subscription = match document.observe().await {
        Ok(subscription) => subscription,
        Err(e) => {
            warn!("Could not observe mutations while waiting for {}: {}", locator, e);
            return None;
        }
    };
    debug!("Waiting up to {:?} for region {}", timeout, locator);

    let outcome = timeout_at(deadline, async {
        // Covers changes that landed between the first probe and subscribing.
        if let Some(found) = probe(document, locator, &predicate).await {
            return Some(found);
        }
        while let Some(batch) = subscription.next().await {
            trace!("Mutation batch {:?}, re-checking {}", batch.kinds(), locator);
            if let Some(found) = probe(document, locator, &predicate).await {
                return Some(found);
            }
        }
        debug!("Mutation stream for {} ended before the region was ready", locator);
        None
    })
    .await;
    drop(subscription);

    match outcome {
        Ok(Some(found)) => {
            debug!("Region {} ready: {}", locator, log_preview(&found.text));
            Some(found)
        }
        Ok(None) => None,
        Err(_) => {
            warn!("Timed out after {:?} waiting for region {}", timeout, locator);
            None
        }
    }
}

/// `wait_for_element` with the default 5 second timeout
pub async fn wait_for_element_default<D, P>(
    document: &D,
    locator: &Locator,
    predicate: P,
) -> Option<ReadyElement>
where
    D: PageDocument,
    P: Fn(&str) -> bool + Send + Sync,
{
    wait_for_element(
        document,
        locator,
        predicate,
        Duration::from_millis(DEFAULT_READINESS_TIMEOUT_MS),
    )
    .await
}

async fn probe<D, P>(document: &D, locator: &Locator, predicate: &P) -> Option<ReadyElement>
where
    D: PageDocument,
    P: Fn(&str) -> bool + Send + Sync,
{
    match document.text_content(locator).await {
        Ok(Some(text)) if predicate(&text) => Some(ReadyElement {
            selector: locator.as_str().to_string(),
            text,
        }),
        Ok(_) => None,
        Err(e) => {
            debug!("Query for {} failed, treating as not ready: {}", locator, e);
            None
        }
    }
}
