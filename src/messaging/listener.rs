//! The scrape listener: a task that answers scrape commands for one page
//!
//! Requests arrive over an mpsc channel, each carrying its own oneshot for
//! the reply, so every request gets at most one response. Requests are
//! handled one at a time in arrival order. The task stops once every
//! `ScrapeClient` has been dropped.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::command::ScrapeCommand;
use super::errors::MessagingError;
use crate::dom::PageDocument;
use crate::extraction::{JobExtractor, ScrapedRecord};
use crate::utils::COMMAND_CHANNEL_CAPACITY;

/// A command paired with the channel its answer goes back on
#[derive(Debug)]
pub struct ScrapeRequest {
    pub command: ScrapeCommand,
    pub reply: oneshot::Sender<ScrapedRecord>,
}

/// A request that has been accepted by the listener and not yet answered
///
/// Await it for the record.
#[derive(Debug)]
pub struct PendingScrape {
    receiver: oneshot::Receiver<ScrapedRecord>,
}

impl PendingScrape {
    #[must_use]
    pub fn new(receiver: oneshot::Receiver<ScrapedRecord>) -> Self {
        Self { receiver }
    }
}

impl Future for PendingScrape {
    type Output = Result<ScrapedRecord, MessagingError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(record)) => Poll::Ready(Ok(record)),
            Poll::Ready(Err(_)) => Poll::Ready(Err(MessagingError::NoResponse)),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Sending side of the command channel
///
/// Cheap to clone; all clones talk to the same listener.
#[derive(Debug, Clone)]
pub struct ScrapeClient {
    sender: mpsc::Sender<ScrapeRequest>,
}

impl ScrapeClient {
    /// Queue a command without waiting for its answer
    ///
    /// # Errors
    ///
    /// Returns `MessagingError::ListenerClosed` if the listener has stopped.
    pub async fn submit(&self, command: ScrapeCommand) -> Result<PendingScrape, MessagingError> {
        let (reply, receiver) = oneshot::channel();
        self.sender
            .send(ScrapeRequest { command, reply })
            .await
            .map_err(|_| MessagingError::ListenerClosed)?;
        Ok(PendingScrape::new(receiver))
    }

    /// Send a command and wait for the record
    ///
    /// # Errors
    ///
    /// Returns `MessagingError` if the listener is gone or drops the request.
    pub async fn send(&self, command: ScrapeCommand) -> Result<ScrapedRecord, MessagingError> {
        self.submit(command).await?.await
    }

    /// Shorthand for `send(ScrapeCommand::ScrapeData)`
    ///
    /// # Errors
    ///
    /// Returns `MessagingError` if the listener is gone or drops the request.
    pub async fn scrape(&self) -> Result<ScrapedRecord, MessagingError> {
        self.send(ScrapeCommand::ScrapeData).await
    }

    /// Deliver a raw JSON message
    ///
    /// Messages that are not a known command get no response: `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `MessagingError` if the message is a command and the listener
    /// is gone or drops it.
    pub async fn send_message(
        &self,
        message: &Value,
    ) -> Result<Option<ScrapedRecord>, MessagingError> {
        match ScrapeCommand::from_message(message) {
            Some(command) => self.send(command).await.map(Some),
            None => {
                debug!("Ignoring message that is not a scrape command: {}", message);
                Ok(None)
            }
        }
    }

    /// Whether the listener has stopped
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Receiving side: owns the page and the extractor
pub struct ScrapeListener<D> {
    document: D,
    extractor: JobExtractor,
    receiver: mpsc::Receiver<ScrapeRequest>,
}

impl<D> ScrapeListener<D>
where
    D: PageDocument + 'static,
{
    /// Start a listener for `document` on the current tokio runtime
    ///
    /// The returned handle completes once every client is dropped.
    pub fn spawn(document: D, extractor: JobExtractor) -> (ScrapeClient, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let listener = Self {
            document,
            extractor,
            receiver,
        };
        let handle = tokio::spawn(listener.run());
        (ScrapeClient { sender }, handle)
    }

    async fn run(mut self) {
        info!("[JobHunter] Content script loaded");
        while let Some(request) = self.receiver.recv().await {
            debug!("[JobHunter] Received command {:?}", request.command);
            let record = match request.command {
                ScrapeCommand::ScrapeData => self.extractor.extract(&self.document).await,
            };
            if request.reply.send(record).is_err() {
                debug!("Requester went away before the record was ready");
            }
        }
        debug!("All scrape clients dropped, listener stopping");
    }
}
