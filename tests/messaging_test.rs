//! The SCRAPE_DATA command round trip through the listener task

use std::sync::Arc;
use std::time::Duration;

use jobhunter_scrape::dom::{HtmlSnapshot, LiveDocument};
use jobhunter_scrape::messaging::{MessagingError, ScrapeCommand, ScrapeListener};
use serde_json::json;
use tokio::time::sleep;

mod common;
use common::{
    DetachedDocument, METADATA, extractor_with_timeout, locator, rendered_job_page,
    skeleton_job_page,
};

const SHORT_WAIT: Duration = Duration::from_millis(30);

#[tokio::test]
async fn test_scrape_returns_record() {
    let doc = HtmlSnapshot::new(rendered_job_page());
    let (client, listener) = ScrapeListener::spawn(doc, extractor_with_timeout(SHORT_WAIT));

    let record = client.scrape().await.unwrap();
    assert_eq!(record.data().unwrap().title, "Senior Rust Engineer");

    drop(client);
    listener.await.unwrap();
}

#[tokio::test]
async fn test_raw_scrape_message_gets_wire_record() {
    let doc = HtmlSnapshot::new(rendered_job_page());
    let (client, _listener) = ScrapeListener::spawn(doc, extractor_with_timeout(SHORT_WAIT));

    let record = client
        .send_message(&json!({"command": "SCRAPE_DATA"}))
        .await
        .unwrap()
        .expect("SCRAPE_DATA is answered");

    let wire = serde_json::to_value(&record).unwrap();
    assert_eq!(wire["success"], json!(true));
    assert_eq!(wire["data"]["company"], json!("Acme Corp"));
    assert_eq!(wire["data"]["metadata"]["promotedBy"], json!("Promoted by John Doe"));
}

#[tokio::test]
async fn test_foreign_messages_get_no_response() {
    let doc = HtmlSnapshot::new(rendered_job_page());
    let (client, _listener) = ScrapeListener::spawn(doc, extractor_with_timeout(SHORT_WAIT));

    for message in [
        json!({"command": "PING"}),
        json!({"action": "SCRAPE_DATA"}),
        json!("SCRAPE_DATA"),
    ] {
        assert_eq!(client.send_message(&message).await.unwrap(), None);
    }
}

#[tokio::test]
async fn test_failure_is_a_response_not_an_error() {
    let (client, _listener) =
        ScrapeListener::spawn(DetachedDocument, extractor_with_timeout(SHORT_WAIT));

    let record = client.send(ScrapeCommand::ScrapeData).await.unwrap();
    assert!(!record.is_success());
    assert!(record.error().is_some());
}

#[tokio::test]
async fn test_requests_answered_in_arrival_order() {
    let doc = Arc::new(LiveDocument::new(&skeleton_job_page()));
    let (client, _listener) = ScrapeListener::spawn(
        Arc::clone(&doc),
        extractor_with_timeout(Duration::from_secs(5)),
    );

    // The first request blocks the listener until the card renders.
    let first = client.submit(ScrapeCommand::ScrapeData).await.unwrap();
    let second = client.submit(ScrapeCommand::ScrapeData).await.unwrap();

    sleep(Duration::from_millis(30)).await;
    doc.set_text(&locator(METADATA), "Remote · Posted today");

    let first = first.await.unwrap();
    let second = second.await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.data().unwrap().metadata.location, "Remote");
    // Only the first request had to wait.
    assert_eq!(doc.subscriptions_opened(), 1);
}

#[tokio::test]
async fn test_closed_listener_is_reported() {
    let doc = HtmlSnapshot::new(rendered_job_page());
    let (client, listener) = ScrapeListener::spawn(doc, extractor_with_timeout(SHORT_WAIT));

    listener.abort();
    let _ = listener.await;

    assert!(client.is_closed());
    assert_eq!(client.scrape().await, Err(MessagingError::ListenerClosed));
}

#[tokio::test]
async fn test_listener_stops_when_all_clients_drop() {
    let doc = HtmlSnapshot::new(rendered_job_page());
    let (client, listener) = ScrapeListener::spawn(doc, extractor_with_timeout(SHORT_WAIT));
    let other = client.clone();

    drop(client);
    assert!(other.scrape().await.unwrap().is_success());
    drop(other);

    tokio::time::timeout(Duration::from_secs(1), listener)
        .await
        .expect("listener exits once clients are gone")
        .unwrap();
}
