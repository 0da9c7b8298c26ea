//! Integration tests for message exchange operations

mod common;

use std::time::Duration;

use common::QueueTestContext;
use pretty_assertions::assert_eq;
use serde_json::json;
use wrapped_queue::{
    AttributeValue, BatchEntry, MessageBody, OutboundMessage, QueueError, QueueHandle,
    ReceivedMessage,
};

/// Receives until `count` messages have arrived or the attempts run out.
async fn receive_at_least(handle: &QueueHandle, count: usize) -> Vec<ReceivedMessage> {
    let mut messages = Vec::new();
    for _ in 0..20 {
        messages.extend(
            handle
                .receive_messages(10)
                .await
                .expect("Failed to receive messages"),
        );
        if messages.len() >= count {
            break;
        }
        tokio::time::sleep(Duration::from_millis(250)).await;
    }
    messages
}

#[tokio::test]
async fn test_string_body_round_trip() {
    let ctx = QueueTestContext::new().await;
    let mut handle = ctx.create_queue("exchange-string-body").await;

    let message_id = handle
        .send_message(OutboundMessage::new("hello").attribute("k", "v"))
        .await
        .expect("Failed to send message");
    assert!(!message_id.is_empty(), "Message ID should not be empty");

    let messages = handle
        .receive_messages(1)
        .await
        .expect("Failed to receive messages");
    assert_eq!(messages.len(), 1, "Should receive exactly one message");

    let received = &messages[0];
    assert_eq!(received.body, MessageBody::Text("hello".to_string()));
    assert_eq!(
        received.attributes.get("k"),
        Some(&AttributeValue::String("v".to_string()))
    );
    assert_eq!(received.message_id, message_id);
    assert!(
        received.receipt_handle.is_some(),
        "Receipt handle should be present"
    );

    handle.delete().await.expect("Failed to delete queue");
}

#[tokio::test]
async fn test_json_body_round_trip() {
    let ctx = QueueTestContext::new().await;
    let mut handle = ctx.create_queue("exchange-json-body").await;

    handle
        .send_message(OutboundMessage::new(json!({ "x": 1 })))
        .await
        .expect("Failed to send message");

    let messages = handle
        .receive_messages(1)
        .await
        .expect("Failed to receive messages");
    assert_eq!(messages.len(), 1, "Should receive exactly one message");
    assert_eq!(messages[0].body, MessageBody::Json(json!({ "x": 1 })));

    handle.delete().await.expect("Failed to delete queue");
}

#[tokio::test]
async fn test_number_attribute_round_trip() {
    let ctx = QueueTestContext::new().await;
    let mut handle = ctx.create_queue("exchange-number-attribute").await;

    handle
        .send_message(OutboundMessage::new("payload").attribute("count", 42i64))
        .await
        .expect("Failed to send message");

    let messages = handle
        .receive_messages(1)
        .await
        .expect("Failed to receive messages");
    assert_eq!(messages.len(), 1, "Should receive exactly one message");
    assert_eq!(
        messages[0].attributes.get("count"),
        Some(&AttributeValue::Number(42.0))
    );

    handle.delete().await.expect("Failed to delete queue");
}

#[tokio::test]
async fn test_send_empty_body_fails() {
    let ctx = QueueTestContext::new().await;
    let mut handle = ctx.create_queue("exchange-empty-body").await;

    let error = handle
        .send_message(OutboundMessage::new(""))
        .await
        .expect_err("Empty body should be rejected");
    assert!(matches!(error, QueueError::InvalidArgument(_)));

    handle.delete().await.expect("Failed to delete queue");
}

#[tokio::test]
async fn test_batch_send_receive_delete() {
    let ctx = QueueTestContext::new().await;
    let mut handle = ctx.create_queue("exchange-batch").await;

    let entries = vec![
        BatchEntry::new("e1", OutboundMessage::new("first").attribute("k", "v1")),
        BatchEntry::new("e2", OutboundMessage::new("second").attribute("k", "v2")),
    ];
    let outcome = handle
        .send_message_batch(entries)
        .await
        .expect("Failed to send batch");
    assert!(outcome.all_successful(), "No entry should fail");
    assert_eq!(outcome.successful.len(), 2);

    let mut sent_ids: Vec<_> = outcome
        .successful
        .iter()
        .map(|sent| sent.id.as_str())
        .collect();
    sent_ids.sort_unstable();
    assert_eq!(sent_ids, vec!["e1", "e2"]);
    assert!(outcome
        .successful
        .iter()
        .all(|sent| !sent.message_id.is_empty()));

    let messages = receive_at_least(&handle, 2).await;
    assert_eq!(messages.len(), 2, "Should receive both batch messages");

    let outcome = handle
        .delete_message_batch(&messages)
        .await
        .expect("Failed to delete batch");
    assert!(outcome.all_successful(), "No delete entry should fail");
    assert_eq!(outcome.successful.len(), 2);

    // The deliveries were acknowledged, so nothing comes back.
    let leftovers = handle
        .receive_messages(10)
        .await
        .expect("Failed to receive messages");
    assert_eq!(leftovers.len(), 0, "Queue should be empty after ack");

    handle.delete().await.expect("Failed to delete queue");
}

#[tokio::test]
async fn test_batch_entry_with_empty_id_fails() {
    let ctx = QueueTestContext::new().await;
    let mut handle = ctx.create_queue("exchange-batch-bad-id").await;

    let entries = vec![
        BatchEntry::new("e1", OutboundMessage::new("ok")),
        BatchEntry::new("", OutboundMessage::new("missing id")),
    ];
    let error = handle
        .send_message_batch(entries)
        .await
        .expect_err("Empty entry id should be rejected");
    assert!(matches!(error, QueueError::InvalidArgument(_)));

    // The whole batch was rejected before any network call.
    let messages = handle
        .receive_messages(10)
        .await
        .expect("Failed to receive messages");
    assert_eq!(messages.len(), 0, "No entry should have been sent");

    handle.delete().await.expect("Failed to delete queue");
}

#[tokio::test]
async fn test_batch_with_no_entries_fails() {
    let ctx = QueueTestContext::new().await;
    let mut handle = ctx.create_queue("exchange-batch-empty").await;

    let error = handle
        .send_message_batch(Vec::new())
        .await
        .expect_err("Empty batch should be rejected");
    assert!(matches!(error, QueueError::InvalidArgument(_)));

    handle.delete().await.expect("Failed to delete queue");
}

#[tokio::test]
async fn test_delete_batch_reports_invalid_receipt_handle() {
    let ctx = QueueTestContext::new().await;
    let mut handle = ctx.create_queue("exchange-bad-receipt").await;

    handle
        .send_message(OutboundMessage::new("payload"))
        .await
        .expect("Failed to send message");
    let mut messages = receive_at_least(&handle, 1).await;
    assert_eq!(messages.len(), 1);

    messages[0].receipt_handle = Some("not-a-receipt-handle".to_string());
    let outcome = handle
        .delete_message_batch(&messages)
        .await
        .expect("Batch call itself should succeed");
    assert!(!outcome.all_successful());
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].id, messages[0].message_id);
    assert!(!outcome.failed[0].code.is_empty());

    handle.delete().await.expect("Failed to delete queue");
}

#[tokio::test]
async fn test_delete_batch_without_receipt_handle_fails() {
    let ctx = QueueTestContext::new().await;
    let mut handle = ctx.create_queue("exchange-no-receipt").await;

    let orphan = ReceivedMessage {
        message_id: "m1".to_string(),
        body: MessageBody::Text("payload".to_string()),
        attributes: Default::default(),
        receipt_handle: None,
    };
    let error = handle
        .delete_message_batch(&[orphan])
        .await
        .expect_err("Missing receipt handle should be rejected");
    assert!(matches!(error, QueueError::InvalidArgument(_)));

    handle.delete().await.expect("Failed to delete queue");
}
