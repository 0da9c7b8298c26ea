//! Handle state preconditions
//!
//! Every message and purge operation on a handle that was never initialized
//! fails with `NotInitialized` before any network call, so these tests need
//! no queue service behind them.

use pretty_assertions::assert_eq;
use wrapped_queue::{
    BatchEntry, MessageBody, OutboundMessage, QueueClientConfig, QueueError, QueueHandle,
    ReceivedMessage, DEFAULT_REGION,
};

async fn unbound_handle() -> QueueHandle {
    QueueHandle::from_config(QueueClientConfig::default()).await
}

#[test]
fn test_default_config_uses_documented_region() {
    let config = QueueClientConfig::default();
    assert_eq!(config.region, DEFAULT_REGION);
    assert_eq!(config.endpoint_url, None);
}

#[tokio::test]
async fn test_fresh_handle_is_unbound() {
    let handle = unbound_handle().await;
    assert!(!handle.is_initialized());
    assert_eq!(handle.name(), None);
    assert_eq!(handle.url(), None);
}

#[tokio::test]
async fn test_purge_requires_initialization() {
    let handle = unbound_handle().await;
    assert!(matches!(
        handle.purge().await,
        Err(QueueError::NotInitialized)
    ));
}

#[tokio::test]
async fn test_send_message_requires_initialization() {
    let handle = unbound_handle().await;
    assert!(matches!(
        handle.send_message(OutboundMessage::new("hello")).await,
        Err(QueueError::NotInitialized)
    ));
}

#[tokio::test]
async fn test_send_message_batch_requires_initialization() {
    let handle = unbound_handle().await;
    let entries = vec![BatchEntry::new("e1", OutboundMessage::new("hello"))];
    assert!(matches!(
        handle.send_message_batch(entries).await,
        Err(QueueError::NotInitialized)
    ));
}

#[tokio::test]
async fn test_receive_messages_requires_initialization() {
    let handle = unbound_handle().await;
    assert!(matches!(
        handle.receive_messages(1).await,
        Err(QueueError::NotInitialized)
    ));
}

#[tokio::test]
async fn test_delete_message_batch_requires_initialization() {
    let handle = unbound_handle().await;
    let message = ReceivedMessage {
        message_id: "m1".to_string(),
        body: MessageBody::Text("payload".to_string()),
        attributes: Default::default(),
        receipt_handle: Some("rh1".to_string()),
    };
    assert!(matches!(
        handle.delete_message_batch(&[message]).await,
        Err(QueueError::NotInitialized)
    ));
}

#[tokio::test]
async fn test_delete_requires_initialization() {
    let mut handle = unbound_handle().await;
    assert!(matches!(
        handle.delete().await,
        Err(QueueError::NotInitialized)
    ));
}
