//! Thin wrapper around an AWS SQS queue
//!
//! This crate binds a logical queue name to its remote URL and exposes queue
//! lifecycle operations (create, resolve, delete, purge) and message exchange
//! operations (send, receive, acknowledge) with standard logging. All durable
//! behavior (delivery guarantees, visibility timeouts, dead-letter handling)
//! belongs to SQS itself; this adapter only translates shapes at the boundary:
//! message bodies are strings on the wire and opportunistically JSON-decoded
//! on receive, and message attributes map between a flat string-or-number form
//! and the SQS (data type, string value) encoding.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Message attribute encode/decode rules
pub mod attributes;
/// Error types for queue operations
pub mod error;
/// The queue handle and its lifecycle and message operations
pub mod handle;
/// Common types for queue operations
pub mod types;

pub use attributes::{decode_message_attributes, encode_message_attributes};
pub use error::{QueueError, QueueResult};
pub use handle::QueueHandle;
pub use types::{
    AttributeValue, BatchEntry, BatchFailure, BatchOutcome, CreateQueueOptions,
    DecodedMessageAttributes, MessageBody, OutboundMessage, QueueClientConfig, ReceivedMessage,
    SentMessage, DEFAULT_REGION,
};
