use std::collections::HashMap;

use aws_sdk_sqs::types::{BatchResultErrorEntry, QueueAttributeName};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{QueueError, QueueResult};

/// Region used when no explicit region is configured
pub const DEFAULT_REGION: &str = "us-east-1";

/// Client configuration for building an SQS client
///
/// An explicit value injected at construction; there is no hidden global
/// default beyond the documented [`DEFAULT_REGION`].
#[derive(Debug, Clone)]
pub struct QueueClientConfig {
    /// AWS region
    pub region: String,
    /// Endpoint override, e.g. a LocalStack URL
    pub endpoint_url: Option<String>,
}

impl Default for QueueClientConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
        }
    }
}

/// Options for queue creation
#[derive(Debug, Clone, Default)]
pub struct CreateQueueOptions {
    /// Service-side queue attributes, e.g. visibility timeout or FIFO flags
    pub attributes: HashMap<QueueAttributeName, String>,
    /// Key/value metadata tags
    pub tags: HashMap<String, String>,
}

impl CreateQueueOptions {
    /// Adds a queue attribute
    #[must_use]
    pub fn attribute(mut self, name: QueueAttributeName, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value.into());
        self
    }

    /// Adds a metadata tag
    #[must_use]
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// Message body, transmitted as a string on the wire
///
/// `Text` is sent as-is; `Json` is serialized on send. On receive the wire
/// string is JSON-parsed where possible and kept as `Text` otherwise, so a
/// body that was sent as a JSON-serializable value comes back deep-equal.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    /// Raw text payload, sent as-is
    Text(String),
    /// Structured payload, JSON-serialized on send
    Json(Value),
}

impl MessageBody {
    /// Returns the wire form of the body
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Serialization` if a `Json` body fails to serialize
    pub fn encode(&self) -> QueueResult<String> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::Json(value) => Ok(serde_json::to_string(value)?),
        }
    }

    /// Decodes a wire string, keeping the raw text when it is not valid JSON
    #[must_use]
    pub fn decode(raw: &str) -> Self {
        serde_json::from_str::<Value>(raw).map_or_else(|_| Self::Text(raw.to_string()), Self::Json)
    }

    /// Returns true for an empty text body or a JSON null
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Json(value) => value.is_null(),
        }
    }

    /// Returns the text payload, if this is a `Text` body
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(_) => None,
        }
    }

    /// Returns the JSON payload, if this is a `Json` body
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

impl Default for MessageBody {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for MessageBody {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for MessageBody {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for MessageBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Decoded message attribute value; only strings and numbers are supported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// String attribute
    String(String),
    /// Numeric attribute
    Number(f64),
}

impl AttributeValue {
    /// SQS data type label for this value
    #[must_use]
    pub const fn data_type(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Number(_) => "Number",
        }
    }

    /// Stringified wire form of this value
    #[must_use]
    pub fn wire_value(&self) -> String {
        match self {
            Self::String(value) => value.clone(),
            Self::Number(value) => value.to_string(),
        }
    }
}

impl TryFrom<Value> for AttributeValue {
    type Error = QueueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Self::String(text)),
            Value::Number(number) => number.as_f64().map(Self::Number).ok_or_else(|| {
                QueueError::UnsupportedAttributeType("number out of range".to_string())
            }),
            Value::Null => Err(QueueError::UnsupportedAttributeType("null".to_string())),
            Value::Bool(_) => Err(QueueError::UnsupportedAttributeType("boolean".to_string())),
            Value::Array(_) => Err(QueueError::UnsupportedAttributeType("array".to_string())),
            Value::Object(_) => Err(QueueError::UnsupportedAttributeType("object".to_string())),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for AttributeValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

/// Flat mapping of attribute name to string-or-number value
pub type DecodedMessageAttributes = HashMap<String, AttributeValue>;

/// A message to send, with optional per-message parameters
///
/// `deduplication_id` and `group_id` are passed through only when present and
/// are only meaningful for FIFO queues.
#[derive(Debug, Clone, Default)]
pub struct OutboundMessage {
    /// Message body
    pub body: MessageBody,
    /// Custom message attributes
    pub attributes: DecodedMessageAttributes,
    /// Delivery delay in seconds
    pub delay_seconds: Option<i32>,
    /// FIFO deduplication id
    pub deduplication_id: Option<String>,
    /// FIFO message group id
    pub group_id: Option<String>,
    /// System attributes (currently only `AWSTraceHeader` is meaningful)
    pub system_attributes: DecodedMessageAttributes,
}

impl OutboundMessage {
    /// Creates a message with the given body
    #[must_use]
    pub fn new(body: impl Into<MessageBody>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    /// Adds a custom message attribute
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Adds a system attribute
    #[must_use]
    pub fn system_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.system_attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the delivery delay in seconds
    #[must_use]
    pub const fn delay_seconds(mut self, seconds: i32) -> Self {
        self.delay_seconds = Some(seconds);
        self
    }

    /// Sets the FIFO deduplication id
    #[must_use]
    pub fn deduplication_id(mut self, id: impl Into<String>) -> Self {
        self.deduplication_id = Some(id.into());
        self
    }

    /// Sets the FIFO message group id
    #[must_use]
    pub fn group_id(mut self, id: impl Into<String>) -> Self {
        self.group_id = Some(id.into());
        self
    }
}

/// A message received from the queue
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    /// Service-assigned message id
    pub message_id: String,
    /// Decoded message body
    pub body: MessageBody,
    /// Decoded message attributes
    pub attributes: DecodedMessageAttributes,
    /// Receipt handle for acknowledging this delivery, when the service
    /// returned one
    pub receipt_handle: Option<String>,
}

/// One entry of a batched send
#[derive(Debug, Clone)]
pub struct BatchEntry {
    /// Caller-supplied batch-local id, used to correlate per-entry results
    pub id: String,
    /// The message to send
    pub message: OutboundMessage,
}

impl BatchEntry {
    /// Creates a batch entry
    #[must_use]
    pub fn new(id: impl Into<String>, message: OutboundMessage) -> Self {
        Self {
            id: id.into(),
            message,
        }
    }
}

/// Per-entry results of a batched call
#[derive(Debug, Clone)]
pub struct BatchOutcome<T> {
    /// Entries the service accepted
    pub successful: Vec<T>,
    /// Entries the service rejected
    pub failed: Vec<BatchFailure>,
}

impl<T> BatchOutcome<T> {
    /// Returns true when no entry failed
    #[must_use]
    pub fn all_successful(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A successfully sent batch entry
#[derive(Debug, Clone)]
pub struct SentMessage {
    /// Caller-supplied batch-local id
    pub id: String,
    /// Service-assigned message id
    pub message_id: String,
}

/// A batch entry the service rejected
#[derive(Debug, Clone)]
pub struct BatchFailure {
    /// Caller-supplied batch-local id of the failed entry
    pub id: String,
    /// Service error code
    pub code: String,
    /// Service error message, when provided
    pub message: Option<String>,
    /// True when the failure was caused by the request rather than the service
    pub sender_fault: bool,
}

impl From<&BatchResultErrorEntry> for BatchFailure {
    fn from(entry: &BatchResultErrorEntry) -> Self {
        Self {
            id: entry.id().to_string(),
            code: entry.code().to_string(),
            message: entry.message().map(ToString::to_string),
            sender_fault: entry.sender_fault(),
        }
    }
}
