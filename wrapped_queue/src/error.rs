use aws_sdk_sqs::error::{BuildError, SdkError};
use aws_sdk_sqs::operation::create_queue::CreateQueueError;
use aws_sdk_sqs::operation::delete_message_batch::DeleteMessageBatchError;
use aws_sdk_sqs::operation::delete_queue::DeleteQueueError;
use aws_sdk_sqs::operation::get_queue_url::GetQueueUrlError;
use aws_sdk_sqs::operation::purge_queue::PurgeQueueError;
use aws_sdk_sqs::operation::receive_message::ReceiveMessageError;
use aws_sdk_sqs::operation::send_message::SendMessageError;
use aws_sdk_sqs::operation::send_message_batch::SendMessageBatchError;
use thiserror::Error;

/// Result type alias for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Error types for queue operations
///
/// Precondition failures are raised before any network call; remote failures
/// are carried unchanged in the per-operation `SdkError` variants.
#[derive(Error, Debug)]
pub enum QueueError {
    /// A required argument was missing or empty
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation requires a resolved or created queue, none present
    #[error("queue not yet initialized")]
    NotInitialized,

    /// Create was called on a handle already bound to a queue
    #[error("queue '{0}' already initialized")]
    AlreadyInitialized(String),

    /// Name resolution found no matching remote queue
    #[error("queue '{0}' not found")]
    QueueNotFound(String),

    /// Attribute value is neither a string nor a number
    #[error("unsupported attribute value type: {0}")]
    UnsupportedAttributeType(String),

    /// Number attribute whose wire value does not parse
    #[error("attribute '{name}' holds a malformed number: '{value}'")]
    MalformedAttribute {
        /// Attribute name
        name: String,
        /// The wire value that failed to parse
        value: String,
    },

    /// Service response carried no queue URL
    #[error("queue url missing from service response")]
    MissingQueueUrl,

    /// Error serializing a message body to JSON
    #[error("failed to serialize message body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error assembling an SDK request value
    #[error("failed to build request value: {0}")]
    RequestBuild(#[from] BuildError),

    /// Error resolving a queue URL by name
    #[error("Failed to resolve queue url")]
    GetQueueUrl(#[from] SdkError<GetQueueUrlError>),

    /// Error creating a queue
    #[error("Failed to create queue")]
    CreateQueue(#[from] SdkError<CreateQueueError>),

    /// Error deleting a queue
    #[error("Failed to delete queue")]
    DeleteQueue(#[from] SdkError<DeleteQueueError>),

    /// Error purging a queue
    #[error("Failed to purge queue")]
    PurgeQueue(#[from] SdkError<PurgeQueueError>),

    /// Error sending a message to SQS
    #[error("Failed to send message to SQS")]
    SendMessage(#[from] SdkError<SendMessageError>),

    /// Error sending a message batch to SQS
    #[error("Failed to send message batch to SQS")]
    SendMessageBatch(#[from] SdkError<SendMessageBatchError>),

    /// Error receiving messages from SQS
    #[error("Failed to receive messages from SQS")]
    ReceiveMessage(#[from] SdkError<ReceiveMessageError>),

    /// Error deleting a message batch from SQS
    #[error("Failed to delete message batch from SQS")]
    DeleteMessageBatch(#[from] SdkError<DeleteMessageBatchError>),
}

impl QueueError {
    /// Checks if this error represents an upstream (5xx) error
    #[must_use]
    pub fn is_upstream_error(&self) -> bool {
        match self {
            Self::GetQueueUrl(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::CreateQueue(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::DeleteQueue(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::PurgeQueue(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::SendMessage(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::SendMessageBatch(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::ReceiveMessage(sdk_err) => Self::check_sdk_error_status(sdk_err),
            Self::DeleteMessageBatch(sdk_err) => Self::check_sdk_error_status(sdk_err),
            _ => false,
        }
    }

    fn check_sdk_error_status<E>(sdk_err: &SdkError<E>) -> bool {
        if let SdkError::ServiceError(err) = sdk_err {
            let raw = err.raw();
            let status = raw.status();
            return status.as_u16() >= 500;
        }
        false
    }
}
