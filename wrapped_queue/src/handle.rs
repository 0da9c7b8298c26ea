//! Queue handle binding a logical queue name to its remote URL
//!
//! Every operation issues exactly one call against the underlying SQS client
//! and logs before and after it. Precondition failures are raised before any
//! network call; remote failures propagate unchanged. The handle performs no
//! retries and exposes no timeouts of its own; both belong to the client it
//! wraps.

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_sqs::error::SdkError;
use aws_sdk_sqs::operation::purge_queue::PurgeQueueOutput;
use aws_sdk_sqs::types::{DeleteMessageBatchRequestEntry, SendMessageBatchRequestEntry};
use aws_sdk_sqs::Client as SqsClient;
use tracing::{debug, info};

use crate::attributes::{
    decode_message_attributes, encode_message_attributes, encode_system_attributes,
};
use crate::error::{QueueError, QueueResult};
use crate::types::{
    BatchEntry, BatchFailure, BatchOutcome, CreateQueueOptions, DecodedMessageAttributes,
    MessageBody, OutboundMessage, QueueClientConfig, ReceivedMessage, SentMessage,
};

/// Name and URL are only ever set and cleared together.
#[derive(Debug, Clone)]
struct QueueBinding {
    name: String,
    url: String,
}

/// A handle bound to at most one remote queue
///
/// Created unbound, a handle becomes initialized via [`create`] or
/// [`resolve`] and returns to unbound via [`delete`]. All message and purge
/// operations require an initialized handle. Concurrent calls against one
/// handle are not coordinated beyond Rust's borrow rules; callers needing
/// at-most-one-initialization semantics across tasks must serialize
/// externally.
///
/// [`create`]: QueueHandle::create
/// [`resolve`]: QueueHandle::resolve
/// [`delete`]: QueueHandle::delete
pub struct QueueHandle {
    client: Arc<SqsClient>,
    binding: Option<QueueBinding>,
}

impl QueueHandle {
    /// Creates an unbound handle around a pre-configured SQS client
    #[must_use]
    pub const fn new(client: Arc<SqsClient>) -> Self {
        Self {
            client,
            binding: None,
        }
    }

    /// Creates an unbound handle, building the SQS client from an explicit
    /// configuration
    ///
    /// Construction performs no network call.
    pub async fn from_config(config: QueueClientConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region));
        if let Some(endpoint_url) = config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let sdk_config = loader.load().await;
        Self::new(Arc::new(SqsClient::new(&sdk_config)))
    }

    /// Queue name, when the handle is initialized
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.binding.as_ref().map(|binding| binding.name.as_str())
    }

    /// Queue URL, when the handle is initialized
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.binding.as_ref().map(|binding| binding.url.as_str())
    }

    /// Returns true if the handle is bound to a queue
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.binding.is_some()
    }

    fn initialized(&self) -> QueueResult<&QueueBinding> {
        self.binding.as_ref().ok_or(QueueError::NotInitialized)
    }

    /// Looks up the URL of an existing queue by name, without binding
    ///
    /// A queue that does not exist yields `Ok(None)`; every other failure
    /// propagates. This is the suppressing variant of [`resolve`], made
    /// explicit so the suppression is visible at the call site.
    ///
    /// [`resolve`]: QueueHandle::resolve
    ///
    /// # Errors
    ///
    /// Returns `QueueError::InvalidArgument` if `name` is empty, or the
    /// propagated service failure
    pub async fn try_resolve(&self, name: &str) -> QueueResult<Option<String>> {
        if name.is_empty() {
            return Err(QueueError::InvalidArgument("name is required".to_string()));
        }

        info!("Resolving queue name '{}' to url...", name);
        let result = self
            .client
            .get_queue_url()
            .queue_name(name)
            .send()
            .await;

        match result {
            Ok(response) => {
                debug!("GetQueueUrl response: {:?}", response);
                let url = response
                    .queue_url()
                    .ok_or(QueueError::MissingQueueUrl)?
                    .to_string();
                info!("Resolved to '{}'.", url);
                Ok(Some(url))
            }
            Err(SdkError::ServiceError(err)) if err.err().is_queue_does_not_exist() => {
                info!("Queue '{}' does not exist.", name);
                Ok(None)
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Resolves an existing queue by name and binds the handle to it
    ///
    /// # Errors
    ///
    /// Returns `QueueError::QueueNotFound` if no such queue exists remotely,
    /// `QueueError::InvalidArgument` if `name` is empty, or the propagated
    /// service failure
    pub async fn resolve(&mut self, name: &str) -> QueueResult<()> {
        let url = self
            .try_resolve(name)
            .await?
            .ok_or_else(|| QueueError::QueueNotFound(name.to_string()))?;

        self.binding = Some(QueueBinding {
            name: name.to_string(),
            url,
        });
        Ok(())
    }

    /// Tests queue existence by name, without binding
    ///
    /// # Errors
    ///
    /// Returns `QueueError::InvalidArgument` if `name` is empty, or the
    /// propagated service failure; a missing queue is `Ok(false)`, not an
    /// error
    pub async fn exists(&self, name: &str) -> QueueResult<bool> {
        Ok(self.try_resolve(name).await?.is_some())
    }

    /// Creates a new queue and binds the handle to it
    ///
    /// # Errors
    ///
    /// Returns `QueueError::InvalidArgument` if `name` is empty,
    /// `QueueError::AlreadyInitialized` if the handle is already bound (delete
    /// first to re-use a handle), or the propagated service failure
    pub async fn create(&mut self, name: &str, options: CreateQueueOptions) -> QueueResult<()> {
        if name.is_empty() {
            return Err(QueueError::InvalidArgument("name is required".to_string()));
        }
        if let Some(binding) = &self.binding {
            return Err(QueueError::AlreadyInitialized(binding.name.clone()));
        }

        info!("Creating queue '{}'...", name);
        let mut request = self.client.create_queue().queue_name(name);
        for (attribute, value) in options.attributes {
            request = request.attributes(attribute, value);
        }
        for (key, value) in options.tags {
            request = request.tags(key, value);
        }

        let response = request.send().await?;
        debug!("CreateQueue response: {:?}", response);
        let url = response
            .queue_url()
            .ok_or(QueueError::MissingQueueUrl)?
            .to_string();
        info!("Created queue '{}'.", name);

        self.binding = Some(QueueBinding {
            name: name.to_string(),
            url,
        });
        Ok(())
    }

    /// Deletes the bound queue and unbinds the handle
    ///
    /// Remote deletion is eventually consistent: an existence check
    /// immediately after this call may still see the queue.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::NotInitialized` if the handle is unbound, or the
    /// propagated service failure
    pub async fn delete(&mut self) -> QueueResult<()> {
        let binding = self.initialized()?;

        info!("Deleting queue '{}'...", binding.name);
        let response = self
            .client
            .delete_queue()
            .queue_url(&binding.url)
            .send()
            .await?;
        debug!("DeleteQueue response: {:?}", response);
        info!("Deleted queue '{}'.", binding.name);

        self.binding = None;
        Ok(())
    }

    /// Deletes all messages in the bound queue
    ///
    /// Purge is asynchronous on the service side: messages may still be
    /// delivered for a short window after this call returns.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::NotInitialized` if the handle is unbound, or the
    /// propagated service failure
    pub async fn purge(&self) -> QueueResult<PurgeQueueOutput> {
        let binding = self.initialized()?;

        info!("Purging queue '{}'...", binding.name);
        let response = self
            .client
            .purge_queue()
            .queue_url(&binding.url)
            .send()
            .await?;
        info!("Purged.");
        debug!("PurgeQueue response: {:?}", response);

        Ok(response)
    }

    /// Sends a message to the bound queue
    ///
    /// # Returns
    ///
    /// The service-assigned message id
    ///
    /// # Errors
    ///
    /// Returns `QueueError::NotInitialized` if the handle is unbound,
    /// `QueueError::InvalidArgument` if the body is empty, or the propagated
    /// service failure
    pub async fn send_message(&self, message: OutboundMessage) -> QueueResult<String> {
        let binding = self.initialized()?;
        if message.body.is_empty() {
            return Err(QueueError::InvalidArgument("body is required".to_string()));
        }

        info!("Sending message to queue '{}'...", binding.name);
        let mut request = self
            .client
            .send_message()
            .queue_url(&binding.url)
            .message_body(message.body.encode()?)
            .set_delay_seconds(message.delay_seconds)
            .set_message_deduplication_id(message.deduplication_id)
            .set_message_group_id(message.group_id);
        if !message.attributes.is_empty() {
            request = request
                .set_message_attributes(Some(encode_message_attributes(&message.attributes)?));
        }
        if !message.system_attributes.is_empty() {
            request = request.set_message_system_attributes(Some(encode_system_attributes(
                &message.system_attributes,
            )?));
        }

        let response = request.send().await?;
        debug!("SendMessage response: {:?}", response);
        info!("Sent message.");

        Ok(response
            .message_id()
            .map(std::string::ToString::to_string)
            .unwrap_or_default())
    }

    /// Sends a batch of messages in one call
    ///
    /// The service's per-entry results are decoded into a typed
    /// [`BatchOutcome`]; a partial failure is not an `Err`.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::NotInitialized` if the handle is unbound,
    /// `QueueError::InvalidArgument` if `entries` is empty or any entry has an
    /// empty id or body, or the propagated service failure
    pub async fn send_message_batch(
        &self,
        entries: Vec<BatchEntry>,
    ) -> QueueResult<BatchOutcome<SentMessage>> {
        let binding = self.initialized()?;
        if entries.is_empty() {
            return Err(QueueError::InvalidArgument(
                "entries must not be empty".to_string(),
            ));
        }

        let mut encoded = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.id.is_empty() {
                return Err(QueueError::InvalidArgument(
                    "batch entry id is required".to_string(),
                ));
            }
            if entry.message.body.is_empty() {
                return Err(QueueError::InvalidArgument(
                    "batch entry body is required".to_string(),
                ));
            }

            let mut builder = SendMessageBatchRequestEntry::builder()
                .id(entry.id)
                .message_body(entry.message.body.encode()?)
                .set_delay_seconds(entry.message.delay_seconds)
                .set_message_deduplication_id(entry.message.deduplication_id)
                .set_message_group_id(entry.message.group_id);
            if !entry.message.attributes.is_empty() {
                builder = builder.set_message_attributes(Some(encode_message_attributes(
                    &entry.message.attributes,
                )?));
            }
            if !entry.message.system_attributes.is_empty() {
                builder = builder.set_message_system_attributes(Some(encode_system_attributes(
                    &entry.message.system_attributes,
                )?));
            }
            encoded.push(builder.build()?);
        }

        info!(
            "Sending batch of {} messages to queue '{}'...",
            encoded.len(),
            binding.name
        );
        let response = self
            .client
            .send_message_batch()
            .queue_url(&binding.url)
            .set_entries(Some(encoded))
            .send()
            .await?;
        debug!("SendMessageBatch response: {:?}", response);

        let outcome = BatchOutcome {
            successful: response
                .successful()
                .iter()
                .map(|entry| SentMessage {
                    id: entry.id().to_string(),
                    message_id: entry.message_id().to_string(),
                })
                .collect(),
            failed: response.failed().iter().map(BatchFailure::from).collect(),
        };
        info!(
            "Sent {} messages, {} failed.",
            outcome.successful.len(),
            outcome.failed.len()
        );

        Ok(outcome)
    }

    /// Receives up to `limit` messages from the bound queue
    ///
    /// The service may return fewer messages than requested even when more
    /// are available; an empty vec is a normal outcome, not an error. Each
    /// call is a single short request-response; no long-poll wait is exposed.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::NotInitialized` if the handle is unbound, an
    /// attribute decode failure, or the propagated service failure
    pub async fn receive_messages(&self, limit: i32) -> QueueResult<Vec<ReceivedMessage>> {
        let binding = self.initialized()?;

        info!("Retrieving messages from queue '{}'...", binding.name);
        let response = self
            .client
            .receive_message()
            .queue_url(&binding.url)
            .max_number_of_messages(limit)
            .message_attribute_names("All")
            .send()
            .await?;
        debug!("ReceiveMessage response: {:?}", response);

        let mut messages = Vec::new();
        for message in response.messages() {
            let attributes = match message.message_attributes() {
                Some(map) => decode_message_attributes(map)?,
                None => DecodedMessageAttributes::new(),
            };
            messages.push(ReceivedMessage {
                message_id: message.message_id().unwrap_or_default().to_string(),
                body: message.body().map(MessageBody::decode).unwrap_or_default(),
                attributes,
                receipt_handle: message
                    .receipt_handle()
                    .map(std::string::ToString::to_string),
            });
        }
        info!("Retrieved {} messages.", messages.len());

        Ok(messages)
    }

    /// Acknowledges a batch of received messages by deleting them
    ///
    /// Entries are correlated by message id. A stale or already-used receipt
    /// handle fails its entry remotely and appears in the typed
    /// [`BatchOutcome`]; a partial failure is not an `Err`.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::NotInitialized` if the handle is unbound,
    /// `QueueError::InvalidArgument` if `messages` is empty or any message
    /// lacks a receipt handle, or the propagated service failure
    pub async fn delete_message_batch(
        &self,
        messages: &[ReceivedMessage],
    ) -> QueueResult<BatchOutcome<String>> {
        let binding = self.initialized()?;
        if messages.is_empty() {
            return Err(QueueError::InvalidArgument(
                "messages must not be empty".to_string(),
            ));
        }

        let mut entries = Vec::with_capacity(messages.len());
        for message in messages {
            let receipt_handle = message.receipt_handle.as_deref().ok_or_else(|| {
                QueueError::InvalidArgument(format!(
                    "message '{}' has no receipt handle",
                    message.message_id
                ))
            })?;
            entries.push(
                DeleteMessageBatchRequestEntry::builder()
                    .id(&message.message_id)
                    .receipt_handle(receipt_handle)
                    .build()?,
            );
        }

        info!(
            "Deleting batch of {} messages from queue '{}'...",
            entries.len(),
            binding.name
        );
        let response = self
            .client
            .delete_message_batch()
            .queue_url(&binding.url)
            .set_entries(Some(entries))
            .send()
            .await?;
        debug!("DeleteMessageBatch response: {:?}", response);

        let outcome = BatchOutcome {
            successful: response
                .successful()
                .iter()
                .map(|entry| entry.id().to_string())
                .collect(),
            failed: response.failed().iter().map(BatchFailure::from).collect(),
        };
        info!(
            "Deleted {} messages, {} failed.",
            outcome.successful.len(),
            outcome.failed.len()
        );

        Ok(outcome)
    }
}
