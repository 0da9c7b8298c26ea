//! Queue test setup utilities

#![allow(dead_code)]

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_sqs::Client as SqsClient;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use wrapped_queue::{CreateQueueOptions, QueueHandle, DEFAULT_REGION};

/// LocalStack endpoint used by CI
const ENDPOINT_URL: &str = "http://localhost:4566";

/// Test context that provides an SQS client wired to LocalStack
pub struct QueueTestContext {
    pub sqs_client: Arc<SqsClient>,
}

impl QueueTestContext {
    /// Creates a new test context
    pub async fn new() -> Self {
        init_tracing();

        // Hardcoded credentials for CI
        let credentials = Credentials::from_keys(
            "test", // AWS_ACCESS_KEY_ID
            "test", // AWS_SECRET_ACCESS_KEY
            None,   // no session token
        );

        let config = aws_config::defaults(BehaviorVersion::latest())
            .endpoint_url(ENDPOINT_URL)
            .region(Region::new(DEFAULT_REGION))
            .credentials_provider(credentials)
            .load()
            .await;

        Self {
            sqs_client: Arc::new(SqsClient::new(&config)),
        }
    }

    /// Creates an unbound handle on the context's client
    pub fn handle(&self) -> QueueHandle {
        QueueHandle::new(self.sqs_client.clone())
    }

    /// Creates a uniquely named queue and returns the handle bound to it
    pub async fn create_queue(&self, test_name: &str) -> QueueHandle {
        let mut handle = self.handle();
        handle
            .create(&unique_queue_name(test_name), CreateQueueOptions::default())
            .await
            .expect("Failed to create test queue");
        handle
    }
}

/// Generates a unique queue name for a test
pub fn unique_queue_name(test_name: &str) -> String {
    format!("{}-{}", test_name, Uuid::new_v4())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
