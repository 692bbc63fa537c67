//! tally-sqs
//!
//! `QueueClient` backed by an SQS-compatible endpoint (AWS SQS, ElasticMQ,
//! LocalStack). The queue URL is resolved once at connect time and reused.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sqs::Client;
use aws_sdk_sqs::error::DisplayErrorContext;
use aws_sdk_sqs::types::Message;
use tally_core::domain::{RawMessage, TransportError};
use tally_core::ports::QueueClient;
use tracing::{debug, warn};

#[derive(Clone, Debug)]
pub struct SqsQueueClient {
    client: Client,
    queue_name: String,
    queue_url: String,
    wait_secs: i32,
}

impl SqsQueueClient {
    /// Build the SDK client for `endpoint` and resolve the queue URL.
    ///
    /// `wait` is the long-poll duration for each receive (SQS caps it at 20s).
    pub async fn connect(
        endpoint: &str,
        region: &str,
        queue_name: &str,
        wait: Duration,
    ) -> Result<Self, TransportError> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .endpoint_url(endpoint)
            .load()
            .await;
        let client = Client::new(&sdk_config);

        let queue_url = client
            .get_queue_url()
            .queue_name(queue_name)
            .send()
            .await
            .map_err(|e| {
                TransportError::Setup(format!(
                    "failed to resolve url for queue '{queue_name}': {}",
                    DisplayErrorContext(&e)
                ))
            })?
            .queue_url()
            .map(str::to_string)
            .ok_or_else(|| {
                TransportError::Setup(format!("no url returned for queue '{queue_name}'"))
            })?;

        debug!(queue = %queue_name, queue_url = %queue_url, "sqs queue resolved");

        Ok(Self {
            client,
            queue_name: queue_name.to_string(),
            queue_url,
            wait_secs: wait_seconds(wait),
        })
    }
}

#[async_trait]
impl QueueClient for SqsQueueClient {
    fn queue_name(&self) -> &str {
        &self.queue_name
    }

    async fn receive(&self) -> Result<Option<RawMessage>, TransportError> {
        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(1)
            .wait_time_seconds(self.wait_secs)
            .send()
            .await
            .map_err(|e| TransportError::Receive(DisplayErrorContext(&e).to_string()))?;

        match output.messages.unwrap_or_default().into_iter().next() {
            Some(message) => to_raw_message(message).map(Some),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str, receipt: &str) -> Result<(), TransportError> {
        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt)
            .send()
            .await
            .map_err(|e| TransportError::Delete {
                id: id.to_string(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(())
    }
}

/// Map an SDK message to a `RawMessage`.
///
/// Without id or receipt the message can't be deleted, so that is a transport
/// error. A missing body becomes an empty body and fails decode downstream.
fn to_raw_message(message: Message) -> Result<RawMessage, TransportError> {
    let Some(id) = message.message_id else {
        return Err(TransportError::Receive("message without message_id".to_string()));
    };
    let Some(receipt) = message.receipt_handle else {
        return Err(TransportError::Receive(format!(
            "message {id} without receipt_handle"
        )));
    };
    let body = message.body.unwrap_or_else(|| {
        warn!(message_id = %id, "message without body");
        String::new()
    });
    Ok(RawMessage::new(id, receipt, body))
}

fn wait_seconds(wait: Duration) -> i32 {
    wait.as_secs().clamp(1, 20) as i32
}
