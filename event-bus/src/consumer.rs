//! Transaction-event consumer
//!
//! Pulls `transaction.created` events from a durable JetStream consumer and
//! dispatches each to an [`EventHandler`]. The dispatch loop owns transport
//! concerns; the handler owns the fraud check and must report failures
//! through its `Result`, never by panicking.

use crate::{
    client::NatsClient,
    metrics::{EVENT_PROCESS_DURATION, EVENT_RECEIVE_TOTAL},
    Error, Result,
};
use async_nats::jetstream::{self, consumer};
use async_trait::async_trait;
use fraud_core::TransactionEvent;
use futures::StreamExt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Transaction-event handler
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handle one decoded transaction event
    async fn handle(&self, event: TransactionEvent) -> fraud_core::Result<()>;
}

/// Consumer configuration
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    /// JetStream stream name
    pub stream_name: String,

    /// Subject the transaction service publishes on
    pub subject: String,

    /// Durable consumer name (consumer group for load balancing)
    pub durable_name: String,

    /// Acknowledgment wait time
    pub ack_wait: Duration,

    /// Max delivery attempts
    pub max_deliver: i64,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            stream_name: "BANKING_TRANSACTIONS".to_string(),
            subject: "banking.transaction.created".to_string(),
            durable_name: "fraud-detection-group".to_string(),
            ack_wait: Duration::from_secs(30),
            max_deliver: 3,
        }
    }
}

/// Decode a raw event payload
///
/// Split out so the decode policy is testable without a broker: a payload
/// that fails here is malformed and will not become valid on redelivery.
pub fn decode_event(payload: &[u8]) -> Result<TransactionEvent> {
    Ok(serde_json::from_slice(payload)?)
}

/// Transaction-event consumer
pub struct TransactionConsumer {
    client: Arc<NatsClient>,
    config: ConsumerConfig,
}

impl TransactionConsumer {
    /// Create new consumer
    pub fn new(client: Arc<NatsClient>, config: ConsumerConfig) -> Self {
        Self { client, config }
    }

    /// Consume events until the message stream ends
    ///
    /// Malformed payloads are terminated (no redelivery). Handler failures
    /// are logged and the message is still acknowledged: re-scoring the same
    /// event cannot repair a handler-side fault, and the event path has no
    /// reply channel.
    pub async fn run<H>(&self, handler: Arc<H>) -> Result<()>
    where
        H: EventHandler + 'static,
    {
        let stream = self
            .client
            .get_or_create_stream(&self.config.stream_name, vec![self.config.subject.clone()])
            .await?;

        let consumer = stream
            .create_consumer(consumer::pull::Config {
                durable_name: Some(self.config.durable_name.clone()),
                filter_subject: self.config.subject.clone(),
                ack_policy: consumer::AckPolicy::Explicit,
                ack_wait: self.config.ack_wait,
                max_deliver: self.config.max_deliver,
                deliver_policy: consumer::DeliverPolicy::All,
                ..Default::default()
            })
            .await
            .map_err(|e| Error::JetStream(e.to_string()))?;

        info!(
            stream = %self.config.stream_name,
            subject = %self.config.subject,
            durable = %self.config.durable_name,
            "Transaction consumer started"
        );

        let mut messages = consumer
            .messages()
            .await
            .map_err(|e| Error::Subscribe(e.to_string()))?;

        while let Some(msg) = messages.next().await {
            let msg = msg.map_err(|e| Error::Subscribe(e.to_string()))?;

            match decode_event(&msg.payload) {
                Ok(event) => {
                    let start = Instant::now();
                    let transaction_id = event.transaction_id.clone();

                    match handler.handle(event).await {
                        Ok(()) => {
                            EVENT_RECEIVE_TOTAL.with_label_values(&["success"]).inc();
                        }
                        Err(e) => {
                            EVENT_RECEIVE_TOTAL
                                .with_label_values(&["handler_error"])
                                .inc();
                            error!(%transaction_id, "Error processing transaction event: {}", e);
                        }
                    }
                    EVENT_PROCESS_DURATION.observe(start.elapsed().as_secs_f64());

                    if let Err(e) = msg.ack().await {
                        error!(%transaction_id, "Failed to ack event: {}", e);
                    }
                }
                Err(e) => {
                    EVENT_RECEIVE_TOTAL
                        .with_label_values(&["decode_error"])
                        .inc();
                    warn!("Dropping malformed transaction event: {}", e);

                    // Terminate: a malformed payload never becomes valid
                    if let Err(term_err) = msg.ack_with(jetstream::AckKind::Term).await {
                        error!("Failed to terminate malformed event: {}", term_err);
                    }
                }
            }
        }

        Ok(())
    }
}
