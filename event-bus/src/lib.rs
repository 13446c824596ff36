//! Event transport for the fraud-detection service
//!
//! NATS JetStream consumer for `transaction.created` events:
//! - Durable pull consumer with a consumer group for load balancing
//! - Malformed payloads are terminated, not retried
//! - Handler outcomes are logged; the event path emits nothing back
//! - Observability via Prometheus metrics

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod consumer;
pub mod error;
pub mod metrics;

pub use client::NatsClient;
pub use consumer::{ConsumerConfig, EventHandler, TransactionConsumer};
pub use error::{Error, Result};
