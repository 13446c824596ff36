//! Fraud Detection Service
//!
//! Wires the scoring core to its transports: an axum HTTP API, a NATS
//! JetStream transaction-event consumer, a service-registry heartbeat, and
//! Prometheus metrics.

#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod handler;
pub mod metrics;
pub mod registry;

pub use api::{router, AppState};
pub use config::ServiceConfig;
pub use handler::FraudEventHandler;
pub use registry::RegistryClient;
