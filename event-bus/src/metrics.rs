//! Prometheus metrics for the event consumer

use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_histogram, CounterVec, Histogram};

lazy_static! {
    /// Total events received, by outcome
    pub static ref EVENT_RECEIVE_TOTAL: CounterVec = register_counter_vec!(
        "fraud_events_received_total",
        "Total transaction events received",
        &["status"]
    )
    .unwrap();

    /// Event processing duration
    pub static ref EVENT_PROCESS_DURATION: Histogram = register_histogram!(
        "fraud_event_process_duration_seconds",
        "Transaction event processing duration in seconds"
    )
    .unwrap();
}
