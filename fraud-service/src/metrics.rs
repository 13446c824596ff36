//! Prometheus metrics for the fraud service

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec, TextEncoder,
};

lazy_static! {
    /// Fraud checks performed, by resulting level
    pub static ref CHECKS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "fraud_checks_total",
        "Total fraud checks performed",
        &["risk_level"]
    )
    .unwrap();

    /// Alerts created, by level
    pub static ref ALERTS_CREATED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "fraud_alerts_created_total",
        "Total fraud alerts created",
        &["risk_level"]
    )
    .unwrap();

    /// Transactions flagged for blocking
    pub static ref BLOCKED_TOTAL: IntCounter = register_int_counter!(
        "fraud_blocked_transactions_total",
        "Total transactions flagged for blocking"
    )
    .unwrap();

    /// Check latency
    pub static ref CHECK_DURATION: Histogram = register_histogram!(
        "fraud_check_duration_seconds",
        "Fraud check duration in seconds"
    )
    .unwrap();
}

/// Export all registered metrics in Prometheus text format
pub fn export() -> prometheus::Result<String> {
    TextEncoder::new().encode_to_string(&prometheus::gather())
}
