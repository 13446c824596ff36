//! Persistence contract the scoring core requires
//!
//! The core never updates or deletes alerts; absence on lookup is a normal
//! empty result. Concrete backends live in the `alert-store` crate.

use crate::types::{FraudAlert, RiskLevel};
use crate::Result;
use async_trait::async_trait;

/// Keyed alert persistence
///
/// Implementations must keep insertion order observable: `list_all` pages in
/// insertion order and `find_by_transaction` returns the first match by
/// insertion order if duplicates exist.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Persist one alert, assigning the write timestamp; returns the stored
    /// form. The write is committed before this returns.
    async fn insert(&self, alert: FraudAlert) -> Result<FraudAlert>;

    /// List alerts in insertion order, skipping `skip` and returning at most
    /// `limit`
    async fn list_all(&self, skip: usize, limit: usize) -> Result<Vec<FraudAlert>>;

    /// List alerts for one account, in insertion order
    async fn list_by_account(&self, account_number: &str) -> Result<Vec<FraudAlert>>;

    /// First alert recorded for a transaction, if any
    async fn find_by_transaction(&self, transaction_id: &str) -> Result<Option<FraudAlert>>;

    /// Total number of alerts
    async fn count_all(&self) -> Result<u64>;

    /// Number of alerts at a given level
    async fn count_by_level(&self, level: RiskLevel) -> Result<u64>;

    /// Number of blocked alerts
    async fn count_blocked(&self) -> Result<u64>;
}
