//! In-memory alert store
//!
//! Insertion-ordered, for tests and local runs without a data directory.
//! Same observable contract as the RocksDB store.

use async_trait::async_trait;
use chrono::Utc;
use fraud_core::{AlertStore, FraudAlert, Result, RiskLevel};
use parking_lot::RwLock;

/// In-memory alert store
#[derive(Debug, Default)]
pub struct MemoryAlertStore {
    alerts: RwLock<Vec<FraudAlert>>,
}

impl MemoryAlertStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertStore for MemoryAlertStore {
    async fn insert(&self, mut alert: FraudAlert) -> Result<FraudAlert> {
        alert.created_at = Utc::now();
        self.alerts.write().push(alert.clone());
        Ok(alert)
    }

    async fn list_all(&self, skip: usize, limit: usize) -> Result<Vec<FraudAlert>> {
        Ok(self
            .alerts
            .read()
            .iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_by_account(&self, account_number: &str) -> Result<Vec<FraudAlert>> {
        Ok(self
            .alerts
            .read()
            .iter()
            .filter(|a| a.account_number == account_number)
            .cloned()
            .collect())
    }

    async fn find_by_transaction(&self, transaction_id: &str) -> Result<Option<FraudAlert>> {
        Ok(self
            .alerts
            .read()
            .iter()
            .find(|a| a.transaction_id == transaction_id)
            .cloned())
    }

    async fn count_all(&self) -> Result<u64> {
        Ok(self.alerts.read().len() as u64)
    }

    async fn count_by_level(&self, level: RiskLevel) -> Result<u64> {
        Ok(self
            .alerts
            .read()
            .iter()
            .filter(|a| a.risk_level == level)
            .count() as u64)
    }

    async fn count_blocked(&self) -> Result<u64> {
        Ok(self.alerts.read().iter().filter(|a| a.is_blocked).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn test_alert(transaction_id: &str) -> FraudAlert {
        FraudAlert {
            alert_id: Uuid::new_v4(),
            transaction_id: transaction_id.to_string(),
            account_number: "12345678".to_string(),
            risk_score: 0.61,
            risk_level: RiskLevel::High,
            reason: "test".to_string(),
            amount: Decimal::from(60_000),
            transaction_type: "WITHDRAWAL".to_string(),
            is_blocked: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insertion_order_preserved() {
        let store = MemoryAlertStore::new();

        store.insert(test_alert("txn-1")).await.unwrap();
        store.insert(test_alert("txn-2")).await.unwrap();
        store.insert(test_alert("txn-1")).await.unwrap();

        let all = store.list_all(0, 10).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].transaction_id, "txn-1");

        // First match by insertion order for duplicates
        let found = store.find_by_transaction("txn-1").await.unwrap().unwrap();
        assert_eq!(found.alert_id, all[0].alert_id);

        let page = store.list_all(1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].transaction_id, "txn-2");
    }

    #[tokio::test]
    async fn test_counts_and_lookup() {
        let store = MemoryAlertStore::new();
        assert_eq!(store.count_all().await.unwrap(), 0);
        assert!(store.find_by_transaction("nope").await.unwrap().is_none());

        let mut blocked = test_alert("txn-b");
        blocked.risk_level = RiskLevel::Critical;
        blocked.is_blocked = true;
        store.insert(blocked).await.unwrap();

        assert_eq!(store.count_all().await.unwrap(), 1);
        assert_eq!(store.count_by_level(RiskLevel::Critical).await.unwrap(), 1);
        assert_eq!(store.count_by_level(RiskLevel::High).await.unwrap(), 0);
        assert_eq!(store.count_blocked().await.unwrap(), 1);
        assert_eq!(store.list_by_account("12345678").await.unwrap().len(), 1);
    }
}
