//! Event-path handler: consumer callback into the fraud engine

use async_trait::async_trait;
use event_bus::EventHandler;
use fraud_core::{FraudEngine, TransactionEvent};
use std::sync::Arc;
use tracing::warn;

/// Dispatches decoded transaction events to the fraud engine
///
/// The event path has no reply channel: the check result is persisted (via
/// the alert write) and logged only.
pub struct FraudEventHandler {
    engine: Arc<FraudEngine>,
}

impl FraudEventHandler {
    /// Create a handler over the shared engine
    pub fn new(engine: Arc<FraudEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl EventHandler for FraudEventHandler {
    async fn handle(&self, event: TransactionEvent) -> fraud_core::Result<()> {
        let result = self.engine.handle_transaction_event(event).await?;

        if result.is_fraud {
            warn!(
                transaction_id = %result.transaction_id,
                risk_score = result.risk_score,
                "High risk transaction detected"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alert_store::MemoryAlertStore;
    use chrono::Utc;
    use fraud_core::AlertStore;
    use rust_decimal::Decimal;

    fn event(amount: i64, account: &str) -> TransactionEvent {
        TransactionEvent {
            transaction_id: "txn-evt-1".to_string(),
            from_account: account.to_string(),
            to_account: None,
            transaction_type: "WITHDRAWAL".to_string(),
            amount: Decimal::from(amount),
            currency: "USD".to_string(),
            description: None,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_high_risk_event_persists_alert() {
        let store = Arc::new(MemoryAlertStore::new());
        let handler = FraudEventHandler::new(Arc::new(FraudEngine::new(store.clone())));

        handler.handle(event(60_000, "12345678")).await.unwrap();

        let alert = store
            .find_by_transaction("txn-evt-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(alert.account_number, "12345678");
        assert!(!alert.is_blocked);
    }

    #[tokio::test]
    async fn test_low_risk_event_no_alert() {
        let store = Arc::new(MemoryAlertStore::new());
        let handler = FraudEventHandler::new(Arc::new(FraudEngine::new(store.clone())));

        handler.handle(event(50, "123456789012")).await.unwrap();

        assert_eq!(store.count_all().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_event_reports_error() {
        let store = Arc::new(MemoryAlertStore::new());
        let handler = FraudEventHandler::new(Arc::new(FraudEngine::new(store)));

        let mut bad = event(100, "12345678");
        bad.transaction_id.clear();

        // Reported through the Result; the consumer loop logs and acks
        assert!(handler.handle(bad).await.is_err());
    }
}
