//! Fraud-check orchestration
//!
//! Composes the scorer, classifier, and alert policy into the single check
//! operation both entry points use. Stateless apart from the one alert
//! write, so checks for independent inputs can run concurrently.

use crate::classify::RiskClassifier;
use crate::policy::AlertPolicy;
use crate::scoring::RiskScorer;
use crate::store::AlertStore;
use crate::types::{
    FraudAlert, FraudCheckResult, RiskAssessment, TransactionCheck, TransactionEvent,
};
use crate::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Fraud-flag threshold
///
/// Deliberately independent of the level-classification thresholds (0.8 /
/// 0.6): scores in [0.6, 0.7) classify HIGH and produce a non-blocking
/// alert, yet report `is_fraud = false`. Downstream consumers rely on the
/// flag as-is, so the two thresholds must not be unified.
pub const FRAUD_SCORE_THRESHOLD: f64 = 0.7;

/// Fraud-check engine
pub struct FraudEngine {
    scorer: RiskScorer,
    policy: AlertPolicy,
    store: Arc<dyn AlertStore>,
}

impl FraudEngine {
    /// Create an engine backed by the given alert store
    pub fn new(store: Arc<dyn AlertStore>) -> Self {
        Self {
            scorer: RiskScorer::new(),
            policy: AlertPolicy::new(),
            store,
        }
    }

    /// Check one transaction for fraud
    ///
    /// Validates the input, scores it, and persists an alert for
    /// HIGH/CRITICAL results before returning. A store failure propagates:
    /// a high-risk result without its audit alert must not be silently
    /// returned to the caller.
    pub async fn check_transaction(&self, check: TransactionCheck) -> Result<FraudCheckResult> {
        check.validate()?;

        info!(transaction_id = %check.transaction_id, "Checking transaction");

        let (score, factors) = self.scorer.score(
            check.amount,
            &check.transaction_type,
            &check.account_number,
            check.to_account.as_deref(),
        );
        let level = RiskClassifier::classify(score);
        let recommendations = RiskClassifier::recommend(score, level);

        let assessment = RiskAssessment {
            score,
            factors,
            level,
            recommendations,
        };
        let reason = assessment.reason();
        let is_fraud = score >= FRAUD_SCORE_THRESHOLD;

        if let Some(command) = self.policy.decide(&check, &assessment) {
            let alert = self.store.insert(FraudAlert::from_command(command)).await?;
            warn!(
                alert_id = %alert.alert_id,
                transaction_id = %alert.transaction_id,
                risk_score = alert.risk_score,
                blocked = alert.is_blocked,
                "Fraud alert created"
            );
        }

        Ok(FraudCheckResult {
            transaction_id: check.transaction_id,
            risk_score: round3(score),
            risk_level: level,
            is_fraud,
            reason,
            recommendations: assessment.recommendations,
        })
    }

    /// Handle a queued transaction-created event
    ///
    /// Adapts the event into a check using `from_account` as the account;
    /// currency, description, and timestamp play no part in scoring.
    pub async fn handle_transaction_event(
        &self,
        event: TransactionEvent,
    ) -> Result<FraudCheckResult> {
        info!(transaction_id = %event.transaction_id, "Processing transaction event");

        let result = self.check_transaction(event.into()).await?;

        info!(
            transaction_id = %result.transaction_id,
            risk_score = result.risk_score,
            risk_level = %result.risk_level,
            is_fraud = result.is_fraud,
            "Fraud check complete"
        );

        Ok(result)
    }
}

fn round3(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}
