//! Alert-creation decision policy

use crate::types::{AlertCommand, RiskAssessment, RiskLevel, TransactionCheck};

/// Maximum persisted reason length
const MAX_REASON_LEN: usize = 500;

/// Decides whether a check result warrants a persisted alert
#[derive(Debug, Default)]
pub struct AlertPolicy;

impl AlertPolicy {
    /// Create new policy
    pub fn new() -> Self {
        Self
    }

    /// Produce an alert-creation command iff the level is HIGH or CRITICAL
    ///
    /// The command carries `should_block` only for CRITICAL. Executing it
    /// allocates a fresh alert ID and performs one synchronous store write.
    pub fn decide(
        &self,
        check: &TransactionCheck,
        assessment: &RiskAssessment,
    ) -> Option<AlertCommand> {
        if !assessment.level.is_alertable() {
            return None;
        }

        Some(AlertCommand {
            transaction_id: check.transaction_id.clone(),
            account_number: check.account_number.clone(),
            risk_score: assessment.score,
            risk_level: assessment.level,
            reason: truncate_reason(assessment.reason()),
            amount: check.amount,
            transaction_type: check.transaction_type.clone(),
            should_block: assessment.level == RiskLevel::Critical,
        })
    }
}

fn truncate_reason(reason: String) -> String {
    if reason.len() <= MAX_REASON_LEN {
        return reason;
    }
    // Truncate on a char boundary at or below the limit
    let mut end = MAX_REASON_LEN;
    while !reason.is_char_boundary(end) {
        end -= 1;
    }
    reason[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn check() -> TransactionCheck {
        TransactionCheck {
            transaction_id: "txn-1".to_string(),
            account_number: "12345678".to_string(),
            amount: Decimal::from(60_000),
            transaction_type: "WITHDRAWAL".to_string(),
            to_account: None,
        }
    }

    fn assessment(score: f64, level: RiskLevel) -> RiskAssessment {
        RiskAssessment {
            score,
            factors: vec!["High transaction amount: $60,000.00".to_string()],
            level,
            recommendations: vec![],
        }
    }

    #[test]
    fn test_no_alert_below_high() {
        let policy = AlertPolicy::new();
        assert!(policy.decide(&check(), &assessment(0.2, RiskLevel::Low)).is_none());
        assert!(policy.decide(&check(), &assessment(0.5, RiskLevel::Medium)).is_none());
    }

    #[test]
    fn test_high_alert_not_blocked() {
        let policy = AlertPolicy::new();
        let command = policy
            .decide(&check(), &assessment(0.61, RiskLevel::High))
            .unwrap();

        assert_eq!(command.risk_level, RiskLevel::High);
        assert!(!command.should_block);
        assert_eq!(command.transaction_id, "txn-1");
        assert_eq!(command.reason, "High transaction amount: $60,000.00");

        // Anywhere in the HIGH band, including above the 0.7 fraud flag's
        // lower neighborhood, the alert is created but never blocking
        let command = policy
            .decide(&check(), &assessment(0.65, RiskLevel::High))
            .unwrap();
        assert!(!command.should_block);
    }

    #[test]
    fn test_critical_alert_blocked() {
        let policy = AlertPolicy::new();
        let command = policy
            .decide(&check(), &assessment(0.85, RiskLevel::Critical))
            .unwrap();

        assert!(command.should_block);
    }

    #[test]
    fn test_reason_truncated() {
        let policy = AlertPolicy::new();
        let long = RiskAssessment {
            factors: vec!["x".repeat(600)],
            ..assessment(0.61, RiskLevel::High)
        };

        let command = policy.decide(&check(), &long).unwrap();
        assert_eq!(command.reason.len(), 500);
    }
}
