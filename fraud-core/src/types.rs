//! Core types for fraud detection
//!
//! All types are designed for:
//! - Deterministic serialization (JSON both on the wire and at rest)
//! - Exact arithmetic (Decimal for money, f64 only for normalized scores)
//! - Immutability after construction

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Risk level buckets, ordered from least to most severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// No action required
    Low,
    /// Worth monitoring
    Medium,
    /// Alert-worthy, requires review
    High,
    /// Alert-worthy and the transaction should be blocked
    Critical,
}

impl RiskLevel {
    /// Wire representation ("LOW", "MEDIUM", "HIGH", "CRITICAL")
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    /// True for the levels that create a persisted alert
    pub fn is_alertable(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized fraud-check input, constructed once per check
///
/// Both entry points (the HTTP request body and the queued transaction
/// event) are adapted into this shape before scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCheck {
    /// Transaction being checked
    pub transaction_id: String,

    /// Account the funds move from
    pub account_number: String,

    /// Transaction amount (non-negative)
    pub amount: Decimal,

    /// Transaction type (WITHDRAWAL, TRANSFER, DEPOSIT, ...)
    pub transaction_type: String,

    /// Destination account, if any (accepted but unused by scoring)
    #[serde(default)]
    pub to_account: Option<String>,
}

impl TransactionCheck {
    /// Reject malformed input before scoring
    pub fn validate(&self) -> Result<()> {
        if self.transaction_id.is_empty() {
            return Err(Error::InvalidInput("transaction_id is required".into()));
        }
        if self.account_number.is_empty() {
            return Err(Error::InvalidInput("account_number is required".into()));
        }
        if self.amount < Decimal::ZERO {
            return Err(Error::InvalidInput(format!(
                "amount must be non-negative, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// Transaction-created event as published on the message bus
///
/// Field names follow the producing transaction service's JSON (camelCase).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEvent {
    /// Transaction ID
    pub transaction_id: String,

    /// Source account
    pub from_account: String,

    /// Destination account, if any
    #[serde(default)]
    pub to_account: Option<String>,

    /// Transaction type
    #[serde(rename = "type")]
    pub transaction_type: String,

    /// Transaction amount
    pub amount: Decimal,

    /// ISO 4217 currency code (not used by scoring)
    pub currency: String,

    /// Free-text description (not used by scoring)
    #[serde(default)]
    pub description: Option<String>,

    /// When the transaction occurred
    pub timestamp: DateTime<Utc>,
}

impl From<TransactionEvent> for TransactionCheck {
    fn from(event: TransactionEvent) -> Self {
        Self {
            transaction_id: event.transaction_id,
            account_number: event.from_account,
            amount: event.amount,
            transaction_type: event.transaction_type,
            to_account: event.to_account,
        }
    }
}

/// Derived risk assessment, never mutated after construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Weighted risk score in [0.0, 1.0]
    pub score: f64,

    /// Reason factors in evaluation order
    pub factors: Vec<String>,

    /// Risk level derived from the score
    pub level: RiskLevel,

    /// Recommended actions for this level
    pub recommendations: Vec<String>,
}

impl RiskAssessment {
    /// Human-readable reason: factors joined with "; ", or the normal marker
    pub fn reason(&self) -> String {
        if self.factors.is_empty() {
            "Transaction appears normal".to_string()
        } else {
            self.factors.join("; ")
        }
    }
}

/// Result of a fraud check, returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudCheckResult {
    /// Transaction that was checked
    pub transaction_id: String,

    /// Risk score, rounded to 3 decimal places
    pub risk_score: f64,

    /// Risk level
    pub risk_level: RiskLevel,

    /// Fraud flag (score >= 0.7, independent of the level thresholds)
    pub is_fraud: bool,

    /// Human-readable reason
    pub reason: String,

    /// Recommended actions
    pub recommendations: Vec<String>,
}

/// Alert-creation command produced by the decision policy
#[derive(Debug, Clone)]
pub struct AlertCommand {
    /// Transaction that triggered the alert
    pub transaction_id: String,

    /// Account the transaction was made from
    pub account_number: String,

    /// Risk score at decision time
    pub risk_score: f64,

    /// Risk level at decision time (HIGH or CRITICAL)
    pub risk_level: RiskLevel,

    /// Reason, truncated to the persisted limit
    pub reason: String,

    /// Transaction amount
    pub amount: Decimal,

    /// Transaction type
    pub transaction_type: String,

    /// Whether the transaction should be blocked (CRITICAL only)
    pub should_block: bool,
}

/// Persisted fraud alert, the audit trail for HIGH/CRITICAL checks
///
/// Created once, never updated; retention is an external concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudAlert {
    /// Globally unique alert ID, the natural key for lookup
    pub alert_id: Uuid,

    /// Transaction that triggered the alert
    pub transaction_id: String,

    /// Account the transaction was made from
    pub account_number: String,

    /// Risk score at alert-creation time
    pub risk_score: f64,

    /// Risk level at alert-creation time
    pub risk_level: RiskLevel,

    /// Human-readable reason (at most 500 chars)
    pub reason: String,

    /// Transaction amount
    pub amount: Decimal,

    /// Transaction type
    pub transaction_type: String,

    /// Whether the transaction should be blocked
    pub is_blocked: bool,

    /// Write timestamp, assigned by the store
    pub created_at: DateTime<Utc>,
}

impl FraudAlert {
    /// Materialize an alert from a policy command, allocating a fresh ID
    ///
    /// `created_at` is provisional; the store stamps the authoritative
    /// write time on insert.
    pub fn from_command(command: AlertCommand) -> Self {
        Self {
            alert_id: Uuid::new_v4(),
            transaction_id: command.transaction_id,
            account_number: command.account_number,
            risk_score: command.risk_score,
            risk_level: command.risk_level,
            reason: command.reason,
            amount: command.amount,
            transaction_type: command.transaction_type,
            is_blocked: command.should_block,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn test_risk_level_json_form() {
        let json = serde_json::to_string(&RiskLevel::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");

        let level: RiskLevel = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(level, RiskLevel::High);
    }

    #[test]
    fn test_event_wire_form() {
        let json = r#"{
            "transactionId": "txn-123",
            "fromAccount": "12345678",
            "toAccount": "87654321",
            "type": "TRANSFER",
            "amount": 2500.50,
            "currency": "USD",
            "description": "rent",
            "timestamp": "2024-03-01T12:00:00Z"
        }"#;

        let event: TransactionEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.transaction_id, "txn-123");
        assert_eq!(event.transaction_type, "TRANSFER");
        assert_eq!(event.amount, Decimal::new(250050, 2));

        let check = TransactionCheck::from(event);
        assert_eq!(check.account_number, "12345678");
        assert_eq!(check.to_account.as_deref(), Some("87654321"));
    }

    #[test]
    fn test_event_optional_fields() {
        let json = r#"{
            "transactionId": "txn-9",
            "fromAccount": "12345678",
            "type": "DEPOSIT",
            "amount": 10,
            "currency": "EUR",
            "timestamp": "2024-03-01T12:00:00Z"
        }"#;

        let event: TransactionEvent = serde_json::from_str(json).unwrap();
        assert!(event.to_account.is_none());
        assert!(event.description.is_none());
    }

    #[test]
    fn test_check_validation() {
        let mut check = TransactionCheck {
            transaction_id: "txn-1".to_string(),
            account_number: "12345678".to_string(),
            amount: Decimal::from(100),
            transaction_type: "DEPOSIT".to_string(),
            to_account: None,
        };
        assert!(check.validate().is_ok());

        check.transaction_id.clear();
        assert!(matches!(check.validate(), Err(Error::InvalidInput(_))));

        check.transaction_id = "txn-1".to_string();
        check.amount = Decimal::from(-1);
        assert!(matches!(check.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_reason_fallback() {
        let assessment = RiskAssessment {
            score: 0.02,
            factors: vec![],
            level: RiskLevel::Low,
            recommendations: vec![],
        };
        assert_eq!(assessment.reason(), "Transaction appears normal");

        let assessment = RiskAssessment {
            factors: vec!["a".to_string(), "b".to_string()],
            ..assessment
        };
        assert_eq!(assessment.reason(), "a; b");
    }
}
