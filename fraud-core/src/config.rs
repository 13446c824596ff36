//! Fraud-detection configuration

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fraud-detection settings
///
/// Both values are part of the declared configuration surface but are not
/// consumed by the scoring logic: the effective fraud flag uses the fixed
/// threshold in [`crate::engine`], and amount risk uses its own step
/// function. Kept as declared until product intent says otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FraudConfig {
    /// Declared fraud-flag threshold
    pub fraud_threshold: f64,

    /// Declared maximum transaction amount
    pub max_transaction_amount: Decimal,
}

impl Default for FraudConfig {
    fn default() -> Self {
        Self {
            fraud_threshold: 0.7,
            max_transaction_amount: Decimal::from(50_000),
        }
    }
}
