//! Fraud Detection Core
//!
//! Real-time fraud scoring for banking transactions: a deterministic
//! weighted-heuristic risk scorer, risk-level classification, and the
//! alert-creation policy that feeds the audit trail.
//!
//! The scoring pipeline is pure CPU-bound computation; the only side effect
//! of a check is the single alert write for HIGH/CRITICAL results.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod policy;
pub mod scoring;
pub mod store;
pub mod types;

pub use classify::RiskClassifier;
pub use config::FraudConfig;
pub use engine::{FraudEngine, FRAUD_SCORE_THRESHOLD};
pub use error::{Error, Result};
pub use policy::AlertPolicy;
pub use scoring::RiskScorer;
pub use store::AlertStore;
pub use types::{
    AlertCommand, FraudAlert, FraudCheckResult, RiskAssessment, RiskLevel, TransactionCheck,
    TransactionEvent,
};
