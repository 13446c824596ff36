//! Risk-level classification and recommended actions

use crate::types::RiskLevel;

/// Maps scores to discrete risk levels and level-keyed recommendations
#[derive(Debug, Default)]
pub struct RiskClassifier;

impl RiskClassifier {
    /// Classify a score into a risk level
    ///
    /// Total and monotonic: thresholds are tested high-to-low and do not
    /// overlap.
    pub fn classify(score: f64) -> RiskLevel {
        if score >= 0.8 {
            RiskLevel::Critical
        } else if score >= 0.6 {
            RiskLevel::High
        } else if score >= 0.3 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Recommended actions for a risk level
    ///
    /// The score is accepted for interface stability but recommendations are
    /// keyed on level alone.
    pub fn recommend(_score: f64, level: RiskLevel) -> Vec<String> {
        let actions: &[&str] = match level {
            RiskLevel::Critical => &[
                "BLOCK transaction immediately",
                "Contact account holder for verification",
                "Flag account for investigation",
                "Review recent transaction history",
            ],
            RiskLevel::High => &[
                "Require additional authentication",
                "Send verification SMS/Email",
                "Review transaction manually",
                "Monitor account closely",
            ],
            RiskLevel::Medium => &[
                "Send notification to account holder",
                "Log for future pattern analysis",
                "Consider velocity checks",
            ],
            RiskLevel::Low => &["No action required - proceed normally"],
        };

        actions.iter().map(|s| s.to_string()).collect()
    }
}
