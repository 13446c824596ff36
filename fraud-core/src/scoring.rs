//! Weighted-heuristic risk scoring
//!
//! Four independent sub-scores, each bounded to [0, 1], combined as a fixed
//! weighted sum. Weights sum to 1.0, so the total score is naturally bounded
//! without clamping. Deterministic, no side effects.

use rust_decimal::Decimal;

/// Amount sub-score weight
const WEIGHT_AMOUNT: f64 = 0.40;
/// Transaction-type sub-score weight
const WEIGHT_TYPE: f64 = 0.20;
/// Round-number sub-score weight
const WEIGHT_ROUND_NUMBER: f64 = 0.15;
/// Account-pattern sub-score weight
const WEIGHT_ACCOUNT_PATTERN: f64 = 0.25;

/// A sub-score contributes a reason factor only when it exceeds this
const FACTOR_CUTOFF: f64 = 0.5;

/// Risk scorer
///
/// Stateless; a production system would back the account-pattern factor
/// with historical data.
#[derive(Debug, Default)]
pub struct RiskScorer;

impl RiskScorer {
    /// Create new risk scorer
    pub fn new() -> Self {
        Self
    }

    /// Compute the weighted risk score and its reason factors
    ///
    /// Returns the score in [0.0, 1.0] and the factors in evaluation order
    /// (amount, type, round-number, account-pattern). `_to_account` is
    /// reserved for future counterparty heuristics and is currently unused.
    pub fn score(
        &self,
        amount: Decimal,
        transaction_type: &str,
        account_number: &str,
        _to_account: Option<&str>,
    ) -> (f64, Vec<String>) {
        let mut factors = Vec::new();
        let mut score = 0.0;

        let amount_risk = Self::amount_risk(amount);
        score += amount_risk * WEIGHT_AMOUNT;
        if amount_risk > FACTOR_CUTOFF {
            factors.push(format!(
                "High transaction amount: ${}",
                format_amount(amount)
            ));
        }

        let type_risk = Self::transaction_type_risk(transaction_type);
        score += type_risk * WEIGHT_TYPE;
        if type_risk > FACTOR_CUTOFF {
            factors.push(format!("Suspicious transaction type: {}", transaction_type));
        }

        let round_risk = Self::round_number_risk(amount);
        score += round_risk * WEIGHT_ROUND_NUMBER;
        if round_risk > FACTOR_CUTOFF {
            factors.push("Transaction is a suspiciously round number".to_string());
        }

        let pattern_risk = Self::account_pattern_risk(account_number);
        score += pattern_risk * WEIGHT_ACCOUNT_PATTERN;
        if pattern_risk > FACTOR_CUTOFF {
            factors.push("Unusual pattern for this account".to_string());
        }

        tracing::debug!(
            score,
            factor_count = factors.len(),
            "Risk score computed"
        );

        (score, factors)
    }

    /// Amount sub-score: monotonic step function of the amount
    fn amount_risk(amount: Decimal) -> f64 {
        if amount >= Decimal::from(50_000) {
            1.0
        } else if amount >= Decimal::from(10_000) {
            0.7
        } else if amount >= Decimal::from(5_000) {
            0.4
        } else if amount >= Decimal::from(1_000) {
            0.2
        } else {
            0.0
        }
    }

    /// Type sub-score: withdrawals and transfers are riskier than deposits
    fn transaction_type_risk(transaction_type: &str) -> f64 {
        match transaction_type.to_uppercase().as_str() {
            "WITHDRAWAL" => 0.6,
            "TRANSFER" => 0.5,
            "DEPOSIT" => 0.1,
            // Unknown types carry a default risk
            _ => 0.3,
        }
    }

    /// Round-number sub-score: fraudsters favor round amounts
    fn round_number_risk(amount: Decimal) -> f64 {
        if amount % Decimal::from(1_000) == Decimal::ZERO && amount >= Decimal::from(5_000) {
            0.6
        } else if amount % Decimal::from(500) == Decimal::ZERO && amount >= Decimal::from(2_000) {
            0.4
        } else {
            0.0
        }
    }

    /// Account-pattern sub-score
    ///
    /// Short account numbers stand in for new accounts; the 999 prefix is a
    /// known-suspicious range.
    fn account_pattern_risk(account_number: &str) -> f64 {
        if account_number.len() < 8 {
            0.5
        } else if account_number.starts_with("999") {
            0.7
        } else {
            0.0
        }
    }
}

/// Format an amount with thousands separators and two decimals ("60,000.00")
fn format_amount(amount: Decimal) -> String {
    let rendered = format!("{:.2}", amount.round_dp(2));
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    format!("{}.{}", grouped, frac_part)
}
