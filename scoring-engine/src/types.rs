//! Core types for the scoring engine

use crate::rules::bp;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ===== Credit risk =====

/// Borrower attributes scored by the credit risk scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRiskInput {
    /// Borrower age in years (18-100)
    pub age: i64,
    /// Monthly income in USD, strictly positive
    pub income: f64,
    /// Months of credit history (0-600)
    pub credit_history_months: i64,
    /// Share of payments made on time (0-1)
    pub payment_regularity: f64,
    /// Geographic region, matched exactly against the region table
    pub region: String,
}

/// Outcome of a credit risk evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRiskResult {
    /// Score in [0.0, 0.95], four decimal places
    #[serde(with = "rust_decimal::serde::float")]
    pub risk_score: Decimal,
    /// Category band the score falls into
    pub risk_category: RiskCategory,
    /// Factors that moved the score, in rule order
    pub factors: Vec<FactorContribution>,
}

/// Credit risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskCategory {
    /// score < 0.33
    Low,
    /// 0.33 <= score < 0.67
    Medium,
    /// score >= 0.67
    High,
}

impl RiskCategory {
    /// Lower bound (inclusive) of the MEDIUM band
    pub const MEDIUM_FROM_BP: i64 = 3300;
    /// Lower bound (inclusive) of the HIGH band
    pub const HIGH_FROM_BP: i64 = 6700;

    /// Map a score onto its band. Bands are half-open: [0, 0.33), [0.33, 0.67), [0.67, ..)
    pub fn from_score(score: Decimal) -> Self {
        if score < bp(Self::MEDIUM_FROM_BP) {
            RiskCategory::Low
        } else if score < bp(Self::HIGH_FROM_BP) {
            RiskCategory::Medium
        } else {
            RiskCategory::High
        }
    }

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "LOW",
            RiskCategory::Medium => "MEDIUM",
            RiskCategory::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== Fraud =====

/// Transaction attributes scored by the fraud scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudCheckInput {
    /// Transaction amount in USD, strictly positive
    pub transaction_amount: f64,
    /// Merchant category, case-insensitive (see [`MerchantCategory`])
    pub merchant_category: String,
    /// Time of day, case-insensitive (see [`TimeOfDay`])
    pub time_of_day: String,
    /// Account age in months, non-negative
    pub customer_age_account: i64,
}

/// Outcome of a fraud check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudCheckResult {
    /// Score in [0.0, 0.95], four decimal places
    #[serde(with = "rust_decimal::serde::float")]
    pub fraud_risk_score: Decimal,
    /// Action band the score falls into
    pub action: FraudAction,
    /// Factors that moved the score, in rule order
    pub factors: Vec<FactorContribution>,
}

/// Action recommended for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FraudAction {
    /// score <= 0.4
    Approve,
    /// 0.4 < score <= 0.7
    Review,
    /// score > 0.7
    Block,
}

impl FraudAction {
    /// Scores strictly above this go to REVIEW
    pub const REVIEW_ABOVE_BP: i64 = 4000;
    /// Scores strictly above this are blocked
    pub const BLOCK_ABOVE_BP: i64 = 7000;

    /// Map a score onto its band. Bands are half-open: [0, 0.4], (0.4, 0.7], (0.7, ..)
    pub fn from_score(score: Decimal) -> Self {
        if score > bp(Self::BLOCK_ABOVE_BP) {
            FraudAction::Block
        } else if score > bp(Self::REVIEW_ABOVE_BP) {
            FraudAction::Review
        } else {
            FraudAction::Approve
        }
    }

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FraudAction::Approve => "APPROVE",
            FraudAction::Review => "REVIEW",
            FraudAction::Block => "BLOCK",
        }
    }
}

impl fmt::Display for FraudAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merchant categories accepted by the fraud scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MerchantCategory {
    /// Retail store
    Retail,
    /// Grocery store
    Grocery,
    /// Restaurant
    Restaurant,
    /// Gas station
    Gas,
    /// Entertainment
    Entertainment,
    /// Online shopping
    Online,
    /// Travel
    Travel,
    /// Medical
    Medical,
}

impl MerchantCategory {
    /// Every accepted category
    pub const ALL: [MerchantCategory; 8] = [
        MerchantCategory::Retail,
        MerchantCategory::Grocery,
        MerchantCategory::Restaurant,
        MerchantCategory::Gas,
        MerchantCategory::Entertainment,
        MerchantCategory::Online,
        MerchantCategory::Travel,
        MerchantCategory::Medical,
    ];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            MerchantCategory::Retail => "retail",
            MerchantCategory::Grocery => "grocery",
            MerchantCategory::Restaurant => "restaurant",
            MerchantCategory::Gas => "gas",
            MerchantCategory::Entertainment => "entertainment",
            MerchantCategory::Online => "online",
            MerchantCategory::Travel => "travel",
            MerchantCategory::Medical => "medical",
        }
    }
}

impl FromStr for MerchantCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MerchantCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::validation(
                    "merchant_category",
                    format!(
                        "'{}' is not one of {}",
                        s,
                        MerchantCategory::ALL.map(|c| c.as_str()).join(", ")
                    ),
                )
            })
    }
}

/// Time-of-day buckets accepted by the fraud scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    /// 6AM - 12PM
    Morning,
    /// 12PM - 6PM
    Afternoon,
    /// 6PM - 12AM
    Evening,
    /// 12AM - 6AM
    Night,
}

impl TimeOfDay {
    /// Every accepted bucket
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TimeOfDay::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::validation(
                    "time_of_day",
                    format!(
                        "'{}' is not one of {}",
                        s,
                        TimeOfDay::ALL.map(|t| t.as_str()).join(", ")
                    ),
                )
            })
    }
}

// ===== Shared =====

/// Weight one factor added to a score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    /// Factor name, e.g. "payment_regularity"
    pub name: String,
    /// Signed delta applied to the score
    #[serde(with = "rust_decimal::serde::float")]
    pub weight: Decimal,
}

/// Which scorer produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionType {
    /// Credit default risk
    CreditRisk,
    /// Transaction fraud risk
    Fraud,
}

impl PredictionType {
    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionType::CreditRisk => "credit_risk",
            PredictionType::Fraud => "fraud",
        }
    }
}

impl fmt::Display for PredictionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredictionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "credit_risk" => Ok(PredictionType::CreditRisk),
            "fraud" => Ok(PredictionType::Fraud),
            other => Err(Error::validation(
                "prediction_type",
                format!("'{}' is not one of credit_risk, fraud", other),
            )),
        }
    }
}

/// Normalized decision handed to a [`crate::DecisionRecorder`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Scorer that produced the decision
    pub prediction_type: PredictionType,
    /// Input exactly as the caller supplied it
    pub input_data: serde_json::Value,
    /// Final score
    #[serde(with = "rust_decimal::serde::float")]
    pub score: Decimal,
    /// Category (credit) or action (fraud)
    pub category_or_action: String,
    /// When the decision was made
    pub decided_at: DateTime<Utc>,
}

impl DecisionRecord {
    /// Build the record for a credit decision
    pub fn credit(input: &CreditRiskInput, result: &CreditRiskResult) -> Result<Self> {
        Self::build(
            PredictionType::CreditRisk,
            input,
            result.risk_score,
            result.risk_category.as_str(),
        )
    }

    /// Build the record for a fraud decision
    pub fn fraud(input: &FraudCheckInput, result: &FraudCheckResult) -> Result<Self> {
        Self::build(
            PredictionType::Fraud,
            input,
            result.fraud_risk_score,
            result.action.as_str(),
        )
    }

    fn build<T: Serialize>(
        prediction_type: PredictionType,
        input: &T,
        score: Decimal,
        category_or_action: &str,
    ) -> Result<Self> {
        let input_data =
            serde_json::to_value(input).map_err(|e| Error::Recorder(e.to_string()))?;

        Ok(DecisionRecord {
            prediction_type,
            input_data,
            score,
            category_or_action: category_or_action.to_string(),
            decided_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_risk_category_bands() {
        assert_eq!(RiskCategory::from_score(dec!(0.0)), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(dec!(0.3299)), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(dec!(0.33)), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_score(dec!(0.6699)), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_score(dec!(0.67)), RiskCategory::High);
        assert_eq!(RiskCategory::from_score(dec!(0.95)), RiskCategory::High);
    }

    #[test]
    fn test_fraud_action_bands() {
        assert_eq!(FraudAction::from_score(dec!(0.0)), FraudAction::Approve);
        assert_eq!(FraudAction::from_score(dec!(0.4)), FraudAction::Approve);
        assert_eq!(FraudAction::from_score(dec!(0.40001)), FraudAction::Review);
        assert_eq!(FraudAction::from_score(dec!(0.7)), FraudAction::Review);
        assert_eq!(FraudAction::from_score(dec!(0.70001)), FraudAction::Block);
        assert_eq!(FraudAction::from_score(dec!(0.95)), FraudAction::Block);
    }

    #[test]
    fn test_enums_parse_case_insensitively() {
        assert_eq!("ONLINE".parse::<MerchantCategory>().unwrap(), MerchantCategory::Online);
        assert_eq!("Gas".parse::<MerchantCategory>().unwrap(), MerchantCategory::Gas);
        assert_eq!("NiGhT".parse::<TimeOfDay>().unwrap(), TimeOfDay::Night);

        let err = "bogus".parse::<MerchantCategory>().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("merchant_category"));
        assert!("noon".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_outputs_serialize_upper_case() {
        assert_eq!(serde_json::to_value(RiskCategory::Medium).unwrap(), "MEDIUM");
        assert_eq!(serde_json::to_value(FraudAction::Block).unwrap(), "BLOCK");
        assert_eq!(
            serde_json::to_value(PredictionType::CreditRisk).unwrap(),
            "credit_risk"
        );
    }

    #[test]
    fn test_decision_record_keeps_raw_input() {
        let input = FraudCheckInput {
            transaction_amount: 120.5,
            merchant_category: "Online".to_string(),
            time_of_day: "morning".to_string(),
            customer_age_account: 30,
        };
        let result = FraudCheckResult {
            fraud_risk_score: dec!(0.2),
            action: FraudAction::Approve,
            factors: vec![],
        };

        let record = DecisionRecord::fraud(&input, &result).unwrap();

        assert_eq!(record.prediction_type, PredictionType::Fraud);
        assert_eq!(record.category_or_action, "APPROVE");
        assert_eq!(record.input_data["merchant_category"], "Online");
        assert_eq!(record.input_data["customer_age_account"], 30);
        assert_eq!(serde_json::to_value(&record).unwrap()["score"], 0.2);
    }
}
