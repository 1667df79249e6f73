use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use scoring_engine::{
    CreditRiskResult, FactorContribution, FraudAction, FraudCheckResult, RiskCategory,
};
use serde::{Deserialize, Serialize};

// ===== Credit Risk =====
#[derive(Debug, Serialize, Deserialize)]
pub struct CreditRiskResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub risk_score: Decimal,
    pub risk_category: RiskCategory,
    pub factors: Vec<FactorContribution>,
    pub message: String,
}

impl From<CreditRiskResult> for CreditRiskResponse {
    fn from(result: CreditRiskResult) -> Self {
        CreditRiskResponse {
            risk_score: result.risk_score,
            risk_category: result.risk_category,
            factors: result.factors,
            message: "Rule-based credit risk analysis of borrower characteristics.".to_string(),
        }
    }
}

// ===== Fraud =====
#[derive(Debug, Serialize, Deserialize)]
pub struct FraudResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub fraud_risk_score: Decimal,
    pub action: FraudAction,
    pub factors: Vec<FactorContribution>,
    pub message: String,
}

impl From<FraudCheckResult> for FraudResponse {
    fn from(result: FraudCheckResult) -> Self {
        FraudResponse {
            fraud_risk_score: result.fraud_risk_score,
            action: result.action,
            factors: result.factors,
            message: "Rule-based fraud analysis of transaction characteristics.".to_string(),
        }
    }
}

// ===== Prediction History =====
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
    pub prediction_type: Option<String>,
}

impl HistoryQuery {
    pub const DEFAULT_LIMIT: u32 = 50;
    pub const MAX_LIMIT: u32 = 500;

    pub fn effective_limit(&self) -> u32 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoredPrediction {
    pub id: i64,
    pub prediction_type: String,
    pub input_data: serde_json::Value,
    pub risk_score: f64,
    pub risk_category: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionHistory {
    pub count: usize,
    pub predictions: Vec<StoredPrediction>,
}

// ===== Service Info =====
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    pub debug: bool,
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_limit_is_bounded() {
        let query = |limit| HistoryQuery {
            limit,
            prediction_type: None,
        };

        assert_eq!(query(None).effective_limit(), 50);
        assert_eq!(query(Some(0)).effective_limit(), 1);
        assert_eq!(query(Some(20)).effective_limit(), 20);
        assert_eq!(query(Some(10_000)).effective_limit(), 500);
    }
}
