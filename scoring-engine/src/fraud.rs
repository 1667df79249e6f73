//! Transaction fraud risk scorer

use crate::rules::{Band, BandTable, Bound, LookupTable, Tally};
use crate::{
    Error, FraudAction, FraudCheckInput, FraudCheckResult, MerchantCategory, Result, TimeOfDay,
};
use tracing::debug;

/// Weighted rules for fraud scoring. All standard weights are non-negative.
#[derive(Debug, Clone, Copy)]
pub struct FraudRuleSet {
    /// Transaction amount in USD
    pub amount: BandTable,
    /// Merchant categories with elevated fraud rates
    pub merchant_category: LookupTable<MerchantCategory>,
    /// Late transactions are riskier
    pub time_of_day: LookupTable<TimeOfDay>,
    /// Account age in months
    pub account_age: BandTable,
}

/// Rule set used by [`score_fraud`]
pub static STANDARD_FRAUD_RULES: FraudRuleSet = FraudRuleSet {
    amount: BandTable {
        factor: "transaction_amount",
        bands: &[
            Band { bound: Bound::Above(5000.0), weight_bp: 2500 },
            Band { bound: Bound::Above(2000.0), weight_bp: 1500 },
            Band { bound: Bound::Above(500.0), weight_bp: 500 },
        ],
    },
    merchant_category: LookupTable {
        factor: "merchant_category",
        entries: &[
            (MerchantCategory::Online, 2000),
            (MerchantCategory::Entertainment, 2000),
            (MerchantCategory::Travel, 2000),
        ],
        default_bp: 0,
    },
    time_of_day: LookupTable {
        factor: "time_of_day",
        entries: &[(TimeOfDay::Night, 1500), (TimeOfDay::Evening, 500)],
        default_bp: 0,
    },
    account_age: BandTable {
        factor: "customer_age_account",
        bands: &[
            Band { bound: Bound::Below(3.0), weight_bp: 2000 },
            Band { bound: Bound::Below(12.0), weight_bp: 1000 },
        ],
    },
};

/// Fraud scorer
#[derive(Debug, Clone, Copy)]
pub struct FraudScorer {
    rules: &'static FraudRuleSet,
}

impl FraudScorer {
    /// Scorer over the standard rule set
    pub fn new() -> Self {
        Self::with_rules(&STANDARD_FRAUD_RULES)
    }

    /// Scorer over a custom rule set
    pub fn with_rules(rules: &'static FraudRuleSet) -> Self {
        Self { rules }
    }

    /// Validate and score a transaction
    pub fn score(&self, input: &FraudCheckInput) -> Result<FraudCheckResult> {
        let (merchant, time) = validate(input)?;

        let rules = self.rules;
        let mut tally = Tally::new();
        tally.add(rules.amount.factor, rules.amount.weight(input.transaction_amount));
        tally.add(rules.merchant_category.factor, rules.merchant_category.weight(&merchant));
        tally.add(rules.time_of_day.factor, rules.time_of_day.weight(&time));
        tally.add(
            rules.account_age.factor,
            rules.account_age.weight(input.customer_age_account as f64),
        );

        // Same [0, 0.95] clamp as credit, so a negative rule can never push below zero
        let (fraud_risk_score, factors) = tally.finish();
        let action = FraudAction::from_score(fraud_risk_score);

        debug!(
            "Fraud risk scored: {} ({}) for {} {} transaction",
            fraud_risk_score,
            action,
            merchant.as_str(),
            time.as_str()
        );

        Ok(FraudCheckResult {
            fraud_risk_score,
            action,
            factors,
        })
    }
}

impl Default for FraudScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Score a transaction with the standard rule set
pub fn score_fraud(input: &FraudCheckInput) -> Result<FraudCheckResult> {
    FraudScorer::new().score(input)
}

fn validate(input: &FraudCheckInput) -> Result<(MerchantCategory, TimeOfDay)> {
    if !input.transaction_amount.is_finite() || input.transaction_amount <= 0.0 {
        return Err(Error::validation(
            "transaction_amount",
            format!("must be greater than 0, got {}", input.transaction_amount),
        ));
    }

    if input.customer_age_account < 0 {
        return Err(Error::validation(
            "customer_age_account",
            format!("must not be negative, got {}", input.customer_age_account),
        ));
    }

    let merchant = input.merchant_category.parse::<MerchantCategory>()?;
    let time = input.time_of_day.parse::<TimeOfDay>()?;

    Ok((merchant, time))
}
