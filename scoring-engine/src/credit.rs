//! Credit default risk scorer

use crate::rules::{Band, BandTable, Bound, LookupTable, Tally};
use crate::{CreditRiskInput, CreditRiskResult, Error, Result, RiskCategory};
use tracing::debug;

/// Weighted rules for credit scoring. Each factor contributes at most one weight.
#[derive(Debug, Clone, Copy)]
pub struct CreditRuleSet {
    /// Younger borrowers score higher, with a smaller bump past 65
    pub age: BandTable,
    /// Monthly income in USD
    pub income: BandTable,
    /// Months of history; a long history lowers the score
    pub credit_history: BandTable,
    /// Strongest factor; near-perfect regularity lowers the score
    pub payment_regularity: BandTable,
    /// Regional default-rate adjustment
    pub region: LookupTable<&'static str>,
}

/// Rule set used by [`score_credit_risk`]
pub static STANDARD_CREDIT_RULES: CreditRuleSet = CreditRuleSet {
    age: BandTable {
        factor: "age",
        bands: &[
            Band { bound: Bound::Below(25.0), weight_bp: 1500 },
            Band { bound: Bound::Below(35.0), weight_bp: 1000 },
            Band { bound: Bound::Above(65.0), weight_bp: 500 },
        ],
    },
    income: BandTable {
        factor: "income",
        bands: &[
            Band { bound: Bound::Below(1000.0), weight_bp: 2500 },
            Band { bound: Bound::Below(2000.0), weight_bp: 1500 },
            Band { bound: Bound::Below(5000.0), weight_bp: 500 },
        ],
    },
    credit_history: BandTable {
        factor: "credit_history_months",
        bands: &[
            Band { bound: Bound::Below(12.0), weight_bp: 2000 },
            Band { bound: Bound::Below(24.0), weight_bp: 1000 },
            Band { bound: Bound::Above(120.0), weight_bp: -1000 },
        ],
    },
    payment_regularity: BandTable {
        factor: "payment_regularity",
        bands: &[
            Band { bound: Bound::Below(0.5), weight_bp: 3000 },
            Band { bound: Bound::Below(0.7), weight_bp: 1500 },
            Band { bound: Bound::Below(0.85), weight_bp: 500 },
            Band { bound: Bound::Above(0.95), weight_bp: -1000 },
        ],
    },
    region: LookupTable {
        factor: "region",
        entries: &[
            ("South Asia", 1000),
            ("Sub-Saharan Africa", 1500),
            ("Latin America", 800),
            ("East Asia", 500),
            ("Middle East", 1200),
        ],
        default_bp: 1000,
    },
};

/// Credit risk scorer
#[derive(Debug, Clone, Copy)]
pub struct CreditRiskScorer {
    rules: &'static CreditRuleSet,
}

impl CreditRiskScorer {
    /// Scorer over the standard rule set
    pub fn new() -> Self {
        Self::with_rules(&STANDARD_CREDIT_RULES)
    }

    /// Scorer over a custom rule set
    pub fn with_rules(rules: &'static CreditRuleSet) -> Self {
        Self { rules }
    }

    /// Validate and score a borrower
    pub fn score(&self, input: &CreditRiskInput) -> Result<CreditRiskResult> {
        validate(input)?;

        let rules = self.rules;
        let mut tally = Tally::new();
        tally.add(rules.age.factor, rules.age.weight(input.age as f64));
        tally.add(rules.income.factor, rules.income.weight(input.income));
        tally.add(
            rules.credit_history.factor,
            rules.credit_history.weight(input.credit_history_months as f64),
        );
        tally.add(
            rules.payment_regularity.factor,
            rules.payment_regularity.weight(input.payment_regularity),
        );
        tally.add(rules.region.factor, rules.region.weight(&input.region.as_str()));

        let (risk_score, factors) = tally.finish();
        let risk_category = RiskCategory::from_score(risk_score);

        debug!(
            "Credit risk scored: {} ({}) from {} factors",
            risk_score,
            risk_category,
            factors.len()
        );

        Ok(CreditRiskResult {
            risk_score,
            risk_category,
            factors,
        })
    }
}

impl Default for CreditRiskScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Score a borrower with the standard rule set
pub fn score_credit_risk(input: &CreditRiskInput) -> Result<CreditRiskResult> {
    CreditRiskScorer::new().score(input)
}

fn validate(input: &CreditRiskInput) -> Result<()> {
    if !(18..=100).contains(&input.age) {
        return Err(Error::validation(
            "age",
            format!("must be between 18 and 100, got {}", input.age),
        ));
    }

    if !input.income.is_finite() || input.income <= 0.0 {
        return Err(Error::validation(
            "income",
            format!("must be greater than 0, got {}", input.income),
        ));
    }

    if !(0..=600).contains(&input.credit_history_months) {
        return Err(Error::validation(
            "credit_history_months",
            format!("must be between 0 and 600, got {}", input.credit_history_months),
        ));
    }

    // NaN fails the range check too
    if !(0.0..=1.0).contains(&input.payment_regularity) {
        return Err(Error::validation(
            "payment_regularity",
            format!("must be between 0 and 1, got {}", input.payment_regularity),
        ));
    }

    Ok(())
}
