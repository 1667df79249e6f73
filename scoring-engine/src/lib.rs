//! Scoring engine for credit default and transaction fraud risk
//!
//! Both scorers are pure functions over fixed, hand-authored rule tables:
//! validate the input, add up one weight per factor, clamp, then map the
//! score onto a category or action band.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod credit;
pub mod error;
pub mod fraud;
pub mod recorder;
pub mod rules;
pub mod types;

pub use credit::{score_credit_risk, CreditRiskScorer, CreditRuleSet, STANDARD_CREDIT_RULES};
pub use error::{Error, Result};
pub use fraud::{score_fraud, FraudRuleSet, FraudScorer, STANDARD_FRAUD_RULES};
pub use recorder::{DecisionRecorder, MemoryRecorder, NoopRecorder};
pub use types::*;
