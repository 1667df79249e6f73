//! Decision recorder interface
//!
//! Scorers never call a recorder themselves. The service hands each decision
//! to a recorder after scoring, so persistence can fail without touching the
//! returned result.

use crate::{DecisionRecord, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Sink for scoring decisions (audit / history)
#[async_trait]
pub trait DecisionRecorder: Send + Sync {
    /// Persist one decision
    async fn record(&self, decision: &DecisionRecord) -> Result<()>;

    /// Recorder name for logs
    fn name(&self) -> &'static str;
}

/// Recorder that drops every decision
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRecorder;

#[async_trait]
impl DecisionRecorder for NoopRecorder {
    async fn record(&self, _decision: &DecisionRecord) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

/// Recorder that keeps decisions in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryRecorder {
    decisions: Arc<RwLock<Vec<DecisionRecord>>>,
}

impl MemoryRecorder {
    /// Empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first
    pub async fn decisions(&self) -> Vec<DecisionRecord> {
        self.decisions.read().await.clone()
    }
}

#[async_trait]
impl DecisionRecorder for MemoryRecorder {
    async fn record(&self, decision: &DecisionRecord) -> Result<()> {
        self.decisions.write().await.push(decision.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{score_credit_risk, CreditRiskInput, PredictionType};

    #[tokio::test]
    async fn test_memory_recorder_keeps_order() {
        let recorder = MemoryRecorder::new();
        let input = CreditRiskInput {
            age: 40,
            income: 3000.0,
            credit_history_months: 48,
            payment_regularity: 0.9,
            region: "South Asia".to_string(),
        };
        let result = score_credit_risk(&input).unwrap();
        let record = DecisionRecord::credit(&input, &result).unwrap();

        recorder.record(&record).await.unwrap();
        recorder.record(&record).await.unwrap();

        let stored = recorder.decisions().await;
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].prediction_type, PredictionType::CreditRisk);
        assert_eq!(stored[0].score, result.risk_score);
        assert_eq!(stored[0].category_or_action, "LOW");
    }

    #[tokio::test]
    async fn test_recorders_are_object_safe() {
        let recorders: Vec<Arc<dyn DecisionRecorder>> =
            vec![Arc::new(NoopRecorder), Arc::new(MemoryRecorder::new())];

        let names: Vec<&str> = recorders.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["noop", "memory"]);
    }
}
