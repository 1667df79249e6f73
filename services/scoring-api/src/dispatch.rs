//! Fire-and-forget hand-off of decisions to the configured recorder

use crate::metrics::RECORDER_FAILURES;
use scoring_engine::{DecisionRecord, DecisionRecorder};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::warn;

#[derive(Clone)]
pub struct DecisionDispatcher {
    recorder: Arc<dyn DecisionRecorder>,
}

impl DecisionDispatcher {
    pub fn new(recorder: Arc<dyn DecisionRecorder>) -> Self {
        Self { recorder }
    }

    pub fn recorder_name(&self) -> &'static str {
        self.recorder.name()
    }

    /// Persist the decision in the background. Failures are logged and
    /// counted, never returned: the caller already has its answer.
    pub fn dispatch(&self, record: scoring_engine::Result<DecisionRecord>) -> Option<JoinHandle<()>> {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                RECORDER_FAILURES.inc();
                warn!("Decision not recorded: {}", e);
                return None;
            }
        };

        let recorder = self.recorder.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = recorder.record(&record).await {
                RECORDER_FAILURES.inc();
                warn!(
                    "Recorder '{}' failed to store {} decision: {}",
                    recorder.name(),
                    record.prediction_type,
                    e
                );
            }
        }))
    }
}
