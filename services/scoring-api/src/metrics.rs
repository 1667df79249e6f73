use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, Encoder,
    HistogramVec, IntCounter, IntCounterVec, TextEncoder,
};
use lazy_static::lazy_static;

lazy_static! {
    // Decision metrics
    pub static ref PREDICTIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "scoring_predictions_total",
        "Total scoring decisions by type and outcome",
        &["prediction_type", "outcome"]
    ).expect("metric can be created");

    pub static ref SCORE_DISTRIBUTION: HistogramVec = register_histogram_vec!(
        "scoring_score",
        "Distribution of returned risk scores",
        &["prediction_type"],
        vec![0.1, 0.2, 0.33, 0.4, 0.5, 0.67, 0.7, 0.8, 0.95]
    ).expect("metric can be created");

    pub static ref VALIDATION_FAILURES: IntCounterVec = register_int_counter_vec!(
        "scoring_validation_failures_total",
        "Requests rejected by input validation",
        &["prediction_type"]
    ).expect("metric can be created");

    // Persistence metrics
    pub static ref RECORDER_FAILURES: IntCounter = register_int_counter!(
        "scoring_recorder_failures_total",
        "Decisions that could not be recorded"
    ).expect("metric can be created");
}

/// Generate metrics output in Prometheus text format
pub fn render() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_decision_metrics() {
        PREDICTIONS_TOTAL.with_label_values(&["fraud", "BLOCK"]).inc();
        SCORE_DISTRIBUTION.with_label_values(&["fraud"]).observe(0.8);

        let output = render().unwrap();
        assert!(output.contains("scoring_predictions_total"));
        assert!(output.contains("scoring_score_bucket"));
    }
}
