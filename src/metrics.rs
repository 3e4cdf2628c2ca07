// src/metrics.rs

use axum::{routing::get, Router};
use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::assessment::RiskAssessment;
use crate::violence::ViolenceReportAssessment;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Initialize the Prometheus recorder and expose a static gauge with
    /// the loaded lexicon size.
    pub fn init(lexicon_phrases: usize) -> Self {
        // Use default buckets to avoid API differences across crate versions.
        let builder = PrometheusBuilder::new();

        let handle = builder
            .install_recorder()
            .expect("prometheus: install recorder");

        gauge!("triage_lexicon_phrases").set(lexicon_phrases as f64);

        Self { handle }
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// Counters for one completed risk analysis. No-op unless a recorder is
/// installed (tests skip `Metrics::init`).
pub fn record_analysis(assessment: &RiskAssessment) {
    counter!("triage_analyses_total").increment(1);
    if assessment.suicide_risk || assessment.self_harm_risk {
        counter!("triage_crisis_flags_total").increment(1);
    }
    if assessment.needs_support {
        counter!("triage_support_needed_total").increment(1);
    }
}

/// Counters for one completed violence-report analysis.
pub fn record_report(assessment: &ViolenceReportAssessment) {
    counter!("triage_reports_total").increment(1);
    if assessment.should_escalate {
        counter!("triage_reports_escalated_total").increment(1);
    }
}
