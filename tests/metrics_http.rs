// tests/metrics_http.rs
//
// Prometheus exposition smoke test: recorder install, counters, and the
// /metrics route. Kept in its own binary because the recorder can only be
// installed once per process.

use axum::{
    body::{self, Body},
    http::Request,
};
use tower::ServiceExt as _;

use jamcare_triage::engine::{analyze_risk, InputKind};
use jamcare_triage::lexicon::Lexicon;
use jamcare_triage::metrics::{record_analysis, Metrics};
use jamcare_triage::mood::{SentimentLabel, SentimentSignal};

#[tokio::test]
async fn metrics_route_renders_exposition_with_counters() {
    let metrics = Metrics::init(Lexicon::global().phrase_count());

    let assessment = analyze_risk(
        "I want to kill myself",
        "en",
        SentimentSignal::new(SentimentLabel::Negative, 0.9),
        InputKind::Message,
        Lexicon::global(),
    )
    .unwrap();
    record_analysis(&assessment);

    let app = metrics.router();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .expect("build GET /metrics"),
        )
        .await
        .expect("oneshot /metrics");
    assert!(resp.status().is_success());

    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body")
        .to_vec();
    let text = String::from_utf8(bytes).expect("utf8");

    assert!(text.contains("triage_lexicon_phrases"));
    assert!(text.contains("triage_analyses_total"));
    assert!(text.contains("triage_crisis_flags_total"));
}
