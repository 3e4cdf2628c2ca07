// src/api.rs
//! HTTP surface: thin wrappers over the pure engine. Handlers resolve
//! missing collaborator signals (sentiment, entities), map `EngineError`
//! to 422, and trigger the caller-side effects (history, metrics,
//! gated crisis alerts). Raw disclosure text is never logged.

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::alert_gate::AlertGate;
use crate::assessment::{MoodEvent, RiskAssessment};
use crate::engine::{self, EngineError, InputKind};
use crate::history::{History, HistoryEntry};
use crate::lexicon::Lexicon;
use crate::metrics;
use crate::mood::{SentimentLabel, SentimentSignal};
use crate::notify::{AlertEvent, NotifierMux};
use crate::resources::CrisisResources;
use crate::text::{anon_hash, is_patois, normalize};
use crate::trend::{calculate_mood_trend, MoodTrend};
use crate::upstream::ModelServerClient;
use crate::violence::{ReportEntities, ViolenceReportAssessment};

#[derive(Clone)]
pub struct AppState {
    pub lexicon: Arc<Lexicon>,
    pub resources: Arc<CrisisResources>,
    pub history: Arc<History>,
    pub upstream: Arc<ModelServerClient>,
    pub notifier: Arc<NotifierMux>,
    pub alert_gate: Arc<Mutex<AlertGate>>,
}

impl AppState {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            lexicon: Arc::new(Lexicon::load()?),
            resources: Arc::new(CrisisResources::load()),
            history: Arc::new(History::with_capacity(2000)),
            upstream: Arc::new(ModelServerClient::from_env()),
            notifier: Arc::new(NotifierMux::from_env()),
            alert_gate: Arc::new(Mutex::new(AlertGate::default())),
        })
    }

    /// State with collaborators and alert sinks disabled; used by tests.
    pub fn detached() -> Self {
        Self {
            lexicon: Arc::new(Lexicon::global().clone()),
            resources: Arc::new(CrisisResources::load()),
            history: Arc::new(History::with_capacity(2000)),
            upstream: Arc::new(ModelServerClient::with_base_url(None)),
            notifier: Arc::new(NotifierMux::default()),
            alert_gate: Arc::new(Mutex::new(AlertGate::default())),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze/message", post(analyze_message))
        .route("/analyze/journal", post(analyze_journal))
        .route("/analyze/report", post(analyze_report))
        .route("/analyze/urgency", post(rescore_urgency))
        .route("/trend", post(mood_trend))
        .route("/resources", get(crisis_resources))
        .route("/debug/recent", get(debug_recent))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SentimentDto {
    label: String,
    confidence: f32,
}

#[derive(Debug, Deserialize)]
struct AnalyzeReq {
    text: String,
    /// Absent → dialect detection decides.
    #[serde(default)]
    language: Option<String>,
    /// Absent → the sentiment collaborator is consulted (degraded default
    /// if unavailable).
    #[serde(default)]
    sentiment: Option<SentimentDto>,
}

#[derive(Debug, Deserialize)]
struct ReportReq {
    text: String,
    report_type: String,
    #[serde(default)]
    entities: Option<ReportEntities>,
}

#[derive(Debug, Deserialize)]
struct UrgencyReq {
    text: String,
}

#[derive(Debug, Serialize)]
struct UrgencyResp {
    urgency_score: f32,
}

/// Rejected-request wrapper; everything maps to 422 with a stable reason.
enum ApiError {
    Engine(EngineError),
    InvalidSentimentLabel(String),
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        ApiError::Engine(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (reason, message) = match &self {
            ApiError::Engine(e) => (e.reason(), e.to_string()),
            ApiError::InvalidSentimentLabel(label) => (
                "invalid_sentiment_label",
                format!("unknown sentiment label `{label}`"),
            ),
        };
        let body = serde_json::json!({ "reason": reason, "error": message });
        (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
    }
}

async fn analyze_message(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Result<Json<RiskAssessment>, ApiError> {
    analyze_common(state, body, InputKind::Message).await
}

async fn analyze_journal(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Result<Json<RiskAssessment>, ApiError> {
    analyze_common(state, body, InputKind::Journal).await
}

async fn analyze_common(
    state: AppState,
    body: AnalyzeReq,
    kind: InputKind,
) -> Result<Json<RiskAssessment>, ApiError> {
    let language = match body.language {
        Some(tag) => tag,
        None => if is_patois(&body.text) { "patois" } else { "en" }.to_string(),
    };

    let sentiment = match body.sentiment {
        Some(dto) => {
            let label = SentimentLabel::parse(&dto.label)
                .ok_or(ApiError::InvalidSentimentLabel(dto.label.clone()))?;
            SentimentSignal::new(label, dto.confidence)
        }
        None => state.upstream.sentiment(&body.text, &language).await,
    };

    let assessment = engine::analyze_risk(&body.text, &language, sentiment, kind, &state.lexicon)?;

    let anon = anon_hash(&body.text);
    metrics::record_analysis(&assessment);
    state.history.push(&anon, &assessment);

    if assessment.needs_support {
        fire_gated_alert(&state, &anon, &assessment, &body.text);
    }

    tracing::info!(
        id = %anon,
        mood = assessment.mood.as_str(),
        level = assessment.risk_level.as_str(),
        needs_support = assessment.needs_support,
        "risk analysis complete"
    );

    Ok(Json(assessment))
}

/// Run the alert gate and, when it opens, hand delivery to a background
/// task so slow sinks never delay the response.
fn fire_gated_alert(state: &AppState, anon_id: &str, assessment: &RiskAssessment, raw_text: &str) {
    let now = chrono::Utc::now();
    let normalized = normalize(raw_text);

    let open = {
        let mut gate = state.alert_gate.lock().expect("alert gate poisoned");
        if gate.should_alert(assessment.risk_level, &normalized, now) {
            gate.record_alert(assessment.risk_level, &normalized, now);
            true
        } else {
            false
        }
    };

    if !open {
        tracing::debug!(id = %anon_id, "alert suppressed by gate");
        return;
    }

    let ev = AlertEvent {
        anon_id: anon_id.to_string(),
        risk_level: assessment.risk_level,
        suicide_risk: assessment.suicide_risk,
        self_harm_risk: assessment.self_harm_risk,
        ts: now,
    };
    let notifier = state.notifier.clone();
    tokio::spawn(async move {
        notifier.dispatch(&ev).await;
    });
}

async fn analyze_report(
    State(state): State<AppState>,
    Json(body): Json<ReportReq>,
) -> Result<Json<ViolenceReportAssessment>, ApiError> {
    let entities = match body.entities {
        Some(e) => Some(e),
        None if state.upstream.is_enabled() => {
            Some(state.upstream.entities(&body.text, &body.report_type).await)
        }
        None => None,
    };

    let assessment = engine::analyze_violence_report(&body.text, &body.report_type, entities)?;
    metrics::record_report(&assessment);

    tracing::info!(
        id = %anon_hash(&body.text),
        report_type = assessment.report_type.as_str(),
        urgency = assessment.urgency_score,
        escalate = assessment.should_escalate,
        "violence report analyzed"
    );

    Ok(Json(assessment))
}

async fn rescore_urgency(Json(body): Json<UrgencyReq>) -> Json<UrgencyResp> {
    Json(UrgencyResp {
        urgency_score: engine::rescore_urgency(&body.text),
    })
}

/// Trend over caller-held mood events (persistence stays with the caller).
async fn mood_trend(Json(events): Json<Vec<MoodEvent>>) -> Json<MoodTrend> {
    Json(calculate_mood_trend(&events))
}

async fn crisis_resources(State(state): State<AppState>) -> Json<CrisisResources> {
    Json(state.resources.as_ref().clone())
}

async fn debug_recent(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    Json(state.history.snapshot_last_n(10))
}
