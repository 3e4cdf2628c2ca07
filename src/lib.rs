// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod alert_gate;
pub mod api;
pub mod assessment;
pub mod engine;
pub mod history;
pub mod lexicon;
pub mod metrics;
pub mod mood;
pub mod recommend;
pub mod resources;
pub mod risk;
pub mod scorer;
pub mod text;
pub mod trend;
pub mod upstream;
pub mod violence;

// Crisis-alert delivery sinks
pub mod notify;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::assessment::{AlertStatus, CrisisAlert, MoodEvent, RiskAssessment};
pub use crate::engine::{
    analyze_risk, analyze_violence_report, rescore_urgency, EngineError, InputKind,
};
pub use crate::lexicon::{Language, Lexicon, RiskCategory};
pub use crate::mood::{MoodLabel, SentimentLabel, SentimentSignal};
pub use crate::notify::{AlertEvent, Notifier, NotifierMux};
pub use crate::risk::RiskLevel;
pub use crate::violence::{Agency, ReportStatus, ReportType, ViolenceReportAssessment};
