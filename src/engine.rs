// src/engine.rs
//! # Triage Engine
//! Pure, testable logic that maps `(text, language, sentiment)` → a
//! `RiskAssessment`, and a violence report → a `ViolenceReportAssessment`.
//! No I/O; safe for unlimited concurrent callers; suitable for unit tests
//! and offline evaluation.
//!
//! Validation runs before any scoring: an invalid input produces no
//! partial assessment, no truncation, no silent language default.

use std::fmt;

use crate::assessment::{CategoryLevels, RiskAssessment};
use crate::lexicon::{Language, Lexicon};
use crate::mood::{normalize_mood, SentimentSignal};
use crate::recommend;
use crate::risk::{composite_score, needs_support, round2, RiskLevel};
use crate::scorer::score_text;
use crate::text::normalize;
use crate::violence::{
    entity_urgency, indicator_urgency, route_agencies, should_escalate, ReportEntities,
    ReportType, ViolenceReportAssessment,
};

pub const MAX_MESSAGE_CHARS: usize = 5_000;
pub const MAX_JOURNAL_CHARS: usize = 10_000;
pub const MAX_REPORT_CHARS: usize = 5_000;

/// Input source; determines the maximum accepted length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Message,
    Journal,
    Report,
}

impl InputKind {
    pub fn max_chars(self) -> usize {
        match self {
            InputKind::Message => MAX_MESSAGE_CHARS,
            InputKind::Journal => MAX_JOURNAL_CHARS,
            InputKind::Report => MAX_REPORT_CHARS,
        }
    }
}

/// Rejected-input taxonomy. Raised before scoring begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    EmptyText,
    TextTooLong { chars: usize, max: usize },
    UnsupportedLanguage(String),
}

impl EngineError {
    /// Stable machine-readable reason for API payloads.
    pub fn reason(&self) -> &'static str {
        match self {
            EngineError::EmptyText => "empty_text",
            EngineError::TextTooLong { .. } => "text_too_long",
            EngineError::UnsupportedLanguage(_) => "unsupported_language",
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::EmptyText => write!(f, "text is empty or whitespace-only"),
            EngineError::TextTooLong { chars, max } => {
                write!(f, "text has {chars} chars, maximum is {max}")
            }
            EngineError::UnsupportedLanguage(tag) => {
                write!(f, "unsupported language tag `{tag}` (expected `en` or `patois`)")
            }
        }
    }
}

impl std::error::Error for EngineError {}

fn validate(text: &str, kind: InputKind) -> Result<(), EngineError> {
    if text.trim().is_empty() {
        return Err(EngineError::EmptyText);
    }
    let chars = text.chars().count();
    let max = kind.max_chars();
    if chars > max {
        return Err(EngineError::TextTooLong { chars, max });
    }
    Ok(())
}

/// Analyze one disclosure. `language` is the raw request tag (`en` |
/// `patois`); `sentiment` comes from the external classifier, or the
/// degraded default when that collaborator is down.
pub fn analyze_risk(
    text: &str,
    language: &str,
    sentiment: SentimentSignal,
    kind: InputKind,
    lexicon: &Lexicon,
) -> Result<RiskAssessment, EngineError> {
    validate(text, kind)?;
    let language = Language::parse(language)
        .ok_or_else(|| EngineError::UnsupportedLanguage(language.to_string()))?;

    // One normalization pass; every matcher below works on this form.
    let normalized = normalize(text);

    let (scores, flags) = score_text(&normalized, language, lexicon);
    let mood = normalize_mood(
        sentiment.label,
        &scores,
        language,
        &normalized,
        &lexicon.mood_markers,
    );

    let unrounded = composite_score(&flags, &scores);
    let recommendations = recommend::derive(&flags, unrounded, &scores);

    Ok(RiskAssessment {
        mood,
        confidence: sentiment.confidence.clamp(0.0, 1.0),
        suicide_risk: flags.suicide_risk,
        self_harm_risk: flags.self_harm_risk,
        needs_support: needs_support(&flags, unrounded),
        category_scores: scores,
        category_levels: CategoryLevels::from_scores(&scores),
        coping_present: scores.coping > 1,
        risk_score: round2(unrounded),
        risk_level: RiskLevel::from_score(unrounded),
        recommendations,
        language,
    })
}

/// Analyze one violence report: urgency (entity calibration), escalation
/// test, agency routing. `entities` comes from the external NER
/// collaborator; `None` means the collaborator was unavailable.
pub fn analyze_violence_report(
    text: &str,
    report_type: &str,
    entities: Option<ReportEntities>,
) -> Result<ViolenceReportAssessment, EngineError> {
    validate(text, InputKind::Report)?;
    let report_type = ReportType::from_tag(report_type);

    let normalized = normalize(text);
    let urgency_score = entity_urgency(&normalized);

    Ok(ViolenceReportAssessment {
        should_escalate: should_escalate(&normalized, &report_type, urgency_score),
        routed_to: route_agencies(&normalized, &report_type, urgency_score),
        entities: entities.unwrap_or_default().sanitized(),
        urgency_score,
        report_type,
    })
}

/// Re-score a stored report's urgency with the indicator calibration.
/// Empty text scores 0.0; this path never rejects.
pub fn rescore_urgency(text: &str) -> f32 {
    indicator_urgency(&normalize(text))
}
