// src/recommend.rs
//! Recommendation engine: independent rules over flags and category scores.
//! Every rule that fires contributes one record; the crisis record, when
//! present, is always first. The remaining records keep rule-evaluation
//! order (stable, never re-sorted by severity).

use serde::{Deserialize, Serialize};

use crate::scorer::{CategoryScores, CrisisFlags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Crisis,
    ProfessionalHelp,
    Community,
    CopingTechnique,
    PositiveReinforcement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationAction {
    ShowCrisisResources,
    ShowProfessionals,
    ShowCommunities,
    ShowCopingTools,
    EncourageContinuation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub message: String,
    pub action: RecommendationAction,
}

impl Recommendation {
    fn new(kind: RecommendationKind, message: &str, action: RecommendationAction) -> Self {
        Self {
            kind,
            message: message.to_string(),
            action,
        }
    }
}

/// Derive the ordered recommendation list. `unrounded_score` is the
/// composite BEFORE presentation rounding; the crisis rule threshold must
/// not flip on a rounding boundary.
pub fn derive(flags: &CrisisFlags, unrounded_score: f32, scores: &CategoryScores) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if flags.suicide_risk || unrounded_score > 0.8 {
        out.push(Recommendation::new(
            RecommendationKind::Crisis,
            "Immediate support needed. Please reach out to a crisis counselor.",
            RecommendationAction::ShowCrisisResources,
        ));
    }

    if scores.depression > 3 {
        out.push(Recommendation::new(
            RecommendationKind::ProfessionalHelp,
            "Consider speaking with a mental health professional",
            RecommendationAction::ShowProfessionals,
        ));
    }

    if scores.isolation > 2 {
        out.push(Recommendation::new(
            RecommendationKind::Community,
            "Connecting with others might help. Join a support community.",
            RecommendationAction::ShowCommunities,
        ));
    }

    if scores.anxiety > 3 {
        out.push(Recommendation::new(
            RecommendationKind::CopingTechnique,
            "Try breathing exercises or mindfulness to manage anxiety",
            RecommendationAction::ShowCopingTools,
        ));
    }

    if scores.coping > 2 {
        out.push(Recommendation::new(
            RecommendationKind::PositiveReinforcement,
            "Great job using healthy coping strategies!",
            RecommendationAction::EncourageContinuation,
        ));
    }

    out
}
