// src/assessment.rs
//! Output records: the full risk assessment, the narrow mood-event
//! projection for time-series queries, and the crisis alert with its
//! one-way acknowledgement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lexicon::{Language, RiskCategory};
use crate::mood::MoodLabel;
use crate::recommend::Recommendation;
use crate::risk::{category_level, CategoryLevel, RiskLevel};
use crate::scorer::CategoryScores;

/// Discretized band per aggravating category. Coping is reported through
/// `coping_present` on the assessment instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLevels {
    pub depression: CategoryLevel,
    pub anxiety: CategoryLevel,
    pub anger: CategoryLevel,
    pub trauma: CategoryLevel,
    pub isolation: CategoryLevel,
}

impl CategoryLevels {
    pub fn from_scores(scores: &CategoryScores) -> Self {
        Self {
            depression: category_level(RiskCategory::Depression, scores.depression),
            anxiety: category_level(RiskCategory::Anxiety, scores.anxiety),
            anger: category_level(RiskCategory::Anger, scores.anger),
            trauma: category_level(RiskCategory::Trauma, scores.trauma),
            isolation: category_level(RiskCategory::Isolation, scores.isolation),
        }
    }
}

/// The primary output entity. Constructed fresh per analysis call,
/// immutable; the caller persists it attached to the originating message
/// or journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub mood: MoodLabel,
    /// Passthrough from the sentiment collaborator, clamped to [0,1].
    pub confidence: f32,
    pub suicide_risk: bool,
    pub self_harm_risk: bool,
    pub needs_support: bool,
    pub category_scores: CategoryScores,
    pub category_levels: CategoryLevels,
    pub coping_present: bool,
    /// Rounded to 2 decimal places; thresholds were applied to the
    /// unrounded value.
    pub risk_score: f32,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<Recommendation>,
    pub language: Language,
}

/// Narrow projection of an assessment for time-series queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEvent {
    pub user_id: String,
    pub mood: MoodLabel,
    pub suicide_risk: bool,
    pub self_harm_risk: bool,
    pub risk_level: RiskLevel,
    pub ts: DateTime<Utc>,
    /// Pointer to the originating message/journal entry.
    pub source: String,
}

impl MoodEvent {
    pub fn from_assessment(user_id: &str, assessment: &RiskAssessment, source: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            mood: assessment.mood,
            suicide_risk: assessment.suicide_risk,
            self_harm_risk: assessment.self_harm_risk,
            risk_level: assessment.risk_level,
            ts: Utc::now(),
            source: source.to_string(),
        }
    }
}

/// Alert lifecycle: created as `pending` by the system, moved to
/// `acknowledged` only by human action. One-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Pending,
    Acknowledged,
}

/// Created exactly when `needs_support` or either crisis flag is set.
/// Carries the anonymized reference, never the disclosure text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisAlert {
    pub user_id: String,
    pub anon_ref: String,
    pub risk_level: RiskLevel,
    pub suicide_risk: bool,
    pub self_harm_risk: bool,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
}

impl CrisisAlert {
    pub fn new(user_id: &str, anon_ref: &str, assessment: &RiskAssessment) -> Self {
        Self {
            user_id: user_id.to_string(),
            anon_ref: anon_ref.to_string(),
            risk_level: assessment.risk_level,
            suicide_risk: assessment.suicide_risk,
            self_harm_risk: assessment.self_harm_risk,
            status: AlertStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Returns true if the status changed; acknowledging an already
    /// acknowledged alert is a no-op.
    pub fn acknowledge(&mut self) -> bool {
        match self.status {
            AlertStatus::Pending => {
                self.status = AlertStatus::Acknowledged;
                true
            }
            AlertStatus::Acknowledged => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::CrisisFlags;

    fn assessment(suicide: bool) -> RiskAssessment {
        let scores = CategoryScores {
            depression: 2,
            ..Default::default()
        };
        let flags = CrisisFlags {
            suicide_risk: suicide,
            self_harm_risk: false,
        };
        let unrounded = crate::risk::composite_score(&flags, &scores);
        RiskAssessment {
            mood: MoodLabel::Sad,
            confidence: 0.9,
            suicide_risk: suicide,
            self_harm_risk: false,
            needs_support: crate::risk::needs_support(&flags, unrounded),
            category_scores: scores,
            category_levels: CategoryLevels::from_scores(&scores),
            coping_present: false,
            risk_score: crate::risk::round2(unrounded),
            risk_level: RiskLevel::from_score(unrounded),
            recommendations: Vec::new(),
            language: Language::En,
        }
    }

    #[test]
    fn serialized_shape_matches_contract() {
        let v = serde_json::to_value(assessment(true)).unwrap();
        assert_eq!(v["mood"], "sad");
        assert_eq!(v["suicide_risk"], true);
        assert_eq!(v["risk_level"], "critical");
        assert_eq!(v["category_scores"]["depression"], 2);
        assert_eq!(v["category_levels"]["depression"], "moderate");
        assert_eq!(v["language"], "en");
    }

    #[test]
    fn mood_event_is_a_projection() {
        let a = assessment(true);
        let ev = MoodEvent::from_assessment("user-1", &a, "journal/42");
        assert_eq!(ev.mood, a.mood);
        assert_eq!(ev.risk_level, a.risk_level);
        assert!(ev.suicide_risk);
        assert_eq!(ev.source, "journal/42");
    }

    #[test]
    fn alert_acknowledgement_is_one_way() {
        let a = assessment(true);
        let mut alert = CrisisAlert::new("user-1", "ab12cd34ef56", &a);
        assert_eq!(alert.status, AlertStatus::Pending);
        assert!(alert.acknowledge());
        assert_eq!(alert.status, AlertStatus::Acknowledged);
        assert!(!alert.acknowledge());
        assert_eq!(alert.status, AlertStatus::Acknowledged);
    }
}
