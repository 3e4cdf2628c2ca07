// src/trend.rs
//! Mood trend aggregation over a user's recent MoodEvents. Persistence is
//! the caller's concern; this module is a pure fold over whatever slice of
//! events the caller holds.

use serde::{Deserialize, Serialize};

use crate::assessment::MoodEvent;
use crate::mood::MoodLabel;

/// How many of the most recent events the concern check looks at.
const CONCERN_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcernLevel {
    None,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodTrend {
    pub trend: TrendDirection,
    pub dominant_mood: MoodLabel,
    pub concern_level: ConcernLevel,
    pub needs_intervention: bool,
}

/// Fold recent mood events into a trend summary. Events are expected in
/// chronological order; only the trailing window feeds the concern check.
pub fn calculate_mood_trend(events: &[MoodEvent]) -> MoodTrend {
    if events.is_empty() {
        return MoodTrend {
            trend: TrendDirection::Stable,
            dominant_mood: MoodLabel::Neutral,
            concern_level: ConcernLevel::None,
            needs_intervention: false,
        };
    }

    // Dominant mood by count; iteration over the fixed label order keeps
    // ties deterministic.
    let dominant_mood = MoodLabel::ALL
        .iter()
        .copied()
        .max_by_key(|label| events.iter().filter(|e| e.mood == *label).count())
        .unwrap_or(MoodLabel::Neutral);

    let recent = &events[events.len().saturating_sub(CONCERN_WINDOW)..];
    let suicide_flags = recent.iter().filter(|e| e.suicide_risk).count();
    let self_harm_flags = recent.iter().filter(|e| e.self_harm_risk).count();

    let concern_level = if suicide_flags >= 2 || self_harm_flags >= 3 {
        ConcernLevel::High
    } else if suicide_flags >= 1 || self_harm_flags >= 2 {
        ConcernLevel::Moderate
    } else {
        ConcernLevel::None
    };

    MoodTrend {
        trend: if dominant_mood == MoodLabel::Happy {
            TrendDirection::Improving
        } else {
            TrendDirection::Declining
        },
        dominant_mood,
        concern_level,
        needs_intervention: concern_level != ConcernLevel::None,
    }
}
