// src/mood.rs
//! Sentiment normalizer: maps the external classifier's 3-way label onto a
//! mood label, refining `negative` by category dominance and applying the
//! Patois override markers last.

use serde::{Deserialize, Serialize};

use crate::lexicon::{Language, MoodMarkers};
use crate::scorer::CategoryScores;

/// Label produced by the external sentiment collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn parse(tag: &str) -> Option<SentimentLabel> {
        match tag {
            "positive" => Some(SentimentLabel::Positive),
            "negative" => Some(SentimentLabel::Negative),
            "neutral" => Some(SentimentLabel::Neutral),
            _ => None,
        }
    }
}

/// Sentiment label plus classifier confidence, as supplied by the caller.
/// Degraded mode passes `{neutral, 0.0}` here instead of a live call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentSignal {
    pub label: SentimentLabel,
    pub confidence: f32,
}

impl SentimentSignal {
    pub fn new(label: SentimentLabel, confidence: f32) -> Self {
        Self {
            label,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Fallback when the sentiment collaborator is unavailable.
    pub fn degraded() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            confidence: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLabel {
    Happy,
    Sad,
    Angry,
    Anxious,
    Neutral,
}

impl MoodLabel {
    pub const ALL: [MoodLabel; 5] = [
        MoodLabel::Happy,
        MoodLabel::Sad,
        MoodLabel::Angry,
        MoodLabel::Anxious,
        MoodLabel::Neutral,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MoodLabel::Happy => "happy",
            MoodLabel::Sad => "sad",
            MoodLabel::Angry => "angry",
            MoodLabel::Anxious => "anxious",
            MoodLabel::Neutral => "neutral",
        }
    }
}

/// Derive the mood label. `text` must be normalized (see `text::normalize`).
///
/// Base rule: positive → happy, neutral → neutral, negative → refined by
/// category dominance with strict `>` thresholds. The Patois overrides run
/// last and win over the base rule; they may contradict the classifier.
pub fn normalize_mood(
    sentiment: SentimentLabel,
    scores: &CategoryScores,
    language: Language,
    text: &str,
    markers: &MoodMarkers,
) -> MoodLabel {
    let mut mood = match sentiment {
        SentimentLabel::Positive => MoodLabel::Happy,
        SentimentLabel::Neutral => MoodLabel::Neutral,
        SentimentLabel::Negative => {
            if scores.anger > 2 {
                MoodLabel::Angry
            } else if scores.anxiety > 2 {
                MoodLabel::Anxious
            } else {
                MoodLabel::Sad
            }
        }
    };

    if language == Language::Patois {
        if markers.positive.iter().any(|m| text.contains(m.as_str())) {
            mood = MoodLabel::Happy;
        } else if markers.negative.iter().any(|m| text.contains(m.as_str())) {
            mood = MoodLabel::Sad;
        } else if markers.anger.iter().any(|m| text.contains(m.as_str())) {
            mood = MoodLabel::Angry;
        }
    }

    mood
}
