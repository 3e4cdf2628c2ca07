// src/scorer.rs
//! Category scorer: distinct-phrase presence counts per risk category plus
//! the binary crisis flags. Pure and deterministic; identical input always
//! yields identical output.

use serde::{Deserialize, Serialize};

use crate::lexicon::{CrisisKind, Language, Lexicon, RiskCategory};

/// Per-category hit counts for one input. Computed fresh per analysis,
/// immutable once produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub depression: u32,
    pub anxiety: u32,
    pub anger: u32,
    pub trauma: u32,
    pub isolation: u32,
    pub coping: u32,
}

impl CategoryScores {
    pub fn get(&self, category: RiskCategory) -> u32 {
        match category {
            RiskCategory::Depression => self.depression,
            RiskCategory::Anxiety => self.anxiety,
            RiskCategory::Anger => self.anger,
            RiskCategory::Trauma => self.trauma,
            RiskCategory::Isolation => self.isolation,
            RiskCategory::Coping => self.coping,
        }
    }

    fn set(&mut self, category: RiskCategory, count: u32) {
        match category {
            RiskCategory::Depression => self.depression = count,
            RiskCategory::Anxiety => self.anxiety = count,
            RiskCategory::Anger => self.anger = count,
            RiskCategory::Trauma => self.trauma = count,
            RiskCategory::Isolation => self.isolation = count,
            RiskCategory::Coping => self.coping = count,
        }
    }
}

/// Binary suicide / self-harm indicators. Monotonic in keyword presence:
/// nothing elsewhere in the input can unset a flag once a phrase matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisFlags {
    pub suicide_risk: bool,
    pub self_harm_risk: bool,
}

impl CrisisFlags {
    pub fn any(&self) -> bool {
        self.suicide_risk || self.self_harm_risk
    }
}

/// Score normalized text against the lexicon. `text` must already be
/// lowercased and whitespace-collapsed (see `text::normalize`).
///
/// Each phrase contributes at most 1 per category regardless of repeats:
/// the count answers "how many distinct concerning signals are present",
/// and a single repeated word must not dominate the composite.
pub fn score_text(text: &str, language: Language, lexicon: &Lexicon) -> (CategoryScores, CrisisFlags) {
    let mut scores = CategoryScores::default();
    for category in RiskCategory::ALL {
        let count = lexicon
            .phrases_for(category, language)
            .filter(|phrase| text.contains(phrase))
            .count() as u32;
        scores.set(category, count);
    }

    let flags = CrisisFlags {
        suicide_risk: lexicon
            .crisis_phrases(CrisisKind::Suicide, language)
            .any(|phrase| text.contains(phrase)),
        self_harm_risk: lexicon
            .crisis_phrases(CrisisKind::SelfHarm, language)
            .any(|phrase| text.contains(phrase)),
    };

    (scores, flags)
}
