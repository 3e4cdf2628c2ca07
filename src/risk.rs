// src/risk.rs
//! Composite risk calculator: fixed additive weights over crisis flags and
//! category scores, clamped to [0,1], then discretized.
//!
//! Suicide/self-harm are near-deterministic triggers (large fixed
//! increments); category scores provide graded escalation; coping is the
//! only subtractive term. The weights are calibration constants, not
//! configuration; they must not drift per deployment.

use serde::{Deserialize, Serialize};

use crate::lexicon::RiskCategory;
use crate::scorer::{CategoryScores, CrisisFlags};

const W_SUICIDE: f32 = 1.00;
const W_SELF_HARM: f32 = 0.80;
const W_DEPRESSION: f32 = 0.10;
const W_ANXIETY: f32 = 0.08;
const W_ANGER: f32 = 0.06;
const W_TRAUMA: f32 = 0.12;
const W_ISOLATION: f32 = 0.09;
const W_COPING: f32 = 0.10;

/// Threshold for the support nudge; deliberately below the `critical`
/// cutoff so a message can warrant support before the severest label.
const NEEDS_SUPPORT_THRESHOLD: f32 = 0.7;

/// Unrounded composite score in [0.0, 1.0]. All threshold comparisons use
/// this value; `round2` is presentation only.
pub fn composite_score(flags: &CrisisFlags, scores: &CategoryScores) -> f32 {
    let mut score = 0.0_f32;
    if flags.suicide_risk {
        score += W_SUICIDE;
    }
    if flags.self_harm_risk {
        score += W_SELF_HARM;
    }
    score += W_DEPRESSION * scores.depression as f32;
    score += W_ANXIETY * scores.anxiety as f32;
    score += W_ANGER * scores.anger as f32;
    score += W_TRAUMA * scores.trauma as f32;
    score += W_ISOLATION * scores.isolation as f32;
    score -= W_COPING * scores.coping as f32;
    score.clamp(0.0, 1.0)
}

/// Round to 2 decimal places for the reported `risk_score`.
pub fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    /// Discretize the UNROUNDED composite score; strict thresholds,
    /// highest first.
    pub fn from_score(score: f32) -> RiskLevel {
        if score > 0.8 {
            RiskLevel::Critical
        } else if score > 0.6 {
            RiskLevel::High
        } else if score > 0.3 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryLevel {
    Low,
    Moderate,
    High,
    Present,
    NoneDetected,
}

/// Per-category discretization. Trauma is presence-based; the graded
/// categories have independently calibrated breakpoints.
pub fn category_level(category: RiskCategory, score: u32) -> CategoryLevel {
    match category {
        RiskCategory::Depression | RiskCategory::Anxiety => {
            if score > 3 {
                CategoryLevel::High
            } else if score > 1 {
                CategoryLevel::Moderate
            } else {
                CategoryLevel::Low
            }
        }
        RiskCategory::Anger => {
            if score > 2 {
                CategoryLevel::High
            } else if score > 1 {
                CategoryLevel::Moderate
            } else {
                CategoryLevel::Low
            }
        }
        RiskCategory::Trauma => {
            if score > 0 {
                CategoryLevel::Present
            } else {
                CategoryLevel::NoneDetected
            }
        }
        RiskCategory::Isolation => {
            if score > 2 {
                CategoryLevel::High
            } else if score > 1 {
                CategoryLevel::Moderate
            } else {
                CategoryLevel::Low
            }
        }
        // Coping is reported through `coping_present`, not a level band.
        RiskCategory::Coping => {
            if score > 1 {
                CategoryLevel::Present
            } else {
                CategoryLevel::NoneDetected
            }
        }
    }
}

/// Support nudge: either crisis flag, or the unrounded score above 0.7.
pub fn needs_support(flags: &CrisisFlags, unrounded_score: f32) -> bool {
    flags.any() || unrounded_score > NEEDS_SUPPORT_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(suicide: bool, self_harm: bool) -> CrisisFlags {
        CrisisFlags {
            suicide_risk: suicide,
            self_harm_risk: self_harm,
        }
    }

    #[test]
    fn suicide_flag_saturates_the_score() {
        let score = composite_score(&flags(true, false), &CategoryScores::default());
        assert_eq!(score, 1.0);
        assert_eq!(RiskLevel::from_score(score), RiskLevel::Critical);
    }

    #[test]
    fn coping_subtracts_and_floors_at_zero() {
        let scores = CategoryScores {
            coping: 3,
            ..Default::default()
        };
        assert_eq!(composite_score(&flags(false, false), &scores), 0.0);
    }

    #[test]
    fn coping_mitigates_category_risk() {
        let without = CategoryScores {
            depression: 4,
            ..Default::default()
        };
        let with = CategoryScores {
            depression: 4,
            coping: 2,
            ..Default::default()
        };
        let a = composite_score(&flags(false, false), &without);
        let b = composite_score(&flags(false, false), &with);
        assert!(b < a);
    }

    #[test]
    fn weighted_sum_matches_hand_math() {
        // 2*0.10 + 1*0.08 + 1*0.12 + 2*0.09 - 1*0.10 = 0.48
        let scores = CategoryScores {
            depression: 2,
            anxiety: 1,
            trauma: 1,
            isolation: 2,
            coping: 1,
            ..Default::default()
        };
        let score = composite_score(&flags(false, false), &scores);
        assert!((score - 0.48).abs() < 1e-6);
        assert_eq!(RiskLevel::from_score(score), RiskLevel::Moderate);
    }

    #[test]
    fn level_thresholds_are_strict() {
        assert_eq!(RiskLevel::from_score(0.8), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.800001), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(0.6), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(0.3), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(RiskLevel::Critical > RiskLevel::High);
        assert!(RiskLevel::High > RiskLevel::Moderate);
        assert!(RiskLevel::Moderate > RiskLevel::Low);
    }

    #[test]
    fn category_breakpoints() {
        use CategoryLevel::*;
        assert_eq!(category_level(RiskCategory::Depression, 4), High);
        assert_eq!(category_level(RiskCategory::Depression, 2), Moderate);
        assert_eq!(category_level(RiskCategory::Depression, 1), Low);
        assert_eq!(category_level(RiskCategory::Anger, 3), High);
        assert_eq!(category_level(RiskCategory::Anger, 2), Moderate);
        assert_eq!(category_level(RiskCategory::Trauma, 1), Present);
        assert_eq!(category_level(RiskCategory::Trauma, 0), NoneDetected);
        assert_eq!(category_level(RiskCategory::Isolation, 3), High);
    }

    #[test]
    fn needs_support_threshold_is_below_critical() {
        let scores = CategoryScores {
            depression: 3,
            trauma: 2,
            isolation: 2,
            ..Default::default()
        };
        // 0.30 + 0.24 + 0.18 = 0.72: supported but not critical
        let score = composite_score(&flags(false, false), &scores);
        assert!(needs_support(&flags(false, false), score));
        assert_eq!(RiskLevel::from_score(score), RiskLevel::High);
    }

    #[test]
    fn rounding_is_presentation_only() {
        assert_eq!(round2(0.48000002), 0.48);
        assert_eq!(round2(1.0), 1.0);
        assert_eq!(round2(0.123), 0.12);
    }
}
