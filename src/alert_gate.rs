// src/alert_gate.rs
//! Alert gate: keeps one user in distress from fanning out a burst of
//! identical crisis alerts. Within the cooldown window a new alert passes
//! only when severity escalates, or when the disclosure is genuinely new
//! content at the same severity. Severity escalation always passes.
//!
//! The last normalized text is held in memory only for the similarity
//! check; it is never logged or persisted.

use chrono::{DateTime, Duration, Utc};
use strsim::normalized_levenshtein;

use crate::risk::RiskLevel;

pub const DEFAULT_COOLDOWN_SECS: i64 = 900;
pub const DEFAULT_SIMILARITY_SUPPRESS: f64 = 0.90;

#[derive(Debug, Clone)]
pub struct AlertGate {
    cooldown: Duration,
    similarity_suppress: f64,
    last_alert_at: Option<DateTime<Utc>>,
    last_level: Option<RiskLevel>,
    last_text: Option<String>,
}

impl AlertGate {
    pub fn new(cooldown_secs: i64) -> Self {
        Self {
            cooldown: Duration::seconds(cooldown_secs),
            similarity_suppress: DEFAULT_SIMILARITY_SUPPRESS,
            last_alert_at: None,
            last_level: None,
            last_text: None,
        }
    }

    /// Returns true if an alert for `(level, normalized_text)` should fire
    /// at time `now`.
    pub fn should_alert(&self, level: RiskLevel, normalized_text: &str, now: DateTime<Utc>) -> bool {
        let (last_at, last_level) = match (self.last_alert_at, self.last_level) {
            (Some(at), Some(level)) => (at, level),
            _ => return true, // first alert after a quiet period
        };

        if now - last_at >= self.cooldown {
            return true;
        }

        // During cooldown: escalation always passes.
        if level > last_level {
            return true;
        }
        if level < last_level {
            return false;
        }

        // Same severity: suppress near-duplicates of the last disclosure.
        match &self.last_text {
            Some(last) => normalized_levenshtein(last, normalized_text) < self.similarity_suppress,
            None => true,
        }
    }

    pub fn record_alert(&mut self, level: RiskLevel, normalized_text: &str, now: DateTime<Utc>) {
        self.last_alert_at = Some(now);
        self.last_level = Some(level);
        self.last_text = Some(normalized_text.to_string());
    }
}

impl Default for AlertGate {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_alert_always_passes() {
        let gate = AlertGate::new(10);
        assert!(gate.should_alert(RiskLevel::Moderate, "mi feel low", Utc::now()));
    }

    #[test]
    fn near_duplicate_within_cooldown_is_suppressed() {
        let mut gate = AlertGate::new(10);
        let t0 = Utc::now();
        gate.record_alert(RiskLevel::High, "i feel hopeless and alone tonight", t0);

        let t1 = t0 + Duration::seconds(3);
        assert!(!gate.should_alert(RiskLevel::High, "i feel hopeless and alone tonight", t1));
        assert!(!gate.should_alert(RiskLevel::High, "i feel hopeless and alone tonite", t1));
    }

    #[test]
    fn new_content_at_same_severity_passes() {
        let mut gate = AlertGate::new(10);
        let t0 = Utc::now();
        gate.record_alert(RiskLevel::High, "i feel hopeless and alone tonight", t0);

        let t1 = t0 + Duration::seconds(3);
        assert!(gate.should_alert(RiskLevel::High, "the flashbacks came back and i cannot sleep", t1));
    }

    #[test]
    fn escalation_always_passes() {
        let mut gate = AlertGate::new(10);
        let t0 = Utc::now();
        gate.record_alert(RiskLevel::High, "i feel hopeless and alone tonight", t0);

        let t1 = t0 + Duration::seconds(3);
        assert!(gate.should_alert(RiskLevel::Critical, "i feel hopeless and alone tonight", t1));
    }

    #[test]
    fn lower_severity_within_cooldown_is_suppressed() {
        let mut gate = AlertGate::new(10);
        let t0 = Utc::now();
        gate.record_alert(RiskLevel::Critical, "mi cyaan tek it", t0);

        let t1 = t0 + Duration::seconds(3);
        assert!(!gate.should_alert(RiskLevel::Moderate, "completely different words here", t1));
    }

    #[test]
    fn cooldown_expiry_reopens_the_gate() {
        let mut gate = AlertGate::new(10);
        let t0 = Utc::now();
        gate.record_alert(RiskLevel::High, "i feel hopeless and alone tonight", t0);

        let t2 = t0 + Duration::seconds(12);
        assert!(gate.should_alert(RiskLevel::Low, "i feel hopeless and alone tonight", t2));
    }
}
