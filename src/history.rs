// src/history.rs
//! Bounded in-memory log of recent analysis outcomes for the debug
//! endpoints. Entries are anonymized summaries; raw disclosure text never
//! enters this structure.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::assessment::RiskAssessment;
use crate::mood::MoodLabel;
use crate::risk::RiskLevel;

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub ts_unix: u64,
    /// Anonymized id of the analyzed text (see `text::anon_hash`).
    pub anon_id: String,
    pub mood: MoodLabel,
    pub risk_level: RiskLevel,
    pub risk_score: f32,
    pub suicide_risk: bool,
    pub self_harm_risk: bool,
}

#[derive(Debug)]
pub struct History {
    inner: Mutex<Vec<HistoryEntry>>,
    cap: usize,
}

impl History {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::with_capacity(cap.min(10_000))),
            cap: cap.min(10_000),
        }
    }

    pub fn push(&self, anon_id: &str, assessment: &RiskAssessment) {
        let entry = HistoryEntry {
            ts_unix: now_unix(),
            anon_id: anon_id.to_string(),
            mood: assessment.mood,
            risk_level: assessment.risk_level,
            risk_score: assessment.risk_score,
            suicide_risk: assessment.suicide_risk,
            self_harm_risk: assessment.self_harm_risk,
        };

        let mut v = self.inner.lock().expect("history mutex poisoned");
        v.push(entry);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
    }

    pub fn snapshot_last_n(&self, n: usize) -> Vec<HistoryEntry> {
        let v = self.inner.lock().expect("history mutex poisoned");
        let len = v.len();
        let start = len.saturating_sub(n);
        v[start..].to_vec()
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
