// src/text.rs
//! Text primitives shared by both analysis paths: one-pass normalization,
//! Patois detection, PII scrubbing, and anonymized hashing for log lines.

use once_cell::sync::Lazy;
use regex::Regex;

/// Lowercase and collapse all whitespace runs to single spaces.
/// Both scoring paths match against this normalized form, so a phrase like
/// "kill myself" still matches across a line break.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Function-word markers used by the Patois detection heuristic.
const PATOIS_MARKERS: &[&str] = &[
    "mi", "yuh", "dem", "inna", "deh", "di", "fi", "nuh", "weh", "wah", "mek", "tek", "suh",
    "pon", "bout", "ting", "gwaan", "dun", "nah", "yah", "ya", "cyaa",
];

/// Heuristic dialect detection: at least 20% of words are Patois markers.
/// Used only when a caller asks for detection; a supplied language tag is
/// never overridden.
pub fn is_patois(text: &str) -> bool {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    if words.is_empty() {
        return false;
    }
    let hits = words
        .iter()
        .filter(|w| PATOIS_MARKERS.contains(&w.trim_matches(|c: char| !c.is_alphanumeric())))
        .count();
    (hits as f32) / (words.len() as f32) >= 0.2
}

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").expect("phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email regex")
});
static TRN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{9}\b").expect("trn regex"));
static HOUSE_NO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d+[A-Za-z]?\b").expect("house number regex"));
static SPACES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("spaces regex"));

/// Scrub phone numbers, email addresses, and nine-digit TRN/ID numbers.
/// Applied before a violence report leaves the process (routing payloads,
/// debug output).
pub fn scrub_pii(text: &str) -> String {
    let out = PHONE_RE.replace_all(text, "[PHONE]");
    let out = EMAIL_RE.replace_all(&out, "[EMAIL]");
    let out = TRN_RE.replace_all(&out, "[ID]");
    out.into_owned()
}

/// Strip house numbers from a location string, keeping the general area.
pub fn sanitize_location(location: &str) -> String {
    let out = HOUSE_NO_RE.replace_all(location, "");
    SPACES_RE.replace_all(&out, " ").trim().to_string()
}

/// Short anonymized id for a piece of text. Raw disclosures are never
/// logged; every log line and alert payload carries this instead.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
