// src/lexicon.rs
//! Bilingual phrase tables: one `primary` (English) and one `dialect`
//! (Jamaican Patois) set per risk category and crisis kind, plus the small
//! Patois mood-override marker sets.
//!
//! The store is process-wide static configuration: loaded once at startup,
//! never mutated, safe for unlimited concurrent readers. The default table
//! is embedded at compile time; `TRIAGE_LEXICON_PATH` points to an
//! alternative JSON file for local calibration work.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

pub const ENV_LEXICON_PATH: &str = "TRIAGE_LEXICON_PATH";

static EMBEDDED_LEXICON: &str = include_str!("../lexicon.json");

static GLOBAL: Lazy<Lexicon> = Lazy::new(|| Lexicon::load().expect("valid built-in lexicon"));

/// Risk categories tracked by the scorer. `Coping` is mitigating; all
/// others are aggravating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Depression,
    Anxiety,
    Anger,
    Trauma,
    Isolation,
    Coping,
}

impl RiskCategory {
    /// Fixed iteration order; keeps scoring and serialization deterministic.
    pub const ALL: [RiskCategory; 6] = [
        RiskCategory::Depression,
        RiskCategory::Anxiety,
        RiskCategory::Anger,
        RiskCategory::Trauma,
        RiskCategory::Isolation,
        RiskCategory::Coping,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskCategory::Depression => "depression",
            RiskCategory::Anxiety => "anxiety",
            RiskCategory::Anger => "anger",
            RiskCategory::Trauma => "trauma",
            RiskCategory::Isolation => "isolation",
            RiskCategory::Coping => "coping",
        }
    }
}

/// Binary crisis indicators, independent of the graded categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrisisKind {
    Suicide,
    SelfHarm,
}

impl CrisisKind {
    pub const ALL: [CrisisKind; 2] = [CrisisKind::Suicide, CrisisKind::SelfHarm];

    pub fn as_str(self) -> &'static str {
        match self {
            CrisisKind::Suicide => "suicide",
            CrisisKind::SelfHarm => "self_harm",
        }
    }
}

/// Supported input languages. Tags are exactly `"en"` and `"patois"`;
/// anything else is rejected upstream, never silently defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    En,
    Patois,
}

impl Language {
    pub fn parse(tag: &str) -> Option<Language> {
        match tag {
            "en" => Some(Language::En),
            "patois" => Some(Language::Patois),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Patois => "patois",
        }
    }
}

/// One bilingual phrase set. `dialect` may be empty (trauma has no Patois
/// variants in the seed table).
#[derive(Debug, Clone, Deserialize)]
pub struct PhraseSet {
    pub primary: Vec<String>,
    #[serde(default)]
    pub dialect: Vec<String>,
}

impl PhraseSet {
    /// English set, unioned with the Patois set only for Patois input.
    fn for_language(&self, language: Language) -> impl Iterator<Item = &str> {
        let dialect: &[String] = match language {
            Language::Patois => &self.dialect,
            Language::En => &[],
        };
        self.primary
            .iter()
            .chain(dialect.iter())
            .map(|s| s.as_str())
    }

    fn lowercase_in_place(&mut self) {
        for p in self.primary.iter_mut().chain(self.dialect.iter_mut()) {
            *p = p.to_lowercase();
        }
    }
}

/// Patois markers that override the base mood mapping (cultural
/// calibration layer; applied only to Patois input).
#[derive(Debug, Clone, Deserialize)]
pub struct MoodMarkers {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub anger: Vec<String>,
}

/// Raw file shape; validated into the typed `Lexicon` on load.
#[derive(Debug, Deserialize)]
struct LexiconFile {
    categories: HashMap<String, PhraseSet>,
    crisis: HashMap<String, PhraseSet>,
    mood_markers: MoodMarkers,
}

/// The typed lexicon table: `(category | crisis kind, language) → phrases`.
/// A missing category is a configuration error caught at load, so lookups
/// cannot fail at analysis time.
#[derive(Debug, Clone)]
pub struct Lexicon {
    categories: HashMap<RiskCategory, PhraseSet>,
    crisis: HashMap<CrisisKind, PhraseSet>,
    pub mood_markers: MoodMarkers,
}

impl Lexicon {
    /// Load from `TRIAGE_LEXICON_PATH` if set, else the embedded table.
    pub fn load() -> anyhow::Result<Self> {
        let raw = match std::env::var(ENV_LEXICON_PATH) {
            Ok(path) => fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("failed to read lexicon at {path}: {e}"))?,
            Err(_) => EMBEDDED_LEXICON.to_string(),
        };
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        let mut file: LexiconFile = serde_json::from_str(raw)?;

        for set in file.categories.values_mut().chain(file.crisis.values_mut()) {
            set.lowercase_in_place();
        }
        for m in file
            .mood_markers
            .positive
            .iter_mut()
            .chain(file.mood_markers.negative.iter_mut())
            .chain(file.mood_markers.anger.iter_mut())
        {
            *m = m.to_lowercase();
        }

        let mut categories = HashMap::new();
        for cat in RiskCategory::ALL {
            let set = file
                .categories
                .remove(cat.as_str())
                .ok_or_else(|| anyhow::anyhow!("lexicon missing category `{}`", cat.as_str()))?;
            categories.insert(cat, set);
        }

        let mut crisis = HashMap::new();
        for kind in CrisisKind::ALL {
            let set = file
                .crisis
                .remove(kind.as_str())
                .ok_or_else(|| anyhow::anyhow!("lexicon missing crisis set `{}`", kind.as_str()))?;
            crisis.insert(kind, set);
        }

        Ok(Self {
            categories,
            crisis,
            mood_markers: file.mood_markers,
        })
    }

    /// Process-wide shared instance (embedded table unless overridden).
    pub fn global() -> &'static Lexicon {
        &GLOBAL
    }

    pub fn phrases_for(&self, category: RiskCategory, language: Language) -> impl Iterator<Item = &str> {
        self.categories[&category].for_language(language)
    }

    pub fn crisis_phrases(&self, kind: CrisisKind, language: Language) -> impl Iterator<Item = &str> {
        self.crisis[&kind].for_language(language)
    }

    /// Total phrase count across both languages; exported as a gauge.
    pub fn phrase_count(&self) -> usize {
        self.categories
            .values()
            .chain(self.crisis.values())
            .map(|s| s.primary.len() + s.dialect.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_lexicon_parses() {
        let lex = Lexicon::from_json_str(EMBEDDED_LEXICON).expect("embedded lexicon");
        assert!(lex.phrase_count() > 50);
    }

    #[test]
    fn patois_unions_dialect_set() {
        let lex = Lexicon::global();
        let en: Vec<_> = lex.phrases_for(RiskCategory::Depression, Language::En).collect();
        let patois: Vec<_> = lex
            .phrases_for(RiskCategory::Depression, Language::Patois)
            .collect();
        assert!(patois.len() > en.len());
        assert!(en.contains(&"hopeless"));
        assert!(patois.contains(&"mi tired a life"));
        assert!(!en.contains(&"mi tired a life"));
    }

    #[test]
    fn trauma_has_no_dialect_variants() {
        let lex = Lexicon::global();
        let en: Vec<_> = lex.phrases_for(RiskCategory::Trauma, Language::En).collect();
        let patois: Vec<_> = lex.phrases_for(RiskCategory::Trauma, Language::Patois).collect();
        assert_eq!(en, patois);
    }

    #[test]
    fn missing_category_is_a_load_error() {
        let raw = r#"{
            "categories": {},
            "crisis": {},
            "mood_markers": { "positive": [], "negative": [], "anger": [] }
        }"#;
        let err = Lexicon::from_json_str(raw).unwrap_err();
        assert!(err.to_string().contains("missing category"));
    }

    #[test]
    fn language_tags_parse_strictly() {
        assert_eq!(Language::parse("en"), Some(Language::En));
        assert_eq!(Language::parse("patois"), Some(Language::Patois));
        assert_eq!(Language::parse("EN"), None);
        assert_eq!(Language::parse("es"), None);
    }
}
