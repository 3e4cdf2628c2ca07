// src/violence.rs
//! Violence-report path: urgency scoring, escalation test, agency routing,
//! and the report status machine. Shares only the normalized-substring
//! matching primitive with the risk path.
//!
//! There are TWO urgency calibrations, tuned independently at different
//! call sites. They stay separate named functions; unifying them would
//! silently change escalation behavior for existing reports.

use serde::{Deserialize, Serialize};

/// Weapon/violence, immediacy, and help/danger keyword groups for the
/// entity-extraction calibration.
const WEAPON_VIOLENCE: &[&str] = &["murder", "kill", "gun", "weapon", "threat", "violence"];
const IMMEDIACY: &[&str] = &["now", "today", "happening", "currently"];
const HELP_DANGER: &[&str] = &["help", "emergency", "urgent", "danger"];

/// Keyword groups for the standalone indicator calibration.
const IND_IMMEDIATE: &[&str] = &["now", "right now", "happening", "currently", "today", "tonight"];
const IND_WEAPON: &[&str] = &["gun", "knife", "weapon", "machete", "firearm"];
const IND_SEVERE: &[&str] = &["murder", "kill", "death", "shooting", "stabbing"];
const IND_MULTIPLE: &[&str] = &["multiple", "many", "several", "group"];

/// Narrow sets for the escalation short-circuit.
const ESCALATE_WEAPON: &[&str] = &["gun", "knife", "weapon"];
const ESCALATE_IMMEDIATE: &[&str] = &["now", "today", "happening"];

const YOUTH_MARKERS: &[&str] = &["youth", "child", "student", "school"];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportType {
    Murder,
    PlannedViolence,
    Firearms,
    Gang,
    CommunityViolence,
    Domestic,
    /// Unknown tags are valid; they route on urgency and keyword signals.
    Other(String),
}

impl ReportType {
    pub fn from_tag(tag: &str) -> ReportType {
        match tag {
            "murder" => ReportType::Murder,
            "planned_violence" => ReportType::PlannedViolence,
            "firearms" => ReportType::Firearms,
            "gang" => ReportType::Gang,
            "community_violence" => ReportType::CommunityViolence,
            "domestic" => ReportType::Domestic,
            other => ReportType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReportType::Murder => "murder",
            ReportType::PlannedViolence => "planned_violence",
            ReportType::Firearms => "firearms",
            ReportType::Gang => "gang",
            ReportType::CommunityViolence => "community_violence",
            ReportType::Domestic => "domestic",
            ReportType::Other(tag) => tag,
        }
    }
}

impl From<String> for ReportType {
    fn from(tag: String) -> Self {
        ReportType::from_tag(&tag)
    }
}

impl From<ReportType> for String {
    fn from(t: ReportType) -> Self {
        t.as_str().to_string()
    }
}

/// Response agencies, in routing-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Agency {
    /// Jamaica Constabulary Force (police).
    Jcf,
    /// Peace Management Initiative (community intervention).
    Pmi,
    WomenCrisisCentre,
    YouthServices,
}

/// Entity spans supplied by the external NER collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntities {
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub times: Vec<String>,
    #[serde(default)]
    pub persons: Vec<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
}

impl ReportEntities {
    /// Privacy pass before the spans leave the process with a routed
    /// report: PII scrubbed everywhere, house numbers dropped from
    /// locations.
    pub fn sanitized(self) -> Self {
        use crate::text::{sanitize_location, scrub_pii};
        Self {
            locations: self
                .locations
                .iter()
                .map(|l| sanitize_location(&scrub_pii(l)))
                .collect(),
            times: self.times.iter().map(|t| scrub_pii(t)).collect(),
            persons: self.persons.iter().map(|p| scrub_pii(p)).collect(),
            organizations: self.organizations.iter().map(|o| scrub_pii(o)).collect(),
        }
    }
}

/// Urgency calibration used on the report-extraction path, alongside NER:
/// +0.5 weapon/violence, +0.3 immediacy, +0.2 help/danger.
/// `text` must be normalized.
pub fn entity_urgency(text: &str) -> f32 {
    let mut score = 0.0_f32;
    if contains_any(text, WEAPON_VIOLENCE) {
        score += 0.5;
    }
    if contains_any(text, IMMEDIACY) {
        score += 0.3;
    }
    if contains_any(text, HELP_DANGER) {
        score += 0.2;
    }
    score.clamp(0.0, 1.0)
}

/// Urgency calibration used to re-score stored reports:
/// +0.4 immediacy, +0.3 weapon, +0.4 severity, +0.2 multiple victims.
/// `text` must be normalized.
pub fn indicator_urgency(text: &str) -> f32 {
    let mut score = 0.0_f32;
    if contains_any(text, IND_IMMEDIATE) {
        score += 0.4;
    }
    if contains_any(text, IND_WEAPON) {
        score += 0.3;
    }
    if contains_any(text, IND_SEVERE) {
        score += 0.4;
    }
    if contains_any(text, IND_MULTIPLE) {
        score += 0.2;
    }
    score.clamp(0.0, 1.0)
}

/// Immediate escalation test. The weapon-AND-immediacy short-circuit fires
/// regardless of the numeric score.
pub fn should_escalate(text: &str, report_type: &ReportType, urgency_score: f32) -> bool {
    if urgency_score >= 0.8 {
        return true;
    }

    if matches!(report_type, ReportType::Murder | ReportType::PlannedViolence) && urgency_score >= 0.5 {
        return true;
    }

    contains_any(text, ESCALATE_WEAPON) && contains_any(text, ESCALATE_IMMEDIATE)
}

/// Ordered, duplicate-free agency routing. Never empty: PMI is the default
/// receiver when no rule fires.
pub fn route_agencies(text: &str, report_type: &ReportType, urgency_score: f32) -> Vec<Agency> {
    let mut agencies = Vec::new();
    let add = |a: Agency, agencies: &mut Vec<Agency>| {
        if !agencies.contains(&a) {
            agencies.push(a);
        }
    };

    if urgency_score >= 0.6
        || matches!(
            report_type,
            ReportType::Murder | ReportType::Firearms | ReportType::PlannedViolence
        )
    {
        add(Agency::Jcf, &mut agencies);
    }

    if matches!(report_type, ReportType::Gang | ReportType::CommunityViolence)
        || (0.3..0.7).contains(&urgency_score)
    {
        add(Agency::Pmi, &mut agencies);
    }

    if matches!(report_type, ReportType::Domestic) {
        add(Agency::WomenCrisisCentre, &mut agencies);
        if urgency_score >= 0.5 {
            add(Agency::Jcf, &mut agencies);
        }
    }

    if contains_any(text, YOUTH_MARKERS) {
        add(Agency::YouthServices, &mut agencies);
    }

    if agencies.is_empty() {
        agencies.push(Agency::Pmi);
    }
    agencies
}

/// Report lifecycle driven by the external review workflow. `escalated`
/// and `resolved` are terminal from the engine's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Reviewed,
    Escalated,
    Resolved,
}

impl ReportStatus {
    pub fn can_transition(self, next: ReportStatus) -> bool {
        matches!(
            (self, next),
            (ReportStatus::Pending, ReportStatus::Reviewed)
                | (ReportStatus::Reviewed, ReportStatus::Escalated)
                | (ReportStatus::Reviewed, ReportStatus::Resolved)
        )
    }

    /// Returns true on a valid transition; invalid requests leave the
    /// status unchanged.
    pub fn advance(&mut self, next: ReportStatus) -> bool {
        if self.can_transition(next) {
            *self = next;
            true
        } else {
            false
        }
    }
}

/// Engine output for one violence report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolenceReportAssessment {
    pub report_type: ReportType,
    pub entities: ReportEntities,
    pub urgency_score: f32,
    pub should_escalate: bool,
    pub routed_to: Vec<Agency>,
}
