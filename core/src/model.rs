//! Base employee records: immutable once loaded.
//!
//! These are the inputs to the derivation pipeline. Nothing downstream
//! mutates them; derived blocks live alongside them in the profile.

use crate::types::{EmployeeId, RoleId, SkillId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const NEUTRAL_ENGAGEMENT: f64 = 50.0;
pub const NEUTRAL_FLIGHT_RISK: f64 = 50.0;
pub const NEUTRAL_READINESS: f64 = 50.0;

/// Clamp a score into [0, 100]. NaN collapses to 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

// ── Enumerations ─────────────────────────────────────────────────────────────

/// Ordinal rating: Outstanding > Exceeds > Meets > NeedsImprovement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceRating {
    Outstanding,
    Exceeds,
    #[default]
    Meets,
    NeedsImprovement,
}

impl PerformanceRating {
    /// Weight used by the learning-velocity blend.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Outstanding => 1.00,
            Self::Exceeds => 0.85,
            Self::Meets => 0.65,
            Self::NeedsImprovement => 0.40,
        }
    }

    pub fn cost_multiplier(&self) -> f64 {
        match self {
            Self::Outstanding => 1.15,
            Self::Exceeds => 1.08,
            Self::Meets => 1.00,
            Self::NeedsImprovement => 0.95,
        }
    }

    pub fn normalization_multiplier(&self) -> f64 {
        match self {
            Self::Outstanding => 1.10,
            Self::Exceeds => 1.05,
            Self::Meets => 1.00,
            Self::NeedsImprovement => 0.90,
        }
    }

    /// Higher is better. Used for ordering and tier bonuses.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Outstanding => 3,
            Self::Exceeds => 2,
            Self::Meets => 1,
            Self::NeedsImprovement => 0,
        }
    }

    /// Tolerant parse: ignores case, spaces, dashes and underscores.
    pub fn parse(raw: &str) -> Option<Self> {
        match squash(raw).as_str() {
            "outstanding" | "exceptional" => Some(Self::Outstanding),
            "exceeds" | "exceedsexpectations" => Some(Self::Exceeds),
            "meets" | "meetsexpectations" => Some(Self::Meets),
            "needsimprovement" | "below" | "belowexpectations" => Some(Self::NeedsImprovement),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding",
            Self::Exceeds => "Exceeds",
            Self::Meets => "Meets",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl PartialOrd for PerformanceRating {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PerformanceRating {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadershipFlag {
    #[default]
    IndividualContributor,
    PeopleManager,
}

impl LeadershipFlag {
    pub fn parse(raw: &str) -> Option<Self> {
        match squash(raw).as_str() {
            "individualcontributor" | "ic" | "false" | "no" => Some(Self::IndividualContributor),
            "peoplemanager" | "manager" | "true" | "yes" => Some(Self::PeopleManager),
            _ => None,
        }
    }

    pub fn is_manager(&self) -> bool {
        matches!(self, Self::PeopleManager)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    #[default]
    FullTime,
    PartTime,
    Contractor,
    Intern,
}

impl EmploymentType {
    pub fn parse(raw: &str) -> Option<Self> {
        match squash(raw).as_str() {
            "fulltime" | "ft" | "permanent" => Some(Self::FullTime),
            "parttime" | "pt" => Some(Self::PartTime),
            "contractor" | "contract" => Some(Self::Contractor),
            "intern" | "internship" => Some(Self::Intern),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValidationSource {
    Assessment,
    ProjectEvidence,
    Resume,
    #[default]
    Inferred,
}

impl ValidationSource {
    pub const ALL: [ValidationSource; 4] = [
        Self::Assessment,
        Self::ProjectEvidence,
        Self::Resume,
        Self::Inferred,
    ];

    /// Directly assessed or backed by delivered work.
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Assessment | Self::ProjectEvidence)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match squash(raw).as_str() {
            "assessment" | "assessed" => Some(Self::Assessment),
            "projectevidence" | "project" | "evidence" => Some(Self::ProjectEvidence),
            "resume" | "cv" => Some(Self::Resume),
            "inferred" | "ai" => Some(Self::Inferred),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DemandTrend {
    Rising,
    #[default]
    Stable,
    Declining,
}

impl DemandTrend {
    pub fn parse(raw: &str) -> Option<Self> {
        match squash(raw).as_str() {
            "rising" | "growing" | "up" | "high" => Some(Self::Rising),
            "stable" | "flat" | "medium" => Some(Self::Stable),
            "declining" | "falling" | "down" | "low" => Some(Self::Declining),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessLevel {
    Ready,
    NearlyReady,
    Developing,
    NotReady,
}

impl ReadinessLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Ready
        } else if score >= 60.0 {
            Self::NearlyReady
        } else if score >= 40.0 {
            Self::Developing
        } else {
            Self::NotReady
        }
    }
}

// ── Records ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id:     EmployeeId,
    pub name:            String,
    pub role_id:         RoleId,
    pub role_name:       String,
    pub business_unit:   String,
    pub location:        String,
    pub employment_type: EmploymentType,
    pub hire_date:       Option<NaiveDate>,
    pub tenure_months:   u32,
    /// Weak reference, lookup only.
    pub manager_id:      Option<EmployeeId>,
    pub leadership:      LeadershipFlag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub rating:            PerformanceRating,
    pub engagement_score:  f64,
    pub flight_risk_score: f64,
}

impl PerformanceMetrics {
    /// Clamp scores into range; the rating is already total.
    pub fn sanitized(self) -> Self {
        Self {
            rating: self.rating,
            engagement_score: clamp_score(self.engagement_score),
            flight_risk_score: clamp_score(self.flight_risk_score),
        }
    }
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            rating: PerformanceRating::Meets,
            engagement_score: NEUTRAL_ENGAGEMENT,
            flight_risk_score: NEUTRAL_FLIGHT_RISK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessAssessment {
    pub readiness_score: f64,
    pub readiness_level: ReadinessLevel,
    pub target_role:     Option<String>,
}

impl ReadinessAssessment {
    pub fn new(score: f64, target_role: Option<String>) -> Self {
        let readiness_score = clamp_score(score);
        Self {
            readiness_score,
            readiness_level: ReadinessLevel::from_score(readiness_score),
            target_role,
        }
    }
}

impl Default for ReadinessAssessment {
    fn default() -> Self {
        Self::new(NEUTRAL_READINESS, None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub skill_id:       SkillId,
    pub name:           String,
    /// Integer 1–5 once normalized.
    pub proficiency:    u8,
    pub source:         ValidationSource,
    pub last_validated: Option<NaiveDate>,
    pub demand_trend:   DemandTrend,
}

/// One raw, joined input row: what the loader (or the synthetic generator)
/// hands to the profile assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee:    Employee,
    pub performance: PerformanceMetrics,
    pub readiness:   ReadinessAssessment,
    pub skills:      Vec<Skill>,
}

fn squash(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_ordering_is_ordinal() {
        assert!(PerformanceRating::Outstanding > PerformanceRating::Exceeds);
        assert!(PerformanceRating::Exceeds > PerformanceRating::Meets);
        assert!(PerformanceRating::Meets > PerformanceRating::NeedsImprovement);
    }

    #[test]
    fn tolerant_enum_parsing() {
        assert_eq!(PerformanceRating::parse("Needs Improvement"), Some(PerformanceRating::NeedsImprovement));
        assert_eq!(PerformanceRating::parse("EXCEEDS"), Some(PerformanceRating::Exceeds));
        assert_eq!(LeadershipFlag::parse("people_manager"), Some(LeadershipFlag::PeopleManager));
        assert_eq!(ValidationSource::parse("Project Evidence"), Some(ValidationSource::ProjectEvidence));
        assert_eq!(EmploymentType::parse("Full-Time"), Some(EmploymentType::FullTime));
        assert_eq!(PerformanceRating::parse("stellar"), None);
    }

    #[test]
    fn readiness_level_thresholds() {
        assert_eq!(ReadinessLevel::from_score(80.0), ReadinessLevel::Ready);
        assert_eq!(ReadinessLevel::from_score(79.9), ReadinessLevel::NearlyReady);
        assert_eq!(ReadinessLevel::from_score(40.0), ReadinessLevel::Developing);
        assert_eq!(ReadinessLevel::from_score(12.0), ReadinessLevel::NotReady);
        assert_eq!(ReadinessAssessment::new(140.0, None).readiness_score, 100.0);
    }
}
