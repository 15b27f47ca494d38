use crate::{
    automation::{AiCapability, AutomationProfile},
    error::{WorkforceError, WorkforceResult},
    role::RoleFamily,
    types::{CurrencyCode, RoleId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Compensation ─────────────────────────────────────────────────────────────

/// Annual base salary band in the reporting currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryBand {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCost {
    /// Cost-of-living multiplier applied to the band salary.
    pub cost_factor: f64,
    pub currency: CurrencyCode,
    /// Local currency units per one reporting-currency unit.
    pub units_per_reporting: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverheadRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBonuses {
    /// Fractional bonus per full year of tenure.
    pub per_tenure_year: f64,
    pub tenure_cap: f64,
    pub engagement_high: f64,
    pub engagement_high_threshold: f64,
    pub engagement_moderate: f64,
    pub engagement_moderate_threshold: f64,
    /// Cap on the combined tenure + engagement bonus.
    pub total_cap: f64,
}

// ── Skill normalization ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreSkillExpectation {
    pub pattern: String,
    pub minimum: u8,
    pub typical: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleFamilyConfig {
    pub family: RoleFamily,
    pub role_patterns: Vec<String>,
    #[serde(default)]
    pub core_skills: Vec<CoreSkillExpectation>,
}

// ── Automation ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationConfig {
    pub by_role: BTreeMap<RoleId, AutomationProfile>,
    pub by_family: BTreeMap<RoleFamily, AutomationProfile>,
    pub default: AutomationProfile,
}

// ── Aggregation ──────────────────────────────────────────────────────────────

/// One histogram bucket with integer, upper-inclusive edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketEdge {
    pub label: String,
    pub lower: u32,
    pub upper: u32,
}

// ── Root ─────────────────────────────────────────────────────────────────────

/// Every static lookup table the analytics core consults.
///
/// Missing sections in a JSON override file fall back to `builtin()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub reporting_currency: CurrencyCode,
    /// "As of" date for trailing windows. Never the wall clock.
    pub reference_date: NaiveDate,
    pub skill_growth_window_months: u32,
    pub default_salary_band: SalaryBand,
    pub salary_bands: BTreeMap<RoleId, SalaryBand>,
    pub default_location: LocationCost,
    pub locations: BTreeMap<String, LocationCost>,
    pub overhead: OverheadRange,
    pub cost_bonuses: CostBonuses,
    pub transferable_skills: Vec<String>,
    pub technical_leadership_skills: Vec<String>,
    /// Ordered: first matching family wins.
    pub role_families: Vec<RoleFamilyConfig>,
    pub automation: AutomationConfig,
    pub histogram_buckets: Vec<BucketEdge>,
    pub high_flight_risk_threshold: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AnalyticsConfig {
    /// Load a JSON override file. Absent sections keep built-in values.
    pub fn load(path: &str) -> WorkforceResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| WorkforceError::Config {
            path: path.to_string(),
            reason: format!("cannot read: {e}"),
        })?;
        let config: AnalyticsConfig = serde_json::from_str(&content)?;
        config.validate().map_err(|reason| WorkforceError::Config {
            path: path.to_string(),
            reason,
        })?;
        log::info!(
            "Loaded analytics config from {path} ({} salary bands, {} locations)",
            config.salary_bands.len(),
            config.locations.len()
        );
        Ok(config)
    }

    /// Reject tables the derivations cannot honour.
    pub fn validate(&self) -> Result<(), String> {
        let bands = std::iter::once(("default", &self.default_salary_band))
            .chain(self.salary_bands.iter().map(|(k, v)| (k.as_str(), v)));
        for (role, band) in bands {
            if !(band.min > 0.0 && band.min <= band.max) {
                return Err(format!("salary band for {role} must satisfy 0 < min <= max"));
            }
        }
        for (loc, cost) in std::iter::once(("default", &self.default_location))
            .chain(self.locations.iter().map(|(k, v)| (k.as_str(), v)))
        {
            if cost.cost_factor <= 0.0 || cost.units_per_reporting <= 0.0 {
                return Err(format!("location {loc} must have positive factors"));
            }
        }
        if !(self.overhead.min >= 1.0 && self.overhead.min <= self.overhead.max) {
            return Err("overhead range must satisfy 1.0 <= min <= max".into());
        }
        for family in &self.role_families {
            for exp in &family.core_skills {
                if !(1..=5).contains(&exp.minimum)
                    || !(1..=5).contains(&exp.typical)
                    || exp.minimum > exp.typical
                {
                    return Err(format!(
                        "core skill '{}' in {} needs 1 <= minimum <= typical <= 5",
                        exp.pattern,
                        family.family.name()
                    ));
                }
            }
        }
        if self.histogram_buckets.is_empty() {
            return Err("histogram_buckets must not be empty".into());
        }
        if self
            .histogram_buckets
            .windows(2)
            .any(|w| w[0].upper >= w[1].lower || w[0].lower > w[0].upper)
        {
            return Err("histogram_buckets must be ascending and non-overlapping".into());
        }
        Ok(())
    }

    pub fn salary_band(&self, role_id: &str) -> SalaryBand {
        match self.salary_bands.get(role_id) {
            Some(band) => *band,
            None => {
                log::debug!("No salary band for role {role_id}; using default band");
                self.default_salary_band
            }
        }
    }

    pub fn location_cost(&self, location: &str) -> &LocationCost {
        self.locations.get(location).unwrap_or(&self.default_location)
    }

    pub fn family_config(&self, family: RoleFamily) -> Option<&RoleFamilyConfig> {
        self.role_families.iter().find(|f| f.family == family)
    }

    /// Hard-coded defaults. Also what tests run against.
    pub fn builtin() -> Self {
        Self {
            reporting_currency: "USD".into(),
            reference_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or(NaiveDate::MIN),
            skill_growth_window_months: 6,
            default_salary_band: SalaryBand { min: 70_000.0, max: 110_000.0 },
            salary_bands: builtin_salary_bands(),
            default_location: LocationCost {
                cost_factor: 1.0,
                currency: "USD".into(),
                units_per_reporting: 1.0,
            },
            locations: builtin_locations(),
            overhead: OverheadRange { min: 1.20, max: 1.28 },
            cost_bonuses: CostBonuses {
                per_tenure_year: 0.01,
                tenure_cap: 0.08,
                engagement_high: 0.03,
                engagement_high_threshold: 80.0,
                engagement_moderate: 0.01,
                engagement_moderate_threshold: 60.0,
                total_cap: 0.10,
            },
            transferable_skills: strings(&[
                "Python",
                "SQL",
                "Data Analysis",
                "Project Management",
                "Communication",
                "Stakeholder Management",
                "Agile",
                "Cloud Computing",
                "Problem Solving",
                "Leadership",
                "Technical Writing",
                "Machine Learning",
            ]),
            technical_leadership_skills: strings(&[
                "Technical Leadership",
                "System Design",
                "Architecture",
                "Mentoring",
            ]),
            role_families: builtin_role_families(),
            automation: builtin_automation(),
            histogram_buckets: vec![
                bucket("0-30", 0, 30),
                bucket("31-50", 31, 50),
                bucket("51-70", 51, 70),
                bucket("71-85", 71, 85),
                bucket("86-100", 86, 100),
            ],
            high_flight_risk_threshold: 70.0,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn bucket(label: &str, lower: u32, upper: u32) -> BucketEdge {
    BucketEdge { label: label.into(), lower, upper }
}

fn builtin_salary_bands() -> BTreeMap<RoleId, SalaryBand> {
    [
        ("SWE-1", 70_000.0, 95_000.0),
        ("SWE-2", 95_000.0, 130_000.0),
        ("SWE-3", 130_000.0, 170_000.0),
        ("SWE-4", 170_000.0, 230_000.0),
        ("SRE-2", 105_000.0, 140_000.0),
        ("SRE-3", 135_000.0, 175_000.0),
        ("DS-2", 110_000.0, 150_000.0),
        ("DE-2", 105_000.0, 145_000.0),
        ("DA-1", 60_000.0, 85_000.0),
        ("SEC-2", 115_000.0, 155_000.0),
        ("PM-2", 110_000.0, 150_000.0),
        ("PM-3", 140_000.0, 180_000.0),
        ("TPM-2", 115_000.0, 155_000.0),
        ("UX-2", 90_000.0, 130_000.0),
        ("EM-3", 160_000.0, 210_000.0),
        ("DIR-4", 200_000.0, 270_000.0),
        ("HR-2", 75_000.0, 105_000.0),
    ]
    .into_iter()
    .map(|(role, min, max)| (role.to_string(), SalaryBand { min, max }))
    .collect()
}

fn builtin_locations() -> BTreeMap<String, LocationCost> {
    [
        ("San Francisco", 1.25, "USD", 1.0),
        ("New York", 1.20, "USD", 1.0),
        ("Austin", 1.00, "USD", 1.0),
        ("Remote", 0.95, "USD", 1.0),
        ("Toronto", 0.95, "CAD", 1.36),
        ("London", 1.10, "GBP", 0.79),
        ("Berlin", 0.95, "EUR", 0.92),
        ("Bangalore", 0.45, "INR", 83.0),
    ]
    .into_iter()
    .map(|(loc, factor, currency, rate)| {
        (
            loc.to_string(),
            LocationCost {
                cost_factor: factor,
                currency: currency.into(),
                units_per_reporting: rate,
            },
        )
    })
    .collect()
}

fn core(pattern: &str, minimum: u8, typical: u8) -> CoreSkillExpectation {
    CoreSkillExpectation { pattern: pattern.into(), minimum, typical }
}

fn builtin_role_families() -> Vec<RoleFamilyConfig> {
    vec![
        RoleFamilyConfig {
            family: RoleFamily::ProgramManagement,
            role_patterns: strings(&["program manager", "tpm", "program"]),
            core_skills: vec![
                core("Program Management", 3, 4),
                core("Stakeholder Management", 3, 4),
                core("Risk Management", 2, 3),
                core("Agile", 3, 4),
                core("Communication", 3, 4),
            ],
        },
        RoleFamilyConfig {
            family: RoleFamily::Design,
            role_patterns: strings(&["designer", "design", "ux"]),
            core_skills: vec![
                core("User Research", 3, 4),
                core("Prototyping", 3, 4),
                core("Figma", 3, 4),
                core("Interaction Design", 3, 4),
                core("Accessibility", 2, 3),
            ],
        },
        RoleFamilyConfig {
            family: RoleFamily::Product,
            role_patterns: strings(&["product", "pm-"]),
            core_skills: vec![
                core("Product Strategy", 3, 4),
                core("Roadmapping", 3, 4),
                core("Data Analysis", 2, 3),
                core("Stakeholder Management", 3, 4),
                core("User Research", 2, 3),
            ],
        },
        RoleFamilyConfig {
            family: RoleFamily::Sre,
            role_patterns: strings(&["site reliability", "sre", "devops", "platform"]),
            core_skills: vec![
                core("Kubernetes", 3, 4),
                core("Linux", 3, 4),
                core("Observability", 3, 4),
                core("Incident Response", 3, 4),
                core("Cloud Computing", 3, 4),
                core("Terraform", 2, 3),
            ],
        },
        RoleFamilyConfig {
            family: RoleFamily::Data,
            role_patterns: strings(&["data", "analyst", "machine learning"]),
            core_skills: vec![
                core("Python", 3, 4),
                core("SQL", 3, 4),
                core("Statistics", 2, 3),
                core("Machine Learning", 2, 3),
                core("Data Analysis", 3, 4),
            ],
        },
        RoleFamilyConfig {
            family: RoleFamily::Security,
            role_patterns: strings(&["security", "sec-"]),
            core_skills: vec![
                core("Threat Modeling", 3, 4),
                core("Network Security", 3, 4),
                core("Penetration Testing", 2, 3),
                core("Cloud Security", 2, 3),
                core("Python", 2, 3),
            ],
        },
        RoleFamilyConfig {
            family: RoleFamily::PeopleManagement,
            role_patterns: strings(&["engineering manager", "manager", "director", "head of", "em-", "dir-"]),
            core_skills: vec![
                core("Leadership", 3, 4),
                core("Coaching", 3, 4),
                core("Hiring", 2, 3),
                core("Performance Management", 3, 4),
                core("Communication", 3, 4),
            ],
        },
        RoleFamilyConfig {
            family: RoleFamily::EngineeringGeneralist,
            role_patterns: strings(&["software engineer", "engineer", "developer", "swe"]),
            core_skills: vec![
                core("Programming", 3, 4),
                core("Python", 2, 3),
                core("System Design", 2, 3),
                core("Testing", 2, 3),
                core("Git", 3, 4),
                core("Code Review", 2, 3),
            ],
        },
    ]
}

fn builtin_automation() -> AutomationConfig {
    let profile = |potential: f64, capability: AiCapability| AutomationProfile {
        automation_potential: potential,
        ai_capability: capability,
    };
    AutomationConfig {
        by_role: [
            ("DA-1", profile(70.0, AiCapability::Automate)),
            ("HR-2", profile(55.0, AiCapability::Augment)),
        ]
        .into_iter()
        .map(|(role, p)| (role.to_string(), p))
        .collect(),
        by_family: [
            (RoleFamily::ProgramManagement, profile(40.0, AiCapability::Augment)),
            (RoleFamily::Product, profile(30.0, AiCapability::Assist)),
            (RoleFamily::Design, profile(35.0, AiCapability::Assist)),
            (RoleFamily::EngineeringGeneralist, profile(45.0, AiCapability::Augment)),
            (RoleFamily::Sre, profile(60.0, AiCapability::Automate)),
            (RoleFamily::Data, profile(50.0, AiCapability::Augment)),
            (RoleFamily::Security, profile(40.0, AiCapability::Assist)),
            (RoleFamily::PeopleManagement, profile(20.0, AiCapability::HumanLed)),
        ]
        .into_iter()
        .collect(),
        default: profile(35.0, AiCapability::Augment),
    }
}
