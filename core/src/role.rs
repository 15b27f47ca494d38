//! Role classification: coarse family and seniority tier.
//!
//! Families are matched against the role id and role name (lower-cased)
//! using the ordered pattern list in `AnalyticsConfig::role_families`.
//! The first family with a matching pattern wins, so more specific families
//! (program management, design, SRE) must be listed before the generic
//! ones (people management, engineering generalist).

use crate::config::AnalyticsConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleFamily {
    ProgramManagement,
    Product,
    Design,
    EngineeringGeneralist,
    Sre,
    Data,
    Security,
    PeopleManagement,
    Unclassified,
}

impl RoleFamily {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProgramManagement => "program_management",
            Self::Product => "product",
            Self::Design => "design",
            Self::EngineeringGeneralist => "engineering_generalist",
            Self::Sre => "sre",
            Self::Data => "data",
            Self::Security => "security",
            Self::PeopleManagement => "people_management",
            Self::Unclassified => "unclassified",
        }
    }

    /// Classify a role by its id and display name.
    pub fn classify(role_id: &str, role_name: &str, config: &AnalyticsConfig) -> Self {
        let id = role_id.to_lowercase();
        let name = role_name.to_lowercase();
        config
            .role_families
            .iter()
            .find(|family| {
                family
                    .role_patterns
                    .iter()
                    .map(|p| p.to_lowercase())
                    .any(|p| !p.is_empty() && (name.contains(&p) || id.contains(&p)))
            })
            .map(|family| family.family)
            .unwrap_or(Self::Unclassified)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
    Principal,
}

impl Seniority {
    /// Title keywords first, then a trailing level digit on the role id
    /// ("SWE-1" → junior … "SWE-4" → principal). Defaults to mid.
    pub fn from_role(role_id: &str, role_name: &str) -> Self {
        let name = format!(" {} ", role_name.to_lowercase());
        const PRINCIPAL: [&str; 5] = ["principal", "staff", "distinguished", "director", "head of"];
        const SENIOR: [&str; 4] = ["senior", " sr ", "sr.", " lead "];
        const JUNIOR: [&str; 6] = ["junior", " jr ", "jr.", "associate", "intern", "graduate"];

        if PRINCIPAL.iter().any(|k| name.contains(k)) {
            return Self::Principal;
        }
        if SENIOR.iter().any(|k| name.contains(k)) {
            return Self::Senior;
        }
        if JUNIOR.iter().any(|k| name.contains(k)) {
            return Self::Junior;
        }
        match role_id.trim().chars().last().and_then(|c| c.to_digit(10)) {
            Some(0) | Some(1) => Self::Junior,
            Some(3) => Self::Senior,
            Some(d) if d >= 4 => Self::Principal,
            _ => Self::Mid,
        }
    }

    /// Offsets applied to a core skill's (minimum, typical) pair.
    pub fn offsets(&self) -> (i32, i32) {
        match self {
            Self::Junior => (-1, -1),
            Self::Mid => (0, 0),
            Self::Senior => (0, 1),
            Self::Principal => (1, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specific_families_win_over_generic_ones() {
        let config = AnalyticsConfig::builtin();
        assert_eq!(
            RoleFamily::classify("TPM-2", "Technical Program Manager", &config),
            RoleFamily::ProgramManagement
        );
        assert_eq!(
            RoleFamily::classify("UX-2", "Product Designer", &config),
            RoleFamily::Design
        );
        assert_eq!(
            RoleFamily::classify("DE-2", "Data Engineer", &config),
            RoleFamily::Data
        );
        assert_eq!(
            RoleFamily::classify("SRE-3", "Senior Site Reliability Engineer", &config),
            RoleFamily::Sre
        );
        assert_eq!(
            RoleFamily::classify("EM-3", "Engineering Manager", &config),
            RoleFamily::PeopleManagement
        );
        assert_eq!(
            RoleFamily::classify("SWE-2", "Software Engineer", &config),
            RoleFamily::EngineeringGeneralist
        );
        assert_eq!(
            RoleFamily::classify("HR-2", "HR Business Partner", &config),
            RoleFamily::Unclassified
        );
    }

    #[test]
    fn seniority_from_title_then_level_digit() {
        assert_eq!(Seniority::from_role("X", "Senior Data Scientist"), Seniority::Senior);
        assert_eq!(Seniority::from_role("X", "Staff Engineer"), Seniority::Principal);
        assert_eq!(Seniority::from_role("X", "Junior Analyst"), Seniority::Junior);
        assert_eq!(Seniority::from_role("SWE-1", "Software Engineer"), Seniority::Junior);
        assert_eq!(Seniority::from_role("SWE-4", "Software Engineer"), Seniority::Principal);
        assert_eq!(Seniority::from_role("SWE", "Software Engineer"), Seniority::Mid);
    }
}
