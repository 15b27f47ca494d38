//! Profile assembly: raw record → immutable EmployeeProfile.
//!
//! Pipeline per record (see derivation.rs for the fixed order):
//!   sanitize scores → normalize skills → derive four metric blocks
//!   → automation lookup → profile
//!
//! Records without an employee id or name are skipped. Later duplicates of
//! an id already assembled are skipped. Nothing else can fail.

use crate::{
    automation::{automation_for, AutomationProfile},
    config::AnalyticsConfig,
    cost::{CostDerivation, EmployeeCost},
    derivation::{run_derivation, DerivationInput},
    leadership::{LeadershipDerivation, LeadershipMetrics},
    learning::{LearningDerivation, LearningMetrics},
    model::{Employee, EmployeeRecord, PerformanceMetrics, ReadinessAssessment, Skill},
    normalizer::normalize_skills,
    redeployment::{RedeploymentDerivation, RedeploymentReadiness},
    role::{RoleFamily, Seniority},
    types::EmployeeId,
};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeProfile {
    pub employee:     Employee,
    pub performance:  PerformanceMetrics,
    pub readiness:    ReadinessAssessment,
    /// Normalized: ids unique, proficiency 1–5.
    pub skills:       Vec<Skill>,
    pub role_family:  RoleFamily,
    pub seniority:    Seniority,
    pub learning:     LearningMetrics,
    pub redeployment: RedeploymentReadiness,
    pub leadership:   LeadershipMetrics,
    pub cost:         EmployeeCost,
    pub automation:   AutomationProfile,
}

impl EmployeeProfile {
    pub fn id(&self) -> &str {
        &self.employee.employee_id
    }

    pub fn name(&self) -> &str {
        &self.employee.name
    }

    pub fn skill(&self, skill_id: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.skill_id == skill_id)
    }

    pub fn has_skill(&self, skill_id: &str) -> bool {
        self.skill(skill_id).is_some()
    }
}

/// Build one profile. `None` when the record lacks an id or a name.
pub fn build_profile(record: EmployeeRecord, config: &AnalyticsConfig) -> Option<EmployeeProfile> {
    let EmployeeRecord { employee, performance, readiness, skills } = record;
    if employee.employee_id.trim().is_empty() || employee.name.trim().is_empty() {
        return None;
    }

    let performance = performance.sanitized();
    let readiness = ReadinessAssessment::new(readiness.readiness_score, readiness.target_role);
    let normalized = normalize_skills(&employee, performance.rating, skills, config);

    let input = DerivationInput {
        employee: &employee,
        performance: &performance,
        skills: &normalized,
        config,
    };
    let learning = run_derivation(&LearningDerivation, &input);
    let redeployment = run_derivation(&RedeploymentDerivation, &input);
    let leadership = run_derivation(&LeadershipDerivation, &input);
    let cost = run_derivation(&CostDerivation, &input);

    let role_family = RoleFamily::classify(&employee.role_id, &employee.role_name, config);
    let seniority = Seniority::from_role(&employee.role_id, &employee.role_name);
    let automation = automation_for(&employee.role_id, role_family, config);

    Some(EmployeeProfile {
        employee,
        performance,
        readiness,
        skills: normalized.into_vec(),
        role_family,
        seniority,
        learning,
        redeployment,
        leadership,
        cost,
        automation,
    })
}

// ── Profile set ──────────────────────────────────────────────────────────────

/// The assembled, read-only profile collection, keyed by employee id.
#[derive(Debug, Clone, Default)]
pub struct ProfileSet {
    profiles: Vec<EmployeeProfile>,
    index:    HashMap<EmployeeId, usize>,
}

impl ProfileSet {
    /// Assemble profiles from raw records, in input order.
    pub fn assemble<I>(records: I, config: &AnalyticsConfig) -> Self
    where
        I: IntoIterator<Item = EmployeeRecord>,
    {
        let mut set = ProfileSet::default();
        let mut skipped = 0usize;
        for record in records {
            let id = record.employee.employee_id.clone();
            if set.index.contains_key(&id) {
                log::warn!("Duplicate employee id {id}; keeping first record");
                skipped += 1;
                continue;
            }
            match build_profile(record, config) {
                Some(profile) => {
                    set.index.insert(profile.employee.employee_id.clone(), set.profiles.len());
                    set.profiles.push(profile);
                }
                None => {
                    log::warn!("Skipping record without employee id or name (id='{id}')");
                    skipped += 1;
                }
            }
        }
        log::info!("Assembled {} profiles ({skipped} skipped)", set.profiles.len());
        set
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EmployeeProfile> {
        self.profiles.iter()
    }

    pub fn as_slice(&self) -> &[EmployeeProfile] {
        &self.profiles
    }

    /// Every profile, as a scope usable by the aggregation functions.
    pub fn all(&self) -> Vec<&EmployeeProfile> {
        self.profiles.iter().collect()
    }

    pub fn get(&self, employee_id: &str) -> Option<&EmployeeProfile> {
        self.index.get(employee_id).and_then(|&i| self.profiles.get(i))
    }
}

impl<'a> IntoIterator for &'a ProfileSet {
    type Item = &'a EmployeeProfile;
    type IntoIter = std::slice::Iter<'a, EmployeeProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.profiles.iter()
    }
}
