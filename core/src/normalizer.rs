//! Skill proficiency normalizer.
//!
//! Adjusts an employee's raw skill list against role-family expectations:
//!   1. Classifies the role into a family (see `role.rs`)
//!   2. Looks up the family's core-skill expectations
//!   3. Scales each (minimum, typical) pair by seniority and rating
//!   4. Raises core skills below the adjusted minimum to a seeded value
//!      between minimum and typical (seed = skill name)
//!   5. Caps unverified core skills above typical + 1
//!
//! Verified (assessment / project evidence) proficiencies are never capped.
//! A family without expectations leaves every value untouched apart from
//! clamping into 1–5.
//!
//! Skill matching: case-insensitive exact match first, otherwise the
//! longest pattern contained in the skill name. A skill name that is merely
//! a substring of a pattern does not match.

use crate::{
    config::{AnalyticsConfig, CoreSkillExpectation},
    model::{Employee, PerformanceRating, Skill},
    rng::{DerivationRng, DerivationSlot},
    role::{RoleFamily, Seniority},
    types::SkillId,
};
use serde::Serialize;
use std::collections::HashSet;

pub const MIN_PROFICIENCY: u8 = 1;
pub const MAX_PROFICIENCY: u8 = 5;

// ── Public types ─────────────────────────────────────────────────────────────

/// A skill list that has been through the normalizer.
///
/// Only `normalize_skills` can build one, so every consumer of proficiency
/// is forced to run after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSkills {
    skills: Vec<Skill>,
}

impl NormalizedSkills {
    pub fn as_slice(&self) -> &[Skill] {
        &self.skills
    }

    pub fn into_vec(self) -> Vec<Skill> {
        self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Mean proficiency, 0.0 for an empty list.
    pub fn average_proficiency(&self) -> f64 {
        if self.skills.is_empty() {
            return 0.0;
        }
        let total: u32 = self.skills.iter().map(|s| s.proficiency as u32).sum();
        total as f64 / self.skills.len() as f64
    }
}

/// The (minimum, typical) pair after seniority and rating scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustedExpectation {
    pub minimum: u8,
    pub typical: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentReason {
    ClampedToRange,
    RaisedToFloor,
    CappedUnverified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillAdjustment {
    pub skill_id: SkillId,
    pub from:     u8,
    pub to:       u8,
    pub reason:   AdjustmentReason,
}

// ── Matching and scaling ─────────────────────────────────────────────────────

/// Find the core-skill expectation for a skill name, if any.
pub fn core_expectation_for<'a>(
    skill_name: &str,
    expectations: &'a [CoreSkillExpectation],
) -> Option<&'a CoreSkillExpectation> {
    let name = skill_name.trim().to_lowercase();
    if name.is_empty() {
        return None;
    }
    if let Some(exact) = expectations
        .iter()
        .find(|e| e.pattern.trim().to_lowercase() == name)
    {
        return Some(exact);
    }
    // max_by_key keeps the last maximum; iterate in reverse so the earliest
    // declared pattern wins a length tie.
    expectations
        .iter()
        .rev()
        .filter(|e| {
            let p = e.pattern.trim().to_lowercase();
            !p.is_empty() && name.contains(&p)
        })
        .max_by_key(|e| e.pattern.trim().len())
}

pub fn adjusted_expectation(
    expectation: &CoreSkillExpectation,
    seniority: Seniority,
    rating: PerformanceRating,
) -> AdjustedExpectation {
    let (min_off, typ_off) = seniority.offsets();
    let mult = rating.normalization_multiplier();
    let scale = |base: u8, offset: i32| -> i64 {
        (((base as i32 + offset) as f64) * mult).round() as i64
    };
    let minimum = scale(expectation.minimum, min_off)
        .clamp(MIN_PROFICIENCY as i64, MAX_PROFICIENCY as i64) as u8;
    let typical = scale(expectation.typical, typ_off)
        .clamp(minimum as i64, MAX_PROFICIENCY as i64) as u8;
    AdjustedExpectation { minimum, typical }
}

// ── Normalization ────────────────────────────────────────────────────────────

pub fn normalize_skills(
    employee: &Employee,
    rating: PerformanceRating,
    raw: Vec<Skill>,
    config: &AnalyticsConfig,
) -> NormalizedSkills {
    normalize_skills_with_report(employee, rating, raw, config).0
}

/// Same as `normalize_skills`, also returning every change made.
pub fn normalize_skills_with_report(
    employee: &Employee,
    rating: PerformanceRating,
    raw: Vec<Skill>,
    config: &AnalyticsConfig,
) -> (NormalizedSkills, Vec<SkillAdjustment>) {
    let mut adjustments = Vec::new();
    let mut seen: HashSet<SkillId> = HashSet::new();
    let mut skills = Vec::with_capacity(raw.len());

    for mut skill in raw {
        if !seen.insert(skill.skill_id.clone()) {
            log::warn!(
                "Employee {}: duplicate skill id {} dropped",
                employee.employee_id,
                skill.skill_id
            );
            continue;
        }
        let clamped = skill.proficiency.clamp(MIN_PROFICIENCY, MAX_PROFICIENCY);
        if clamped != skill.proficiency {
            adjustments.push(SkillAdjustment {
                skill_id: skill.skill_id.clone(),
                from: skill.proficiency,
                to: clamped,
                reason: AdjustmentReason::ClampedToRange,
            });
            skill.proficiency = clamped;
        }
        skills.push(skill);
    }

    let family = RoleFamily::classify(&employee.role_id, &employee.role_name, config);
    let expectations = match config.family_config(family) {
        Some(cfg) if !cfg.core_skills.is_empty() => &cfg.core_skills,
        _ => return (NormalizedSkills { skills }, adjustments),
    };
    let seniority = Seniority::from_role(&employee.role_id, &employee.role_name);

    for skill in &mut skills {
        let Some(expectation) = core_expectation_for(&skill.name, expectations) else {
            continue;
        };
        let adjusted = adjusted_expectation(expectation, seniority, rating);

        if skill.proficiency < adjusted.minimum {
            let mut rng = DerivationRng::for_key(&skill.name, DerivationSlot::SkillNormalization);
            let raised = rng.range_u32_inclusive(adjusted.minimum as u32, adjusted.typical as u32) as u8;
            adjustments.push(SkillAdjustment {
                skill_id: skill.skill_id.clone(),
                from: skill.proficiency,
                to: raised,
                reason: AdjustmentReason::RaisedToFloor,
            });
            skill.proficiency = raised;
        } else if skill.proficiency > adjusted.typical.saturating_add(1) && !skill.source.is_verified() {
            let capped = (adjusted.typical + 1).min(MAX_PROFICIENCY);
            adjustments.push(SkillAdjustment {
                skill_id: skill.skill_id.clone(),
                from: skill.proficiency,
                to: capped,
                reason: AdjustmentReason::CappedUnverified,
            });
            skill.proficiency = capped;
        }
    }

    (NormalizedSkills { skills }, adjustments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exp(pattern: &str, minimum: u8, typical: u8) -> CoreSkillExpectation {
        CoreSkillExpectation { pattern: pattern.into(), minimum, typical }
    }

    #[test]
    fn exact_match_beats_substring() {
        let table = vec![exp("SQL", 3, 4), exp("NoSQL Databases", 1, 2), exp("Python", 2, 3)];
        let hit = core_expectation_for("nosql databases", &table).map(|e| e.pattern.as_str());
        assert_eq!(hit, Some("NoSQL Databases"));
    }

    #[test]
    fn longest_contained_pattern_wins() {
        let table = vec![exp("Design", 2, 3), exp("System Design", 3, 4)];
        let hit = core_expectation_for("Distributed System Design", &table);
        assert_eq!(hit.map(|e| e.pattern.as_str()), Some("System Design"));
    }

    #[test]
    fn skill_name_inside_pattern_does_not_match() {
        let table = vec![exp("Machine Learning", 2, 3)];
        assert!(core_expectation_for("Learning", &table).is_none());
        assert!(core_expectation_for("", &table).is_none());
    }

    #[test]
    fn seniority_and_rating_scale_expectations() {
        let e = exp("Python", 3, 4);
        let mid = adjusted_expectation(&e, Seniority::Mid, PerformanceRating::Meets);
        assert_eq!(mid, AdjustedExpectation { minimum: 3, typical: 4 });

        let junior = adjusted_expectation(&e, Seniority::Junior, PerformanceRating::NeedsImprovement);
        assert_eq!(junior, AdjustedExpectation { minimum: 2, typical: 3 });

        let principal = adjusted_expectation(&e, Seniority::Principal, PerformanceRating::Outstanding);
        assert_eq!(principal, AdjustedExpectation { minimum: 4, typical: 5 });

        let floor = adjusted_expectation(&exp("Git", 1, 1), Seniority::Junior, PerformanceRating::Meets);
        assert_eq!(floor, AdjustedExpectation { minimum: 1, typical: 1 });
    }
}
