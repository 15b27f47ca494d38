//! Proficiency normalization against role-family core-skill expectations.

use workforce_core::{
    config::AnalyticsConfig,
    engine::WorkforceEngine,
    model::{DemandTrend, Employee, EmploymentType, LeadershipFlag, PerformanceRating, Skill, ValidationSource},
    normalizer::{
        adjusted_expectation, core_expectation_for, normalize_skills, normalize_skills_with_report,
        AdjustmentReason,
    },
    role::{RoleFamily, Seniority},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn employee(id: &str, role_id: &str, role_name: &str) -> Employee {
    Employee {
        employee_id: id.into(),
        name: format!("Test {id}"),
        role_id: role_id.into(),
        role_name: role_name.into(),
        business_unit: "Engineering".into(),
        location: "Austin".into(),
        employment_type: EmploymentType::FullTime,
        hire_date: None,
        tenure_months: 24,
        manager_id: None,
        leadership: LeadershipFlag::IndividualContributor,
    }
}

fn skill(name: &str, proficiency: u8, source: ValidationSource) -> Skill {
    Skill {
        skill_id: name.to_lowercase().replace(' ', "-"),
        name: name.into(),
        proficiency,
        source,
        last_validated: None,
        demand_trend: DemandTrend::Stable,
    }
}

fn proficiency_of(skills: &[Skill], name: &str) -> u8 {
    skills
        .iter()
        .find(|s| s.name == name)
        .map(|s| s.proficiency)
        .expect("skill present")
}

// ── Floor ────────────────────────────────────────────────────────────────────

#[test]
fn core_skills_never_fall_below_adjusted_minimum() {
    let config = AnalyticsConfig::builtin();
    let engine = WorkforceEngine::synthetic(99, 300, config.clone());

    let mut checked = 0;
    for profile in engine.profiles() {
        let Some(family) = config.family_config(profile.role_family) else {
            continue;
        };
        for skill in &profile.skills {
            let Some(expectation) = core_expectation_for(&skill.name, &family.core_skills) else {
                continue;
            };
            let adjusted = adjusted_expectation(expectation, profile.seniority, profile.performance.rating);
            assert!(
                skill.proficiency >= adjusted.minimum,
                "{} {} = {} below floor {}",
                profile.id(),
                skill.name,
                skill.proficiency,
                adjusted.minimum
            );
            checked += 1;
        }
    }
    assert!(checked > 0, "Synthetic workforce should contain core skills");
}

#[test]
fn raised_skill_lands_between_minimum_and_typical() {
    let config = AnalyticsConfig::builtin();
    let emp = employee("E1", "SWE-2", "Software Engineer");
    let (skills, report) = normalize_skills_with_report(
        &emp,
        PerformanceRating::Meets,
        vec![skill("Programming", 1, ValidationSource::Inferred)],
        &config,
    );

    // SWE-2 is Mid, Meets is ×1.0: Programming expects 3..=4.
    let value = proficiency_of(skills.as_slice(), "Programming");
    assert!((3..=4).contains(&value), "raised to {value}");
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].reason, AdjustmentReason::RaisedToFloor);
    assert_eq!(report[0].from, 1);
}

#[test]
fn raise_is_seeded_by_skill_name_not_employee() {
    let config = AnalyticsConfig::builtin();
    let raw = || vec![skill("Programming", 1, ValidationSource::Inferred)];

    let a = normalize_skills(&employee("E1", "SWE-2", "Software Engineer"), PerformanceRating::Meets, raw(), &config);
    let b = normalize_skills(&employee("E2", "SWE-2", "Software Engineer"), PerformanceRating::Meets, raw(), &config);

    assert_eq!(a, b);
}

// ── Caps ─────────────────────────────────────────────────────────────────────

#[test]
fn verified_high_proficiency_is_preserved() {
    let config = AnalyticsConfig::builtin();
    let emp = employee("E1", "SWE-2", "Software Engineer");
    let skills = normalize_skills(
        &emp,
        PerformanceRating::Meets,
        vec![
            skill("Python", 5, ValidationSource::Assessment),
            skill("Testing", 5, ValidationSource::ProjectEvidence),
        ],
        &config,
    );
    assert_eq!(proficiency_of(skills.as_slice(), "Python"), 5);
    assert_eq!(proficiency_of(skills.as_slice(), "Testing"), 5);
}

#[test]
fn unverified_high_proficiency_is_capped_one_above_typical() {
    let config = AnalyticsConfig::builtin();
    let emp = employee("E1", "SWE-2", "Software Engineer");
    let (skills, report) = normalize_skills_with_report(
        &emp,
        PerformanceRating::Meets,
        vec![skill("Python", 5, ValidationSource::Resume)],
        &config,
    );

    // Python typical for a Mid engineer is 3.
    assert_eq!(proficiency_of(skills.as_slice(), "Python"), 4);
    assert_eq!(report[0].reason, AdjustmentReason::CappedUnverified);
}

#[test]
fn out_of_range_values_are_clamped() {
    let config = AnalyticsConfig::builtin();
    let emp = employee("E1", "LEGAL-1", "Counsel");
    let skills = normalize_skills(
        &emp,
        PerformanceRating::Meets,
        vec![
            skill("Contract Law", 0, ValidationSource::Inferred),
            skill("Negotiation", 9, ValidationSource::Inferred),
        ],
        &config,
    );
    assert_eq!(proficiency_of(skills.as_slice(), "Contract Law"), 1);
    assert_eq!(proficiency_of(skills.as_slice(), "Negotiation"), 5);
}

// ── Unclassified roles and duplicates ────────────────────────────────────────

#[test]
fn unclassified_role_skills_pass_through() {
    let config = AnalyticsConfig::builtin();
    let emp = employee("E1", "LEGAL-1", "Counsel");
    assert_eq!(RoleFamily::classify(&emp.role_id, &emp.role_name, &config), RoleFamily::Unclassified);

    let raw = vec![
        skill("Python", 1, ValidationSource::Inferred),
        skill("SQL", 5, ValidationSource::Resume),
    ];
    let (skills, report) = normalize_skills_with_report(&emp, PerformanceRating::Outstanding, raw.clone(), &config);
    assert_eq!(skills.as_slice(), raw.as_slice());
    assert!(report.is_empty());
}

#[test]
fn duplicate_skill_ids_keep_first() {
    let config = AnalyticsConfig::builtin();
    let emp = employee("E1", "LEGAL-1", "Counsel");
    let skills = normalize_skills(
        &emp,
        PerformanceRating::Meets,
        vec![
            skill("Negotiation", 2, ValidationSource::Inferred),
            skill("Negotiation", 4, ValidationSource::Inferred),
        ],
        &config,
    );
    assert_eq!(skills.len(), 1);
    assert_eq!(proficiency_of(skills.as_slice(), "Negotiation"), 2);
}

// ── Expectation scaling ──────────────────────────────────────────────────────

#[test]
fn seniority_and_rating_shift_expectations() {
    let config = AnalyticsConfig::builtin();
    let family = config
        .family_config(RoleFamily::EngineeringGeneralist)
        .expect("engineering family configured");
    let programming = core_expectation_for("Programming", &family.core_skills).expect("programming");

    let junior = adjusted_expectation(programming, Seniority::Junior, PerformanceRating::Meets);
    let principal = adjusted_expectation(programming, Seniority::Principal, PerformanceRating::Outstanding);

    assert_eq!((junior.minimum, junior.typical), (2, 3));
    assert_eq!((principal.minimum, principal.typical), (4, 5));
    assert!(principal.minimum <= principal.typical);
}
