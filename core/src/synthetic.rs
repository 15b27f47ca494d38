//! Deterministic synthetic workforce.
//!
//! Builds a plausible employee table from a single seed: names from curated
//! lists, roles with family-appropriate skill pools, locations from the
//! config, and a manager hierarchy (each employee reports to an earlier
//! manager in the same business unit when one exists).
//!
//! Same seed + same size + same config = identical records.

use crate::{
    config::AnalyticsConfig,
    model::{
        clamp_score, DemandTrend, Employee, EmployeeRecord, EmploymentType, LeadershipFlag,
        PerformanceMetrics, PerformanceRating, ReadinessAssessment, Skill, ValidationSource,
    },
    rng::{DerivationRng, DerivationSlot},
    types::EmployeeId,
};
use chrono::Months;

struct RoleTemplate {
    role_id:       &'static str,
    role_name:     &'static str,
    /// `None` for managers, who are spread across every unit.
    business_unit: Option<&'static str>,
    leadership:    LeadershipFlag,
    skill_pool:    &'static [&'static str],
}

const BUSINESS_UNITS: [&str; 6] = [
    "Engineering",
    "Platform",
    "Data & Analytics",
    "Security",
    "Product",
    "People",
];

const ENGINEERING_SKILLS: &[&str] = &[
    "Programming", "Python", "Git", "Testing", "Code Review", "SQL", "Communication",
    "System Design", "Cloud Computing",
];
const SENIOR_ENGINEERING_SKILLS: &[&str] = &[
    "Programming", "Python", "System Design", "Technical Leadership", "Mentoring",
    "Architecture", "Code Review", "Cloud Computing", "Communication",
];
const SRE_SKILLS: &[&str] = &[
    "Kubernetes", "Linux", "Observability", "Incident Response", "Cloud Computing",
    "Terraform", "Python", "Problem Solving",
];
const DATA_SKILLS: &[&str] = &[
    "Python", "SQL", "Statistics", "Machine Learning", "Data Analysis", "Communication",
    "Spark", "Data Visualization",
];
const SECURITY_SKILLS: &[&str] = &[
    "Threat Modeling", "Network Security", "Penetration Testing", "Cloud Security", "Python",
    "Incident Response",
];
const PRODUCT_SKILLS: &[&str] = &[
    "Product Strategy", "Roadmapping", "Data Analysis", "Stakeholder Management",
    "User Research", "Agile", "Communication",
];
const PROGRAM_SKILLS: &[&str] = &[
    "Program Management", "Stakeholder Management", "Risk Management", "Agile",
    "Communication", "Project Management",
];
const DESIGN_SKILLS: &[&str] = &[
    "User Research", "Prototyping", "Figma", "Interaction Design", "Accessibility",
    "Communication",
];
const MANAGER_SKILLS: &[&str] = &[
    "Leadership", "Coaching", "Hiring", "Performance Management", "Communication",
    "System Design", "Stakeholder Management",
];
const PEOPLE_SKILLS: &[&str] = &[
    "Communication", "Stakeholder Management", "Coaching", "Data Analysis", "Employment Law",
];

const IC_ROLES: &[RoleTemplate] = &[
    ic("SWE-1", "Junior Software Engineer", "Engineering", ENGINEERING_SKILLS),
    ic("SWE-2", "Software Engineer", "Engineering", ENGINEERING_SKILLS),
    ic("SWE-3", "Senior Software Engineer", "Engineering", SENIOR_ENGINEERING_SKILLS),
    ic("SWE-4", "Principal Software Engineer", "Engineering", SENIOR_ENGINEERING_SKILLS),
    ic("SRE-2", "Site Reliability Engineer", "Platform", SRE_SKILLS),
    ic("SRE-3", "Senior Site Reliability Engineer", "Platform", SRE_SKILLS),
    ic("DS-2", "Data Scientist", "Data & Analytics", DATA_SKILLS),
    ic("DE-2", "Data Engineer", "Data & Analytics", DATA_SKILLS),
    ic("DA-1", "Junior Data Analyst", "Data & Analytics", DATA_SKILLS),
    ic("SEC-2", "Security Engineer", "Security", SECURITY_SKILLS),
    ic("PM-2", "Product Manager", "Product", PRODUCT_SKILLS),
    ic("PM-3", "Senior Product Manager", "Product", PRODUCT_SKILLS),
    ic("TPM-2", "Technical Program Manager", "Product", PROGRAM_SKILLS),
    ic("UX-2", "Product Designer", "Product", DESIGN_SKILLS),
    ic("HR-2", "HR Business Partner", "People", PEOPLE_SKILLS),
];

const MANAGER_ROLES: &[RoleTemplate] = &[
    RoleTemplate {
        role_id: "EM-3",
        role_name: "Engineering Manager",
        business_unit: None,
        leadership: LeadershipFlag::PeopleManager,
        skill_pool: MANAGER_SKILLS,
    },
    RoleTemplate {
        role_id: "DIR-4",
        role_name: "Director of Engineering",
        business_unit: None,
        leadership: LeadershipFlag::PeopleManager,
        skill_pool: MANAGER_SKILLS,
    },
];

const fn ic(
    role_id: &'static str,
    role_name: &'static str,
    unit: &'static str,
    skill_pool: &'static [&'static str],
) -> RoleTemplate {
    RoleTemplate {
        role_id,
        role_name,
        business_unit: Some(unit),
        leadership: LeadershipFlag::IndividualContributor,
        skill_pool,
    }
}

const FIRST_NAMES: &[&str] = &[
    "James", "Maria", "Wei", "Aisha", "Daniel", "Priya", "Lucas", "Sofia", "Kenji", "Amara",
    "Noah", "Elena", "Omar", "Hannah", "Mateo", "Chloe", "Ravi", "Fatima", "Ethan", "Yuki",
    "Samuel", "Grace", "Diego", "Leila", "Oliver", "Mei", "Kwame", "Ingrid", "Arjun", "Zara",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Garcia", "Chen", "Okafor", "Johnson", "Patel", "Silva", "Rossi", "Tanaka",
    "Mensah", "Brown", "Novak", "Haddad", "Schmidt", "Lopez", "Martin", "Sharma", "Khan",
    "Wilson", "Sato", "Clarke", "Kim", "Fernandez", "Ahmadi", "Murphy", "Wang", "Boateng",
    "Larsen", "Iyer", "Nguyen",
];

fn skill_slug(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

pub struct SyntheticWorkforce;

impl SyntheticWorkforce {
    pub fn full_name(rng: &mut DerivationRng) -> String {
        let first = rng.pick(FIRST_NAMES).copied().unwrap_or("Alex");
        let last = rng.pick(LAST_NAMES).copied().unwrap_or("Doe");
        format!("{first} {last}")
    }

    pub fn generate(seed: u64, size: usize, config: &AnalyticsConfig) -> Vec<EmployeeRecord> {
        let mut rng = DerivationRng::new(seed, DerivationSlot::Population);
        let locations: Vec<&String> = config.locations.keys().collect();
        let mut managers: Vec<(EmployeeId, &'static str, &'static str)> = Vec::new();
        let mut records = Vec::with_capacity(size);

        for i in 0..size {
            let employee_id = format!("E{:05}", i + 1);
            let is_manager_slot = i % 7 == 0;

            let (template, business_unit) = if is_manager_slot {
                let template = if rng.chance(0.75) { &MANAGER_ROLES[0] } else { &MANAGER_ROLES[1] };
                let unit = rng.pick(&BUSINESS_UNITS).copied().unwrap_or("Engineering");
                (template, unit)
            } else {
                let template = rng.pick(IC_ROLES).unwrap_or(&IC_ROLES[0]);
                (template, template.business_unit.unwrap_or("Engineering"))
            };

            let manager_id = if template.leadership.is_manager() {
                managers
                    .iter()
                    .filter(|(_, role, _)| *role == "DIR-4")
                    .map(|(id, _, _)| id.clone())
                    .next()
            } else {
                let same_unit: Vec<&EmployeeId> = managers
                    .iter()
                    .filter(|(_, _, unit)| *unit == business_unit)
                    .map(|(id, _, _)| id)
                    .collect();
                if same_unit.is_empty() {
                    let any: Vec<&EmployeeId> = managers.iter().map(|(id, _, _)| id).collect();
                    rng.pick(&any).map(|id| (*id).clone())
                } else {
                    rng.pick(&same_unit).map(|id| (*id).clone())
                }
            };

            let tenure_months = rng.range_u32_inclusive(1, 120);
            let hire_date = config
                .reference_date
                .checked_sub_months(Months::new(tenure_months));

            let employment_roll = rng.next_f64();
            let employment_type = if employment_roll < 0.85 {
                EmploymentType::FullTime
            } else if employment_roll < 0.92 {
                EmploymentType::Contractor
            } else if employment_roll < 0.97 {
                EmploymentType::PartTime
            } else {
                EmploymentType::Intern
            };

            let rating_roll = rng.next_f64();
            let rating = if rating_roll < 0.10 {
                PerformanceRating::Outstanding
            } else if rating_roll < 0.40 {
                PerformanceRating::Exceeds
            } else if rating_roll < 0.90 {
                PerformanceRating::Meets
            } else {
                PerformanceRating::NeedsImprovement
            };
            let engagement = rng.range_f64(35.0, 95.0).round();
            let flight_risk = clamp_score(100.0 - engagement * 0.7 + rng.range_f64(-10.0, 20.0)).round();

            let readiness_score = rng.range_f64(30.0, 95.0).round();
            let target_role = if rng.chance(0.3) {
                rng.pick(IC_ROLES).map(|t| t.role_name.to_string())
            } else {
                None
            };

            let skill_count = rng.range_u32_inclusive(3, 6) as usize;
            let mut pool: Vec<&str> = template.skill_pool.to_vec();
            let mut skills = Vec::with_capacity(skill_count);
            while skills.len() < skill_count && !pool.is_empty() {
                let idx = rng.next_u64_below(pool.len() as u64) as usize;
                let name = pool.remove(idx);
                let source = rng
                    .pick(&ValidationSource::ALL)
                    .copied()
                    .unwrap_or_default();
                let validated_months_ago = rng.range_u32_inclusive(0, 24);
                let trend = match rng.next_u64_below(3) {
                    0 => DemandTrend::Rising,
                    1 => DemandTrend::Stable,
                    _ => DemandTrend::Declining,
                };
                skills.push(Skill {
                    skill_id: skill_slug(name),
                    name: name.to_string(),
                    proficiency: rng.range_u32_inclusive(1, 5) as u8,
                    source,
                    last_validated: config
                        .reference_date
                        .checked_sub_months(Months::new(validated_months_ago)),
                    demand_trend: trend,
                });
            }

            let location = rng
                .pick(&locations)
                .map(|l| l.to_string())
                .unwrap_or_else(|| "Remote".to_string());

            if template.leadership.is_manager() {
                managers.push((employee_id.clone(), template.role_id, business_unit));
            }

            records.push(EmployeeRecord {
                employee: Employee {
                    employee_id,
                    name: Self::full_name(&mut rng),
                    role_id: template.role_id.to_string(),
                    role_name: template.role_name.to_string(),
                    business_unit: business_unit.to_string(),
                    location,
                    employment_type,
                    hire_date,
                    tenure_months,
                    manager_id,
                    leadership: template.leadership,
                },
                performance: PerformanceMetrics {
                    rating,
                    engagement_score: engagement,
                    flight_risk_score: flight_risk,
                },
                readiness: ReadinessAssessment::new(readiness_score, target_role),
                skills,
            });
        }

        log::info!("Generated {} synthetic employees (seed {seed})", records.len());
        records
    }
}
