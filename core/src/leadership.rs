//! Leadership metrics: potential, succession readiness and mentorship.
//!
//! Two regimes for potential:
//!   - people managers: 70 + 20% engagement + 0–10 seeded (never below 70)
//!   - individual contributors: rating-tier base + 25% engagement + 0–10 seeded
//!
//! Succession readiness = 60% potential + technical-leadership skill bonus
//! + tenure tier + performance tier, clamped 0–100.

use crate::{
    derivation::{DerivationInput, MetricDerivation},
    model::{clamp_score, LeadershipFlag, PerformanceRating},
    rng::{DerivationRng, DerivationSlot},
    types::EmployeeId,
};
use serde::{Deserialize, Serialize};

pub const MANAGER_POTENTIAL_FLOOR: f64 = 70.0;
const TECHNICAL_LEADERSHIP_BONUS: f64 = 10.0;
const LONG_TENURE_MENTOR_MONTHS: u32 = 48;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadershipMetrics {
    pub employee_id:                 EmployeeId,
    pub leadership_potential:        f64,
    pub succession_readiness:        f64,
    pub mentorship_activity:         f64,
    /// Managers only.
    pub team_size:                   Option<u32>,
    pub technical_leadership_skill:  bool,
}

pub struct LeadershipDerivation;

fn contributor_base(rating: PerformanceRating) -> f64 {
    match rating {
        PerformanceRating::Outstanding => 55.0,
        PerformanceRating::Exceeds => 45.0,
        PerformanceRating::Meets => 30.0,
        PerformanceRating::NeedsImprovement => 15.0,
    }
}

fn tenure_tier_bonus(tenure_months: u32) -> f64 {
    match tenure_months {
        60.. => 15.0,
        36..=59 => 10.0,
        12..=35 => 5.0,
        _ => 0.0,
    }
}

fn performance_tier_bonus(rating: PerformanceRating) -> f64 {
    match rating {
        PerformanceRating::Outstanding => 15.0,
        PerformanceRating::Exceeds => 10.0,
        PerformanceRating::Meets => 5.0,
        PerformanceRating::NeedsImprovement => 0.0,
    }
}

impl MetricDerivation for LeadershipDerivation {
    type Block = LeadershipMetrics;

    fn name(&self) -> &'static str {
        "leadership"
    }

    fn slot(&self) -> DerivationSlot {
        DerivationSlot::Leadership
    }

    fn derive(&self, input: &DerivationInput<'_>, rng: &mut DerivationRng) -> LeadershipMetrics {
        let employee = input.employee;
        let rating = input.performance.rating;
        let engagement = clamp_score(input.performance.engagement_score);

        let leadership_potential = match employee.leadership {
            LeadershipFlag::PeopleManager => {
                clamp_score(MANAGER_POTENTIAL_FLOOR + engagement * 0.2 + rng.range_f64(0.0, 10.0))
            }
            LeadershipFlag::IndividualContributor => {
                clamp_score(contributor_base(rating) + engagement * 0.25 + rng.range_f64(0.0, 10.0))
            }
        };

        let technical_leadership_skill = input.skills.as_slice().iter().any(|skill| {
            input
                .config
                .technical_leadership_skills
                .iter()
                .any(|t| t.eq_ignore_ascii_case(skill.name.trim()))
        });

        let succession_readiness = clamp_score(
            leadership_potential * 0.6
                + if technical_leadership_skill { TECHNICAL_LEADERSHIP_BONUS } else { 0.0 }
                + tenure_tier_bonus(employee.tenure_months)
                + performance_tier_bonus(rating),
        );

        let mentorship_activity = if employee.leadership.is_manager() {
            clamp_score(60.0 + rng.range_f64(0.0, 30.0))
        } else if employee.tenure_months >= LONG_TENURE_MENTOR_MONTHS {
            clamp_score(30.0 + rng.range_f64(0.0, 30.0))
        } else {
            clamp_score(5.0 + rng.range_f64(0.0, 20.0))
        };

        let team_size = employee
            .leadership
            .is_manager()
            .then(|| rng.range_u32_inclusive(3, 12));

        LeadershipMetrics {
            employee_id: employee.employee_id.clone(),
            leadership_potential,
            succession_readiness,
            mentorship_activity,
            team_size,
            technical_leadership_skill,
        }
    }
}
