//! Learning metrics: velocity, adaptability and skill growth.
//!
//!   velocity      = 60% engagement + 40% rating weight (×100) ± 5 seeded
//!   adaptability  = skill breadth (≤ 8 skills → 50) + source diversity
//!                   (4 sources → 40) + 0–10 seeded
//!   growth rate   = share of skills validated inside the trailing window
//!   completions   = engagement quarters + tenure (≤ 4) + rating bonus + 0–2
//!   certifications= tenure tiers (≤ 3) + rating + engagement + 0–1

use crate::{
    derivation::{DerivationInput, MetricDerivation},
    model::{clamp_score, PerformanceRating, ValidationSource},
    rng::{DerivationRng, DerivationSlot},
    types::EmployeeId,
};
use chrono::Months;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const BREADTH_SATURATION: usize = 8;
const MAX_TRAINING_COMPLETIONS: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningMetrics {
    pub employee_id:          EmployeeId,
    pub learning_velocity:    f64,
    pub adaptability_score:   f64,
    pub skill_growth_rate:    f64,
    pub training_completions: u32,
    pub certifications:       u32,
    /// Distinct validation sources across the employee's skills.
    pub source_diversity:     u32,
}

pub struct LearningDerivation;

impl MetricDerivation for LearningDerivation {
    type Block = LearningMetrics;

    fn name(&self) -> &'static str {
        "learning"
    }

    fn slot(&self) -> DerivationSlot {
        DerivationSlot::Learning
    }

    fn derive(&self, input: &DerivationInput<'_>, rng: &mut DerivationRng) -> LearningMetrics {
        let perf = input.performance;
        let skills = input.skills.as_slice();
        let engagement = clamp_score(perf.engagement_score);
        let tenure = input.employee.tenure_months;

        let learning_velocity =
            clamp_score(engagement * 0.6 + perf.rating.weight() * 100.0 * 0.4 + rng.range_f64(-5.0, 5.0));

        let sources: HashSet<ValidationSource> = skills.iter().map(|s| s.source).collect();
        let source_diversity = sources.len() as u32;
        let breadth = skills.len().min(BREADTH_SATURATION) as f64 / BREADTH_SATURATION as f64;
        let diversity = source_diversity as f64 / ValidationSource::ALL.len() as f64;
        let adaptability_score = clamp_score(breadth * 50.0 + diversity * 40.0 + rng.range_f64(0.0, 10.0));

        let skill_growth_rate = {
            let config = input.config;
            let window_start = config
                .reference_date
                .checked_sub_months(Months::new(config.skill_growth_window_months))
                .unwrap_or(config.reference_date);
            let recent = skills
                .iter()
                .filter(|s| s.last_validated.is_some_and(|d| d >= window_start))
                .count();
            if skills.is_empty() {
                0.0
            } else {
                clamp_score(recent as f64 / skills.len() as f64 * 100.0)
            }
        };

        let rating_bonus = match perf.rating {
            PerformanceRating::Outstanding => 2,
            PerformanceRating::Exceeds => 1,
            _ => 0,
        };
        let training_completions = ((engagement / 25.0).floor() as u32
            + (tenure / 24).min(4)
            + rating_bonus
            + rng.range_u32_inclusive(0, 2))
        .min(MAX_TRAINING_COMPLETIONS);

        let certifications = (tenure / 36).min(3)
            + u32::from(perf.rating >= PerformanceRating::Exceeds)
            + u32::from(engagement >= 75.0)
            + rng.range_u32_inclusive(0, 1);

        LearningMetrics {
            employee_id: input.employee.employee_id.clone(),
            learning_velocity,
            adaptability_score,
            skill_growth_rate,
            training_completions,
            certifications,
            source_diversity,
        }
    }
}
