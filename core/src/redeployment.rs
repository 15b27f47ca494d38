//! Redeployment readiness: how easily an employee moves to another role.
//!
//! Score blend (clamped 0–100):
//!   30% transferable-skill ratio
//!   20% cross-functional experience flag
//!   30% mobility willingness (scaled from 0–100)
//!   20% average proficiency ratio (of 5)

use crate::{
    derivation::{DerivationInput, MetricDerivation},
    model::clamp_score,
    normalizer::MAX_PROFICIENCY,
    rng::{DerivationRng, DerivationSlot},
    types::EmployeeId,
};
use serde::{Deserialize, Serialize};

pub const CROSS_FUNCTIONAL_TENURE_MONTHS: u32 = 36;
const CROSS_FUNCTIONAL_PROBABILITY: f64 = 0.65;
pub const MIN_REDEPLOY_DAYS: u32 = 7;
pub const MAX_REDEPLOY_DAYS: u32 = 90;

const WEIGHT_TRANSFERABLE: f64 = 30.0;
const WEIGHT_CROSS_FUNCTIONAL: f64 = 20.0;
const WEIGHT_MOBILITY: f64 = 30.0;
const WEIGHT_PROFICIENCY: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedeploymentBand {
    Ready,
    Trainable,
    Limited,
}

impl RedeploymentBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            Self::Ready
        } else if score >= 45.0 {
            Self::Trainable
        } else {
            Self::Limited
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedeploymentReadiness {
    pub employee_id:                 EmployeeId,
    pub transferable_skill_count:    u32,
    pub transferable_skills:         Vec<String>,
    pub cross_functional_experience: bool,
    pub mobility_willingness:        f64,
    pub time_to_redeploy_days:       u32,
    pub redeployment_score:          f64,
    pub band:                        RedeploymentBand,
}

pub struct RedeploymentDerivation;

impl MetricDerivation for RedeploymentDerivation {
    type Block = RedeploymentReadiness;

    fn name(&self) -> &'static str {
        "redeployment"
    }

    fn slot(&self) -> DerivationSlot {
        DerivationSlot::Redeployment
    }

    fn derive(&self, input: &DerivationInput<'_>, rng: &mut DerivationRng) -> RedeploymentReadiness {
        let skills = input.skills.as_slice();
        let engagement = clamp_score(input.performance.engagement_score);

        let mut transferable_skills: Vec<String> = Vec::new();
        for skill in skills {
            let is_transferable = input
                .config
                .transferable_skills
                .iter()
                .any(|t| t.eq_ignore_ascii_case(skill.name.trim()));
            if is_transferable
                && !transferable_skills.iter().any(|n| n.eq_ignore_ascii_case(skill.name.trim()))
            {
                transferable_skills.push(skill.name.trim().to_string());
            }
        }
        let transferable_skill_count = transferable_skills.len() as u32;

        // Always draw, so the rest of the stream does not depend on tenure.
        let cross_roll = rng.next_f64();
        let cross_functional_experience = input.employee.tenure_months > CROSS_FUNCTIONAL_TENURE_MONTHS
            && cross_roll < CROSS_FUNCTIONAL_PROBABILITY;

        let mobility_willingness = clamp_score(engagement * 0.8 + rng.range_f64(0.0, 20.0));

        let avg_proficiency = input.skills.average_proficiency();
        let skill_count = skills.len().min(10) as f64;
        let raw_days = MAX_REDEPLOY_DAYS as f64 - avg_proficiency * 10.0 - skill_count * 3.0
            + rng.range_f64(0.0, 10.0);
        let time_to_redeploy_days =
            raw_days.round().clamp(MIN_REDEPLOY_DAYS as f64, MAX_REDEPLOY_DAYS as f64) as u32;

        let transferable_ratio = if skills.is_empty() {
            0.0
        } else {
            transferable_skill_count as f64 / skills.len() as f64
        };
        let cross_functional = if cross_functional_experience { 1.0 } else { 0.0 };
        let redeployment_score = clamp_score(
            transferable_ratio * WEIGHT_TRANSFERABLE
                + cross_functional * WEIGHT_CROSS_FUNCTIONAL
                + mobility_willingness / 100.0 * WEIGHT_MOBILITY
                + avg_proficiency / MAX_PROFICIENCY as f64 * WEIGHT_PROFICIENCY,
        );

        RedeploymentReadiness {
            employee_id: input.employee.employee_id.clone(),
            transferable_skill_count,
            transferable_skills,
            cross_functional_experience,
            mobility_willingness,
            time_to_redeploy_days,
            redeployment_score,
            band: RedeploymentBand::from_score(redeployment_score),
        }
    }
}
