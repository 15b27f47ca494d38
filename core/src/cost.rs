//! Employee cost model.
//!
//! Base salary comes from the role's band. The position inside the band is
//! seeded from the role id, so every peer in a role starts from the same
//! band salary and differs only by the multipliers:
//!   location cost-of-living × rating multiplier × (1 + tenure/engagement bonus)
//!
//! Total compensation applies an overhead multiplier (employee-seeded,
//! inside the configured range). All figures are computed in the reporting
//! currency first and converted to the location's currency for display.

use crate::{
    derivation::{DerivationInput, MetricDerivation},
    model::clamp_score,
    rng::{DerivationRng, DerivationSlot},
    types::{CurrencyCode, EmployeeId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeCost {
    pub employee_id:                  EmployeeId,
    /// Local currency for this employee's location.
    pub currency:                     CurrencyCode,
    pub base_salary:                  f64,
    pub total_compensation:           f64,
    pub base_salary_reporting:        f64,
    pub total_compensation_reporting: f64,
    pub overhead_multiplier:          f64,
    /// Where in the role band the salary sits, 0.0–1.0.
    pub band_position:                f64,
}

pub struct CostDerivation;

/// Deterministic position inside a role's band. Shared by every employee in the role.
pub fn band_position(role_id: &str) -> f64 {
    DerivationRng::for_key(role_id, DerivationSlot::Cost).next_f64()
}

fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl MetricDerivation for CostDerivation {
    type Block = EmployeeCost;

    fn name(&self) -> &'static str {
        "cost"
    }

    fn slot(&self) -> DerivationSlot {
        DerivationSlot::Cost
    }

    fn derive(&self, input: &DerivationInput<'_>, rng: &mut DerivationRng) -> EmployeeCost {
        let config = input.config;
        let employee = input.employee;
        let bonuses = &config.cost_bonuses;

        let band = config.salary_band(&employee.role_id);
        let position = band_position(&employee.role_id);
        let band_salary = band.min + (band.max - band.min) * position;

        let location = config.location_cost(&employee.location);

        let tenure_bonus =
            ((employee.tenure_months / 12) as f64 * bonuses.per_tenure_year).min(bonuses.tenure_cap);
        let engagement = clamp_score(input.performance.engagement_score);
        let engagement_bonus = if engagement >= bonuses.engagement_high_threshold {
            bonuses.engagement_high
        } else if engagement >= bonuses.engagement_moderate_threshold {
            bonuses.engagement_moderate
        } else {
            0.0
        };
        let bonus = (tenure_bonus + engagement_bonus).min(bonuses.total_cap);

        let base_reporting = band_salary
            * location.cost_factor
            * input.performance.rating.cost_multiplier()
            * (1.0 + bonus);
        let overhead_multiplier = rng.range_f64(config.overhead.min, config.overhead.max);
        let total_reporting = base_reporting * overhead_multiplier;

        EmployeeCost {
            employee_id: employee.employee_id.clone(),
            currency: location.currency.clone(),
            base_salary: round_currency(base_reporting * location.units_per_reporting),
            total_compensation: round_currency(total_reporting * location.units_per_reporting),
            base_salary_reporting: round_currency(base_reporting),
            total_compensation_reporting: round_currency(total_reporting),
            overhead_multiplier,
            band_position: position,
        }
    }
}
