//! Derivation trait and the fixed derivation order.
//!
//! RULE: Every derived metric block implements MetricDerivation.
//! A derivation reads only its `DerivationInput` and its own RNG stream;
//! it never sees another block's output. The stream is seeded from the
//! employee id and the derivation's slot, so the same inputs always give
//! bit-identical output.
//!
//! Derivations never fail. Missing or degenerate inputs (no skills, zero
//! tenure, unknown role) resolve to documented neutral values.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Skill normalization   (normalizer.rs, produces NormalizedSkills)
//!   2. Learning              (learning.rs)
//!   3. Redeployment          (redeployment.rs)
//!   4. Leadership            (leadership.rs)
//!   5. Cost                  (cost.rs)

use crate::{
    config::AnalyticsConfig,
    model::{Employee, PerformanceMetrics},
    normalizer::NormalizedSkills,
    rng::{DerivationRng, DerivationSlot},
};

/// Everything a derivation may read.
///
/// Holding `NormalizedSkills` (not raw skills) means no derivation can run
/// before normalization.
#[derive(Debug, Clone, Copy)]
pub struct DerivationInput<'a> {
    pub employee:    &'a Employee,
    pub performance: &'a PerformanceMetrics,
    pub skills:      &'a NormalizedSkills,
    pub config:      &'a AnalyticsConfig,
}

/// The contract every derived block fulfils.
pub trait MetricDerivation {
    type Block;

    /// Unique stable name for this derivation.
    fn name(&self) -> &'static str;

    /// Stable RNG slot. Never change once assigned.
    fn slot(&self) -> DerivationSlot;

    /// Key the RNG stream is seeded from. Defaults to the employee id.
    fn seed_key<'a>(&self, input: &DerivationInput<'a>) -> &'a str {
        &input.employee.employee_id
    }

    fn derive(&self, input: &DerivationInput<'_>, rng: &mut DerivationRng) -> Self::Block;
}

/// Run one derivation on a fresh stream for this input.
pub fn run_derivation<D: MetricDerivation>(derivation: &D, input: &DerivationInput<'_>) -> D::Block {
    let key = derivation.seed_key(input);
    log::trace!("{} for {key} on stream {}", derivation.name(), derivation.slot().name());
    let mut rng = DerivationRng::for_key(key, derivation.slot());
    derivation.derive(input, &mut rng)
}
