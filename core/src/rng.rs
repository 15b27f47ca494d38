//! Deterministic pseudo-randomness.
//!
//! RULE: Nothing in the analytics core may call any platform RNG or read
//! the clock. All variance flows through DerivationRng instances seeded
//! from a stable identifier (employee id, skill name, role id).
//!
//! Each derivation gets its own stream, seeded from
//! (stable_hash(key) XOR slot * golden ratio). This means:
//!   - Adding a new derivation never changes existing derivations' streams.
//!   - Every derived block is reproducible in isolation.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over the UTF-8 bytes of `key`. Stable across runs and platforms.
pub fn stable_hash(key: &str) -> u64 {
    key.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
    })
}

/// A deterministic RNG stream for one (key, slot) pair.
pub struct DerivationRng {
    pub slot: DerivationSlot,
    inner: Pcg64Mcg,
}

impl DerivationRng {
    /// Seed from a raw value and a stable slot.
    pub fn new(seed: u64, slot: DerivationSlot) -> Self {
        let derived_seed = seed ^ (slot as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self {
            slot,
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Seed from a stable identifier (employee id, skill name, role id).
    pub fn for_key(key: &str, slot: DerivationSlot) -> Self {
        Self::new(stable_hash(key), slot)
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n). Returns 0 when n == 0.
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        self.inner.next_u64() % n
    }

    /// Roll a float in [lo, hi).
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Roll an integer in [lo, hi]. Returns `lo` when the range is empty.
    pub fn range_u32_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_u64_below((hi - lo + 1) as u64) as u32
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick one element of a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let idx = self.next_u64_below(items.len() as u64) as usize;
        items.get(idx)
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries; append only.
/// Reordering changes every derived value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum DerivationSlot {
    Learning = 0,
    Redeployment = 1,
    Leadership = 2,
    Cost = 3,
    SkillNormalization = 4,
    Population = 5,
    // Add new streams here, append only.
}

impl DerivationSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Learning => "learning",
            Self::Redeployment => "redeployment",
            Self::Leadership => "leadership",
            Self::Cost => "cost",
            Self::SkillNormalization => "skill_normalization",
            Self::Population => "population",
        }
    }
}
