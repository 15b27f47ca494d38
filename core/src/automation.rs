//! Static role → automation-potential lookup.
//!
//! These are fixed labels, not a model. Resolution order:
//! explicit role id override, then role family, then the default entry.

use crate::{config::AnalyticsConfig, role::RoleFamily};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiCapability {
    Automate,
    Augment,
    Assist,
    HumanLed,
}

impl AiCapability {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Automate => "Automate",
            Self::Augment => "Augment",
            Self::Assist => "Assist",
            Self::HumanLed => "Human-led",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutomationProfile {
    /// Share of the role's work exposed to automation, 0–100.
    pub automation_potential: f64,
    pub ai_capability: AiCapability,
}

pub fn automation_for(role_id: &str, family: RoleFamily, config: &AnalyticsConfig) -> AutomationProfile {
    let table = &config.automation;
    let mut profile = table
        .by_role
        .get(role_id)
        .or_else(|| table.by_family.get(&family))
        .copied()
        .unwrap_or(table.default);
    profile.automation_potential = crate::model::clamp_score(profile.automation_potential);
    profile
}
