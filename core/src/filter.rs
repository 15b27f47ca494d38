//! Profile scope filters. All criteria are optional and AND-ed together.

use crate::{
    model::LeadershipFlag,
    profile::{EmployeeProfile, ProfileSet},
    types::RoleId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileFilter {
    pub business_unit: Option<String>,
    pub location:      Option<String>,
    pub role_id:       Option<RoleId>,
    pub leadership:    Option<LeadershipFlag>,
    pub min_readiness: Option<f64>,
}

impl ProfileFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn business_unit(mut self, unit: impl Into<String>) -> Self {
        self.business_unit = Some(unit.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn role(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = Some(role_id.into());
        self
    }

    pub fn leadership(mut self, flag: LeadershipFlag) -> Self {
        self.leadership = Some(flag);
        self
    }

    pub fn min_readiness(mut self, score: f64) -> Self {
        self.min_readiness = Some(score);
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, profile: &EmployeeProfile) -> bool {
        let e = &profile.employee;
        self.business_unit.as_ref().map_or(true, |u| &e.business_unit == u)
            && self.location.as_ref().map_or(true, |l| &e.location == l)
            && self.role_id.as_ref().map_or(true, |r| &e.role_id == r)
            && self.leadership.map_or(true, |f| e.leadership == f)
            && self
                .min_readiness
                .map_or(true, |min| profile.readiness.readiness_score >= min)
    }

    /// Profiles in scope, in profile-set order.
    pub fn apply<'a>(&self, profiles: &'a ProfileSet) -> Vec<&'a EmployeeProfile> {
        profiles.iter().filter(|p| self.matches(p)).collect()
    }
}
