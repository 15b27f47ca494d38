//! The analytics engine: owns the config and the assembled profiles.
//!
//! DATA FLOW (one way, fixed):
//!   1. Records in          (loader.rs or synthetic.rs)
//!   2. Normalize + derive   (normalizer.rs, derivation.rs)
//!   3. Assemble profiles    (profile.rs)
//!   4. Query                (aggregation.rs) / navigate (navigation.rs)
//!
//! RULES:
//!   - Profiles are built once and never mutated.
//!   - Every query recomputes from the profiles; nothing is cached.
//!   - Queries never fail. Empty scopes give zero/empty results.

use crate::{
    aggregation::{
        self, Dimension, GroupSummary, HistogramBucket, Metric, RankedEmployee, RosterEntry,
        SkillSummary, TeamSummary, WorkforceSummary,
    },
    config::AnalyticsConfig,
    error::WorkforceResult,
    filter::ProfileFilter,
    loader::{self, SkippedRow},
    model::EmployeeRecord,
    navigation::{DashboardNavigator, DashboardTab},
    profile::{EmployeeProfile, ProfileSet},
    synthetic::SyntheticWorkforce,
};

pub struct WorkforceEngine {
    pub config: AnalyticsConfig,
    profiles:   ProfileSet,
    skipped:    Vec<SkippedRow>,
}

impl WorkforceEngine {
    pub fn new(records: Vec<EmployeeRecord>, config: AnalyticsConfig) -> Self {
        let profiles = ProfileSet::assemble(records, &config);
        Self {
            config,
            profiles,
            skipped: Vec::new(),
        }
    }

    /// Load a CSV file and assemble profiles.
    pub fn from_csv_path(path: &str, config: AnalyticsConfig) -> WorkforceResult<Self> {
        let report = loader::load_records_from_path(path, &config)?;
        let mut engine = Self::new(report.records, config);
        engine.skipped = report.skipped;
        Ok(engine)
    }

    /// Deterministic synthetic workforce of `size` employees.
    pub fn synthetic(seed: u64, size: usize, config: AnalyticsConfig) -> Self {
        let records = SyntheticWorkforce::generate(seed, size, &config);
        Self::new(records, config)
    }

    /// Small synthetic engine on built-in config, for tests.
    pub fn build_test(seed: u64) -> Self {
        Self::synthetic(seed, 50, AnalyticsConfig::builtin())
    }

    pub fn profiles(&self) -> &ProfileSet {
        &self.profiles
    }

    pub fn profile(&self, employee_id: &str) -> Option<&EmployeeProfile> {
        self.profiles.get(employee_id)
    }

    /// Rows the loader rejected.
    pub fn skipped_rows(&self) -> &[SkippedRow] {
        &self.skipped
    }

    pub fn scope(&self, filter: &ProfileFilter) -> Vec<&EmployeeProfile> {
        filter.apply(&self.profiles)
    }

    /// A fresh navigator for one dashboard. Not shared between dashboards.
    pub fn navigator(&self, tab: DashboardTab) -> DashboardNavigator {
        DashboardNavigator::new(tab)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn summary(&self, filter: &ProfileFilter) -> WorkforceSummary {
        aggregation::summarize(&self.scope(filter), &self.config)
    }

    pub fn group_by(&self, filter: &ProfileFilter, dimension: Dimension, metrics: &[Metric]) -> Vec<GroupSummary> {
        aggregation::group_by(&self.scope(filter), dimension, metrics)
    }

    pub fn skill_rollups(&self, filter: &ProfileFilter) -> Vec<SkillSummary> {
        aggregation::skill_rollups(&self.scope(filter))
    }

    pub fn skill_rollup(&self, filter: &ProfileFilter, skill_id: &str) -> Option<SkillSummary> {
        aggregation::skill_rollup(&self.scope(filter), skill_id)
    }

    pub fn skill_roster(&self, filter: &ProfileFilter, skill_id: &str) -> Vec<RosterEntry> {
        aggregation::skill_roster(&self.scope(filter), skill_id)
    }

    pub fn histogram(&self, filter: &ProfileFilter, metric: Metric) -> Vec<HistogramBucket> {
        aggregation::histogram(&self.scope(filter), metric, &self.config.histogram_buckets)
    }

    pub fn top_n(&self, filter: &ProfileFilter, metric: Metric, n: usize) -> Vec<RankedEmployee> {
        aggregation::top_n(&self.scope(filter), metric, n)
    }

    pub fn direct_reports(&self, filter: &ProfileFilter, manager_id: &str) -> Vec<&EmployeeProfile> {
        aggregation::direct_reports(&self.scope(filter), manager_id)
    }

    pub fn team_summary(&self, filter: &ProfileFilter, manager_id: &str, metrics: &[Metric]) -> Option<TeamSummary> {
        aggregation::team_summary(&self.scope(filter), manager_id, metrics)
    }
}
