//! Aggregation & rollup engine.
//!
//! Every function takes a scope (`&[&EmployeeProfile]`, usually the output
//! of a `ProfileFilter`) and recomputes from it. There is no cached state.
//!
//! Conventions:
//!   - averages are arithmetic means rounded to one decimal; 0.0 when empty
//!   - coverage / share percentages are round(matching / total × 100);
//!     0 when the scope is empty
//!   - rankings use a stable sort, so ties keep scope order
//!   - histogram edges are integer and upper-inclusive

use crate::{
    config::{AnalyticsConfig, BucketEdge},
    model::{DemandTrend, ValidationSource},
    profile::EmployeeProfile,
    types::{EmployeeId, SkillId},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ── Primitives ───────────────────────────────────────────────────────────────

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Arithmetic mean, 0.0 for no values.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0f64, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// round(matching / total × 100), or 0 when total is 0.
pub fn coverage_pct(matching: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (matching as f64 / total as f64 * 100.0).round() as u32
}

// ── Dimensions and metrics ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Department,
    Role,
    Skill,
    Location,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [Self::Department, Self::Role, Self::Skill, Self::Location];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "department" | "business_unit" | "unit" => Some(Self::Department),
            "role" => Some(Self::Role),
            "skill" => Some(Self::Skill),
            "location" => Some(Self::Location),
            _ => None,
        }
    }

    /// Each profile lands in exactly one group. False for `Skill`, where an
    /// employee joins every skill group they hold (or none).
    pub fn is_partition(&self) -> bool {
        !matches!(self, Self::Skill)
    }

    /// (key, label) pairs this profile belongs to.
    fn memberships(&self, profile: &EmployeeProfile) -> Vec<(String, String)> {
        let e = &profile.employee;
        match self {
            Self::Department => vec![(e.business_unit.clone(), e.business_unit.clone())],
            Self::Role => vec![(e.role_id.clone(), e.role_name.clone())],
            Self::Location => vec![(e.location.clone(), e.location.clone())],
            Self::Skill => profile
                .skills
                .iter()
                .map(|s| (s.skill_id.clone(), s.name.clone()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Engagement,
    FlightRisk,
    Readiness,
    LearningVelocity,
    Adaptability,
    SkillGrowthRate,
    RedeploymentScore,
    MobilityWillingness,
    TimeToRedeployDays,
    LeadershipPotential,
    SuccessionReadiness,
    MentorshipActivity,
    AutomationPotential,
    BaseSalary,
    TotalCompensation,
}

impl Metric {
    pub fn value(&self, profile: &EmployeeProfile) -> f64 {
        match self {
            Self::Engagement => profile.performance.engagement_score,
            Self::FlightRisk => profile.performance.flight_risk_score,
            Self::Readiness => profile.readiness.readiness_score,
            Self::LearningVelocity => profile.learning.learning_velocity,
            Self::Adaptability => profile.learning.adaptability_score,
            Self::SkillGrowthRate => profile.learning.skill_growth_rate,
            Self::RedeploymentScore => profile.redeployment.redeployment_score,
            Self::MobilityWillingness => profile.redeployment.mobility_willingness,
            Self::TimeToRedeployDays => profile.redeployment.time_to_redeploy_days as f64,
            Self::LeadershipPotential => profile.leadership.leadership_potential,
            Self::SuccessionReadiness => profile.leadership.succession_readiness,
            Self::MentorshipActivity => profile.leadership.mentorship_activity,
            Self::AutomationPotential => profile.automation.automation_potential,
            Self::BaseSalary => profile.cost.base_salary_reporting,
            Self::TotalCompensation => profile.cost.total_compensation_reporting,
        }
    }

    /// Declared on a 0–100 scale.
    pub fn is_bounded(&self) -> bool {
        !matches!(self, Self::TimeToRedeployDays | Self::BaseSalary | Self::TotalCompensation)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "engagement" => Some(Self::Engagement),
            "flight_risk" => Some(Self::FlightRisk),
            "readiness" => Some(Self::Readiness),
            "learning_velocity" => Some(Self::LearningVelocity),
            "adaptability" => Some(Self::Adaptability),
            "skill_growth_rate" => Some(Self::SkillGrowthRate),
            "redeployment_score" | "redeployment" => Some(Self::RedeploymentScore),
            "mobility_willingness" => Some(Self::MobilityWillingness),
            "time_to_redeploy_days" => Some(Self::TimeToRedeployDays),
            "leadership_potential" => Some(Self::LeadershipPotential),
            "succession_readiness" => Some(Self::SuccessionReadiness),
            "mentorship_activity" => Some(Self::MentorshipActivity),
            "automation_potential" => Some(Self::AutomationPotential),
            "base_salary" => Some(Self::BaseSalary),
            "total_compensation" => Some(Self::TotalCompensation),
            _ => None,
        }
    }
}

// ── Group rollups ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key:            String,
    pub label:          String,
    pub employee_count: usize,
    /// Share of the scope in this group.
    pub share_pct:      u32,
    pub averages:       BTreeMap<Metric, f64>,
}

/// Group the scope by a dimension. Groups are ordered by key.
pub fn group_by(scope: &[&EmployeeProfile], dimension: Dimension, metrics: &[Metric]) -> Vec<GroupSummary> {
    let mut groups: BTreeMap<String, (String, Vec<&EmployeeProfile>)> = BTreeMap::new();
    for &profile in scope {
        for (key, label) in dimension.memberships(profile) {
            groups
                .entry(key)
                .or_insert_with(|| (label, Vec::new()))
                .1
                .push(profile);
        }
    }

    groups
        .into_iter()
        .map(|(key, (label, members))| GroupSummary {
            key,
            label,
            employee_count: members.len(),
            share_pct: coverage_pct(members.len(), scope.len()),
            averages: averages(&members, metrics),
        })
        .collect()
}

pub fn averages(scope: &[&EmployeeProfile], metrics: &[Metric]) -> BTreeMap<Metric, f64> {
    metrics
        .iter()
        .map(|m| (*m, round1(mean(scope.iter().map(|p| m.value(p))))))
        .collect()
}

// ── Skill rollups ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillSummary {
    pub skill_id:                 SkillId,
    pub skill_name:               String,
    pub holder_count:             usize,
    pub coverage_pct:             u32,
    pub average_proficiency:      f64,
    /// Holders at proficiency 1..=5 (index 0 = level 1).
    pub proficiency_distribution: [usize; 5],
    /// Share of holders whose proficiency is assessed or evidenced.
    pub verified_pct:             u32,
    /// Most common demand trend among holders; ties go to Rising, then Stable.
    pub demand_trend:             DemandTrend,
}

/// One summary per skill id in scope, ordered by holder count (desc) then id.
pub fn skill_rollups(scope: &[&EmployeeProfile]) -> Vec<SkillSummary> {
    struct Acc {
        name:     String,
        levels:   Vec<u8>,
        verified: usize,
        trends:   [usize; 3],
    }

    let mut by_skill: BTreeMap<SkillId, Acc> = BTreeMap::new();
    for profile in scope {
        for skill in &profile.skills {
            let acc = by_skill.entry(skill.skill_id.clone()).or_insert_with(|| Acc {
                name: skill.name.clone(),
                levels: Vec::new(),
                verified: 0,
                trends: [0; 3],
            });
            acc.levels.push(skill.proficiency);
            if skill.source.is_verified() {
                acc.verified += 1;
            }
            let slot = match skill.demand_trend {
                DemandTrend::Rising => 0,
                DemandTrend::Stable => 1,
                DemandTrend::Declining => 2,
            };
            acc.trends[slot] += 1;
        }
    }

    let mut rollups: Vec<SkillSummary> = by_skill
        .into_iter()
        .map(|(skill_id, acc)| {
            let mut distribution = [0usize; 5];
            for level in &acc.levels {
                let idx = (*level).clamp(1, 5) as usize - 1;
                distribution[idx] += 1;
            }
            let [rising, stable, declining] = acc.trends;
            let demand_trend = if rising >= stable && rising >= declining {
                DemandTrend::Rising
            } else if stable >= declining {
                DemandTrend::Stable
            } else {
                DemandTrend::Declining
            };
            SkillSummary {
                skill_id,
                skill_name: acc.name,
                holder_count: acc.levels.len(),
                coverage_pct: coverage_pct(acc.levels.len(), scope.len()),
                average_proficiency: round1(mean(acc.levels.iter().map(|l| *l as f64))),
                proficiency_distribution: distribution,
                verified_pct: coverage_pct(acc.verified, acc.levels.len()),
                demand_trend,
            }
        })
        .collect();

    rollups.sort_by(|a, b| b.holder_count.cmp(&a.holder_count));
    rollups
}

/// Rollup for a single skill, `None` if nobody in scope holds it.
pub fn skill_rollup(scope: &[&EmployeeProfile], skill_id: &str) -> Option<SkillSummary> {
    let holders: Vec<&EmployeeProfile> = scope.iter().copied().filter(|p| p.has_skill(skill_id)).collect();
    if holders.is_empty() {
        return None;
    }
    let mut summary = skill_rollups(&holders)
        .into_iter()
        .find(|s| s.skill_id == skill_id)?;
    summary.coverage_pct = coverage_pct(summary.holder_count, scope.len());
    Some(summary)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub employee_id: EmployeeId,
    pub name:        String,
    pub role_name:   String,
    pub proficiency: u8,
    pub source:      ValidationSource,
}

/// Holders of a skill, strongest first (stable on ties).
pub fn skill_roster(scope: &[&EmployeeProfile], skill_id: &str) -> Vec<RosterEntry> {
    let mut roster: Vec<RosterEntry> = scope
        .iter()
        .filter_map(|p| {
            p.skill(skill_id).map(|s| RosterEntry {
                employee_id: p.employee.employee_id.clone(),
                name: p.employee.name.clone(),
                role_name: p.employee.role_name.clone(),
                proficiency: s.proficiency,
                source: s.source,
            })
        })
        .collect();
    roster.sort_by(|a, b| b.proficiency.cmp(&a.proficiency));
    roster
}

// ── Distributions ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBucket {
    pub label: String,
    pub lower: u32,
    pub upper: u32,
    pub count: usize,
}

/// Bucket a metric across the scope. Edges are whole numbers, so each value
/// is rounded first and goes to the first bucket whose upper edge it does
/// not exceed; anything above the last edge lands in the last bucket.
pub fn histogram(scope: &[&EmployeeProfile], metric: Metric, edges: &[BucketEdge]) -> Vec<HistogramBucket> {
    let mut buckets: Vec<HistogramBucket> = edges
        .iter()
        .map(|e| HistogramBucket {
            label: e.label.clone(),
            lower: e.lower,
            upper: e.upper,
            count: 0,
        })
        .collect();
    if buckets.is_empty() {
        return buckets;
    }
    let last = buckets.len() - 1;
    for profile in scope {
        let value = metric.value(profile).round();
        let idx = buckets
            .iter()
            .position(|b| value <= b.upper as f64)
            .unwrap_or(last);
        buckets[idx].count += 1;
    }
    buckets
}

// ── Rankings ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEmployee {
    pub rank:        usize,
    pub employee_id: EmployeeId,
    pub name:        String,
    pub value:       f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankOrder {
    Highest,
    Lowest,
}

/// Rank the scope by a metric and keep the first `n`. Ties keep scope order.
pub fn rank(scope: &[&EmployeeProfile], metric: Metric, order: RankOrder, n: usize) -> Vec<RankedEmployee> {
    let mut scored: Vec<(&EmployeeProfile, f64)> = scope.iter().map(|p| (*p, metric.value(p))).collect();
    match order {
        RankOrder::Highest => scored.sort_by(|a, b| b.1.total_cmp(&a.1)),
        RankOrder::Lowest => scored.sort_by(|a, b| a.1.total_cmp(&b.1)),
    }
    scored
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, (p, value))| RankedEmployee {
            rank: i + 1,
            employee_id: p.employee.employee_id.clone(),
            name: p.employee.name.clone(),
            value,
        })
        .collect()
}

pub fn top_n(scope: &[&EmployeeProfile], metric: Metric, n: usize) -> Vec<RankedEmployee> {
    rank(scope, metric, RankOrder::Highest, n)
}

// ── Teams ────────────────────────────────────────────────────────────────────

/// Profiles in scope whose manager is `manager_id`, in scope order.
pub fn direct_reports<'a>(scope: &[&'a EmployeeProfile], manager_id: &str) -> Vec<&'a EmployeeProfile> {
    scope
        .iter()
        .copied()
        .filter(|p| p.employee.manager_id.as_deref() == Some(manager_id))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub manager_id:   EmployeeId,
    pub manager_name: String,
    pub report_count: usize,
    pub averages:     BTreeMap<Metric, f64>,
}

/// `None` when the manager is not in scope.
pub fn team_summary(scope: &[&EmployeeProfile], manager_id: &str, metrics: &[Metric]) -> Option<TeamSummary> {
    let manager = scope.iter().find(|p| p.employee.employee_id == manager_id)?;
    let reports = direct_reports(scope, manager_id);
    Some(TeamSummary {
        manager_id: manager.employee.employee_id.clone(),
        manager_name: manager.employee.name.clone(),
        report_count: reports.len(),
        averages: averages(&reports, metrics),
    })
}

/// Direct-report counts per manager id across the scope.
pub fn span_of_control(scope: &[&EmployeeProfile]) -> HashMap<EmployeeId, usize> {
    let mut spans: HashMap<EmployeeId, usize> = HashMap::new();
    for profile in scope {
        if let Some(manager) = &profile.employee.manager_id {
            *spans.entry(manager.clone()).or_default() += 1;
        }
    }
    spans
}

// ── Headline summary ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkforceSummary {
    pub headcount:                 usize,
    pub managers:                  usize,
    pub average_engagement:        f64,
    pub average_readiness:         f64,
    pub average_flight_risk:       f64,
    pub average_redeployment:      f64,
    pub average_leadership:        f64,
    pub high_flight_risk_count:    usize,
    pub high_flight_risk_pct:      u32,
    pub reporting_currency:        String,
    pub total_annual_cost:         f64,
    pub readiness_distribution:    Vec<HistogramBucket>,
}

pub fn summarize(scope: &[&EmployeeProfile], config: &AnalyticsConfig) -> WorkforceSummary {
    let avg = |m: Metric| round1(mean(scope.iter().map(|p| m.value(p))));
    let high_risk = scope
        .iter()
        .filter(|p| p.performance.flight_risk_score >= config.high_flight_risk_threshold)
        .count();
    let total_cost: f64 = scope.iter().map(|p| p.cost.total_compensation_reporting).sum();

    WorkforceSummary {
        headcount: scope.len(),
        managers: scope.iter().filter(|p| p.employee.leadership.is_manager()).count(),
        average_engagement: avg(Metric::Engagement),
        average_readiness: avg(Metric::Readiness),
        average_flight_risk: avg(Metric::FlightRisk),
        average_redeployment: avg(Metric::RedeploymentScore),
        average_leadership: avg(Metric::LeadershipPotential),
        high_flight_risk_count: high_risk,
        high_flight_risk_pct: coverage_pct(high_risk, scope.len()),
        reporting_currency: config.reporting_currency.clone(),
        total_annual_cost: (total_cost * 100.0).round() / 100.0,
        readiness_distribution: histogram(scope, Metric::Readiness, &config.histogram_buckets),
    }
}
