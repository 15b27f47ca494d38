//! Rollups, rankings and histograms over controlled workforces.

use workforce_core::{
    aggregation::{self, Dimension, Metric, RankOrder},
    config::AnalyticsConfig,
    engine::WorkforceEngine,
    filter::ProfileFilter,
    model::{
        DemandTrend, Employee, EmployeeRecord, EmploymentType, LeadershipFlag, PerformanceMetrics,
        PerformanceRating, ReadinessAssessment, Skill, ValidationSource,
    },
    profile::ProfileSet,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

/// A record on an unclassified role, so skills pass through unchanged.
fn record(id: &str, unit: &str, engagement: f64, skills: Vec<(&str, u8)>) -> EmployeeRecord {
    EmployeeRecord {
        employee: Employee {
            employee_id: id.into(),
            name: format!("Person {id}"),
            role_id: "LEGAL-1".into(),
            role_name: "Counsel".into(),
            business_unit: unit.into(),
            location: "Austin".into(),
            employment_type: EmploymentType::FullTime,
            hire_date: None,
            tenure_months: 24,
            manager_id: None,
            leadership: LeadershipFlag::IndividualContributor,
        },
        performance: PerformanceMetrics {
            rating: PerformanceRating::Meets,
            engagement_score: engagement,
            flight_risk_score: 20.0,
        },
        readiness: ReadinessAssessment::new(60.0, None),
        skills: skills
            .into_iter()
            .map(|(name, proficiency)| Skill {
                skill_id: name.to_lowercase(),
                name: name.into(),
                proficiency,
                source: if proficiency >= 4 { ValidationSource::Assessment } else { ValidationSource::Resume },
                last_validated: None,
                demand_trend: DemandTrend::Rising,
            })
            .collect(),
    }
}

fn assemble(records: Vec<EmployeeRecord>) -> ProfileSet {
    ProfileSet::assemble(records, &AnalyticsConfig::builtin())
}

// ── Skill rollups ────────────────────────────────────────────────────────────

#[test]
fn skill_average_and_coverage_for_three_holders() {
    let profiles = assemble(vec![
        record("E1", "Legal", 50.0, vec![("Python", 2)]),
        record("E2", "Legal", 50.0, vec![("Python", 4)]),
        record("E3", "Legal", 50.0, vec![("Python", 5)]),
    ]);
    let scope = profiles.all();

    let python = aggregation::skill_rollup(&scope, "python").expect("python rollup");
    assert_eq!(python.holder_count, 3);
    assert_eq!(python.average_proficiency, 3.7);
    assert_eq!(python.coverage_pct, 100);
    assert_eq!(python.proficiency_distribution, [0, 1, 0, 1, 1]);
}

#[test]
fn skill_rollups_sorted_by_holders() {
    let profiles = assemble(vec![
        record("E1", "Legal", 50.0, vec![("Drafting", 3), ("Negotiation", 3)]),
        record("E2", "Legal", 50.0, vec![("Negotiation", 2)]),
        record("E3", "Legal", 50.0, vec![("Negotiation", 4), ("Litigation", 1)]),
    ]);
    let rollups = aggregation::skill_rollups(&profiles.all());

    assert_eq!(rollups[0].skill_id, "negotiation");
    assert_eq!(rollups[0].coverage_pct, 100);
    assert!(rollups.windows(2).all(|w| w[0].holder_count >= w[1].holder_count));
}

#[test]
fn skill_roster_orders_by_proficiency() {
    let profiles = assemble(vec![
        record("E1", "Legal", 50.0, vec![("Python", 2)]),
        record("E2", "Legal", 50.0, vec![("Python", 5)]),
        record("E3", "Legal", 50.0, vec![("Python", 5)]),
        record("E4", "Legal", 50.0, vec![]),
    ]);
    let roster = aggregation::skill_roster(&profiles.all(), "python");
    let ids: Vec<&str> = roster.iter().map(|r| r.employee_id.as_str()).collect();
    assert_eq!(ids, vec!["E2", "E3", "E1"]);
}

// ── Empty scopes ─────────────────────────────────────────────────────────────

#[test]
fn empty_scope_gives_zeroes_not_errors() {
    let config = AnalyticsConfig::builtin();
    let engine = WorkforceEngine::build_test(5);
    let nobody = ProfileFilter::all().business_unit("No Such Unit");

    let summary = engine.summary(&nobody);
    assert_eq!(summary.headcount, 0);
    assert_eq!(summary.average_engagement, 0.0);
    assert_eq!(summary.high_flight_risk_pct, 0);
    assert_eq!(summary.readiness_distribution.len(), config.histogram_buckets.len());
    assert!(summary.readiness_distribution.iter().all(|b| b.count == 0));

    assert!(engine.group_by(&nobody, Dimension::Department, &[Metric::Engagement]).is_empty());
    assert!(engine.skill_rollups(&nobody).is_empty());
    assert!(engine.top_n(&nobody, Metric::Engagement, 5).is_empty());
    assert_eq!(aggregation::coverage_pct(0, 0), 0);
}

// ── Grouping ─────────────────────────────────────────────────────────────────

#[test]
fn partition_groups_cover_the_whole_scope() {
    let engine = WorkforceEngine::synthetic(11, 250, AnalyticsConfig::builtin());
    let filter = ProfileFilter::all();
    let scope_size = engine.scope(&filter).len();

    for dimension in [Dimension::Department, Dimension::Role, Dimension::Location] {
        assert!(dimension.is_partition());
        let groups = engine.group_by(&filter, dimension, &[Metric::Engagement]);
        let total: usize = groups.iter().map(|g| g.employee_count).sum();
        assert_eq!(total, scope_size, "{dimension:?} groups do not sum to scope");
    }
    assert!(!Dimension::Skill.is_partition());
}

#[test]
fn group_averages_use_group_members_only() {
    let profiles = assemble(vec![
        record("E1", "Legal", 40.0, vec![]),
        record("E2", "Legal", 60.0, vec![]),
        record("E3", "Finance", 90.0, vec![]),
    ]);
    let groups = aggregation::group_by(&profiles.all(), Dimension::Department, &[Metric::Engagement]);

    let finance = groups.iter().find(|g| g.label == "Finance").expect("finance group");
    let legal = groups.iter().find(|g| g.label == "Legal").expect("legal group");
    assert_eq!(finance.averages[&Metric::Engagement], 90.0);
    assert_eq!(legal.averages[&Metric::Engagement], 50.0);
    assert_eq!(legal.share_pct, 67);
}

// ── Teams ────────────────────────────────────────────────────────────────────

#[test]
fn span_of_control_covers_every_managed_employee() {
    let engine = WorkforceEngine::synthetic(6, 140, AnalyticsConfig::builtin());
    let scope = engine.scope(&ProfileFilter::all());

    let spans = aggregation::span_of_control(&scope);
    let managed = scope.iter().filter(|p| p.employee.manager_id.is_some()).count();
    assert_eq!(spans.values().sum::<usize>(), managed);

    for (manager_id, count) in &spans {
        assert_eq!(
            aggregation::direct_reports(&scope, manager_id).len(),
            *count,
            "span of {manager_id} disagrees with its direct reports"
        );
    }
}

#[test]
fn only_the_default_filter_is_unrestricted() {
    assert!(ProfileFilter::all().is_unrestricted());
    assert!(!ProfileFilter::all().business_unit("Legal").is_unrestricted());
    assert!(!ProfileFilter::all().min_readiness(0.0).is_unrestricted());
}

// ── Rankings ─────────────────────────────────────────────────────────────────

#[test]
fn top_n_ties_keep_scope_order() {
    let profiles = assemble(vec![
        record("E1", "Legal", 70.0, vec![]),
        record("E2", "Legal", 90.0, vec![]),
        record("E3", "Legal", 70.0, vec![]),
        record("E4", "Legal", 70.0, vec![]),
    ]);
    let top = aggregation::top_n(&profiles.all(), Metric::Engagement, 3);
    let ids: Vec<&str> = top.iter().map(|r| r.employee_id.as_str()).collect();
    assert_eq!(ids, vec!["E2", "E1", "E3"]);
    assert_eq!(top.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);

    let bottom = aggregation::rank(&profiles.all(), Metric::Engagement, RankOrder::Lowest, 2);
    assert_eq!(bottom[0].employee_id, "E1");
    assert_eq!(bottom[1].employee_id, "E3");
}

// ── Histograms ───────────────────────────────────────────────────────────────

#[test]
fn histogram_counts_sum_to_scope() {
    let config = AnalyticsConfig::builtin();
    let engine = WorkforceEngine::synthetic(3, 180, config);
    let filter = ProfileFilter::all();

    for metric in [Metric::Readiness, Metric::Engagement, Metric::RedeploymentScore] {
        let buckets = engine.histogram(&filter, metric);
        let total: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, engine.profiles().len(), "{metric:?} histogram lost employees");
    }
}

#[test]
fn histogram_upper_edges_are_inclusive() {
    let profiles = assemble(vec![
        record("E1", "Legal", 30.0, vec![]),
        record("E2", "Legal", 31.0, vec![]),
        record("E3", "Legal", 100.0, vec![]),
    ]);
    let config = AnalyticsConfig::builtin();
    let buckets = aggregation::histogram(&profiles.all(), Metric::Engagement, &config.histogram_buckets);

    let counts: Vec<usize> = buckets.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![1, 1, 0, 0, 1]);
}

#[test]
fn fractional_values_bucket_by_nearest_whole_number() {
    let profiles = assemble(vec![
        record("E1", "Legal", 30.4, vec![]),
        record("E2", "Legal", 30.6, vec![]),
        record("E3", "Legal", 85.2, vec![]),
    ]);
    let config = AnalyticsConfig::builtin();
    let buckets = aggregation::histogram(&profiles.all(), Metric::Engagement, &config.histogram_buckets);

    let count = |label: &str| buckets.iter().find(|b| b.label == label).map_or(0, |b| b.count);
    assert_eq!(count("0-30"), 1, "30.4 belongs with 30");
    assert_eq!(count("31-50"), 1, "30.6 belongs with 31");
    assert_eq!(count("71-85"), 1);
    assert_eq!(count("86-100"), 0);
}
