//! workforce-runner: headless analytics runner.
//!
//! Usage:
//!   workforce-runner --input employees.csv --group department --top 10
//!   workforce-runner --synthetic 500 --seed 42 --json
//!   workforce-runner --synthetic 200 --seed 7 --export employees.csv
//!   workforce-runner --input employees.csv --config overrides.json --unit Engineering

use anyhow::{bail, Context, Result};
use std::env;
use workforce_core::{
    aggregation::{Dimension, GroupSummary, Metric, RankedEmployee, SkillSummary, WorkforceSummary},
    config::AnalyticsConfig,
    engine::WorkforceEngine,
    filter::ProfileFilter,
    loader::{self, SkippedRow},
    synthetic::SyntheticWorkforce,
};

const GROUP_METRICS: [Metric; 5] = [
    Metric::Engagement,
    Metric::Readiness,
    Metric::RedeploymentScore,
    Metric::LeadershipPotential,
    Metric::TotalCompensation,
];

#[derive(serde::Serialize)]
struct Report<'a> {
    summary:    WorkforceSummary,
    dimension:  Dimension,
    groups:     Vec<GroupSummary>,
    skills:     Vec<SkillSummary>,
    top:        Vec<RankedEmployee>,
    top_metric: Metric,
    skipped:    &'a [SkippedRow],
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let synthetic_size = parse_arg(&args, "--synthetic", 0usize);
    let top = parse_arg(&args, "--top", 10usize);
    let json = args.iter().any(|a| a == "--json");
    let input = string_arg(&args, "--input");
    let export = string_arg(&args, "--export");

    let config = match string_arg(&args, "--config") {
        Some(path) => AnalyticsConfig::load(path).with_context(|| format!("loading config {path}"))?,
        None => AnalyticsConfig::builtin(),
    };

    let dimension_raw = string_arg(&args, "--group").unwrap_or("department");
    let Some(dimension) = Dimension::parse(dimension_raw) else {
        bail!("unknown --group '{dimension_raw}' (department|role|skill|location)");
    };
    let top_metric_raw = string_arg(&args, "--rank-by").unwrap_or("redeployment_score");
    let Some(top_metric) = Metric::parse(top_metric_raw) else {
        bail!("unknown --rank-by '{top_metric_raw}'");
    };

    let mut filter = ProfileFilter::all();
    if let Some(unit) = string_arg(&args, "--unit") {
        filter = filter.business_unit(unit);
    }
    if let Some(location) = string_arg(&args, "--location") {
        filter = filter.location(location);
    }

    if let Some(path) = export {
        if synthetic_size == 0 {
            bail!("--export needs --synthetic N");
        }
        let records = SyntheticWorkforce::generate(seed, synthetic_size, &config);
        let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
        loader::write_records(&records, file)?;
        println!("Wrote {} synthetic employees to {path}", records.len());
        return Ok(());
    }

    let engine = match (input, synthetic_size) {
        (Some(path), _) => WorkforceEngine::from_csv_path(path, config)
            .with_context(|| format!("loading {path}"))?,
        (None, n) if n > 0 => WorkforceEngine::synthetic(seed, n, config),
        _ => bail!("either --input FILE or --synthetic N is required"),
    };

    let report = Report {
        summary: engine.summary(&filter),
        dimension,
        groups: engine.group_by(&filter, dimension, &GROUP_METRICS),
        skills: engine.skill_rollups(&filter),
        top: engine.top_n(&filter, top_metric, top),
        top_metric,
        skipped: engine.skipped_rows(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &Report<'_>) {
    let s = &report.summary;
    println!("=== WORKFORCE SUMMARY ===");
    println!("  headcount:          {}", s.headcount);
    println!("  people managers:    {}", s.managers);
    println!("  avg engagement:     {:.1}", s.average_engagement);
    println!("  avg readiness:      {:.1}", s.average_readiness);
    println!("  avg redeployment:   {:.1}", s.average_redeployment);
    println!("  high flight risk:   {} ({}%)", s.high_flight_risk_count, s.high_flight_risk_pct);
    println!("  annual cost:        {:.0} {}", s.total_annual_cost, s.reporting_currency);
    println!("  readiness:");
    for bucket in &s.readiness_distribution {
        println!("    {:>7}: {}", bucket.label, bucket.count);
    }

    println!();
    println!("=== BY {:?} ===", report.dimension);
    for g in &report.groups {
        let engagement = g.averages.get(&Metric::Engagement).copied().unwrap_or(0.0);
        let redeploy = g.averages.get(&Metric::RedeploymentScore).copied().unwrap_or(0.0);
        println!(
            "  {:<32} n={:<4} share={:>3}% eng={:>5.1} redeploy={:>5.1}",
            g.label, g.employee_count, g.share_pct, engagement, redeploy
        );
    }

    println!();
    println!("=== TOP SKILLS ===");
    for skill in report.skills.iter().take(10) {
        println!(
            "  {:<28} holders={:<4} coverage={:>3}% avg={:.1} verified={}%",
            skill.skill_name, skill.holder_count, skill.coverage_pct, skill.average_proficiency, skill.verified_pct
        );
    }

    println!();
    println!("=== TOP {} BY {:?} ===", report.top.len(), report.top_metric);
    for r in &report.top {
        println!("  {:>3}. {:<24} {:>8.1}  ({})", r.rank, r.name, r.value, r.employee_id);
    }

    if !report.skipped.is_empty() {
        println!();
        println!("=== SKIPPED ROWS ({}) ===", report.skipped.len());
        for row in report.skipped {
            println!("  line {}: {}", row.line, row.reason);
        }
    }
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
