//! CSV ingestion: one row per employee, header-driven.
//!
//! Expected columns (order irrelevant, names case-insensitive):
//!   employee_id, name, role_id, role_name, business_unit, location,
//!   employment_type, hire_date, tenure_months, performance_rating,
//!   engagement_score, flight_risk_score, leadership_flag, manager_id,
//!   readiness_score, target_role,
//!   skill{1..6}_id, skill{n}_name, skill{n}_proficiency, skill{n}_source,
//!   skill{n}_validated, skill{n}_trend (optional)
//!
//! Rows missing employee_id or name are skipped with a warning. Every other
//! unparsable cell falls back to its neutral default.

use crate::{
    config::AnalyticsConfig,
    error::{WorkforceError, WorkforceResult},
    model::{
        DemandTrend, Employee, EmployeeRecord, EmploymentType, LeadershipFlag, PerformanceMetrics,
        PerformanceRating, ReadinessAssessment, Skill, ValidationSource, NEUTRAL_ENGAGEMENT,
        NEUTRAL_FLIGHT_RISK, NEUTRAL_READINESS,
    },
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;

pub const MAX_SKILL_GROUPS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub line:   u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub records: Vec<EmployeeRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// Header name → column index.
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn new(headers: &csv::StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();
        Self { index }
    }

    fn get<'r>(&self, row: &'r csv::StringRecord, name: &str) -> Option<&'r str> {
        self.index
            .get(name)
            .and_then(|&i| row.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn string(&self, row: &csv::StringRecord, name: &str) -> String {
        self.get(row, name).unwrap_or_default().to_string()
    }

    fn number(&self, row: &csv::StringRecord, name: &str, default: f64) -> f64 {
        self.get(row, name)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(default)
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .ok()
}

/// Whole months from `start` to `end`, 0 if `start` is later.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if start > end {
        return 0;
    }
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    months.max(0) as u32
}

fn slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn parse_row(
    cols: &Columns,
    row: &csv::StringRecord,
    config: &AnalyticsConfig,
) -> Result<EmployeeRecord, String> {
    let employee_id = cols.get(row, "employee_id").ok_or("missing employee_id")?.to_string();
    let name = cols.get(row, "name").ok_or("missing name")?.to_string();

    let hire_date = cols.get(row, "hire_date").and_then(parse_date);
    let tenure_months = cols
        .get(row, "tenure_months")
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u32)
        .or_else(|| hire_date.map(|d| months_between(d, config.reference_date)))
        .unwrap_or(0);

    let employee = Employee {
        employee_id,
        name,
        role_id: cols.string(row, "role_id"),
        role_name: cols.string(row, "role_name"),
        business_unit: cols.string(row, "business_unit"),
        location: cols.string(row, "location"),
        employment_type: cols
            .get(row, "employment_type")
            .and_then(EmploymentType::parse)
            .unwrap_or_default(),
        hire_date,
        tenure_months,
        manager_id: cols.get(row, "manager_id").map(str::to_string),
        leadership: cols
            .get(row, "leadership_flag")
            .and_then(LeadershipFlag::parse)
            .unwrap_or_default(),
    };

    let performance = PerformanceMetrics {
        rating: cols
            .get(row, "performance_rating")
            .and_then(PerformanceRating::parse)
            .unwrap_or_default(),
        engagement_score: cols.number(row, "engagement_score", NEUTRAL_ENGAGEMENT),
        flight_risk_score: cols.number(row, "flight_risk_score", NEUTRAL_FLIGHT_RISK),
    }
    .sanitized();

    let readiness = ReadinessAssessment::new(
        cols.number(row, "readiness_score", NEUTRAL_READINESS),
        cols.get(row, "target_role").map(str::to_string),
    );

    let mut skills: Vec<Skill> = Vec::new();
    for n in 1..=MAX_SKILL_GROUPS {
        let Some(skill_name) = cols.get(row, &format!("skill{n}_name")) else {
            continue;
        };
        let skill_id = cols
            .get(row, &format!("skill{n}_id"))
            .map(str::to_string)
            .unwrap_or_else(|| slug(skill_name));
        if skills.iter().any(|s| s.skill_id == skill_id) {
            continue;
        }
        let proficiency = cols
            .get(row, &format!("skill{n}_proficiency"))
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .map(|v| v.round().clamp(0.0, u8::MAX as f64) as u8)
            .unwrap_or(1);
        skills.push(Skill {
            skill_id,
            name: skill_name.to_string(),
            proficiency,
            source: cols
                .get(row, &format!("skill{n}_source"))
                .and_then(ValidationSource::parse)
                .unwrap_or_default(),
            last_validated: cols.get(row, &format!("skill{n}_validated")).and_then(parse_date),
            demand_trend: cols
                .get(row, &format!("skill{n}_trend"))
                .and_then(DemandTrend::parse)
                .unwrap_or_default(),
        });
    }

    Ok(EmployeeRecord { employee, performance, readiness, skills })
}

/// Read every row. Only a missing header or an unreadable stream fails;
/// bad rows are recorded in `LoadReport::skipped`.
pub fn load_records<R: Read>(reader: R, config: &AnalyticsConfig) -> WorkforceResult<LoadReport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.is_empty() {
        return Err(WorkforceError::MissingHeader);
    }
    let cols = Columns::new(&headers);

    let mut report = LoadReport::default();
    for result in csv_reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                    return Err(e.into());
                }
                log::warn!("Skipping unreadable row at line {line}: {e}");
                report.skipped.push(SkippedRow { line, reason: e.to_string() });
                continue;
            }
        };
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        match parse_row(&cols, &row, config) {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                log::warn!("Skipping row at line {line}: {reason}");
                report.skipped.push(SkippedRow { line, reason });
            }
        }
    }

    log::info!(
        "Loaded {} employee records ({} skipped)",
        report.records.len(),
        report.skipped.len()
    );
    Ok(report)
}

pub fn load_records_from_path(path: &str, config: &AnalyticsConfig) -> WorkforceResult<LoadReport> {
    let file = std::fs::File::open(path)?;
    load_records(file, config)
}

fn rating_cell(rating: PerformanceRating) -> &'static str {
    match rating {
        PerformanceRating::Outstanding => "outstanding",
        PerformanceRating::Exceeds => "exceeds",
        PerformanceRating::Meets => "meets",
        PerformanceRating::NeedsImprovement => "needs_improvement",
    }
}

fn source_cell(source: ValidationSource) -> &'static str {
    match source {
        ValidationSource::Assessment => "assessment",
        ValidationSource::ProjectEvidence => "project_evidence",
        ValidationSource::Resume => "resume",
        ValidationSource::Inferred => "inferred",
    }
}

fn trend_cell(trend: DemandTrend) -> &'static str {
    match trend {
        DemandTrend::Rising => "rising",
        DemandTrend::Stable => "stable",
        DemandTrend::Declining => "declining",
    }
}

/// Write records in the layout `load_records` reads. Skills beyond the
/// sixth are dropped.
pub fn write_records<W: std::io::Write>(records: &[EmployeeRecord], writer: W) -> WorkforceResult<()> {
    let mut out = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = [
        "employee_id", "name", "role_id", "role_name", "business_unit", "location",
        "employment_type", "hire_date", "tenure_months", "performance_rating",
        "engagement_score", "flight_risk_score", "leadership_flag", "manager_id",
        "readiness_score", "target_role",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    for n in 1..=MAX_SKILL_GROUPS {
        for field in ["id", "name", "proficiency", "source", "validated", "trend"] {
            header.push(format!("skill{n}_{field}"));
        }
    }
    out.write_record(&header)?;

    for record in records {
        let e = &record.employee;
        let p = &record.performance;
        let mut row: Vec<String> = vec![
            e.employee_id.clone(),
            e.name.clone(),
            e.role_id.clone(),
            e.role_name.clone(),
            e.business_unit.clone(),
            e.location.clone(),
            format!("{:?}", e.employment_type),
            e.hire_date.map(|d| d.to_string()).unwrap_or_default(),
            e.tenure_months.to_string(),
            rating_cell(p.rating).to_string(),
            p.engagement_score.to_string(),
            p.flight_risk_score.to_string(),
            if e.leadership.is_manager() { "people_manager" } else { "individual_contributor" }.to_string(),
            e.manager_id.clone().unwrap_or_default(),
            record.readiness.readiness_score.to_string(),
            record.readiness.target_role.clone().unwrap_or_default(),
        ];
        for n in 0..MAX_SKILL_GROUPS {
            match record.skills.get(n) {
                Some(s) => row.extend([
                    s.skill_id.clone(),
                    s.name.clone(),
                    s.proficiency.to_string(),
                    source_cell(s.source).to_string(),
                    s.last_validated.map(|d| d.to_string()).unwrap_or_default(),
                    trend_cell(s.demand_trend).to_string(),
                ]),
                None => row.extend(std::iter::repeat(String::new()).take(6)),
            }
        }
        out.write_record(&row)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn whole_months_between_dates() {
        assert_eq!(months_between(date(2020, 1, 15), date(2025, 1, 1)), 59);
        assert_eq!(months_between(date(2024, 1, 1), date(2025, 1, 1)), 12);
        assert_eq!(months_between(date(2026, 1, 1), date(2025, 1, 1)), 0);
    }

    #[test]
    fn dates_accept_iso_and_us_formats() {
        assert_eq!(parse_date("2024-07-01"), Some(date(2024, 7, 1)));
        assert_eq!(parse_date("07/01/2024"), Some(date(2024, 7, 1)));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn slug_from_skill_name() {
        assert_eq!(slug("  Machine   Learning "), "machine-learning");
    }
}
