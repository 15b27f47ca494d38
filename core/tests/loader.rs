//! CSV ingestion: column mapping, defaults and skipped rows.

use workforce_core::{
    config::AnalyticsConfig,
    engine::WorkforceEngine,
    error::WorkforceError,
    loader::{load_records, write_records},
    model::{
        EmploymentType, LeadershipFlag, PerformanceRating, ValidationSource, NEUTRAL_ENGAGEMENT,
        NEUTRAL_READINESS,
    },
    synthetic::SyntheticWorkforce,
};

const HEADER: &str = "employee_id,name,role_id,role_name,business_unit,location,employment_type,hire_date,\
tenure_months,performance_rating,engagement_score,flight_risk_score,leadership_flag,manager_id,\
readiness_score,target_role,skill1_id,skill1_name,skill1_proficiency,skill1_source,skill1_validated";

fn csv(rows: &[&str]) -> String {
    let mut out = String::from(HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out
}

#[test]
fn full_row_maps_every_column() {
    let config = AnalyticsConfig::builtin();
    let data = csv(&[
        "E1,Ana Costa,SWE-3,Senior Software Engineer,Engineering,Berlin,Full-Time,2020-03-15,58,Exceeds,82,15,People Manager,M9,77,Staff Engineer,py,Python,4,Assessment,2024-10-01",
    ]);
    let report = load_records(data.as_bytes(), &config).expect("load");
    assert!(report.skipped.is_empty());

    let record = &report.records[0];
    assert_eq!(record.employee.employee_id, "E1");
    assert_eq!(record.employee.location, "Berlin");
    assert_eq!(record.employee.employment_type, EmploymentType::FullTime);
    assert_eq!(record.employee.tenure_months, 58);
    assert_eq!(record.employee.manager_id.as_deref(), Some("M9"));
    assert_eq!(record.employee.leadership, LeadershipFlag::PeopleManager);
    assert_eq!(record.performance.rating, PerformanceRating::Exceeds);
    assert_eq!(record.performance.engagement_score, 82.0);
    assert_eq!(record.readiness.readiness_score, 77.0);
    assert_eq!(record.readiness.target_role.as_deref(), Some("Staff Engineer"));

    let skill = &record.skills[0];
    assert_eq!(skill.skill_id, "py");
    assert_eq!(skill.proficiency, 4);
    assert_eq!(skill.source, ValidationSource::Assessment);
}

#[test]
fn rows_without_id_or_name_are_skipped() {
    let config = AnalyticsConfig::builtin();
    let data = csv(&[
        "E1,Ana Costa,SWE-2,Software Engineer,Engineering,Austin,,,,,,,,,,,,,,,",
        ",No Id,SWE-2,Software Engineer,Engineering,Austin,,,,,,,,,,,,,,,",
        "E3,,SWE-2,Software Engineer,Engineering,Austin,,,,,,,,,,,,,,,",
        "E4,Bo Lind,SWE-2,Software Engineer,Engineering,Austin,,,,,,,,,,,,,,,",
    ]);
    let report = load_records(data.as_bytes(), &config).expect("load");

    let ids: Vec<&str> = report.records.iter().map(|r| r.employee.employee_id.as_str()).collect();
    assert_eq!(ids, vec!["E1", "E4"]);
    assert_eq!(report.skipped.len(), 2);
    assert!(report.skipped[0].reason.contains("employee_id"));
    assert!(report.skipped[1].reason.contains("name"));
}

#[test]
fn blank_cells_fall_back_to_neutral_defaults() {
    let config = AnalyticsConfig::builtin();
    let data = csv(&["E1,Ana Costa,SWE-2,Software Engineer,Engineering,Austin,,2022-07-01,,,abc,,,,,,,Git,,,"]);
    let report = load_records(data.as_bytes(), &config).expect("load");
    let record = &report.records[0];

    assert_eq!(record.performance.rating, PerformanceRating::Meets);
    assert_eq!(record.performance.engagement_score, NEUTRAL_ENGAGEMENT);
    assert_eq!(record.readiness.readiness_score, NEUTRAL_READINESS);
    assert_eq!(record.employee.leadership, LeadershipFlag::IndividualContributor);
    assert_eq!(record.employee.manager_id, None);
    // Tenure from hire date to the 2025-01-01 reference date.
    assert_eq!(record.employee.tenure_months, 30);

    let skill = &record.skills[0];
    assert_eq!(skill.skill_id, "git");
    assert_eq!(skill.proficiency, 1);
    assert_eq!(skill.source, ValidationSource::Inferred);
}

#[test]
fn out_of_range_scores_are_clamped_on_load() {
    let config = AnalyticsConfig::builtin();
    let data = csv(&["E1,Ana Costa,SWE-2,Software Engineer,Engineering,Austin,,,12,,140,-5,,,250,,,,,,"]);
    let record = &load_records(data.as_bytes(), &config).expect("load").records[0];

    assert_eq!(record.performance.engagement_score, 100.0);
    assert_eq!(record.performance.flight_risk_score, 0.0);
    assert_eq!(record.readiness.readiness_score, 100.0);
}

#[test]
fn empty_input_is_missing_header() {
    let config = AnalyticsConfig::builtin();
    let err = load_records("".as_bytes(), &config).expect_err("no header");
    assert!(matches!(err, WorkforceError::MissingHeader), "got {err:?}");
}

#[test]
fn exported_synthetic_workforce_loads_back() {
    let config = AnalyticsConfig::builtin();
    let records = SyntheticWorkforce::generate(21, 40, &config);

    let mut buffer = Vec::new();
    write_records(&records, &mut buffer).expect("write");
    let report = load_records(buffer.as_slice(), &config).expect("reload");

    assert!(report.skipped.is_empty());
    assert_eq!(report.records.len(), records.len());

    let direct = WorkforceEngine::new(records, config.clone());
    let reloaded = WorkforceEngine::new(report.records, config);
    for profile in direct.profiles() {
        let other = reloaded.profile(profile.id()).expect("reloaded profile");
        assert_eq!(profile.skills, other.skills, "{} skills changed through CSV", profile.id());
        assert_eq!(profile.cost, other.cost, "{} cost changed through CSV", profile.id());
    }
}
