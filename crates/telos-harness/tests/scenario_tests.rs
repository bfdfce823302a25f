use pretty_assertions::assert_eq;
use telos_harness::{drive_session, run_navigation_scenario, run_sanity_flow};
use telos_engine::{EngineConfig, Point, ReferenceTriangle};
use telos_test_utils::default_config;

#[test]
fn test_navigation_scenario_passes() {
    let report = run_navigation_scenario(&default_config());
    assert!(report.passed(), "{}", report.generate_text());
    assert_eq!(report.failed_count(), 0);
    assert!(report.total() > 30);
}

#[test]
fn test_navigation_scenario_groups() {
    let report = run_navigation_scenario(&default_config());
    let mut groups: Vec<&str> = report.checks.iter().map(|c| c.group).collect();
    groups.dedup();
    assert_eq!(
        groups,
        vec![
            "Initial state",
            "Starting the assessment",
            "Partial answering",
            "Section navigation",
            "Backward navigation",
            "Completing all sections",
            "Results",
            "Retake",
            "Edge cases",
        ]
    );
}

#[test]
fn test_sanity_flow_has_fifteen_checks() {
    let report = run_sanity_flow(&default_config());
    assert_eq!(report.total(), 15);
    assert!(report.passed(), "{}", report.generate_text());
    assert!(report.generate_text().contains("Pass Rate: 100.0%"));
}

#[test]
fn test_report_json() {
    let report = run_sanity_flow(&default_config());
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["title"], "TELOS Sanity Flow");
    assert_eq!(json["checks"].as_array().unwrap().len(), 15);
}

#[test]
fn test_drive_session_renders_allocation() {
    let view = drive_session(&[5, 5, 5, 5, 5, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1], &default_config()).unwrap();
    assert_eq!(view.stability_score, "71%");
    assert_eq!(view.banking_percent, "57%");
    assert_eq!(view.private_percent, "30%");
    assert_eq!(view.stocks_percent, "13%");
}

#[test]
fn test_sanity_flow_with_offset_triangle() {
    let triangle = ReferenceTriangle::new(
        Point::new(10_000.0, 10_000.0),
        Point::new(9_990.0, 10_020.0),
        Point::new(10_010.0, 10_020.0),
    )
    .unwrap();
    let config = EngineConfig::new().with_triangle(triangle);
    let report = run_sanity_flow(&config);
    assert!(report.passed(), "{}", report.generate_text());
    assert!(run_navigation_scenario(&config).passed());
}
