use pretty_assertions::assert_eq;
use telos_engine::{AllocationWeights, CategoryWeights, EngineConfig, Point, ReferenceTriangle};
use telos_harness::{run_batched, run_session, run_simulator, HarnessError, RunOutcome, SimulatorConfig};

#[test]
fn test_default_hundred_runs_pass() {
    let report = run_simulator(SimulatorConfig::default());
    assert_eq!(report.total(), 100);
    assert!(report.passed(), "{}", report.generate_text());
    assert_eq!(report.failed_count(), 0);
    assert!((report.pass_rate() - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_seed_determinism() {
    let config = SimulatorConfig::default().with_seed(12345).with_runs(50);
    let a = run_simulator(config);
    let b = run_simulator(config);
    assert_eq!(a, b);

    let other = run_simulator(config.with_seed(54321));
    assert_ne!(a.results[0].answers, other.results[0].answers);
}

#[test]
fn test_many_seeds_pass() {
    for seed in 0..20 {
        let report = run_simulator(SimulatorConfig::default().with_seed(seed).with_runs(50));
        assert!(report.passed(), "seed {seed}:\n{}", report.generate_text());
    }
}

#[test]
fn test_runs_are_numbered_in_order() {
    let report = run_simulator(SimulatorConfig::default().with_runs(25));
    let numbers: Vec<usize> = report.results.iter().map(|r| r.run).collect();
    assert_eq!(numbers, (1..=25).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_batched_matches_sequential() {
    let config = SimulatorConfig::default().with_seed(7).with_runs(35).with_batch_size(10);
    let sequential = run_simulator(config);
    let batched = run_batched(config).await.unwrap();
    assert_eq!(batched, sequential);
}

#[tokio::test]
async fn test_batch_size_does_not_change_results() {
    let base = SimulatorConfig::default().with_runs(30);
    let ones = run_batched(base.with_batch_size(1)).await.unwrap();
    let all = run_batched(base.with_batch_size(30)).await.unwrap();
    assert_eq!(ones.results, all.results);
}

#[tokio::test]
async fn test_zero_batch_size_rejected() {
    let err = run_batched(SimulatorConfig::default().with_batch_size(0)).await.unwrap_err();
    assert!(matches!(err, HarnessError::InvalidBatchSize));
}

#[test]
fn test_distribution_covers_passed_runs() {
    let report = run_simulator(SimulatorConfig::default());
    let dist = report.distribution().unwrap();
    for spread in [dist.stability, dist.liquidity, dist.return_score] {
        assert!(spread.min <= spread.max);
        assert!(f64::from(spread.min) <= spread.avg && spread.avg <= f64::from(spread.max));
    }
    let text = report.generate_text();
    assert!(text.contains("=== Score Distribution ==="));
    assert!(text.contains("=== Result: PASS ==="));
    assert!(!text.contains("=== Failed Runs ==="));
}

#[test]
fn test_failed_run_is_listed() {
    let config = SimulatorConfig::default();
    let mut answers = [3; 15];
    answers[0] = 0;
    let failed = run_session(1, answers, &config);
    assert!(matches!(failed.outcome, RunOutcome::Errored { .. }));

    let mut report = run_simulator(config.with_runs(3));
    report.results.push(failed);
    assert!(!report.passed());
    assert_eq!(report.failed_count(), 1);

    let text = report.generate_text();
    assert!(text.contains("=== Failed Runs ==="));
    assert!(text.contains("Answers: [0, 3, 3"));
    assert!(text.contains("Error: wizard step failed"));
    assert!(text.contains("=== Result: FAIL ==="));
}

#[test]
fn test_json_report() {
    let report = run_simulator(SimulatorConfig::default().with_runs(10));
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["runs"], 10);
    assert_eq!(json["passed"], 10);
    assert_eq!(json["result"], "PASS");
    assert!(json["failures"].as_array().unwrap().is_empty());
    assert!(json["distribution"]["return"]["avg"].is_f64());
}

#[test]
fn test_custom_weights_still_allocate_hundred() {
    let allocation = AllocationWeights::new(CategoryWeights::new(0.9, 0.2, 0.1), CategoryWeights::new(0.05, 0.3, 0.7))
        .unwrap();
    let engine = EngineConfig::default().with_allocation(allocation);
    let report = run_simulator(SimulatorConfig::default().with_engine(engine));
    assert!(report.passed(), "{}", report.generate_text());
}

#[test]
fn test_zero_tolerance_still_passes() {
    // Engine and expectation round identically
    let report = run_simulator(SimulatorConfig::default().with_score_tolerance(0));
    assert!(report.passed(), "{}", report.generate_text());
}

#[test]
fn test_triangle_far_from_origin_passes() {
    let triangle = ReferenceTriangle::new(
        Point::new(10_000.0, 10_000.0),
        Point::new(9_990.0, 10_020.0),
        Point::new(10_010.0, 10_020.0),
    )
    .unwrap();
    let engine = EngineConfig::new().with_triangle(triangle);
    let report = run_simulator(SimulatorConfig::default().with_engine(engine));
    assert_eq!(report.passed_count(), 100, "{}", report.generate_text());
}
