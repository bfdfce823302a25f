use proptest::prelude::*;
use telos_engine::prelude::*;
use telos_engine::{compute_asset_allocation, AllocationWeights, Point};
use telos_test_utils::{answer_set, score_percentages};

proptest! {
    #[test]
    fn prop_totals_partition_answer_sum(answers in answer_set()) {
        let totals = compute_category_totals(&answers);
        for category in Category::ALL {
            let sum = totals.get(category);
            prop_assert!((5..=25).contains(&sum));
        }
        prop_assert_eq!(totals.grand_total(), answers.sum());
    }

    #[test]
    fn prop_percentages_drift_at_most_one(answers in answer_set()) {
        let pct = compute_score_percentages(&compute_category_totals(&answers));
        for category in Category::ALL {
            prop_assert!(pct.get(category) <= 100);
        }
        prop_assert!((99..=101).contains(&pct.sum()));
    }

    #[test]
    fn prop_allocation_sums_to_exactly_100(pct in score_percentages()) {
        let alloc = compute_asset_allocation(&pct, &AllocationWeights::default());
        prop_assert_eq!(alloc.sum(), 100);
        prop_assert!(alloc.banking_pct() <= 100);
        prop_assert!(alloc.private_pct() <= 100);
        prop_assert!(alloc.stocks_pct() <= 100);
    }

    #[test]
    fn prop_position_stays_inside_triangle(answers in answer_set()) {
        let triangle = ReferenceTriangle::default();
        let pct = compute_score_percentages(&compute_category_totals(&answers));
        let position = compute_triangle_position(&pct, &triangle);

        prop_assert!((position.weights.sum() - 1.0).abs() <= 0.01 + 1e-9);
        prop_assert!(triangle.contains_position(&position));
    }

    #[test]
    fn prop_position_inside_offset_triangle(
        answers in answer_set(),
        dx in -50_000.0f64..50_000.0,
        dy in -50_000.0f64..50_000.0,
        scale in 0.05f64..20.0,
    ) {
        let corner = |x: f64, y: f64| Point::new(dx + x * scale, dy + y * scale);
        let triangle = ReferenceTriangle::new(corner(200.0, 30.0), corner(30.0, 320.0), corner(370.0, 320.0)).unwrap();
        let config = EngineConfig::new().with_triangle(triangle);
        let assessment = assess(&answers, &config);

        prop_assert!(config.triangle.contains_position(&assessment.position));
    }

    #[test]
    fn prop_assess_is_deterministic(answers in answer_set()) {
        let config = EngineConfig::default();
        prop_assert_eq!(assess(&answers, &config), assess(&answers, &config));
    }
}
