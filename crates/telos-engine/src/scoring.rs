//! Answer aggregation and percentage scoring

use crate::types::{AnswerSet, Category, CategoryTotals, ScorePercentages};

/// Sum each category's five answers
#[must_use]
pub fn compute_category_totals(answers: &AnswerSet) -> CategoryTotals {
    let [stability, liquidity, ret] =
        Category::ALL.map(|c| answers.category(c).iter().map(|&v| u32::from(v)).sum::<u32>());
    CategoryTotals::from_parts(stability, liquidity, ret)
}

/// Each category's share of the grand total, rounded on its own
///
/// Rounding is half away from zero on `sum / total * 100` evaluated in `f64`.
/// The three results are not renormalized, so their sum is 99, 100 or 101.
#[must_use]
pub fn compute_score_percentages(totals: &CategoryTotals) -> ScorePercentages {
    // CategoryTotals guarantees total >= 15
    let total = totals.grand_total();
    let [stability, liquidity, ret] = Category::ALL.map(|c| share_of(totals.get(c), total));
    ScorePercentages::from_parts(stability, liquidity, ret)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn share_of(part: u32, total: u32) -> u32 {
    (f64::from(part) / f64::from(total) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_slice_contiguous_groups() {
        let answers = AnswerSet::new(&[1, 2, 3, 4, 5, 5, 5, 5, 5, 5, 1, 1, 1, 1, 2]).unwrap();
        let totals = compute_category_totals(&answers);
        assert_eq!(totals.stability_sum(), 15);
        assert_eq!(totals.liquidity_sum(), 25);
        assert_eq!(totals.return_sum(), 6);
        assert_eq!(totals.grand_total(), answers.sum());
    }

    #[test]
    fn half_rounds_away_from_zero() {
        // 5 / 40 * 100 = 12.5 exactly
        assert_eq!(share_of(5, 40), 13);
        // 15 / 40 * 100 = 37.5 exactly
        assert_eq!(share_of(15, 40), 38);
        assert_eq!(share_of(15, 45), 33);
    }

    #[test]
    fn uniform_answers_drift_to_99() {
        for value in 1..=5 {
            let answers = AnswerSet::uniform(value).unwrap();
            let pct = compute_score_percentages(&compute_category_totals(&answers));
            assert_eq!(pct.stability_pct(), 33);
            assert_eq!(pct.liquidity_pct(), 33);
            assert_eq!(pct.return_pct(), 33);
            assert_eq!(pct.sum(), 99);
        }
    }

    #[test]
    fn drift_can_reach_101() {
        // 20/40 = 50, 10/40 = 25, but 5/40 = 12.5 -> 13 and 15/40 = 37.5 -> 38
        let totals = CategoryTotals::new(15, 5, 20).unwrap();
        let pct = compute_score_percentages(&totals);
        assert_eq!((pct.stability_pct(), pct.liquidity_pct(), pct.return_pct()), (38, 13, 50));
        assert_eq!(pct.sum(), 101);
    }
}
