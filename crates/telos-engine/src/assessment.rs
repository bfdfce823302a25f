//! Full scoring pass
//!
//! Consumes one [`AnswerSet`] and produces every derived value in one
//! [`Assessment`].

use crate::allocation::compute_asset_allocation;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::scoring::{compute_category_totals, compute_score_percentages};
use crate::triangle::{compute_triangle_position, TrianglePosition};
use crate::types::{AnswerSet, AssetAllocation, CategoryTotals, ScorePercentages};
use serde::Serialize;
use std::fmt;

/// Everything derived from one answer set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assessment {
    /// The scored answers
    pub answers: AnswerSet,
    /// Per-category sums
    pub totals: CategoryTotals,
    /// Rounded category shares
    pub percentages: ScorePercentages,
    /// Point inside the reference triangle
    pub position: TrianglePosition,
    /// Reconciled three-way allocation
    pub allocation: AssetAllocation,
}

impl Assessment {
    /// Validate raw answers, then score them
    ///
    /// # Errors
    /// Returns [`EngineError::Validation`] if the answers are not fifteen
    /// values in `1..=5`.
    pub fn from_raw(raw: &[u8], config: &EngineConfig) -> Result<Self, EngineError> {
        let answers = AnswerSet::new(raw)?;
        Ok(assess(&answers, config))
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}; {}", self.answers, self.percentages, self.allocation)
    }
}

/// Run totals, percentages, triangle position and allocation in order
#[must_use]
pub fn assess(answers: &AnswerSet, config: &EngineConfig) -> Assessment {
    let totals = compute_category_totals(answers);
    tracing::debug!(
        stability_sum = totals.stability_sum(),
        liquidity_sum = totals.liquidity_sum(),
        return_sum = totals.return_sum(),
        "Category totals"
    );

    let percentages = compute_score_percentages(&totals);
    tracing::debug!(sum = percentages.sum(), "Score percentages: {}", percentages);

    let position = compute_triangle_position(&percentages, &config.triangle);
    tracing::debug!(x = position.point.x, y = position.point.y, "Triangle position");

    let allocation = compute_asset_allocation(&percentages, &config.allocation);
    tracing::debug!("Asset allocation: {}", allocation);

    Assessment {
        answers: *answers,
        totals,
        percentages,
        position,
        allocation,
    }
}
