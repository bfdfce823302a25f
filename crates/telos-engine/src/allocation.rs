//! Asset allocation
//!
//! Banking and stocks are fixed linear blends of the three score
//! percentages. Private is never computed from a formula: it is the
//! remainder that brings the allocation to exactly 100.
//!
//! ```text
//! banking = round(b_s * S + b_l * L + b_r * R)
//! stocks  = round(k_s * S + k_l * L + k_r * R)
//! private = 100 - banking - stocks
//! ```

use crate::error::ConfigError;
use crate::reconcile::remainder_of_hundred;
use crate::types::{AssetAllocation, Category, ScorePercentages};
use serde::{Deserialize, Serialize};

/// Largest banking + stocks weight any single category may carry
///
/// Percentages can sum to 101. With every column at or below 99/101 the raw
/// banking + stocks stays at or below 99, and two roundings add at most 1,
/// so the private remainder is never negative.
pub const MAX_COLUMN_WEIGHT: f64 = 99.0 / 101.0;

/// Per-category coefficients for one asset class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    /// Coefficient on the stability percentage
    pub stability: f64,
    /// Coefficient on the liquidity percentage
    pub liquidity: f64,
    /// Coefficient on the return percentage
    #[serde(rename = "return")]
    pub return_weight: f64,
}

impl CategoryWeights {
    /// Create coefficients
    #[inline]
    #[must_use]
    pub const fn new(stability: f64, liquidity: f64, return_weight: f64) -> Self {
        Self {
            stability,
            liquidity,
            return_weight,
        }
    }

    /// Coefficient for one category
    #[must_use]
    pub const fn get(&self, category: Category) -> f64 {
        match category {
            Category::Stability => self.stability,
            Category::Liquidity => self.liquidity,
            Category::Return => self.return_weight,
        }
    }

    /// Weighted sum of the percentages
    #[must_use]
    pub fn apply(&self, pct: &ScorePercentages) -> f64 {
        Category::ALL
            .into_iter()
            .map(|c| self.get(c) * f64::from(pct.get(c)))
            .sum()
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct AllocationWeightsDef {
    banking: CategoryWeights,
    stocks: CategoryWeights,
}

impl Default for AllocationWeightsDef {
    fn default() -> Self {
        let w = AllocationWeights::default();
        Self {
            banking: w.banking,
            stocks: w.stocks,
        }
    }
}

impl TryFrom<AllocationWeightsDef> for AllocationWeights {
    type Error = ConfigError;

    fn try_from(def: AllocationWeightsDef) -> Result<Self, Self::Error> {
        AllocationWeights::new(def.banking, def.stocks)
    }
}

/// Validated banking and stocks coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AllocationWeightsDef")]
pub struct AllocationWeights {
    banking: CategoryWeights,
    stocks: CategoryWeights,
}

impl Default for AllocationWeights {
    /// Stability and liquidity lean banking, return leans stocks
    fn default() -> Self {
        Self {
            banking: CategoryWeights::new(0.7, 0.5, 0.0),
            stocks: CategoryWeights::new(0.0, 0.1, 0.8),
        }
    }
}

impl AllocationWeights {
    /// Validate coefficients
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidWeight`] for a negative or non-finite
    /// coefficient, or [`ConfigError::ColumnOverflow`] when a category's
    /// banking + stocks coefficients exceed [`MAX_COLUMN_WEIGHT`].
    pub fn new(banking: CategoryWeights, stocks: CategoryWeights) -> Result<Self, ConfigError> {
        for (bucket, weights) in [("banking", &banking), ("stocks", &stocks)] {
            for category in Category::ALL {
                let value = weights.get(category);
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidWeight {
                        bucket,
                        category,
                        value,
                    });
                }
            }
        }
        for category in Category::ALL {
            let sum = banking.get(category) + stocks.get(category);
            if sum > MAX_COLUMN_WEIGHT {
                return Err(ConfigError::ColumnOverflow {
                    category,
                    sum,
                    max: MAX_COLUMN_WEIGHT,
                });
            }
        }
        Ok(Self { banking, stocks })
    }

    /// Banking coefficients
    #[inline]
    #[must_use]
    pub const fn banking(&self) -> &CategoryWeights {
        &self.banking
    }

    /// Stocks coefficients
    #[inline]
    #[must_use]
    pub const fn stocks(&self) -> &CategoryWeights {
        &self.stocks
    }
}

/// Derive the three-way allocation from score percentages
///
/// Banking and stocks are rounded half away from zero; private is reconciled
/// as `100 - banking - stocks`.
///
/// # Panics
/// Never for weights built through [`AllocationWeights::new`] and
/// percentages summing to at most 101, which every [`ScorePercentages`]
/// guarantees.
#[must_use]
pub fn compute_asset_allocation(pct: &ScorePercentages, weights: &AllocationWeights) -> AssetAllocation {
    let banking = round_share(weights.banking.apply(pct));
    let stocks = round_share(weights.stocks.apply(pct));
    let private = match remainder_of_hundred(&[banking, stocks]) {
        Ok(rest) => rest,
        Err(e) => unreachable!("column bound keeps banking + stocks within 100: {e}"),
    };
    AssetAllocation::from_parts(banking, private, stocks)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_share(raw: f64) -> u32 {
    raw.round() as u32
}
