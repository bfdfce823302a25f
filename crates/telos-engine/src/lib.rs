//! TELOS Scoring Engine (telos-engine)
//!
//! Pure functions from fifteen questionnaire answers to:
//! 1. **Category totals**: stability, liquidity and return sums
//! 2. **Score percentages**: each total's rounded share of the grand total
//! 3. **Triangle position**: barycentric weights and a Cartesian point
//! 4. **Asset allocation**: banking, private and stocks summing to 100
//!
//! # Quick Start
//!
//! ```rust
//! use telos_engine::prelude::*;
//!
//! let answers: AnswerSet = "3,3,3,3,3,3,3,3,3,3,3,3,3,3,3".parse()?;
//! let assessment = assess(&answers, &EngineConfig::default());
//!
//! assert_eq!(assessment.percentages.sum(), 99);
//! assert_eq!(assessment.allocation.sum(), 100);
//! # Ok::<(), telos_engine::ValidationError>(())
//! ```

pub mod allocation;
pub mod assessment;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod scoring;
pub mod triangle;
pub mod types;

pub use allocation::{compute_asset_allocation, AllocationWeights, CategoryWeights};
pub use assessment::{assess, Assessment};
pub use config::EngineConfig;
pub use error::{ConfigError, EngineError, ReconcileError, ValidationError};
pub use reconcile::reconcile_to_total;
pub use scoring::{compute_category_totals, compute_score_percentages};
pub use triangle::{
    compute_triangle_position, BarycentricWeights, Point, ReferenceTriangle, TrianglePosition, MAX_WEIGHT_DRIFT,
};
pub use types::*;

/// Common imports for scoring
pub mod prelude {
    pub use crate::{
        assess, compute_asset_allocation, compute_category_totals, compute_score_percentages,
        compute_triangle_position, AnswerSet, AssetAllocation, Assessment, Category, CategoryTotals,
        EngineConfig, ReferenceTriangle, ScorePercentages, TrianglePosition,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
