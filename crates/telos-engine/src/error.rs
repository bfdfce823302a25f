//! Error types for the scoring engine
//!
//! Provides error handling for:
//! - Answer set validation at the construction boundary
//! - Engine configuration (allocation weights, reference triangle)
//! - Remainder reconciliation

use crate::types::Category;
use std::path::PathBuf;

/// Main engine error type
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Input failed validation
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration is invalid or unreadable
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Rejected engine input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Answer sequence has the wrong number of entries
    #[error("expected {expected} answers, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    /// Answer outside the closed answer range
    #[error("answer {value} at position {index} is outside {min}..={max}")]
    OutOfRange {
        index: usize,
        value: u8,
        min: u8,
        max: u8,
    },

    /// Text token could not be read as an answer
    #[error("cannot parse answer token {token:?}")]
    Parse { token: String },

    /// Category sum outside what five answers can produce
    #[error("{category} total {value} is outside {min}..={max}")]
    TotalOutOfRange {
        category: Category,
        value: u32,
        min: u32,
        max: u32,
    },

    /// Single share above 100
    #[error("{category} share {value}% exceeds 100%")]
    PercentageOutOfRange { category: Category, value: u32 },

    /// Percentages drift further than independent rounding allows
    #[error("percentages sum to {sum}, expected 99..=101")]
    PercentageSum { sum: u32 },
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Weight is negative or not finite
    #[error("invalid {bucket} weight for {category}: {value}")]
    InvalidWeight {
        bucket: &'static str,
        category: Category,
        value: f64,
    },

    /// Banking and stocks weights for one category leave no room for the remainder
    #[error("banking + stocks weight for {category} is {sum}, max {max}")]
    ColumnOverflow {
        category: Category,
        sum: f64,
        max: f64,
    },

    /// Reference triangle vertices are collinear or not finite
    #[error("reference triangle is degenerate (area {area})")]
    DegenerateTriangle { area: f64 },

    /// Containment tolerance is negative or not finite
    #[error("invalid containment tolerance: {0}")]
    InvalidTolerance(f64),

    /// Config text is malformed
    #[error("cannot parse config: {0}")]
    Parse(String),

    /// Config file could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reconciliation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    /// Computed parts already exceed the target total
    #[error("computed parts sum to {computed}, exceeding total {total}")]
    Overflow { computed: u32, total: u32 },
}
