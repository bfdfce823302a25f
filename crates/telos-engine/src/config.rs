//! Engine configuration
//!
//! Everything tunable about a scoring pass lives here: the reference
//! triangle and the allocation coefficients. Both validate while
//! deserializing, so a loaded config is always usable.
//!
//! ```toml
//! [triangle]
//! stability = { x = 200.0, y = 30.0 }
//! liquidity = { x = 30.0, y = 320.0 }
//! return = { x = 370.0, y = 320.0 }
//! tolerance = 0.02
//!
//! [allocation]
//! banking = { stability = 0.7, liquidity = 0.5, return = 0.0 }
//! stocks = { stability = 0.0, liquidity = 0.1, return = 0.8 }
//! ```

use crate::allocation::AllocationWeights;
use crate::error::ConfigError;
use crate::triangle::ReferenceTriangle;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scoring configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Triangle the position is drawn in
    pub triangle: ReferenceTriangle,
    /// Banking and stocks coefficients
    pub allocation: AllocationWeights,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different reference triangle
    #[inline]
    #[must_use]
    pub fn with_triangle(mut self, triangle: ReferenceTriangle) -> Self {
        self.triangle = triangle;
        self
    }

    /// With different allocation coefficients
    #[inline]
    #[must_use]
    pub fn with_allocation(mut self, allocation: AllocationWeights) -> Self {
        self.allocation = allocation;
        self
    }

    /// Parse from TOML text; omitted sections keep their defaults
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed TOML or values that fail
    /// validation.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Serialize to TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
