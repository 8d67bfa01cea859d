//! Query settings, optionally loaded from a TOML file:
//!
//! ```toml
//! scale = 1.0
//! lateral_margin = 0.5
//! containment = "corners"   # or "overlap"
//! ```

use crate::{
    containment::ContainmentMode,
    error::{RelationError, Result},
    halfspace::DEFAULT_LATERAL_MARGIN,
};
use noisy_float::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelationConfig {
    /// Scale factor used when a query does not name one.
    pub scale: f64,
    pub lateral_margin: f64,
    pub containment: ContainmentMode,
}

impl Default for RelationConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            lateral_margin: DEFAULT_LATERAL_MARGIN,
            containment: ContainmentMode::Corners,
        }
    }
}

impl RelationConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Fields are public, so queries re-check them before use.
    pub fn validate(&self) -> Result<()> {
        validate_scale(self.scale)?;
        validate_margin(self.lateral_margin)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml(&fs::read_to_string(path)?)
    }
}

/// Scale factors must be finite and non-negative.
pub fn validate_scale(scale: f64) -> Result<R64> {
    R64::try_new(scale)
        .filter(|s| s.raw() >= 0.0)
        .ok_or(RelationError::InvalidScale(scale))
}

/// A NaN or negative margin would shrink or poison the lateral ranges.
pub fn validate_margin(margin: f64) -> Result<R64> {
    R64::try_new(margin)
        .filter(|m| m.raw() >= 0.0)
        .ok_or(RelationError::InvalidMargin(margin))
}
