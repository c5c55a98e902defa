//! Floor-field configuration and validation.
//!
//! [`FieldConfig`] carries the scalar parameters the solvers need. It is
//! validated once when an [`ExitSet`](crate::ExitSet) is created.

use std::error::Error;
use std::fmt;

/// Weight of a diagonal step in the static field. Default for
/// [`FieldConfig::diagonal_weight`].
pub const DEFAULT_DIAGONAL_WEIGHT: f64 = 1.5;

/// Parameters for static, dynamic and final field computation.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    /// Congestion-avoidance coefficient: final = static + alfa * dynamic.
    /// Must be finite and non-negative. Default: 0.0.
    pub alfa: f64,
    /// Cost of a diagonal step relative to an orthogonal step of 1.0.
    /// Must be finite and greater than 1.0. Default: 1.5.
    pub diagonal_weight: f64,
    /// Upper bound on relaxation sweeps per static solve. `None` runs to
    /// the fixpoint. Default: `None`.
    pub max_sweeps: Option<u32>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            alfa: 0.0,
            diagonal_weight: DEFAULT_DIAGONAL_WEIGHT,
            max_sweeps: None,
        }
    }
}

impl FieldConfig {
    /// Set the congestion-avoidance coefficient.
    pub fn with_alfa(mut self, alfa: f64) -> Self {
        self.alfa = alfa;
        self
    }

    /// Set the diagonal step weight.
    pub fn with_diagonal_weight(mut self, weight: f64) -> Self {
        self.diagonal_weight = weight;
        self
    }

    /// Cap the number of relaxation sweeps per static solve.
    pub fn with_max_sweeps(mut self, limit: u32) -> Self {
        self.max_sweeps = Some(limit);
        self
    }

    /// Validate all parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.alfa.is_finite() || self.alfa < 0.0 {
            return Err(ConfigError::InvalidAlfa { value: self.alfa });
        }
        if !self.diagonal_weight.is_finite() || self.diagonal_weight <= 1.0 {
            return Err(ConfigError::InvalidDiagonalWeight {
                value: self.diagonal_weight,
            });
        }
        if self.max_sweeps == Some(0) {
            return Err(ConfigError::ZeroSweepLimit);
        }
        Ok(())
    }
}

/// Errors detected by [`FieldConfig::validate`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// alfa is NaN, infinite, or negative.
    InvalidAlfa {
        /// The invalid value.
        value: f64,
    },
    /// diagonal_weight is NaN, infinite, or not greater than 1.0.
    InvalidDiagonalWeight {
        /// The invalid value.
        value: f64,
    },
    /// max_sweeps is `Some(0)`.
    ZeroSweepLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAlfa { value } => {
                write!(f, "alfa must be finite and non-negative, got {value}")
            }
            Self::InvalidDiagonalWeight { value } => {
                write!(f, "diagonal_weight must be finite and > 1.0, got {value}")
            }
            Self::ZeroSweepLimit => write!(f, "max_sweeps must be at least 1"),
        }
    }
}

impl Error for ConfigError {}
