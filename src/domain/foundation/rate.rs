//! Unit rate value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A price per unit of material. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rate(f64);

impl Rate {
    /// A free item.
    pub const ZERO: Self = Self(0.0);

    /// Creates a rate, rejecting negative and non-finite values.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        ValidationError::check_non_negative("rate", value).map(Self)
    }

    /// Returns the rate as f64.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Rate {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Rate> for f64 {
    fn from(rate: Rate) -> Self {
        rate.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
