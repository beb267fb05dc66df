//! Built-up area value object (square feet).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A built-up area in square feet.
///
/// Construction never fails: negative, NaN and infinite input collapse to
/// zero so that downstream arithmetic can never produce NaN.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Area(f64);

impl Area {
    /// Zero area.
    pub const ZERO: Self = Self(0.0);

    /// Creates an area, normalizing invalid input to zero.
    pub fn new(sq_ft: f64) -> Self {
        if sq_ft.is_finite() && sq_ft > 0.0 {
            Self(sq_ft)
        } else {
            Self::ZERO
        }
    }

    /// Parses user text input, treating anything non-numeric as zero.
    pub fn parse_lenient(input: &str) -> Self {
        input.trim().parse::<f64>().map(Self::new).unwrap_or(Self::ZERO)
    }

    /// Returns the area in square feet.
    pub fn sq_ft(&self) -> f64 {
        self.0
    }

    /// Returns true when the area is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }
}

impl Default for Area {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for Area {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Area> for f64 {
    fn from(area: Area) -> Self {
        area.0
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sq.ft", self.0)
    }
}
