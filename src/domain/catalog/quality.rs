//! Quality grades and their rate multipliers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Construction quality tier. Scales every default rate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum QualityGrade {
    #[serde(alias = "budget")]
    Budget,
    #[default]
    #[serde(alias = "standard")]
    Standard,
    #[serde(alias = "premium")]
    Premium,
    #[serde(alias = "luxury")]
    Luxury,
}

impl QualityGrade {
    /// All grades, cheapest first.
    pub const ALL: [QualityGrade; 4] = [
        QualityGrade::Budget,
        QualityGrade::Standard,
        QualityGrade::Premium,
        QualityGrade::Luxury,
    ];

    /// Multiplier applied to a material's base rate.
    pub fn multiplier(&self) -> f64 {
        match self {
            QualityGrade::Budget => 0.85,
            QualityGrade::Standard => 1.0,
            QualityGrade::Premium => 1.45,
            QualityGrade::Luxury => 1.9,
        }
    }

    /// Returns the display label for this grade.
    pub fn label(&self) -> &'static str {
        match self {
            QualityGrade::Budget => "Budget",
            QualityGrade::Standard => "Standard",
            QualityGrade::Premium => "Premium",
            QualityGrade::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QualityGrade {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        QualityGrade::ALL
            .into_iter()
            .find(|grade| grade.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "quality_grade",
                    format!("unknown grade '{}', expected budget, standard, premium or luxury", wanted),
                )
            })
    }
}
