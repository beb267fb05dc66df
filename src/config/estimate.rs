//! Estimate defaults and catalog source

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::catalog::{standard_catalog, CatalogError, MaterialCatalog, QualityGrade};
use crate::domain::foundation::{Currency, DigitGrouping};

/// Estimate configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EstimateConfig {
    /// Area used when none is given, in sq.ft
    #[serde(default = "default_area")]
    pub default_area: f64,

    /// Grade used when none is given
    #[serde(default)]
    pub default_grade: QualityGrade,

    /// ISO currency code
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    /// Currency symbol used in formatted amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// YAML or JSON catalog replacing the built-in rate table
    pub catalog_path: Option<PathBuf>,
}

impl EstimateConfig {
    /// Currency for formatting; INR uses lakh/crore grouping.
    pub fn currency(&self) -> Currency {
        let grouping = if self.currency_code.eq_ignore_ascii_case("INR") {
            DigitGrouping::Indian
        } else {
            DigitGrouping::Thousands
        };
        Currency::new(self.currency_code.to_uppercase(), &self.currency_symbol, grouping)
    }

    /// Loads the configured catalog, or the built-in one.
    pub fn load_catalog(&self) -> Result<MaterialCatalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => MaterialCatalog::from_path(path),
            None => Ok(standard_catalog().clone()),
        }
    }

    /// Validate estimate configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.default_area.is_finite() || self.default_area < 0.0 {
            return Err(ValidationError::InvalidDefaultArea);
        }

        let code = self.currency_code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCurrencyCode);
        }

        if self.currency_symbol.trim().is_empty() {
            return Err(ValidationError::MissingRequired(
                "BUILDCOST__ESTIMATE__CURRENCY_SYMBOL",
            ));
        }

        if let Some(path) = &self.catalog_path {
            if !path.is_file() {
                return Err(ValidationError::CatalogNotFound(path.clone()));
            }
        }

        Ok(())
    }
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            default_area: default_area(),
            default_grade: QualityGrade::default(),
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
            catalog_path: None,
        }
    }
}

fn default_area() -> f64 {
    1000.0
}

fn default_currency_code() -> String {
    "INR".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}
