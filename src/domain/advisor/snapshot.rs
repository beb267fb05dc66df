//! Immutable view of an estimate handed to the AI advisor.

use serde::{Deserialize, Serialize, Serializer};

use crate::domain::catalog::QualityGrade;
use crate::domain::estimate::{EstimateEngine, LineItem};
use crate::domain::foundation::{Area, Currency};

/// One selected item as described to the advisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotItem {
    pub item: String,
    #[serde(serialize_with = "whole_as_integer")]
    pub cost: f64,
    /// Quantity with unit, one decimal: `"450.0 Bags"`.
    pub quantity: String,
}

/// The estimate at the moment the user asked for insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorSnapshot {
    pub area: Area,
    pub grade: QualityGrade,
    pub currency: Currency,
    pub items: Vec<SnapshotItem>,
    pub total: f64,
}

impl AdvisorSnapshot {
    /// Builds a snapshot from line items; only selected items are kept.
    pub fn from_items(area: Area, grade: QualityGrade, currency: Currency, items: &[LineItem]) -> Self {
        let selected = items
            .iter()
            .filter(|item| item.selected)
            .map(|item| SnapshotItem {
                item: item.name().to_string(),
                cost: item.calculated_cost,
                quantity: format!("{:.1} {}", item.calculated_quantity, item.unit()),
            })
            .collect();

        Self {
            area,
            grade,
            currency,
            items: selected,
            total: EstimateEngine::total(items),
        }
    }

    /// The advisor is only consulted for a positive area.
    pub fn is_actionable(&self) -> bool {
        self.area.is_positive()
    }
}

/// Writes whole amounts without a trailing `.0` (`274050`, not `274050.0`).
fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
