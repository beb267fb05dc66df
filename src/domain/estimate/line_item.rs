//! Derived per-material estimate rows.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::MaterialDefinition;
use crate::domain::foundation::MaterialId;

/// One material's quantity, rate and cost for the current inputs.
///
/// Quantity and rate are always populated; `calculated_cost` is zero when
/// the item is deselected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub definition: MaterialDefinition,
    pub effective_rate: f64,
    pub calculated_quantity: f64,
    pub calculated_cost: f64,
    pub selected: bool,
    pub rate_overridden: bool,
}

impl LineItem {
    pub fn id(&self) -> &MaterialId {
        &self.definition.id
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn unit(&self) -> &str {
        &self.definition.unit
    }

    /// True when this item contributes to totals and charts.
    pub fn counts_toward_total(&self) -> bool {
        self.selected && self.calculated_cost > 0.0
    }
}
