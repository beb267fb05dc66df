//! User-entered per-item state that survives recomputation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MaterialId, Rate, ValidationError};

/// Selection flag and optional rate override for one material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemAdjustment {
    pub selected: bool,
    pub rate_override: Option<Rate>,
}

impl Default for ItemAdjustment {
    fn default() -> Self {
        Self {
            selected: true,
            rate_override: None,
        }
    }
}

impl ItemAdjustment {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Adjustments keyed by material id. Missing entries mean "selected, no
/// override".
///
/// Overrides persist across area and grade changes until cleared
/// explicitly or the whole set is reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemAdjustments {
    entries: HashMap<MaterialId, ItemAdjustment>,
}

impl ItemAdjustments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the adjustment for an id (default when absent).
    pub fn get(&self, id: &MaterialId) -> ItemAdjustment {
        self.entries.get(id).copied().unwrap_or_default()
    }

    pub fn is_selected(&self, id: &MaterialId) -> bool {
        self.get(id).selected
    }

    pub fn rate_override(&self, id: &MaterialId) -> Option<Rate> {
        self.get(id).rate_override
    }

    /// Sets the selection flag, keeping any rate override.
    pub fn set_selected(&mut self, id: &MaterialId, selected: bool) {
        self.update(id, |adj| adj.selected = selected);
    }

    /// Flips the selection flag and returns the new value.
    pub fn toggle(&mut self, id: &MaterialId) -> bool {
        let selected = !self.is_selected(id);
        self.set_selected(id, selected);
        selected
    }

    /// Overrides the rate. Negative or non-finite input is rejected and
    /// leaves the current state untouched.
    pub fn set_rate_override(&mut self, id: &MaterialId, value: f64) -> Result<Rate, ValidationError> {
        let rate = Rate::try_new(value)?;
        self.update(id, |adj| adj.rate_override = Some(rate));
        Ok(rate)
    }

    /// Removes a rate override, returning to the grade-derived default.
    /// Returns true if an override was present.
    pub fn clear_rate_override(&mut self, id: &MaterialId) -> bool {
        let had_override = self.rate_override(id).is_some();
        self.update(id, |adj| adj.rate_override = None);
        had_override
    }

    /// Drops every selection change and override.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Number of items carrying a rate override.
    pub fn override_count(&self) -> usize {
        self.entries.values().filter(|adj| adj.rate_override.is_some()).count()
    }

    fn update(&mut self, id: &MaterialId, apply: impl FnOnce(&mut ItemAdjustment)) {
        let mut adjustment = self.get(id);
        apply(&mut adjustment);
        if adjustment.is_default() {
            self.entries.remove(id);
        } else {
            self.entries.insert(id.clone(), adjustment);
        }
    }
}
