//! EstimateSheet - the editable estimate a presentation layer drives.
//!
//! Holds the user inputs (area, grade, per-item adjustments) and the line
//! items derived from them. Every mutation triggers a full recompute through
//! [`EstimateEngine`]; nothing is patched incrementally.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::advisor::AdvisorSnapshot;
use crate::domain::catalog::{MaterialCatalog, QualityGrade};
use crate::domain::foundation::{Area, Currency, MaterialId, ValidationError};

use super::{EstimateEngine, EstimateSummary, ItemAdjustments, LineItem};

/// Errors from editing an estimate sheet.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error("unknown material: {0}")]
    UnknownMaterial(String),

    #[error("invalid rate for {id}: {source}")]
    InvalidRate {
        id: MaterialId,
        #[source]
        source: ValidationError,
    },
}

/// Editable estimate state plus its current derived line items.
#[derive(Debug, Clone)]
pub struct EstimateSheet {
    catalog: Arc<MaterialCatalog>,
    area: Area,
    grade: QualityGrade,
    adjustments: ItemAdjustments,
    items: Vec<LineItem>,
}

impl EstimateSheet {
    /// Creates a sheet with every item selected and no overrides.
    pub fn new(catalog: Arc<MaterialCatalog>, area: impl Into<Area>, grade: QualityGrade) -> Self {
        let mut sheet = Self {
            catalog,
            area: area.into(),
            grade,
            adjustments: ItemAdjustments::new(),
            items: Vec::new(),
        };
        sheet.recompute();
        sheet
    }

    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }

    pub fn area(&self) -> Area {
        self.area
    }

    pub fn grade(&self) -> QualityGrade {
        self.grade
    }

    pub fn adjustments(&self) -> &ItemAdjustments {
        &self.adjustments
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up the current line item for an id.
    pub fn item(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id().as_str() == id)
    }

    /// Changes the area. Rate overrides are kept.
    pub fn set_area(&mut self, area: impl Into<Area>) {
        self.area = area.into();
        self.recompute();
    }

    /// Changes the grade. Only non-overridden rates move.
    pub fn set_grade(&mut self, grade: QualityGrade) {
        self.grade = grade;
        self.recompute();
    }

    /// Flips an item's selection and returns the new value.
    pub fn toggle(&mut self, id: &str) -> Result<bool, EstimateError> {
        let id = self.resolve(id)?;
        let selected = self.adjustments.toggle(&id);
        self.recompute();
        Ok(selected)
    }

    pub fn set_selected(&mut self, id: &str, selected: bool) -> Result<(), EstimateError> {
        let id = self.resolve(id)?;
        self.adjustments.set_selected(&id, selected);
        self.recompute();
        Ok(())
    }

    /// Selects or deselects every item.
    pub fn set_all_selected(&mut self, selected: bool) {
        for material in self.catalog.iter() {
            self.adjustments.set_selected(&material.id, selected);
        }
        self.recompute();
    }

    /// Overrides an item's rate. Invalid values leave the sheet unchanged.
    pub fn override_rate(&mut self, id: &str, rate: f64) -> Result<(), EstimateError> {
        let id = self.resolve(id)?;
        self.adjustments
            .set_rate_override(&id, rate)
            .map_err(|source| EstimateError::InvalidRate {
                id: id.clone(),
                source,
            })?;
        self.recompute();
        Ok(())
    }

    /// Restores the grade-derived rate for one item.
    pub fn clear_rate_override(&mut self, id: &str) -> Result<bool, EstimateError> {
        let id = self.resolve(id)?;
        let cleared = self.adjustments.clear_rate_override(&id);
        self.recompute();
        Ok(cleared)
    }

    /// Drops all selections and overrides.
    pub fn reset_adjustments(&mut self) {
        self.adjustments.reset();
        self.recompute();
    }

    pub fn total(&self) -> f64 {
        EstimateEngine::total(&self.items)
    }

    pub fn summary(&self) -> EstimateSummary {
        EstimateSummary::from_items(&self.items)
    }

    /// Captures the current state for the AI advisor.
    pub fn snapshot(&self, currency: &Currency) -> AdvisorSnapshot {
        AdvisorSnapshot::from_items(self.area, self.grade, currency.clone(), &self.items)
    }

    fn resolve(&self, id: &str) -> Result<MaterialId, EstimateError> {
        self.catalog
            .get_str(id.trim())
            .map(|material| material.id.clone())
            .ok_or_else(|| EstimateError::UnknownMaterial(id.to_string()))
    }

    fn recompute(&mut self) {
        self.items =
            EstimateEngine::compute_line_items(self.area, self.grade, &self.catalog, &self.adjustments);
        debug!(
            area = self.area.sq_ft(),
            grade = %self.grade,
            overrides = self.adjustments.override_count(),
            total = self.total(),
            "Recomputed estimate"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::standard_catalog;

    fn sheet(area: f64) -> EstimateSheet {
        EstimateSheet::new(Arc::new(standard_catalog().clone()), area, QualityGrade::Standard)
    }

    #[test]
    fn new_sheet_selects_everything() {
        let sheet = sheet(1000.0);
        assert_eq!(sheet.items().len(), 10);
        assert!(sheet.items().iter().all(|i| i.selected));
        assert!((sheet.total() - 1_886_500.0).abs() < 1e-3);
    }

    #[test]
    fn deselect_removes_exactly_that_cost() {
        let mut sheet = sheet(1000.0);
        let before_total = sheet.total();
        let steel_cost = sheet.item("steel").unwrap().calculated_cost;
        let others_before: Vec<_> = sheet
            .items()
            .iter()
            .filter(|i| i.id().as_str() != "steel")
            .map(|i| i.calculated_cost)
            .collect();

        assert!(!sheet.toggle("steel").unwrap());

        assert!((sheet.total() - (before_total - steel_cost)).abs() < 1e-6);
        let others_after: Vec<_> = sheet
            .items()
            .iter()
            .filter(|i| i.id().as_str() != "steel")
            .map(|i| i.calculated_cost)
            .collect();
        assert_eq!(others_before, others_after);
    }

    #[test]
    fn area_change_keeps_overrides() {
        let mut sheet = sheet(1000.0);
        sheet.override_rate("cement", 400.0).unwrap();
        sheet.set_area(2000.0);

        let cement = sheet.item("cement").unwrap();
        assert_eq!(cement.effective_rate, 400.0);
        assert!((cement.calculated_cost - 2000.0 * 0.45 * 400.0).abs() < 1e-6);
    }

    #[test]
    fn grade_change_keeps_overrides() {
        let mut sheet = sheet(1000.0);
        sheet.override_rate("cement", 400.0).unwrap();
        sheet.set_grade(QualityGrade::Luxury);

        assert_eq!(sheet.item("cement").unwrap().effective_rate, 400.0);
        assert!((sheet.item("steel").unwrap().effective_rate - 75.0 * 1.9).abs() < 1e-9);
    }

    #[test]
    fn clear_override_restores_grade_rate() {
        let mut sheet = sheet(1000.0);
        sheet.set_grade(QualityGrade::Premium);
        sheet.override_rate("paint", 100.0).unwrap();
        assert!(sheet.clear_rate_override("paint").unwrap());

        let paint = sheet.item("paint").unwrap();
        assert!((paint.effective_rate - 350.0 * 1.45).abs() < 1e-9);
        assert!(!paint.rate_overridden);
    }

    #[test]
    fn invalid_rate_is_rejected_and_state_unchanged() {
        let mut sheet = sheet(1000.0);
        sheet.override_rate("sand", 60.0).unwrap();

        let err = sheet.override_rate("sand", -5.0).unwrap_err();
        assert!(matches!(err, EstimateError::InvalidRate { .. }));
        assert!(sheet.override_rate("sand", f64::NAN).is_err());
        assert_eq!(sheet.item("sand").unwrap().effective_rate, 60.0);
    }

    #[test]
    fn unknown_material_is_reported() {
        let mut sheet = sheet(1000.0);
        assert_eq!(
            sheet.toggle("gold").unwrap_err(),
            EstimateError::UnknownMaterial("gold".to_string())
        );
    }

    #[test]
    fn reselect_restores_override() {
        let mut sheet = sheet(1000.0);
        sheet.override_rate("labor", 500.0).unwrap();
        sheet.set_selected("labor", false).unwrap();
        assert_eq!(sheet.item("labor").unwrap().calculated_cost, 0.0);

        sheet.set_selected("labor", true).unwrap();
        let labor = sheet.item("labor").unwrap();
        assert_eq!(labor.effective_rate, 500.0);
        assert!((labor.calculated_cost - 500_000.0).abs() < 1e-6);
    }

    #[test]
    fn zero_area_forces_zero_total() {
        let mut sheet = sheet(1000.0);
        sheet.override_rate("cement", 1000.0).unwrap();
        sheet.set_area(0.0);
        assert_eq!(sheet.total(), 0.0);
    }

    #[test]
    fn reset_adjustments_restores_defaults() {
        let mut sheet = sheet(1000.0);
        sheet.override_rate("cement", 1.0).unwrap();
        sheet.set_all_selected(false);
        assert_eq!(sheet.total(), 0.0);

        sheet.reset_adjustments();
        assert!((sheet.total() - 1_886_500.0).abs() < 1e-3);
    }
}
