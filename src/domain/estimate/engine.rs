//! Estimate Engine - Pure cost computation over the catalog.

use crate::domain::catalog::{MaterialCatalog, MaterialDefinition, QualityGrade};
use crate::domain::foundation::Area;

use super::{ItemAdjustments, LineItem};

/// Stateless calculator turning inputs into line items and totals.
///
/// Every function is deterministic: identical inputs always yield identical
/// output, so callers may recompute on every keystroke.
pub struct EstimateEngine;

impl EstimateEngine {
    /// Computes one line item per catalog entry, in catalog order.
    ///
    /// - `quantity = area × base_quantity_per_area`
    /// - `rate = override`, else `base_rate × grade multiplier`
    /// - `cost = quantity × rate` when selected, else 0
    pub fn compute_line_items(
        area: Area,
        grade: QualityGrade,
        catalog: &MaterialCatalog,
        adjustments: &ItemAdjustments,
    ) -> Vec<LineItem> {
        catalog
            .iter()
            .map(|definition| Self::compute_line_item(area, grade, definition, adjustments))
            .collect()
    }

    /// Computes a single line item.
    pub fn compute_line_item(
        area: Area,
        grade: QualityGrade,
        definition: &MaterialDefinition,
        adjustments: &ItemAdjustments,
    ) -> LineItem {
        let adjustment = adjustments.get(&definition.id);

        let calculated_quantity = saturate(area.sq_ft() * definition.base_quantity_per_area);
        let effective_rate = match adjustment.rate_override {
            Some(rate) => rate.value(),
            None => Self::default_rate(definition, grade),
        };
        let calculated_cost = if adjustment.selected {
            saturate(calculated_quantity * effective_rate)
        } else {
            0.0
        };

        LineItem {
            definition: definition.clone(),
            effective_rate,
            calculated_quantity,
            calculated_cost,
            selected: adjustment.selected,
            rate_overridden: adjustment.rate_override.is_some(),
        }
    }

    /// Grade-derived rate used when no override is set.
    pub fn default_rate(definition: &MaterialDefinition, grade: QualityGrade) -> f64 {
        saturate(definition.base_rate * grade.multiplier())
    }

    /// Sum of costs over selected items, saturating at `f64::MAX`.
    pub fn total(items: &[LineItem]) -> f64 {
        saturating_sum(
            items
                .iter()
                .filter(|item| item.selected)
                .map(|item| item.calculated_cost),
        )
    }
}

/// Maps NaN and negatives to 0 and overflow to `f64::MAX`.
pub(crate) fn saturate(value: f64) -> f64 {
    if value.is_nan() || value <= 0.0 {
        0.0
    } else {
        value.min(f64::MAX)
    }
}

pub(crate) fn saturating_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    values
        .into_iter()
        .fold(0.0, |sum, value| saturate(sum + saturate(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{standard_catalog, MaterialCategory};
    use crate::domain::foundation::MaterialId;

    fn id(raw: &str) -> MaterialId {
        MaterialId::new(raw).unwrap()
    }

    fn item<'a>(items: &'a [LineItem], raw: &str) -> &'a LineItem {
        items.iter().find(|i| i.id().as_str() == raw).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6 * b.abs().max(1.0)
    }

    #[test]
    fn cement_at_standard_grade() {
        let items = EstimateEngine::compute_line_items(
            Area::new(1000.0),
            QualityGrade::Standard,
            standard_catalog(),
            &ItemAdjustments::new(),
        );
        let cement = item(&items, "cement");
        assert!(approx(cement.calculated_quantity, 450.0));
        assert!(approx(cement.effective_rate, 420.0));
        assert!(approx(cement.calculated_cost, 189_000.0));
    }

    #[test]
    fn cement_at_premium_grade() {
        let items = EstimateEngine::compute_line_items(
            Area::new(1000.0),
            QualityGrade::Premium,
            standard_catalog(),
            &ItemAdjustments::new(),
        );
        assert!(approx(item(&items, "cement").calculated_cost, 274_050.0));
    }

    #[test]
    fn standard_total_for_thousand_sq_ft() {
        let items = EstimateEngine::compute_line_items(
            Area::new(1000.0),
            QualityGrade::Standard,
            standard_catalog(),
            &ItemAdjustments::new(),
        );
        // cement 189000 + steel 300000 + bricks 125000 + sand 162500 + flooring 117000
        // + paint 63000 + wood 150000 + electrical 130000 + plumbing 100000 + labor 550000
        assert!(approx(EstimateEngine::total(&items), 1_886_500.0));
    }

    #[test]
    fn zero_area_yields_zero_everything() {
        let mut adjustments = ItemAdjustments::new();
        adjustments.set_rate_override(&id("cement"), 999.0).unwrap();

        let items = EstimateEngine::compute_line_items(
            Area::ZERO,
            QualityGrade::Luxury,
            standard_catalog(),
            &adjustments,
        );
        assert!(items.iter().all(|i| i.calculated_quantity == 0.0 && i.calculated_cost == 0.0));
        assert_eq!(EstimateEngine::total(&items), 0.0);
    }

    #[test]
    fn invalid_area_behaves_as_zero() {
        for raw in [-100.0, f64::NAN, f64::INFINITY] {
            let items = EstimateEngine::compute_line_items(
                Area::new(raw),
                QualityGrade::Standard,
                standard_catalog(),
                &ItemAdjustments::new(),
            );
            assert_eq!(EstimateEngine::total(&items), 0.0);
            assert!(items.iter().all(|i| !i.calculated_cost.is_nan()));
        }
    }

    #[test]
    fn huge_area_saturates_instead_of_dropping_items() {
        let items = EstimateEngine::compute_line_items(
            Area::new(1e307),
            QualityGrade::Luxury,
            standard_catalog(),
            &ItemAdjustments::new(),
        );

        for item in &items {
            assert!(item.calculated_cost > 0.0, "{} was zeroed", item.name());
            assert!(item.calculated_cost.is_finite());
        }
        assert_eq!(item(&items, "bricks").calculated_cost, f64::MAX);
        assert_eq!(EstimateEngine::total(&items), f64::MAX);
    }

    #[test]
    fn saturate_clamps_each_edge() {
        assert_eq!(saturate(f64::NAN), 0.0);
        assert_eq!(saturate(-1.0), 0.0);
        assert_eq!(saturate(f64::INFINITY), f64::MAX);
        assert_eq!(saturate(12.5), 12.5);
        assert_eq!(saturating_sum([f64::MAX, f64::MAX]), f64::MAX);
    }

    #[test]
    fn deselected_item_keeps_quantity_and_rate_but_costs_nothing() {
        let mut adjustments = ItemAdjustments::new();
        adjustments.set_selected(&id("paint"), false);

        let items = EstimateEngine::compute_line_items(
            Area::new(1000.0),
            QualityGrade::Standard,
            standard_catalog(),
            &adjustments,
        );
        let paint = item(&items, "paint");
        assert!(!paint.selected);
        assert!(approx(paint.calculated_quantity, 180.0));
        assert!(approx(paint.effective_rate, 350.0));
        assert_eq!(paint.calculated_cost, 0.0);
    }

    #[test]
    fn override_wins_over_grade() {
        let mut adjustments = ItemAdjustments::new();
        adjustments.set_rate_override(&id("steel"), 80.0).unwrap();

        for grade in QualityGrade::ALL {
            let items = EstimateEngine::compute_line_items(
                Area::new(500.0),
                grade,
                standard_catalog(),
                &adjustments,
            );
            let steel = item(&items, "steel");
            assert_eq!(steel.effective_rate, 80.0);
            assert!(steel.rate_overridden);
        }
    }

    #[test]
    fn grade_change_scales_only_default_rates() {
        let mut adjustments = ItemAdjustments::new();
        adjustments.set_rate_override(&id("labor"), 500.0).unwrap();

        let standard = EstimateEngine::compute_line_items(
            Area::new(1200.0),
            QualityGrade::Standard,
            standard_catalog(),
            &adjustments,
        );
        let luxury = EstimateEngine::compute_line_items(
            Area::new(1200.0),
            QualityGrade::Luxury,
            standard_catalog(),
            &adjustments,
        );

        for (before, after) in standard.iter().zip(&luxury) {
            if before.rate_overridden {
                assert_eq!(before.effective_rate, after.effective_rate);
            } else {
                assert!(approx(after.effective_rate, before.effective_rate * 1.9));
            }
        }
    }

    #[test]
    fn zero_override_makes_item_free() {
        let mut adjustments = ItemAdjustments::new();
        adjustments.set_rate_override(&id("wood"), 0.0).unwrap();

        let items = EstimateEngine::compute_line_items(
            Area::new(1000.0),
            QualityGrade::Standard,
            standard_catalog(),
            &adjustments,
        );
        let wood = item(&items, "wood");
        assert!(wood.selected);
        assert_eq!(wood.calculated_cost, 0.0);
        assert!(!wood.counts_toward_total());
    }

    #[test]
    fn works_with_fabricated_catalog() {
        let catalog = MaterialCatalog::new(vec![
            crate::domain::catalog::MaterialDefinition::new(
                id("gravel"),
                "Gravel",
                MaterialCategory::Structure,
                "cft",
                2.0,
                10.0,
            ),
        ])
        .unwrap();

        let items = EstimateEngine::compute_line_items(
            Area::new(10.0),
            QualityGrade::Budget,
            &catalog,
            &ItemAdjustments::new(),
        );
        assert_eq!(items.len(), 1);
        assert!(approx(items[0].calculated_cost, 10.0 * 2.0 * 10.0 * 0.85));
    }

    #[test]
    fn computation_is_deterministic() {
        let mut adjustments = ItemAdjustments::new();
        adjustments.set_selected(&id("bricks"), false);
        let run = || {
            EstimateEngine::compute_line_items(
                Area::new(777.0),
                QualityGrade::Premium,
                standard_catalog(),
                &adjustments,
            )
        };
        assert_eq!(run(), run());
    }
}
