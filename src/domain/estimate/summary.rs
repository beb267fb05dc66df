//! Aggregation over line items: category subtotals and chart data.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::MaterialCategory;

use super::engine::saturating_sum;
use super::{EstimateEngine, LineItem};

/// Summed cost of the selected items in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySubtotal {
    pub category: MaterialCategory,
    pub subtotal: f64,
    pub item_count: usize,
    /// Percentage of the estimate total.
    pub share: f64,
}

/// One pie-chart segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
    /// Percentage of the estimate total.
    pub share: f64,
}

// 0 when there is nothing to divide by.
fn percent_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}

/// Groups selected items with a positive cost by category, in category order.
/// Categories with nothing to report are omitted.
pub fn category_subtotals(items: &[LineItem]) -> Vec<CategorySubtotal> {
    let total = EstimateEngine::total(items);
    MaterialCategory::ALL
        .iter()
        .filter_map(|&category| {
            let in_category: Vec<&LineItem> = items
                .iter()
                .filter(|item| item.counts_toward_total() && item.definition.category == category)
                .collect();
            if in_category.is_empty() {
                return None;
            }

            let subtotal = saturating_sum(in_category.iter().map(|item| item.calculated_cost));
            Some(CategorySubtotal {
                category,
                subtotal,
                item_count: in_category.len(),
                share: percent_of(subtotal, total),
            })
        })
        .collect()
}

/// Maps selected, positive-cost items to chart slices. An empty result is a
/// valid "no data" state.
pub fn chart_projection(items: &[LineItem]) -> Vec<ChartSlice> {
    let total = EstimateEngine::total(items);
    items
        .iter()
        .filter(|item| item.counts_toward_total())
        .map(|item| ChartSlice {
            label: item.definition.name.clone(),
            value: item.calculated_cost,
            color: item.definition.color.clone(),
            share: percent_of(item.calculated_cost, total),
        })
        .collect()
}

/// Everything a presentation layer needs beside the line items themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateSummary {
    pub total: f64,
    pub selected_count: usize,
    pub subtotals: Vec<CategorySubtotal>,
    pub chart: Vec<ChartSlice>,
}

impl EstimateSummary {
    pub fn from_items(items: &[LineItem]) -> Self {
        Self {
            total: EstimateEngine::total(items),
            selected_count: items.iter().filter(|item| item.selected).count(),
            subtotals: category_subtotals(items),
            chart: chart_projection(items),
        }
    }

    /// True when there is nothing to chart.
    pub fn is_empty(&self) -> bool {
        self.chart.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{standard_catalog, QualityGrade};
    use crate::domain::estimate::ItemAdjustments;
    use crate::domain::foundation::{Area, MaterialId};

    fn items_with(adjustments: &ItemAdjustments, area: f64) -> Vec<LineItem> {
        EstimateEngine::compute_line_items(
            Area::new(area),
            QualityGrade::Standard,
            standard_catalog(),
            adjustments,
        )
    }

    #[test]
    fn subtotals_follow_category_order() {
        let items = items_with(&ItemAdjustments::new(), 1000.0);
        let subtotals = category_subtotals(&items);

        let categories: Vec<_> = subtotals.iter().map(|s| s.category).collect();
        assert_eq!(categories, MaterialCategory::ALL.to_vec());

        let structure = &subtotals[0];
        assert_eq!(structure.item_count, 4);
        assert!((structure.subtotal - 776_500.0).abs() < 1e-3);
    }

    #[test]
    fn subtotals_sum_to_total() {
        let items = items_with(&ItemAdjustments::new(), 1500.0);
        let sum: f64 = category_subtotals(&items).iter().map(|s| s.subtotal).sum();
        assert!((sum - EstimateEngine::total(&items)).abs() < 1e-6);
    }

    #[test]
    fn deselected_category_disappears() {
        let mut adjustments = ItemAdjustments::new();
        adjustments.set_selected(&MaterialId::new("labor").unwrap(), false);

        let items = items_with(&adjustments, 1000.0);
        let subtotals = category_subtotals(&items);
        assert!(subtotals.iter().all(|s| s.category != MaterialCategory::Labor));
    }

    #[test]
    fn chart_contains_selected_items_with_colors() {
        let items = items_with(&ItemAdjustments::new(), 1000.0);
        let chart = chart_projection(&items);

        assert_eq!(chart.len(), 10);
        assert_eq!(chart[0].label, "Cement");
        assert_eq!(chart[0].color, "#94a3b8");
        assert!((chart[0].value - 189_000.0).abs() < 1e-6);
    }

    #[test]
    fn deselect_all_gives_empty_chart_and_zero_total() {
        let mut adjustments = ItemAdjustments::new();
        for material in standard_catalog().iter() {
            adjustments.set_selected(&material.id, false);
        }

        let summary = EstimateSummary::from_items(&items_with(&adjustments, 1000.0));
        assert!(summary.is_empty());
        assert!(summary.subtotals.is_empty());
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.selected_count, 0);
    }

    #[test]
    fn zero_area_gives_empty_chart() {
        let summary = EstimateSummary::from_items(&items_with(&ItemAdjustments::new(), 0.0));
        assert!(summary.is_empty());
        assert_eq!(summary.selected_count, 10);
    }

    #[test]
    fn chart_shares_sum_to_one_hundred() {
        let mut adjustments = ItemAdjustments::new();
        adjustments.set_selected(&MaterialId::new("steel").unwrap(), false);

        let summary = EstimateSummary::from_items(&items_with(&adjustments, 1000.0));

        let chart_share: f64 = summary.chart.iter().map(|s| s.share).sum();
        let subtotal_share: f64 = summary.subtotals.iter().map(|s| s.share).sum();
        assert!((chart_share - 100.0).abs() < 1e-9);
        assert!((subtotal_share - 100.0).abs() < 1e-9);

        let cement = &summary.chart[0];
        assert!((cement.share - 189_000.0 / 1_586_500.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn shares_are_serialized() {
        let summary = EstimateSummary::from_items(&items_with(&ItemAdjustments::new(), 1000.0));
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value["chart"][0]["share"].as_f64().unwrap() > 0.0);
        assert!(value["subtotals"][0]["share"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn percent_of_zero_total_is_zero() {
        assert_eq!(percent_of(50.0, 200.0), 25.0);
        assert_eq!(percent_of(50.0, 0.0), 0.0);
    }
}
