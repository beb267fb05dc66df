//! Text and JSON rendering of estimates and advisor results.

use serde::Serialize;
use std::fmt::Write;

use crate::domain::advisor::AdvisorStatus;
use crate::domain::catalog::{MaterialCatalog, QualityGrade};
use crate::domain::estimate::{EstimateSheet, EstimateSummary, LineItem};
use crate::domain::foundation::{Area, Currency};

/// Everything printed for `buildcost estimate --format json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport<'a> {
    pub area: Area,
    pub grade: QualityGrade,
    pub multiplier: f64,
    pub currency: &'a Currency,
    pub items: &'a [LineItem],
    pub summary: EstimateSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisor: Option<&'a AdvisorStatus>,
}

impl<'a> EstimateReport<'a> {
    pub fn new(sheet: &'a EstimateSheet, currency: &'a Currency, advisor: Option<&'a AdvisorStatus>) -> Self {
        Self {
            area: sheet.area(),
            grade: sheet.grade(),
            multiplier: sheet.grade().multiplier(),
            currency,
            items: sheet.items(),
            summary: sheet.summary(),
            advisor,
        }
    }
}

/// Renders the breakdown table, category subtotals and total.
pub fn estimate_text(sheet: &EstimateSheet, currency: &Currency) -> String {
    let summary = sheet.summary();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Estimate for {} at {} quality (x{:.2})",
        sheet.area(),
        sheet.grade(),
        sheet.grade().multiplier()
    );
    let _ = writeln!(out);

    let name_width = sheet
        .items()
        .iter()
        .map(|item| item.name().len())
        .max()
        .unwrap_or(0);

    for item in sheet.items() {
        let marker = match (item.selected, item.rate_overridden) {
            (false, _) => " (excluded)",
            (true, true) => " *",
            (true, false) => "",
        };
        let _ = writeln!(
            out,
            "  {:name_width$}  {:>12} {:<9} @ {:>10}  {:>14}{}",
            item.name(),
            currency.format_number(item.calculated_quantity, 1),
            item.unit(),
            currency.format_amount(item.effective_rate),
            currency.format_amount(item.calculated_cost),
            marker,
            name_width = name_width,
        );
    }

    if sheet.adjustments().override_count() > 0 {
        let _ = writeln!(out, "  * custom rate");
    }

    let _ = writeln!(out);
    if summary.is_empty() {
        let _ = writeln!(out, "No items selected.");
    } else {
        let _ = writeln!(out, "By category:");
        for subtotal in &summary.subtotals {
            let _ = writeln!(
                out,
                "  {:<10} {:>14}  ({:.1}%)",
                subtotal.category.label(),
                currency.format_amount(subtotal.subtotal),
                subtotal.share
            );
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "Total ({} of {} items): {}",
        summary.selected_count,
        sheet.items().len(),
        currency.format_amount(summary.total)
    );
    out
}

/// Renders the advisor outcome below an estimate.
pub fn advisor_text(status: &AdvisorStatus) -> String {
    let mut out = String::new();
    match status {
        AdvisorStatus::Idle => {
            let _ = writeln!(out, "AI advisor: enter a built-up area to get insights.");
        }
        AdvisorStatus::Loading { .. } => {
            let _ = writeln!(out, "AI advisor: analyzing...");
        }
        AdvisorStatus::Error { message } => {
            let _ = writeln!(out, "AI advisor: {}", message);
        }
        AdvisorStatus::Success { report } => {
            let insights = &report.insights;
            let _ = writeln!(out, "AI advisor ({})", report.model);
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", insights.summary);
            let _ = writeln!(out);
            let _ = writeln!(out, "Savings tips:");
            for (i, tip) in insights.savings_tips.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, tip);
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "Risks:");
            for (i, risk) in insights.risks.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, risk);
            }
        }
    }
    out
}

/// Renders the material list.
pub fn catalog_text(catalog: &MaterialCatalog, currency: &Currency) -> String {
    let mut out = String::new();
    let id_width = catalog.iter().map(|m| m.id.as_str().len()).max().unwrap_or(0);
    let name_width = catalog.iter().map(|m| m.name.len()).max().unwrap_or(0);

    for material in catalog.iter() {
        let _ = writeln!(
            out,
            "{:id_width$}  {:name_width$}  {:<10} {:>7} {:<9}/sq.ft  {:>8}",
            material.id.as_str(),
            material.name,
            material.category.label(),
            material.base_quantity_per_area,
            material.unit,
            currency.format_amount(material.base_rate),
            id_width = id_width,
            name_width = name_width,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::advisor::{AdvisorInsights, AdvisorReport, FAILED_INSIGHTS_MESSAGE};
    use crate::domain::catalog::standard_catalog;
    use crate::domain::foundation::{InsightRequestId, Timestamp};
    use std::sync::Arc;

    fn sheet(area: f64) -> EstimateSheet {
        EstimateSheet::new(Arc::new(standard_catalog().clone()), area, QualityGrade::Standard)
    }

    #[test]
    fn text_shows_items_and_total() {
        let text = estimate_text(&sheet(1000.0), &Currency::inr());

        assert!(text.contains("Estimate for 1000 sq.ft at Standard quality (x1.00)"));
        assert!(text.contains("Cement"));
        assert!(text.contains("₹1,89,000"));
        assert!(text.contains("Total (10 of 10 items): ₹18,86,500"));
    }

    #[test]
    fn text_marks_excluded_and_overridden_items() {
        let mut sheet = sheet(1000.0);
        sheet.set_selected("labor", false).unwrap();
        sheet.override_rate("cement", 400.0).unwrap();

        let text = estimate_text(&sheet, &Currency::inr());

        assert!(text.contains("(excluded)"));
        assert!(text.contains("* custom rate"));
        assert!(text.contains("Total (9 of 10 items)"));
    }

    #[test]
    fn text_handles_nothing_selected() {
        let mut sheet = sheet(1000.0);
        sheet.set_all_selected(false);

        let text = estimate_text(&sheet, &Currency::inr());

        assert!(text.contains("No items selected."));
        assert!(text.contains("₹0"));
    }

    #[test]
    fn json_report_contains_summary_and_items() {
        let sheet = sheet(1000.0);
        let currency = Currency::inr();
        let value = serde_json::to_value(EstimateReport::new(&sheet, &currency, None)).unwrap();

        assert_eq!(value["summary"]["total"], 1_886_500.0);
        assert_eq!(value["items"].as_array().unwrap().len(), 10);
        assert_eq!(value["multiplier"], 1.0);
        assert!(value["summary"]["chart"][0]["share"].as_f64().unwrap() > 0.0);
        assert!(value.get("advisor").is_none());
    }

    #[test]
    fn advisor_text_lists_tips_and_risks() {
        let status = AdvisorStatus::Success {
            report: AdvisorReport {
                request_id: InsightRequestId::new(),
                insights: AdvisorInsights {
                    summary: "Reasonable.".to_string(),
                    savings_tips: vec!["Use fly-ash bricks".to_string()],
                    risks: vec!["Monsoon delays".to_string()],
                },
                model: "gemini-2.0-flash".to_string(),
                generated_at: Timestamp::now(),
            },
        };

        let text = advisor_text(&status);
        assert!(text.contains("Reasonable."));
        assert!(text.contains("1. Use fly-ash bricks"));
        assert!(text.contains("1. Monsoon delays"));
    }

    #[test]
    fn advisor_text_shows_failure_message() {
        assert!(advisor_text(&AdvisorStatus::failed()).contains(FAILED_INSIGHTS_MESSAGE));
    }

    #[test]
    fn catalog_lists_every_material() {
        let text = catalog_text(standard_catalog(), &Currency::inr());
        assert_eq!(text.lines().count(), 10);
        assert!(text.contains("steel"));
    }
}
