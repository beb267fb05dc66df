//! Estimate Module - Line item computation and aggregation.
//!
//! # Components
//!
//! - `EstimateEngine` - Pure per-item quantity/rate/cost computation
//! - `ItemAdjustments` - Selection flags and rate overrides kept across recomputes
//! - `summary` - Category subtotals and chart projection
//! - `EstimateSheet` - Editable state that recomputes on every change

mod adjustments;
mod engine;
mod line_item;
mod sheet;
mod summary;

pub use adjustments::{ItemAdjustment, ItemAdjustments};
pub use engine::EstimateEngine;
pub use line_item::LineItem;
pub use sheet::{EstimateError, EstimateSheet};
pub use summary::{category_subtotals, chart_projection, CategorySubtotal, ChartSlice, EstimateSummary};
