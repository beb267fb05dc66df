//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `catalog` - Material definitions, quality grades, built-in rate table
//! - `estimate` - Line item computation, aggregation, editable sheet
//! - `advisor` - Snapshot, prompt, insights and lifecycle of the AI review

pub mod advisor;
pub mod catalog;
pub mod estimate;
pub mod foundation;
