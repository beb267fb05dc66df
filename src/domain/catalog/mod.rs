//! Catalog Module - Material definitions and quality grades.
//!
//! The catalog is static configuration: loaded once (built-in table or a
//! YAML/JSON file) and injected into the estimate engine by reference.

#[allow(clippy::module_inception)]
mod catalog;
mod material;
mod quality;
mod standard;

pub use catalog::{CatalogError, MaterialCatalog};
pub use material::{MaterialCategory, MaterialDefinition};
pub use quality::QualityGrade;
pub use standard::standard_catalog;
