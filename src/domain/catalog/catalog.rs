//! The material catalog: an immutable, validated list of definitions.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use super::MaterialDefinition;
use crate::domain::foundation::{MaterialId, ValidationError};

/// Errors raised while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(String),

    #[error("unsupported catalog file extension: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    #[error("catalog contains no materials")]
    Empty,

    #[error("duplicate material id: {0}")]
    DuplicateId(MaterialId),

    #[error("material '{id}' is invalid: {source}")]
    InvalidMaterial {
        id: MaterialId,
        #[source]
        source: ValidationError,
    },
}

/// Immutable list of material definitions, in display order.
///
/// Passed by reference into the estimate engine; never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MaterialCatalog {
    materials: Vec<MaterialDefinition>,
}

impl MaterialCatalog {
    /// Builds a catalog, checking every definition and id uniqueness.
    pub fn new(materials: Vec<MaterialDefinition>) -> Result<Self, CatalogError> {
        if materials.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for material in &materials {
            material
                .validate()
                .map_err(|source| CatalogError::InvalidMaterial {
                    id: material.id.clone(),
                    source,
                })?;
            if !seen.insert(&material.id) {
                return Err(CatalogError::DuplicateId(material.id.clone()));
            }
        }

        Ok(Self { materials })
    }

    /// Wraps definitions that are known to be valid (the built-in table).
    pub(crate) fn from_trusted(materials: Vec<MaterialDefinition>) -> Self {
        Self { materials }
    }

    /// Parses a YAML list of material definitions.
    pub fn from_yaml_str(source: &str) -> Result<Self, CatalogError> {
        let materials: Vec<MaterialDefinition> =
            serde_yaml::from_str(source).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(materials)
    }

    /// Parses a JSON array of material definitions.
    pub fn from_json_str(source: &str) -> Result<Self, CatalogError> {
        let materials: Vec<MaterialDefinition> =
            serde_json::from_str(source).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(materials)
    }

    /// Loads a catalog file, choosing the format from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let catalog = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&contents)?,
            "json" => Self::from_json_str(&contents)?,
            other => return Err(CatalogError::UnsupportedFormat(other.to_string())),
        };

        tracing::debug!(
            path = %path.display(),
            materials = catalog.len(),
            "Loaded material catalog"
        );
        Ok(catalog)
    }

    /// Looks up a definition by id.
    pub fn get(&self, id: &MaterialId) -> Option<&MaterialDefinition> {
        self.materials.iter().find(|m| &m.id == id)
    }

    /// Looks up a definition by raw id string.
    pub fn get_str(&self, id: &str) -> Option<&MaterialDefinition> {
        self.materials.iter().find(|m| m.id.as_str() == id)
    }

    /// Returns true if the catalog defines this id.
    pub fn contains(&self, id: &MaterialId) -> bool {
        self.get(id).is_some()
    }

    /// Iterates definitions in display order.
    pub fn iter(&self) -> impl Iterator<Item = &MaterialDefinition> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
