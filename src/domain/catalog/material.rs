//! Material definitions as stored in the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{MaterialId, ValidationError};

/// Work category a material belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaterialCategory {
    Structure,
    Finishing,
    Systems,
    Labor,
}

impl MaterialCategory {
    /// All categories in reporting order.
    pub const ALL: [MaterialCategory; 4] = [
        MaterialCategory::Structure,
        MaterialCategory::Finishing,
        MaterialCategory::Systems,
        MaterialCategory::Labor,
    ];

    /// Returns the display label for this category.
    pub fn label(&self) -> &'static str {
        match self {
            MaterialCategory::Structure => "Structure",
            MaterialCategory::Finishing => "Finishing",
            MaterialCategory::Systems => "Systems",
            MaterialCategory::Labor => "Labor",
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One priced material or work package.
///
/// `base_quantity_per_area` is multiplied by the built-up area to get the
/// quantity; lump-sum items use a factor of 1 and carry a per-sq.ft rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDefinition {
    pub id: MaterialId,
    pub name: String,
    pub category: MaterialCategory,
    pub unit: String,
    #[serde(alias = "baseQuantityPerSqFt", alias = "baseQuantityPerArea")]
    pub base_quantity_per_area: f64,
    #[serde(alias = "baseRate")]
    pub base_rate: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub image: String,
}

impl MaterialDefinition {
    /// Creates a definition with empty display metadata.
    pub fn new(
        id: MaterialId,
        name: impl Into<String>,
        category: MaterialCategory,
        unit: impl Into<String>,
        base_quantity_per_area: f64,
        base_rate: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            unit: unit.into(),
            base_quantity_per_area,
            base_rate,
            description: String::new(),
            color: default_color(),
            image: String::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the chart color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Checks the numeric fields and the name.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if self.unit.trim().is_empty() {
            return Err(ValidationError::empty_field("unit"));
        }
        ValidationError::check_non_negative("base_quantity_per_area", self.base_quantity_per_area)?;
        ValidationError::check_non_negative("base_rate", self.base_rate)?;
        Ok(())
    }
}

fn default_color() -> String {
    "#64748b".to_string()
}
