//! Built-in rate table for residential construction (INR, per sq.ft of built-up area).

use once_cell::sync::Lazy;

use super::{MaterialCatalog, MaterialCategory, MaterialDefinition};
use crate::domain::foundation::MaterialId;

struct Entry {
    id: &'static str,
    name: &'static str,
    category: MaterialCategory,
    unit: &'static str,
    factor: f64,
    rate: f64,
    description: &'static str,
    color: &'static str,
    image: &'static str,
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "cement",
        name: "Cement",
        category: MaterialCategory::Structure,
        unit: "Bags",
        factor: 0.45,
        rate: 420.0,
        description: "High-grade PPC/OPC cement for foundation, slab, and masonry work.",
        color: "#94a3b8",
        image: "https://plus.unsplash.com/premium_photo-1682366278687-f1bba8c2a210?q=80&w=387&auto=format&fit=crop",
    },
    Entry {
        id: "steel",
        name: "Steel Reinforcement",
        category: MaterialCategory::Structure,
        unit: "kg",
        factor: 4.0,
        rate: 75.0,
        description: "Fe550 TMT bars for superior structural strength and flexibility.",
        color: "#475569",
        image: "https://plus.unsplash.com/premium_photo-1677172321949-a2f6ef6e6ed9?q=80&w=870&auto=format&fit=crop",
    },
    Entry {
        id: "bricks",
        name: "Bricks / Blocks",
        category: MaterialCategory::Structure,
        unit: "Pcs",
        factor: 12.5,
        rate: 10.0,
        description: "Premium red clay bricks or AAC blocks for thermal insulation.",
        color: "#ef4444",
        image: "https://images.unsplash.com/photo-1629608444154-6d052691632f?q=80&w=439&auto=format&fit=crop",
    },
    Entry {
        id: "sand",
        name: "Sand & Aggregate",
        category: MaterialCategory::Structure,
        unit: "cft",
        factor: 2.5,
        rate: 65.0,
        description: "River sand and 20mm aggregate for concrete mixing.",
        color: "#d97706",
        image: "https://images.unsplash.com/photo-1621262372714-358071852028?auto=format&fit=crop&q=80&w=800",
    },
    Entry {
        id: "flooring",
        name: "Tiles & Flooring",
        category: MaterialCategory::Finishing,
        unit: "sq.ft",
        factor: 1.3,
        rate: 90.0,
        description: "Double-charged vitrified tiles or granite/marble flooring.",
        color: "#0ea5e9",
        image: "https://plus.unsplash.com/premium_photo-1682088053289-cb286ef69a99?q=80&w=870&auto=format&fit=crop",
    },
    Entry {
        id: "paint",
        name: "Paint & Putty",
        category: MaterialCategory::Finishing,
        unit: "Liters",
        factor: 0.18,
        rate: 350.0,
        description: "Interior and exterior weather-proof emulsion with 2 coats of putty.",
        color: "#a855f7",
        image: "https://images.unsplash.com/photo-1562259949-e8e7689d7828?auto=format&fit=crop&q=80&w=800",
    },
    Entry {
        id: "wood",
        name: "Wood & Carpentry",
        category: MaterialCategory::Finishing,
        unit: "Lump Sum",
        factor: 1.0,
        rate: 150.0,
        description: "Teak wood main door, Sal wood frames, and flush doors.",
        color: "#854d0e",
        image: "https://plus.unsplash.com/premium_photo-1664300494539-313eac2a6095?q=80&w=870&auto=format&fit=crop",
    },
    Entry {
        id: "electrical",
        name: "Electrical Works",
        category: MaterialCategory::Systems,
        unit: "Lump Sum",
        factor: 1.0,
        rate: 130.0,
        description: "Fire-resistant wiring, modular switches, and distribution boards.",
        color: "#eab308",
        image: "https://images.unsplash.com/photo-1621905251189-08b45d6a269e?auto=format&fit=crop&q=80&w=800",
    },
    Entry {
        id: "plumbing",
        name: "Plumbing Works",
        category: MaterialCategory::Systems,
        unit: "Lump Sum",
        factor: 1.0,
        rate: 100.0,
        description: "CPVC/UPVC pipes, water tanks, and sanitary fixtures.",
        color: "#06b6d4",
        image: "https://plus.unsplash.com/premium_photo-1664301972519-506636f0245d?q=80&w=896&auto=format&fit=crop",
    },
    Entry {
        id: "labor",
        name: "Labor Charges",
        category: MaterialCategory::Labor,
        unit: "sq.ft",
        factor: 1.0,
        rate: 550.0,
        description: "Skilled masons, helpers, bar benders, and site supervision.",
        color: "#22c55e",
        image: "https://images.unsplash.com/photo-1541888946425-d81bb19240f5?auto=format&fit=crop&q=80&w=800",
    },
];

static STANDARD: Lazy<MaterialCatalog> = Lazy::new(|| {
    let materials = ENTRIES
        .iter()
        .filter_map(|entry| {
            let id = MaterialId::new(entry.id).ok()?;
            Some(
                MaterialDefinition::new(id, entry.name, entry.category, entry.unit, entry.factor, entry.rate)
                    .with_description(entry.description)
                    .with_color(entry.color)
                    .with_image(entry.image),
            )
        })
        .collect();
    MaterialCatalog::from_trusted(materials)
});

/// Returns the built-in catalog shared by every caller.
pub fn standard_catalog() -> &'static MaterialCatalog {
    &STANDARD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_ten_materials() {
        assert_eq!(standard_catalog().len(), 10);
    }

    #[test]
    fn standard_catalog_is_valid() {
        let materials = standard_catalog().iter().cloned().collect();
        assert!(MaterialCatalog::new(materials).is_ok());
    }

    #[test]
    fn standard_catalog_keeps_declared_order() {
        let ids: Vec<_> = standard_catalog().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "cement", "steel", "bricks", "sand", "flooring", "paint", "wood", "electrical",
                "plumbing", "labor"
            ]
        );
    }

    #[test]
    fn cement_entry_matches_rate_table() {
        let cement = standard_catalog().get_str("cement").unwrap();
        assert_eq!(cement.base_quantity_per_area, 0.45);
        assert_eq!(cement.base_rate, 420.0);
        assert_eq!(cement.unit, "Bags");
        assert_eq!(cement.category, MaterialCategory::Structure);
    }
}
