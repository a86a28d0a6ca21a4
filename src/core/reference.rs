//! Reference lookup: component id → (net weight per unit, EPD material label)

use crate::types::MasterEntry;
use std::collections::HashMap;

/// Values held for one master table entry
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceValue {
    pub net_weight: f64,
    pub epd_material: String,
}

/// Immutable map built once from the master table.
///
/// Misses resolve to a zero weight and an empty label rather than an error.
#[derive(Debug, Clone, Default)]
pub struct ReferenceLookup {
    entries: HashMap<String, ReferenceValue>,
}

/// Normalize a component id the same way for keys and BOM lookups
pub fn normalize_id(id: &str) -> String {
    id.trim().to_string()
}

impl ReferenceLookup {
    /// Build the lookup. A repeated id keeps the last entry.
    pub fn build<I>(master_rows: I) -> Self
    where
        I: IntoIterator<Item = MasterEntry>,
    {
        let entries = master_rows
            .into_iter()
            .map(|entry| {
                (
                    normalize_id(&entry.component_id),
                    ReferenceValue {
                        net_weight: entry.net_weight,
                        epd_material: entry.epd_material,
                    },
                )
            })
            .collect();

        Self { entries }
    }

    pub fn get(&self, component_id: &str) -> Option<&ReferenceValue> {
        self.entries.get(&normalize_id(component_id))
    }

    pub fn contains(&self, component_id: &str) -> bool {
        self.get(component_id).is_some()
    }

    /// Net weight per unit, 0 when the id is unknown
    pub fn net_weight(&self, component_id: &str) -> f64 {
        self.get(component_id).map_or(0.0, |v| v.net_weight)
    }

    /// EPD material label, empty when the id is unknown
    pub fn epd(&self, component_id: &str) -> &str {
        self.get(component_id).map_or("", |v| v.epd_material.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
