//! Weight resolution for BOM rows

use crate::core::reference::ReferenceLookup;
use crate::error::{Diagnostic, Diagnostics};
use crate::types::{BomRow, Unit};

/// Normalizing quantity taken from the level-1 row
#[derive(Debug, Clone, PartialEq)]
pub struct Normalizer {
    /// Quantity of the level-1 row, 1 when there is none
    pub quantity: f64,
    /// Index of the level-1 row used
    pub row: Option<usize>,
}

impl Normalizer {
    /// Locate the level-1 row. A missing row falls back to 1; extra level-1
    /// rows are reported and the first one is used.
    pub fn find(rows: &[BomRow], diagnostics: &mut Diagnostics) -> Self {
        let top_rows: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.level == 1)
            .map(|(idx, _)| idx)
            .collect();

        match top_rows.as_slice() {
            [] => {
                diagnostics.report(Diagnostic::MissingNormalizer);
                Self {
                    quantity: 1.0,
                    row: None,
                }
            }
            [first, rest @ ..] => {
                if !rest.is_empty() {
                    diagnostics.report(Diagnostic::DuplicateNormalizer {
                        rows: top_rows.clone(),
                    });
                }
                Self {
                    quantity: rows[*first].quantity,
                    row: Some(*first),
                }
            }
        }
    }
}

/// Absolute weight of one row.
///
/// Component units multiply the master net weight by the quantity; `kg` rows
/// are normalized by the level-1 quantity; every other unit weighs nothing.
pub fn resolve_weight(row: &BomRow, lookup: &ReferenceLookup, q1: f64) -> f64 {
    match row.unit {
        Unit::Pcs | Unit::M | Unit::M3 => lookup.net_weight(&row.component_id) * row.quantity,
        Unit::Kg => {
            if q1 == 0.0 {
                0.0
            } else {
                row.quantity / q1
            }
        }
        Unit::Other(_) => 0.0,
    }
}
