//! Allocation builder: classified rows → component/material records

use crate::core::classifier::owner_of;
use crate::core::reference::ReferenceLookup;
use crate::error::{Diagnostic, Diagnostics};
use crate::types::{AllocationRecord, ClassifiedRow, Role};
use tracing::debug;

/// Round half away from zero to 2 decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Share of `part` in `whole`, rounded to 2 decimals; 0 when `whole` is 0
pub fn fraction(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        round2(part / whole)
    }
}

/// Walks classified rows once and emits allocation records
pub struct AllocationBuilder<'a> {
    lookup: &'a ReferenceLookup,
}

impl<'a> AllocationBuilder<'a> {
    pub fn new(lookup: &'a ReferenceLookup) -> Self {
        Self { lookup }
    }

    /// Build the records in input order.
    ///
    /// The cursor advances by 2 past a pair and by 1 otherwise. Skip rows are
    /// visited on their own: their owner is found again positionally and the
    /// fraction uses the row's raw quantity.
    pub fn build(
        &self,
        rows: &[ClassifiedRow],
        diagnostics: &mut Diagnostics,
    ) -> Vec<AllocationRecord> {
        let mut records = Vec::new();
        let mut i = 0;

        while i < rows.len() {
            let row = &rows[i];
            match &row.role {
                Role::Single => {
                    records.push(self.single(row));
                    i += 1;
                }
                Role::Paired => match rows.get(i + 1) {
                    Some(material) => {
                        records.push(self.paired(row, material));
                        i += 2;
                    }
                    None => {
                        diagnostics.report(Diagnostic::DanglingPair { row: i });
                        i += 1;
                    }
                },
                Role::Skip => {
                    match owner_of(rows, i) {
                        Some(owner) => records.push(self.skip(&rows[owner], row)),
                        None => diagnostics.report(Diagnostic::OrphanSkip { row: i }),
                    }
                    i += 1;
                }
                Role::Unrecognized(label) => {
                    diagnostics.report(Diagnostic::UnclassifiableRow {
                        row: i,
                        role: label.clone(),
                    });
                    i += 1;
                }
            }
        }

        debug!(records = records.len(), "allocation records built");
        records
    }

    fn single(&self, component: &ClassifiedRow) -> AllocationRecord {
        AllocationRecord {
            epd_material: self.lookup.epd(&component.row.component_id).to_string(),
            component_weight: component.weight,
            component_name: component.row.description.clone(),
            material_fraction: None,
            material_name: String::new(),
        }
    }

    fn paired(&self, component: &ClassifiedRow, material: &ClassifiedRow) -> AllocationRecord {
        AllocationRecord {
            epd_material: self.lookup.epd(&material.row.component_id).to_string(),
            component_weight: component.weight,
            component_name: component.row.description.clone(),
            material_fraction: Some(fraction(material.weight, component.weight)),
            material_name: material.row.description.clone(),
        }
    }

    fn skip(&self, owner: &ClassifiedRow, material: &ClassifiedRow) -> AllocationRecord {
        AllocationRecord {
            epd_material: self.lookup.epd(&material.row.component_id).to_string(),
            component_weight: owner.weight,
            component_name: owner.row.description.clone(),
            material_fraction: Some(fraction(material.row.quantity, owner.weight)),
            material_name: material.row.description.clone(),
        }
    }
}
