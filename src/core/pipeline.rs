//! End-to-end run: weights → classification → allocation records

use crate::core::allocation::AllocationBuilder;
use crate::core::classifier::classify;
use crate::core::reference::ReferenceLookup;
use crate::core::weight::{resolve_weight, Normalizer};
use crate::error::{Diagnostic, Diagnostics};
use crate::types::{AllocationRecord, BomRow, ClassifiedRow, Role};
use tracing::info;

/// Everything one run derives from a BOM
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationReport {
    pub normalizer: Normalizer,
    pub rows: Vec<ClassifiedRow>,
    pub records: Vec<AllocationRecord>,
    pub diagnostics: Diagnostics,
}

/// Number of rows per role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub single: usize,
    pub paired: usize,
    pub skip: usize,
    pub unrecognized: usize,
}

impl AllocationReport {
    pub fn role_counts(&self) -> RoleCounts {
        let mut counts = RoleCounts::default();
        for row in &self.rows {
            match row.role {
                Role::Single => counts.single += 1,
                Role::Paired => counts.paired += 1,
                Role::Skip => counts.skip += 1,
                Role::Unrecognized(_) => counts.unrecognized += 1,
            }
        }
        counts
    }
}

/// Runs the allocation against one reference lookup
pub struct Pipeline<'a> {
    lookup: &'a ReferenceLookup,
}

impl<'a> Pipeline<'a> {
    pub fn new(lookup: &'a ReferenceLookup) -> Self {
        Self { lookup }
    }

    /// Resolve weights and classify rows
    pub fn classify(
        &self,
        rows: Vec<BomRow>,
        diagnostics: &mut Diagnostics,
    ) -> (Normalizer, Vec<ClassifiedRow>) {
        let normalizer = Normalizer::find(&rows, diagnostics);

        for (idx, row) in rows.iter().enumerate() {
            if !self.lookup.contains(&row.component_id) {
                diagnostics.report(Diagnostic::MissingReferenceEntry {
                    row: idx,
                    component_id: row.component_id.clone(),
                });
            }
        }

        let weights: Vec<f64> = rows
            .iter()
            .map(|row| resolve_weight(row, self.lookup, normalizer.quantity))
            .collect();

        (normalizer, classify(rows, &weights))
    }

    /// Full run
    pub fn run(&self, rows: Vec<BomRow>) -> AllocationReport {
        let mut diagnostics = Diagnostics::new();
        let row_count = rows.len();

        let (normalizer, classified) = self.classify(rows, &mut diagnostics);
        let records = AllocationBuilder::new(self.lookup).build(&classified, &mut diagnostics);

        info!(
            rows = row_count,
            records = records.len(),
            warnings = diagnostics.len(),
            q1 = normalizer.quantity,
            "allocation complete"
        );

        AllocationReport {
            normalizer,
            rows: classified,
            records,
            diagnostics,
        }
    }
}
