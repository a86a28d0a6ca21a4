//! Excel import/export
//!
//! - Import: worksheet (.xlsx/.xls) → RawTable
//! - Export: allocation records → .xlsx

mod exporter;
mod importer;

pub use exporter::ExcelExporter;
pub use importer::{normalize_cell, ExcelImporter};
