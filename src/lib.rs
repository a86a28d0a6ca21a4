//! BOM-EPD - flatten a Bill of Materials into a component → material table
//!
//! Each BOM row is weighed against a master reference table, classified as a
//! standalone component, a component paired with its material row, or a
//! material row owned by an earlier component, and turned into allocation
//! records carrying the material's weight fraction and EPD material label.
//!
//! # Example
//!
//! ```
//! use bom_epd::core::{Pipeline, ReferenceLookup};
//! use bom_epd::types::{BomRow, MasterEntry};
//!
//! let lookup = ReferenceLookup::build(vec![
//!     MasterEntry::new("A", 3.0, ""),
//!     MasterEntry::new("B", 0.0, "EPD-X"),
//! ]);
//! let rows = vec![
//!     BomRow::new(1, "pcs", 2.0, "A", "Frame"),
//!     BomRow::new(2, "kg", 1.5, "B", "Steel"),
//! ];
//!
//! let report = Pipeline::new(&lookup).run(rows);
//! assert_eq!(report.records.len(), 1);
//! assert_eq!(report.records[0].material_fraction, Some(0.13));
//! assert_eq!(report.records[0].epd_material, "EPD-X");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod logging;
pub mod sink;
pub mod table;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{BomError, BomResult, Diagnostic};
pub use types::{AllocationRecord, BomRow, ClassifiedRow, MasterEntry, Role, Unit};
