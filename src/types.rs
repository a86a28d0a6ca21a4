use serde::{Deserialize, Serialize};
use std::fmt;

//==============================================================================
// Units of measure
//==============================================================================

/// Output column headers, in sink order.
pub const ALLOCATION_HEADERS: [&str; 5] = [
    "EPDName",
    "EPDQuantity",
    "Comments",
    "UnitCalc",
    "Material Name",
];

/// Unit of measure of a BOM row (`U/M` column), case and whitespace normalized
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Unit {
    Pcs,
    M,
    M3,
    Kg,
    /// Anything else, kept as the normalized text for reporting
    Other(String),
}

impl Unit {
    /// Parse a raw `U/M` cell
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "pcs" => Unit::Pcs,
            "m" => Unit::M,
            "m3" => Unit::M3,
            "kg" => Unit::Kg,
            _ => Unit::Other(normalized),
        }
    }

    /// Component units are weighed through the master table's net weight
    pub fn is_component(&self) -> bool {
        matches!(self, Unit::Pcs | Unit::M | Unit::M3)
    }

    /// Material rows are already expressed in kilograms
    pub fn is_material(&self) -> bool {
        matches!(self, Unit::Kg)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Pcs => write!(f, "pcs"),
            Unit::M => write!(f, "m"),
            Unit::M3 => write!(f, "m3"),
            Unit::Kg => write!(f, "kg"),
            Unit::Other(s) => write!(f, "{}", s),
        }
    }
}

//==============================================================================
// Input rows
//==============================================================================

/// One line of the BOM table
#[derive(Debug, Clone, PartialEq)]
pub struct BomRow {
    /// Hierarchy depth, 1 = top assembly
    pub level: u32,
    pub unit: Unit,
    pub quantity: f64,
    /// Trimmed component number
    pub component_id: String,
    pub description: String,
    /// Precomputed role label, when the BOM carries a role column
    pub role_label: Option<String>,
}

impl BomRow {
    pub fn new(
        level: u32,
        unit: &str,
        quantity: f64,
        component_id: &str,
        description: &str,
    ) -> Self {
        Self {
            level,
            unit: Unit::parse(unit),
            quantity,
            component_id: component_id.trim().to_string(),
            description: description.to_string(),
            role_label: None,
        }
    }

    /// Attach a precomputed role label (`single` / `paired` / `skip`)
    pub fn with_role_label(mut self, label: impl Into<String>) -> Self {
        self.role_label = Some(label.into());
        self
    }
}

impl AsRef<BomRow> for BomRow {
    fn as_ref(&self) -> &BomRow {
        self
    }
}

/// One record of the master reference table
#[derive(Debug, Clone, PartialEq)]
pub struct MasterEntry {
    pub component_id: String,
    /// Net weight per unit
    pub net_weight: f64,
    pub epd_material: String,
}

impl MasterEntry {
    pub fn new(component_id: &str, net_weight: f64, epd_material: &str) -> Self {
        Self {
            component_id: component_id.trim().to_string(),
            net_weight,
            epd_material: epd_material.trim().to_string(),
        }
    }
}

//==============================================================================
// Classification
//==============================================================================

/// Role of a row in the component/material pairing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// Standalone component with no material breakdown
    Single,
    /// Component immediately followed by its material row
    Paired,
    /// Material row owned by a preceding component
    Skip,
    /// Role label that none of the above accepts (role column input only)
    Unrecognized(String),
}

impl Role {
    /// Parse a role label as written in a precomputed role column
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "single" => Role::Single,
            "paired" => Role::Paired,
            "skip" => Role::Skip,
            _ => Role::Unrecognized(label.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Single => write!(f, "Single"),
            Role::Paired => write!(f, "Paired"),
            Role::Skip => write!(f, "Skip"),
            Role::Unrecognized(label) => write!(f, "{}", label),
        }
    }
}

/// A BOM row with its resolved weight and pairing role
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRow {
    pub row: BomRow,
    pub weight: f64,
    pub role: Role,
    /// Paired: the following material row. Skip: the preceding owner.
    pub partner_index: Option<usize>,
}

impl AsRef<BomRow> for ClassifiedRow {
    fn as_ref(&self) -> &BomRow {
        &self.row
    }
}

//==============================================================================
// Output records
//==============================================================================

/// One output row of the allocation table.
///
/// Field order is the sink column order; serde names are the sink headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    #[serde(rename = "EPDName")]
    pub epd_material: String,
    #[serde(rename = "EPDQuantity")]
    pub component_weight: f64,
    #[serde(rename = "Comments")]
    pub component_name: String,
    /// Absent for standalone components
    #[serde(rename = "UnitCalc")]
    pub material_fraction: Option<f64>,
    #[serde(rename = "Material Name")]
    pub material_name: String,
}

impl AllocationRecord {
    /// True when the record describes a component without material breakdown
    pub fn is_standalone(&self) -> bool {
        self.material_name.is_empty() && self.material_fraction.is_none()
    }
}
