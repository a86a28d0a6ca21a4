//! Run configuration: which sheets and column headers to read, and how to lay
//! out the allocation sheet. Every field has a default matching the standard
//! BOM and master table exports.

use crate::error::{BomError, BomResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub bom: BomSource,
    pub master: MasterSource,
    pub output: OutputLayout,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BomSource {
    /// Worksheet to read; the first one when absent
    pub sheet: Option<String>,
    pub columns: BomColumns,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BomColumns {
    pub level: String,
    pub unit: String,
    pub quantity: String,
    pub component_id: String,
    pub description: String,
    /// Column holding precomputed `single` / `paired` / `skip` labels
    pub role: Option<String>,
}

impl Default for BomColumns {
    fn default() -> Self {
        Self {
            level: "Lvl".to_string(),
            unit: "U/M".to_string(),
            quantity: "Quantity".to_string(),
            component_id: "Component no".to_string(),
            description: "Description".to_string(),
            role: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MasterSource {
    pub sheet: Option<String>,
    pub columns: MasterColumns,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MasterColumns {
    pub component_id: String,
    pub net_weight: String,
    pub epd_material: String,
}

impl Default for MasterColumns {
    fn default() -> Self {
        Self {
            component_id: "Item no".to_string(),
            net_weight: "Net weight".to_string(),
            epd_material: "EPD Material".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputLayout {
    pub sheet: String,
    pub column_width: f64,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            sheet: "Allocation".to_string(),
            column_width: 30.0,
        }
    }
}

impl Config {
    /// Load and validate a YAML configuration file
    pub fn load(path: &Path) -> BomResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> BomResult<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> BomResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> BomResult<()> {
        let bom = &self.bom.columns;
        let master = &self.master.columns;
        let headers = [
            ("bom.columns.level", &bom.level),
            ("bom.columns.unit", &bom.unit),
            ("bom.columns.quantity", &bom.quantity),
            ("bom.columns.component_id", &bom.component_id),
            ("bom.columns.description", &bom.description),
            ("master.columns.component_id", &master.component_id),
            ("master.columns.net_weight", &master.net_weight),
            ("master.columns.epd_material", &master.epd_material),
        ];
        for (key, header) in headers {
            if header.trim().is_empty() {
                return Err(BomError::Config(format!("{} must not be empty", key)));
            }
        }
        if let Some(role) = &bom.role {
            if role.trim().is_empty() {
                return Err(BomError::Config(
                    "bom.columns.role must not be empty when set".to_string(),
                ));
            }
        }

        let sheet = self.output.sheet.trim();
        if sheet.is_empty() || sheet.chars().count() > 31 {
            return Err(BomError::Config(
                "output.sheet must be 1 to 31 characters".to_string(),
            ));
        }
        let width = self.output.column_width;
        if width.is_nan() || width <= 0.0 {
            return Err(BomError::Config(
                "output.column_width must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
