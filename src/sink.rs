//! Allocation sink: writes records as .xlsx, .csv or .json by extension

use crate::config::OutputLayout;
use crate::error::{BomError, BomResult};
use crate::excel::ExcelExporter;
use crate::types::AllocationRecord;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Output formats the sink understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkFormat {
    Xlsx,
    Csv,
    Json,
}

impl SinkFormat {
    pub fn from_path(path: &Path) -> BomResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "xlsx" => Ok(SinkFormat::Xlsx),
            "csv" => Ok(SinkFormat::Csv),
            "json" => Ok(SinkFormat::Json),
            _ => Err(BomError::UnsupportedFormat(ext)),
        }
    }
}

/// Write the allocation table; the format follows the output extension
pub fn write_allocations(
    path: &Path,
    records: &[AllocationRecord],
    layout: &OutputLayout,
) -> BomResult<()> {
    let format = SinkFormat::from_path(path)?;
    match format {
        SinkFormat::Xlsx => ExcelExporter::new(layout.clone()).export(records, path)?,
        SinkFormat::Csv => write_csv(path, records)?,
        SinkFormat::Json => write_json(path, records)?,
    }
    info!(path = %path.display(), ?format, records = records.len(), "allocation written");
    Ok(())
}

fn write_csv(path: &Path, records: &[AllocationRecord]) -> BomResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(path: &Path, records: &[AllocationRecord]) -> BomResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn records() -> Vec<AllocationRecord> {
        vec![
            AllocationRecord {
                epd_material: "EPD-X".to_string(),
                component_weight: 6.0,
                component_name: "Frame".to_string(),
                material_fraction: Some(0.13),
                material_name: "Steel".to_string(),
            },
            AllocationRecord {
                epd_material: String::new(),
                component_weight: 10.0,
                component_name: "Bolt".to_string(),
                material_fraction: None,
                material_name: String::new(),
            },
        ]
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SinkFormat::from_path(Path::new("a.XLSX")).unwrap(), SinkFormat::Xlsx);
        assert_eq!(SinkFormat::from_path(Path::new("a.csv")).unwrap(), SinkFormat::Csv);
        assert_eq!(SinkFormat::from_path(Path::new("a.json")).unwrap(), SinkFormat::Json);
        assert!(SinkFormat::from_path(Path::new("a.ods")).is_err());
        assert!(SinkFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_csv_columns_and_blank_fraction() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        write_allocations(&path, &records(), &OutputLayout::default()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "EPDName,EPDQuantity,Comments,UnitCalc,Material Name");
        assert_eq!(lines[1], "EPD-X,6.0,Frame,0.13,Steel");
        assert_eq!(lines[2], ",10.0,Bolt,,");
    }

    #[test]
    fn test_json_output() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");
        write_allocations(&path, &records(), &OutputLayout::default()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<AllocationRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, records());

        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value[0]["EPDName"], "EPD-X");
        assert!(value[1]["UnitCalc"].is_null());
    }
}
