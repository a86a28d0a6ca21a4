//! Tabular sources: header row + string cells, read from .xlsx/.xls or .csv,
//! and the column mapping onto BOM rows and master entries.

use crate::config::{BomColumns, MasterColumns};
use crate::error::{BomError, BomResult};
use crate::excel::ExcelImporter;
use crate::types::{BomRow, MasterEntry, Unit};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

/// A table of trimmed string cells with its header row
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Name used in error messages ("BOM", "master")
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// 1-based source line (CSV) or sheet row (Excel) of each data row
    pub lines: Vec<usize>,
}

impl RawTable {
    /// Table whose data rows directly follow a header on line 1
    pub fn new(name: &str, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let lines = (0..rows.len()).map(|idx| idx + 2).collect();
        Self {
            name: name.to_string(),
            headers,
            rows,
            lines,
        }
    }

    /// Table with the source line of every data row, for readers that drop
    /// blank rows
    pub fn with_lines(
        name: &str,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        lines: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(rows.len(), lines.len());
        Self {
            name: name.to_string(),
            headers,
            rows,
            lines,
        }
    }

    /// Source line of data row `row`
    pub fn line(&self, row: usize) -> usize {
        self.lines.get(row).copied().unwrap_or(row + 2)
    }

    /// Column index for a header: exact match first, then case-insensitive
    pub fn column(&self, header: &str) -> Option<usize> {
        let wanted = header.trim();
        self.headers
            .iter()
            .position(|h| h == wanted)
            .or_else(|| {
                self.headers
                    .iter()
                    .position(|h| h.eq_ignore_ascii_case(wanted))
            })
    }

    pub fn require_column(&self, header: &str) -> BomResult<usize> {
        self.column(header).ok_or_else(|| BomError::MissingColumn {
            table: self.name.clone(),
            column: header.to_string(),
        })
    }

    /// Cell text, empty when the row is shorter than the header
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn invalid(&self, row: usize, column: &str, value: &str) -> BomError {
        BomError::InvalidCell {
            table: self.name.clone(),
            row: self.line(row),
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}

/// Read a table, choosing the reader from the file extension
pub fn read_table(path: &Path, sheet: Option<&str>, name: &str) -> BomResult<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let table = match ext.as_str() {
        "csv" => read_csv(path, name)?,
        "xlsx" | "xlsm" | "xls" | "xlsb" => ExcelImporter::new(path).read_table(sheet, name)?,
        _ => return Err(BomError::UnsupportedFormat(ext)),
    };

    debug!(
        table = name,
        path = %path.display(),
        rows = table.len(),
        "table loaded"
    );
    Ok(table)
}

/// Read a CSV file with a header row
pub fn read_csv(path: &Path, name: &str) -> BomResult<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    let mut lines = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let cells: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        let line = record
            .position()
            .map_or(idx + 2, |pos| pos.line() as usize);
        rows.push(cells);
        lines.push(line);
    }

    Ok(RawTable::with_lines(name, headers, rows, lines))
}

/// Parse a real number; blank cells are 0
fn parse_number(text: &str) -> Option<f64> {
    if text.is_empty() {
        return Some(0.0);
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a hierarchy level: an integer ≥ 1, written as `2` or `2.0`
fn parse_level(text: &str) -> Option<u32> {
    let value = text.parse::<f64>().ok()?;
    if value >= 1.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

/// Map a BOM table onto rows
pub fn bom_rows(table: &RawTable, columns: &BomColumns) -> BomResult<Vec<BomRow>> {
    let level_col = table.require_column(&columns.level)?;
    let unit_col = table.require_column(&columns.unit)?;
    let quantity_col = table.require_column(&columns.quantity)?;
    let id_col = table.require_column(&columns.component_id)?;
    let description_col = table.require_column(&columns.description)?;
    let role_col = columns
        .role
        .as_deref()
        .map(|header| table.require_column(header))
        .transpose()?;

    (0..table.len())
        .map(|idx| -> BomResult<BomRow> {
            let level_text = table.cell(idx, level_col);
            let level = parse_level(level_text)
                .ok_or_else(|| table.invalid(idx, &columns.level, level_text))?;

            let quantity_text = table.cell(idx, quantity_col);
            let quantity = parse_number(quantity_text)
                .filter(|q| *q >= 0.0)
                .ok_or_else(|| table.invalid(idx, &columns.quantity, quantity_text))?;

            Ok(BomRow {
                level,
                unit: Unit::parse(table.cell(idx, unit_col)),
                quantity,
                component_id: table.cell(idx, id_col).trim().to_string(),
                description: table.cell(idx, description_col).to_string(),
                role_label: role_col.map(|col| table.cell(idx, col).to_string()),
            })
        })
        .collect()
}

/// Map a master table onto reference entries
pub fn master_entries(table: &RawTable, columns: &MasterColumns) -> BomResult<Vec<MasterEntry>> {
    let id_col = table.require_column(&columns.component_id)?;
    let weight_col = table.require_column(&columns.net_weight)?;
    let epd_col = table.require_column(&columns.epd_material)?;

    (0..table.len())
        .map(|idx| -> BomResult<MasterEntry> {
            let weight_text = table.cell(idx, weight_col);
            let net_weight = parse_number(weight_text)
                .ok_or_else(|| table.invalid(idx, &columns.net_weight, weight_text))?;

            Ok(MasterEntry::new(
                table.cell(idx, id_col),
                net_weight,
                table.cell(idx, epd_col),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn bom_table(rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            "BOM",
            strings(&["Lvl", "U/M", "Quantity", "Component no", "Description"]),
            rows.iter().map(|r| strings(r)).collect(),
        )
    }

    #[test]
    fn test_column_lookup() {
        let table = bom_table(&[]);
        assert_eq!(table.column("Lvl"), Some(0));
        assert_eq!(table.column(" quantity "), Some(2));
        assert_eq!(table.column("Net weight"), None);
        assert!(matches!(
            table.require_column("Net weight"),
            Err(BomError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_bom_rows_parse() {
        let table = bom_table(&[
            &["1", "PCS", "2", "A", "Assembly"],
            &["2.0", "kg", "1.5", " B ", "Steel"],
            &["2", "m", "", "C"],
        ]);
        let rows = bom_rows(&table, &BomColumns::default()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].level, 1);
        assert_eq!(rows[0].unit, Unit::Pcs);
        assert_eq!(rows[1].level, 2);
        assert_eq!(rows[1].component_id, "B");
        assert_eq!(rows[1].quantity, 1.5);
        // Blank quantity and short rows
        assert_eq!(rows[2].quantity, 0.0);
        assert_eq!(rows[2].description, "");
        assert!(rows[2].role_label.is_none());
    }

    #[test]
    fn test_bom_rows_reject_bad_level() {
        for bad in ["0", "1.5", "abc", ""] {
            let table = bom_table(&[&[bad, "pcs", "1", "A", "x"]]);
            let err = bom_rows(&table, &BomColumns::default()).unwrap_err();
            match err {
                BomError::InvalidCell { row, column, .. } => {
                    assert_eq!(row, 2);
                    assert_eq!(column, "Lvl");
                }
                other => panic!("Expected InvalidCell, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_bom_rows_reject_negative_quantity() {
        let table = bom_table(&[&["1", "pcs", "-1", "A", "x"]]);
        assert!(bom_rows(&table, &BomColumns::default()).is_err());
    }

    #[test]
    fn test_bom_rows_with_role_column() {
        let table = RawTable::new(
            "BOM",
            strings(&["Lvl", "U/M", "Quantity", "Component no", "Description", "Description 7"]),
            vec![strings(&["1", "pcs", "1", "A", "x", "Paired"])],
        );
        let columns = BomColumns {
            role: Some("Description 7".to_string()),
            ..BomColumns::default()
        };
        let rows = bom_rows(&table, &columns).unwrap();
        assert_eq!(rows[0].role_label.as_deref(), Some("Paired"));

        let missing = BomColumns {
            role: Some("Role".to_string()),
            ..BomColumns::default()
        };
        assert!(bom_rows(&table, &missing).is_err());
    }

    #[test]
    fn test_master_entries_parse() {
        let table = RawTable::new(
            "master",
            strings(&["Item no", "Net weight", "EPD Material"]),
            vec![
                strings(&["A", "3", ""]),
                strings(&[" B ", "", "EPD-X "]),
            ],
        );
        let entries = master_entries(&table, &MasterColumns::default()).unwrap();
        assert_eq!(entries[0], MasterEntry::new("A", 3.0, ""));
        assert_eq!(entries[1], MasterEntry::new("B", 0.0, "EPD-X"));
    }

    #[test]
    fn test_master_entries_reject_bad_weight() {
        let table = RawTable::new(
            "master",
            strings(&["Item no", "Net weight", "EPD Material"]),
            vec![strings(&["A", "heavy", ""])],
        );
        assert!(matches!(
            master_entries(&table, &MasterColumns::default()),
            Err(BomError::InvalidCell { .. })
        ));
    }

    #[test]
    fn test_read_csv_skips_blank_rows() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, " Lvl ,U/M,Quantity,Component no,Description").unwrap();
        writeln!(file, "1,pcs,2,A,Assembly").unwrap();
        writeln!(file, ",,,,").unwrap();
        writeln!(file, "2,kg,1.5,B,Steel").unwrap();
        file.flush().unwrap();

        let table = read_table(file.path(), None, "BOM").unwrap();
        assert_eq!(table.headers[0], "Lvl");
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, 3), "B");
    }

    #[test]
    fn test_invalid_cell_reports_source_line_after_blank_rows() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Lvl,U/M,Quantity,Component no,Description").unwrap();
        writeln!(file, "1,pcs,2,A,Assembly").unwrap();
        writeln!(file, ",,,,").unwrap();
        writeln!(file, ",,,,").unwrap();
        writeln!(file, "2,kg,lots,B,Steel").unwrap();
        file.flush().unwrap();

        let table = read_table(file.path(), None, "BOM").unwrap();
        assert_eq!(table.lines, vec![2, 5]);

        match bom_rows(&table, &BomColumns::default()).unwrap_err() {
            BomError::InvalidCell { row, column, value, .. } => {
                assert_eq!(row, 5);
                assert_eq!(column, "Quantity");
                assert_eq!(value, "lots");
            }
            other => panic!("Expected InvalidCell, got {:?}", other),
        }
    }

    #[test]
    fn test_read_table_unsupported_extension() {
        let result = read_table(Path::new("bom.txt"), None, "BOM");
        assert!(matches!(result, Err(BomError::UnsupportedFormat(ext)) if ext == "txt"));
    }
}
