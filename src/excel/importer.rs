//! Excel importer: worksheet → RawTable

use crate::error::{BomError, BomResult};
use crate::table::RawTable;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::{Path, PathBuf};

/// Reads one worksheet of an .xlsx/.xls workbook as a header + rows table
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    /// Create a new Excel importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the named sheet, or the first sheet when `sheet` is `None`
    pub fn read_table(&self, sheet: Option<&str>, name: &str) -> BomResult<RawTable> {
        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| BomError::Excel(format!("Failed to open Excel file: {}", e)))?;

        let sheet_name = match sheet {
            Some(s) => s.to_string(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| BomError::Excel("Workbook has no worksheets".to_string()))?,
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| BomError::Excel(format!("Failed to read sheet '{}': {}", sheet_name, e)))?;

        Ok(self.range_to_table(&range, name))
    }

    /// Convert a cell range: first row is the header, blank rows are dropped
    fn range_to_table(&self, range: &Range<Data>, name: &str) -> RawTable {
        // Sheet row of the header, 1-based; the range may not start at A1
        let header_row = range.start().map_or(1, |(row, _)| row as usize + 1);
        let mut rows = range.rows();

        let headers: Vec<String> = rows
            .next()
            .map(|header| header.iter().map(normalize_cell).collect())
            .unwrap_or_default();

        let (lines, data): (Vec<usize>, Vec<Vec<String>>) = rows
            .enumerate()
            .map(|(idx, row)| {
                let cells: Vec<String> = row.iter().map(normalize_cell).collect();
                (header_row + 1 + idx, cells)
            })
            .filter(|(_, cells)| cells.iter().any(|c| !c.is_empty()))
            .unzip();

        RawTable::with_lines(name, headers, data, lines)
    }
}

/// Render a cell as trimmed text.
///
/// Integral floats lose their fractional part so a numeric `12345` id reads
/// the same as the text `"12345"`.
pub fn normalize_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cell_numbers() {
        assert_eq!(normalize_cell(&Data::Float(12345.0)), "12345");
        assert_eq!(normalize_cell(&Data::Float(-2.0)), "-2");
        assert_eq!(normalize_cell(&Data::Float(1.5)), "1.5");
        assert_eq!(normalize_cell(&Data::Int(7)), "7");
    }

    #[test]
    fn test_normalize_cell_text() {
        assert_eq!(normalize_cell(&Data::String("  A-100 ".to_string())), "A-100");
        assert_eq!(normalize_cell(&Data::Empty), "");
        assert_eq!(normalize_cell(&Data::Bool(true)), "true");
    }

    #[test]
    fn test_missing_file_is_excel_error() {
        let importer = ExcelImporter::new("does-not-exist.xlsx");
        let result = importer.read_table(None, "BOM");
        assert!(matches!(result, Err(BomError::Excel(_))));
    }
}
