//! Excel exporter: allocation records → .xlsx

use crate::config::OutputLayout;
use crate::error::{BomError, BomResult};
use crate::types::{AllocationRecord, ALLOCATION_HEADERS};
use rust_xlsxwriter::{
    DocProperties, ExcelDateTime, Format, FormatAlign, Workbook, Worksheet, XlsxError,
};
use std::path::Path;

/// Creation date stamped into every workbook; a fixed value keeps reruns
/// byte-identical
const CREATION_DATE: (u16, u8, u8) = (2000, 1, 1);

fn export_error(context: &str) -> impl Fn(XlsxError) -> BomError + '_ {
    move |e| BomError::Export(format!("{}: {}", context, e))
}

/// Writes the allocation table to a single worksheet
pub struct ExcelExporter {
    layout: OutputLayout,
}

impl ExcelExporter {
    pub fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }

    /// Export records to an .xlsx file
    pub fn export(&self, records: &[AllocationRecord], output_path: &Path) -> BomResult<()> {
        let mut workbook = Workbook::new();
        let (year, month, day) = CREATION_DATE;
        let created = ExcelDateTime::from_ymd(year, month, day)
            .map_err(export_error("Failed to set creation date"))?;
        workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

        let worksheet = workbook.add_worksheet();
        self.write_sheet(worksheet, records)?;

        workbook
            .save(output_path)
            .map_err(export_error("Failed to save Excel file"))?;

        Ok(())
    }

    fn write_sheet(
        &self,
        worksheet: &mut Worksheet,
        records: &[AllocationRecord],
    ) -> BomResult<()> {
        worksheet
            .set_name(self.layout.sheet.trim())
            .map_err(export_error("Failed to set worksheet name"))?;

        let left = Format::new().set_align(FormatAlign::Left);
        let header = Format::new().set_bold().set_align(FormatAlign::Left);

        for (col, title) in ALLOCATION_HEADERS.iter().enumerate() {
            let col = col as u16;
            worksheet
                .set_column_width(col, self.layout.column_width)
                .map_err(export_error("Failed to set column width"))?;
            worksheet
                .write_string_with_format(0, col, *title, &header)
                .map_err(export_error("Failed to write header"))?;
        }

        for (idx, record) in records.iter().enumerate() {
            let row = (idx + 1) as u32;

            worksheet
                .write_string_with_format(row, 0, &record.epd_material, &left)
                .and_then(|ws| ws.write_number_with_format(row, 1, record.component_weight, &left))
                .and_then(|ws| ws.write_string_with_format(row, 2, &record.component_name, &left))
                .map_err(export_error("Failed to write record"))?;

            // Standalone components leave the material cells blank
            let written = match record.material_fraction {
                Some(fraction) => worksheet.write_number_with_format(row, 3, fraction, &left),
                None => worksheet.write_blank(row, 3, &left),
            };
            written
                .and_then(|ws| ws.write_string_with_format(row, 4, &record.material_name, &left))
                .map_err(export_error("Failed to write record"))?;
        }

        Ok(())
    }
}
