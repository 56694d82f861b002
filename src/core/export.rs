// VcfSheet - core/export.rs
//
// XLSX and CSV rendering of a contact table.
// Core layer: renders into memory or any Write trait object; the app layer
// decides where the bytes land and makes the write atomic.

use crate::core::model::ContactTable;
use crate::util::constants;
use crate::util::error::ExportError;
use rust_xlsxwriter::{Format, Workbook};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    /// Pick the format from a destination's extension; anything that is not
    /// `.csv` is written as a workbook.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Xlsx,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Xlsx => "XLSX",
            Self::Csv => "CSV",
        }
    }
}

/// Check the table fits in one worksheet (header row included).
pub fn check_sheet_limits(table: &ContactTable) -> Result<(), ExportError> {
    let rows = table.rows.len() + 1;
    let columns = table.width();
    if rows > constants::MAX_XLSX_ROWS || columns > constants::MAX_XLSX_COLUMNS {
        return Err(ExportError::TooLarge {
            rows,
            columns,
            max_rows: constants::MAX_XLSX_ROWS,
            max_columns: constants::MAX_XLSX_COLUMNS,
        });
    }
    Ok(())
}

/// Render `table` as a single-sheet workbook and return the file bytes.
///
/// Blank cells are left unwritten. `export_path` is only used for error
/// context.
pub fn render_xlsx(
    table: &ContactTable,
    sheet_name: &str,
    export_path: &Path,
) -> Result<Vec<u8>, ExportError> {
    check_sheet_limits(table)?;
    let xlsx_err = |source| ExportError::Xlsx {
        path: export_path.to_path_buf(),
        source,
    };

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(xlsx_err)?;

    // Limits were checked above, so the casts below cannot truncate.
    for (col, title) in table.header.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, title, &header_format)
            .map_err(xlsx_err)?;
    }
    worksheet
        .set_column_width(0, constants::NAME_COLUMN_WIDTH)
        .map_err(xlsx_err)?;
    for col in 1..table.width() {
        worksheet
            .set_column_width(col as u16, constants::PHONE_COLUMN_WIDTH)
            .map_err(xlsx_err)?;
    }

    for (idx, cells) in table.rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        for (col, cell) in cells.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            worksheet
                .write_string(row, col as u16, cell)
                .map_err(xlsx_err)?;
        }
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

/// Write `table` as CSV (header first). Returns the number of data rows.
pub fn export_csv<W: Write>(
    table: &ContactTable,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |source| ExportError::Csv {
        path: export_path.to_path_buf(),
        source,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(&table.header).map_err(csv_err)?;
    for cells in &table.rows {
        csv_writer.write_record(cells).map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: PathBuf::from(export_path),
        source: e,
    })?;

    Ok(table.rows.len())
}

/// Render `table` in `format` into memory.
pub fn render(
    table: &ContactTable,
    format: ExportFormat,
    sheet_name: &str,
    export_path: &Path,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Xlsx => render_xlsx(table, sheet_name, export_path),
        ExportFormat::Csv => {
            let mut buf = Vec::new();
            export_csv(table, &mut buf, export_path)?;
            Ok(buf)
        }
    }
}
