//! Spreadsheet I/O for test fixtures.
//!
//! Workbooks are read and written through umya-spreadsheet. Reads are keyed
//! by the header row: the first row of a sheet holds the column labels, and
//! every later row projects into an ordered label-to-text mapping (duplicate
//! labels: last write wins, same as the database row projection). Data rows
//! are addressed 1-based; write coordinates are 0-based and create the
//! workbook, sheet, and cell as needed.
//!
//! Like the accessor, every operation has a strict `try_*` form and a
//! fail-soft form that logs through `tracing` and returns empty.

use indexmap::IndexMap;
use std::path::Path;
use thiserror::Error;
use tracing::error;

/// One data row: an ordered mapping from header label to cell text.
pub type SheetRow = IndexMap<String, String>;

/// Errors from spreadsheet operations.
#[derive(Error, Debug)]
pub enum XlsxError {
    /// The workbook could not be opened or parsed
    #[error("Failed to open workbook '{path}': {message}")]
    OpenFailed { path: String, message: String },

    /// The named sheet does not exist in the workbook
    #[error("No sheet named '{0}'")]
    SheetNotFound(String),

    /// The 1-based data row number is outside the sheet's data rows
    #[error("Invalid row number {row}: valid range is [1,{max}]")]
    RowOutOfRange { row: usize, max: usize },

    /// The named column does not appear in the header row
    #[error("Invalid column name '{0}'")]
    ColumnNotFound(String),

    /// The workbook could not be written back
    #[error("Failed to save workbook '{path}': {message}")]
    SaveFailed { path: String, message: String },
}

fn open_workbook(path: &Path) -> Result<umya_spreadsheet::Spreadsheet, XlsxError> {
    umya_spreadsheet::reader::xlsx::read(path).map_err(|e| XlsxError::OpenFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Read every data row of a sheet, keyed by the header row.
///
/// The first row must hold the column labels. Rows whose cells are all
/// empty are skipped.
///
/// # Errors
///
/// Returns `XlsxError` if the workbook cannot be opened or the sheet does
/// not exist.
pub fn try_read_sheet(
    path: impl AsRef<Path>,
    sheet_name: &str,
) -> Result<Vec<SheetRow>, XlsxError> {
    let book = open_workbook(path.as_ref())?;
    let sheet = book
        .get_sheet_by_name(sheet_name)
        .ok_or_else(|| XlsxError::SheetNotFound(sheet_name.to_string()))?;

    let (max_col, max_row) = sheet.get_highest_column_and_row();
    let mut data = Vec::new();
    for row in 2..=max_row {
        let mut mapping = SheetRow::new();
        let mut has_content = false;
        for col in 1..=max_col {
            let value = sheet.get_value((col, row));
            if !value.is_empty() {
                has_content = true;
            }
            mapping.insert(sheet.get_value((col, 1)), value);
        }
        if has_content {
            data.push(mapping);
        }
    }
    Ok(data)
}

/// Fail-soft [`try_read_sheet`]: failures are logged and yield an empty list.
pub fn read_sheet(path: impl AsRef<Path>, sheet_name: &str) -> Vec<SheetRow> {
    match try_read_sheet(&path, sheet_name) {
        Ok(data) => data,
        Err(e) => {
            error!(sheet = sheet_name, error = %e, "sheet read failed");
            Vec::new()
        }
    }
}

/// Read a single data row of a sheet, addressed 1-based.
///
/// Row 1 is the first row after the header.
///
/// # Errors
///
/// Returns `XlsxError` if the sheet cannot be read or the row number is
/// outside the sheet's data rows.
pub fn try_read_row(
    path: impl AsRef<Path>,
    sheet_name: &str,
    row: usize,
) -> Result<SheetRow, XlsxError> {
    let data = try_read_sheet(path, sheet_name)?;
    let max = data.len();
    data.into_iter()
        .nth(row.wrapping_sub(1))
        .ok_or(XlsxError::RowOutOfRange { row, max })
}

/// Fail-soft [`try_read_row`]: failures are logged and yield `None`.
pub fn read_row(path: impl AsRef<Path>, sheet_name: &str, row: usize) -> Option<SheetRow> {
    match try_read_row(&path, sheet_name, row) {
        Ok(mapping) => Some(mapping),
        Err(e) => {
            error!(sheet = sheet_name, row, error = %e, "row read failed");
            None
        }
    }
}

/// Read one cell of a data row by header label.
///
/// # Errors
///
/// Returns `XlsxError` if the row cannot be read or the label does not
/// appear in the header row.
pub fn try_read_cell(
    path: impl AsRef<Path>,
    sheet_name: &str,
    row: usize,
    column: &str,
) -> Result<String, XlsxError> {
    let mut mapping = try_read_row(path, sheet_name, row)?;
    mapping
        .shift_remove(column)
        .ok_or_else(|| XlsxError::ColumnNotFound(column.to_string()))
}

/// Fail-soft [`try_read_cell`]: failures are logged and yield `None`.
pub fn read_cell(
    path: impl AsRef<Path>,
    sheet_name: &str,
    row: usize,
    column: &str,
) -> Option<String> {
    match try_read_cell(&path, sheet_name, row, column) {
        Ok(value) => Some(value),
        Err(e) => {
            error!(sheet = sheet_name, row, column, error = %e, "cell read failed");
            None
        }
    }
}

/// Write one cell and persist the workbook.
///
/// Coordinates are 0-based. The workbook, sheet, and cell are created as
/// needed; an existing workbook is read, modified, and written back.
///
/// # Errors
///
/// Returns `XlsxError` if an existing workbook cannot be opened or the
/// result cannot be saved.
pub fn try_write_cell(
    path: impl AsRef<Path>,
    sheet_name: &str,
    content: &str,
    row_index: u32,
    column_index: u32,
) -> Result<(), XlsxError> {
    let path = path.as_ref();
    let mut book = if path.exists() {
        open_workbook(path)?
    } else {
        umya_spreadsheet::new_file_empty_worksheet()
    };

    if book.get_sheet_by_name(sheet_name).is_none() {
        book.new_sheet(sheet_name)
            .map_err(|e| XlsxError::SaveFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
    }

    let sheet = book
        .get_sheet_by_name_mut(sheet_name)
        .ok_or_else(|| XlsxError::SheetNotFound(sheet_name.to_string()))?;
    sheet
        .get_cell_mut((column_index + 1, row_index + 1))
        .set_value(content);

    umya_spreadsheet::writer::xlsx::write(&book, path).map_err(|e| XlsxError::SaveFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Fail-soft [`try_write_cell`]: failures are logged, not propagated.
pub fn write_cell(
    path: impl AsRef<Path>,
    sheet_name: &str,
    content: &str,
    row_index: u32,
    column_index: u32,
) {
    if let Err(e) = try_write_cell(&path, sheet_name, content, row_index, column_index) {
        error!(sheet = sheet_name, error = %e, "cell write failed");
    }
}
