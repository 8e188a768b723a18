//! Spreadsheet exports

use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

use crate::error::util::validate_file;
use crate::error::{Result, StudyError};

/// Read named columns from one sheet, keeping rows aligned
///
/// The first row of the sheet is the header. Every later row yields one cell
/// per requested column, in request order, with `None` for an empty or
/// non-numeric cell. Rows where all requested cells are empty are skipped.
pub fn read_sheet_rows(
    path: &Path,
    sheet: &str,
    columns: &[&str],
) -> Result<Vec<Vec<Option<f64>>>> {
    validate_file(path, "reading exposure spreadsheet")?;
    let spreadsheet_error = |reason: String| StudyError::Spreadsheet {
        path: path.to_path_buf(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(e.to_string()))?;
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| spreadsheet_error(format!("sheet '{sheet}': {e}")))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| spreadsheet_error(format!("sheet '{sheet}' is empty")))?;

    let indices = columns
        .iter()
        .map(|name| {
            header
                .iter()
                .position(|cell| cell_text(cell).trim() == *name)
                .ok_or_else(|| spreadsheet_error(format!("sheet '{sheet}' has no column '{name}'")))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(rows
        .map(|row| {
            indices
                .iter()
                .map(|&idx| row.get(idx).and_then(cell_number))
                .collect::<Vec<_>>()
        })
        .filter(|cells| cells.iter().any(Option::is_some))
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(v) => Some(*v as f64),
        Data::Float(v) => Some(*v),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
