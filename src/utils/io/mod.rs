//! IO utilities for instrument exports
//!
//! This module provides the tabular ingestion seam used by the aggregators,
//! with a filesystem implementation over delimited text and spreadsheets.

pub mod paths;
pub mod table;
pub mod workbook;

use std::path::Path;

use crate::error::Result;

// Re-export commonly used functions for convenience
pub use paths::general::{
    find_matching_subfolder, list_files_matching, list_files_with_extension,
    list_subdirs_matching,
};
pub use table::Table;

/// Source of tabular data for instrument and spreadsheet exports
pub trait TableSource {
    /// Parse a latin-1 delimited file, splitting at `header_row` if given
    fn read_delimited(&self, path: &Path, header_row: Option<usize>) -> Result<Table>;

    /// Parse named columns of one spreadsheet sheet row by row
    ///
    /// Each returned row holds one cell per requested column, in request
    /// order; empty or non-numeric cells are `None`.
    fn read_sheet_rows(
        &self,
        path: &Path,
        sheet: &str,
        columns: &[&str],
    ) -> Result<Vec<Vec<Option<f64>>>>;
}

impl<T: TableSource + ?Sized> TableSource for &T {
    fn read_delimited(&self, path: &Path, header_row: Option<usize>) -> Result<Table> {
        (**self).read_delimited(path, header_row)
    }

    fn read_sheet_rows(
        &self,
        path: &Path,
        sheet: &str,
        columns: &[&str],
    ) -> Result<Vec<Vec<Option<f64>>>> {
        (**self).read_sheet_rows(path, sheet, columns)
    }
}

/// Reads exports straight from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTableSource;

impl TableSource for FsTableSource {
    fn read_delimited(&self, path: &Path, header_row: Option<usize>) -> Result<Table> {
        let records = table::read_latin1_records(path)?;
        Ok(Table::from_records(records, header_row))
    }

    fn read_sheet_rows(
        &self,
        path: &Path,
        sheet: &str,
        columns: &[&str],
    ) -> Result<Vec<Vec<Option<f64>>>> {
        workbook::read_sheet_rows(path, sheet, columns)
    }
}
