//! Delimited text exports
//!
//! Instrument CSV exports are latin-1 encoded, carry a free-form preamble
//! above the data table, and have ragged row widths.

use std::path::Path;

use crate::error::util::validate_file;
use crate::error::{Result, StudyError};

/// Rows of one delimited export, split at a header row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Rows above the header
    pub preamble: Vec<Vec<String>>,
    /// Header cells, if a header row was requested
    pub header: Option<Vec<String>>,
    /// Rows below the header (or all rows without one)
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from raw records, split around the header row
    ///
    /// A header row past the last record leaves every record in the preamble.
    #[must_use]
    pub fn from_records(mut records: Vec<Vec<String>>, header_row: Option<usize>) -> Self {
        match header_row {
            None => Self {
                rows: records,
                ..Self::default()
            },
            Some(row) if row < records.len() => {
                let rows = records.split_off(row + 1);
                let header = records.pop();
                Self {
                    preamble: records,
                    header,
                    rows,
                }
            }
            Some(_) => Self {
                preamble: records,
                ..Self::default()
            },
        }
    }

    /// Preamble cell text, trimmed
    #[must_use]
    pub fn preamble_cell(&self, row: usize, col: usize) -> Option<&str> {
        self.preamble.get(row)?.get(col).map(|s| s.trim())
    }

    /// Cell text, trimmed
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(|s| s.trim())
    }

    /// Numeric cell, `None` for missing or non-numeric text
    #[must_use]
    pub fn number(&self, row: usize, col: usize) -> Option<f64> {
        self.cell(row, col).and_then(parse_number)
    }

    /// Header cell, trimmed
    #[must_use]
    pub fn header_cell(&self, col: usize) -> Option<&str> {
        self.header.as_ref()?.get(col).map(|s| s.trim())
    }

    /// Rows where every requested column parses as a number
    ///
    /// Returns one series per requested column, all of equal length, plus the
    /// count of rows skipped.
    #[must_use]
    pub fn numeric_columns(&self, cols: &[usize]) -> (Vec<Vec<f64>>, usize) {
        let mut series = vec![Vec::with_capacity(self.rows.len()); cols.len()];
        let mut skipped = 0;

        for row in 0..self.rows.len() {
            let values: Option<Vec<f64>> = cols.iter().map(|&col| self.number(row, col)).collect();
            match values {
                Some(values) => {
                    for (column, value) in series.iter_mut().zip(values) {
                        column.push(value);
                    }
                }
                None => skipped += 1,
            }
        }

        (series, skipped)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read every record of a latin-1 delimited file
pub fn read_latin1_records(path: &Path) -> Result<Vec<Vec<String>>> {
    validate_file(path, "reading instrument export")?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| StudyError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut records = Vec::new();
    for result in reader.byte_records() {
        let record = result.map_err(|source| StudyError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(record.iter().map(decode_latin1).collect());
    }

    Ok(records)
}

/// Latin-1 maps each byte to the code point of the same value
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
