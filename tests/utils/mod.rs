use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use dermscan::error::{Result, StudyError};
use dermscan::utils::io::{FsTableSource, Table, TableSource};
use dermscan::{ExposureState, LocationSlot, MeasurementTag};

/// Write `contents` to `dir/name`, creating parent folders
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// Epidermal export: six summary rows, header at row 6, then the curve
#[must_use]
pub fn epidermal_csv(depth: &[f64], intensity: &[f64]) -> String {
    let mut out = String::from(
        "Operator,JS\nDate,2021-03-04\nProbe,A\nGain,12\nAverages,8\nThickness,0.09\ndepth (mm),intensity\n",
    );
    for (d, i) in depth.iter().zip(intensity) {
        out.push_str(&format!("{d},{i}\n"));
    }
    out
}

/// Blood flow export: plexus depth in row 0, header at row 1
#[must_use]
pub fn blood_flow_csv(plexus: &str, rows: &[(f64, f64, f64)]) -> String {
    let mut out = format!("Plexus depth,{plexus}\ndepth,density,diameter\n");
    for (d, v, w) in rows {
        out.push_str(&format!("{d},{v},{w}\n"));
    }
    out
}

#[must_use]
pub fn roughness_csv(ra: f64, rz: f64, rq: f64) -> String {
    format!("Ra,{ra}\nRz,{rz}\nRq,{rq}\n")
}

/// A triangular curve: depth `i / 20`, intensity peaking at index 10
#[must_use]
pub fn triangle_curve() -> (Vec<f64>, Vec<f64>) {
    let depth: Vec<f64> = (0..21).map(|i| f64::from(i) / 20.0).collect();
    let intensity: Vec<f64> = (0..21).map(|i| 1.0 - (f64::from(i) - 10.0).abs() / 10.0).collect();
    (depth, intensity)
}

#[must_use]
pub fn tag(path: &str) -> MeasurementTag {
    MeasurementTag {
        path: PathBuf::from(path),
        subject_id: "A52".to_string(),
        scan_id: 101,
        arm_id: "1".to_string(),
        exposure: ExposureState::Pre,
        location: LocationSlot::Canonical(1),
        return_visit: false,
    }
}

/// Delimited files from disk, spreadsheet sheets from memory
///
/// Sheets are keyed by the spreadsheet's file name and the sheet name, each
/// holding `(scan, location)` rows with `None` for an empty cell.
#[derive(Debug, Default)]
pub struct MemorySheets {
    sheets: HashMap<(String, String), Vec<(Option<i64>, Option<i64>)>>,
}

impl MemorySheets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sheet(self, file_name: &str, sheet: &str, rows: &[(i64, i64)]) -> Self {
        let rows: Vec<_> = rows
            .iter()
            .map(|&(scan, location)| (Some(scan), Some(location)))
            .collect();
        self.with_ragged_sheet(file_name, sheet, &rows)
    }

    #[must_use]
    pub fn with_ragged_sheet(
        mut self,
        file_name: &str,
        sheet: &str,
        rows: &[(Option<i64>, Option<i64>)],
    ) -> Self {
        self.sheets
            .insert((file_name.to_string(), sheet.to_string()), rows.to_vec());
        self
    }
}

impl TableSource for MemorySheets {
    fn read_delimited(&self, path: &Path, header_row: Option<usize>) -> Result<Table> {
        FsTableSource.read_delimited(path, header_row)
    }

    fn read_sheet_rows(
        &self,
        path: &Path,
        sheet: &str,
        _columns: &[&str],
    ) -> Result<Vec<Vec<Option<f64>>>> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let rows = self
            .sheets
            .get(&(file_name, sheet.to_string()))
            .ok_or_else(|| StudyError::Spreadsheet {
                path: path.to_path_buf(),
                reason: format!("no sheet '{sheet}'"),
            })?;

        #[allow(clippy::cast_precision_loss)]
        let number = |cell: Option<i64>| cell.map(|v| v as f64);
        Ok(rows
            .iter()
            .map(|&(scan, location)| vec![number(scan), number(location)])
            .collect())
    }
}
