//! Configuration for study ingestion.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::algorithm::curve::CurveConfig;
use crate::error::{Result, StudyError};
use crate::location::LocationOverrides;
use crate::models::Modality;

/// Configuration for reconciling instrument exports of one study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Token value (position 1 of a name) that marks a return visit
    pub return_visit_marker: String,
    /// Letter that prefixes the raw instrument location code in file names
    pub location_marker: char,
    /// Extension of instrument data files
    pub data_extension: String,
    /// Spreadsheet sheet holding scans recorded before exposure
    pub before_exposure_sheet: String,
    /// Spreadsheet sheet holding scans recorded after exposure
    pub after_exposure_sheet: String,
    /// Spreadsheet column with scan numbers
    pub scan_column: String,
    /// Spreadsheet column with location codes
    pub location_column: String,
    /// Folder label for epidermal exports
    pub epidermal_folder: String,
    /// Folder label for blood flow exports
    pub blood_flow_folder: String,
    /// Folder label for skin roughness exports
    pub skin_roughness_folder: String,
    /// Header row of the epidermal depth table
    pub epidermal_header_row: usize,
    /// Number of key/value rows in the epidermal summary block
    pub epidermal_summary_rows: usize,
    /// Header row of the blood flow depth table
    pub blood_flow_header_row: usize,
    /// Curve analysis parameters
    pub curve: CurveConfig,
    /// Per-subject location code exceptions
    pub location_overrides: LocationOverrides,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            return_visit_marker: "2".to_string(),
            location_marker: 'L',
            data_extension: "csv".to_string(),
            before_exposure_sheet: "Surface Area_BE".to_string(),
            after_exposure_sheet: "Surface Area_AE".to_string(),
            scan_column: "Scan#".to_string(),
            location_column: "Location".to_string(),
            epidermal_folder: "epidermal".to_string(),
            blood_flow_folder: "bloodflow".to_string(),
            skin_roughness_folder: "skin roughness".to_string(),
            epidermal_header_row: 6,
            epidermal_summary_rows: 5,
            blood_flow_header_row: 1,
            curve: CurveConfig::default(),
            location_overrides: LocationOverrides::study_defaults(),
        }
    }
}

impl StudyConfig {
    /// Create a new configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| StudyError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| StudyError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Set the return visit marker
    #[must_use]
    pub fn with_return_visit_marker(mut self, marker: &str) -> Self {
        self.return_visit_marker = marker.to_string();
        self
    }

    /// Set the sheet names for before and after exposure
    #[must_use]
    pub fn with_exposure_sheets(mut self, before: &str, after: &str) -> Self {
        self.before_exposure_sheet = before.to_string();
        self.after_exposure_sheet = after.to_string();
        self
    }

    /// Replace the curve analysis parameters
    #[must_use]
    pub fn with_curve(mut self, curve: CurveConfig) -> Self {
        self.curve = curve;
        self
    }

    /// Replace the location override table
    #[must_use]
    pub fn with_location_overrides(mut self, overrides: LocationOverrides) -> Self {
        self.location_overrides = overrides;
        self
    }

    /// Folder label configured for a modality
    #[must_use]
    pub fn folder_label(&self, modality: Modality) -> &str {
        match modality {
            Modality::Epidermal => &self.epidermal_folder,
            Modality::BloodFlow => &self.blood_flow_folder,
            Modality::SkinRoughness => &self.skin_roughness_folder,
        }
    }
}
