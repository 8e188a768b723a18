//! Identifier parsing for instrument file and folder names
//!
//! Instrument exports encode who, when and where in the final path segment,
//! as underscore-delimited tokens:
//!
//! ```text
//! A52_1_L50_S101.csv          standard shape, scan id at token 3
//! A52_2_arm_L53_S201 x.csv    location-tagged shape, scan id at token 4
//! ```
//!
//! Token 0 is the subject id and token 1 the visit marker. The raw
//! instrument location code is not positionally stable, so it is found by
//! pattern search instead.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::StudyConfig;
use crate::error::{Result, StudyError};

lazy_static! {
    static ref LETTER_CODE: Regex = Regex::new(r"([A-Za-z])(\d+)").unwrap();
}

/// The filename layouts seen across instrument export revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilenameShape {
    /// `subject_visit_location_scan`
    Standard,
    /// `subject_visit_location_Lcode_scan`, the scan id shifted to token 4
    LocationTagged,
}

impl FilenameShape {
    /// Token position of the scan id
    #[must_use]
    pub const fn scan_token(self) -> usize {
        match self {
            Self::Standard => 3,
            Self::LocationTagged => 4,
        }
    }
}

/// Everything recoverable from one data file name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedIdentifier {
    pub path: PathBuf,
    pub subject_id: String,
    pub data_location: String,
    pub scan_id: i64,
    pub arm_id: String,
    pub raw_location: i64,
    pub shape: FilenameShape,
}

/// Positional and pattern-based parser for study file names
#[derive(Debug, Clone)]
pub struct IdentifierParser {
    return_visit_marker: String,
    location_marker: char,
}

impl Default for IdentifierParser {
    fn default() -> Self {
        Self::from_config(&StudyConfig::default())
    }
}

impl IdentifierParser {
    #[must_use]
    pub fn from_config(config: &StudyConfig) -> Self {
        Self {
            return_visit_marker: config.return_visit_marker.clone(),
            location_marker: config.location_marker,
        }
    }

    /// Subject id, token 0
    pub fn subject_id(&self, path: &Path) -> Result<String> {
        let stem = stem(path)?;
        match stem.split('_').next() {
            Some(id) if !id.trim().is_empty() => Ok(id.trim().to_string()),
            _ => Err(malformed(path, "missing subject id token")),
        }
    }

    /// True only when token 1 is the return visit marker
    #[must_use]
    pub fn is_return_visit(&self, path: &Path) -> bool {
        stem(path)
            .ok()
            .and_then(|s| s.split('_').nth(1).map(|t| t == self.return_visit_marker))
            .unwrap_or(false)
    }

    /// Location token, token 2
    pub fn data_location(&self, path: &Path) -> Result<String> {
        token(path, 2).map(str::to_string)
    }

    /// Which filename layout the name follows
    pub fn filename_shape(&self, path: &Path) -> Result<FilenameShape> {
        let third = token(path, 3)?;
        if third.contains(self.location_marker) {
            Ok(FilenameShape::LocationTagged)
        } else {
            Ok(FilenameShape::Standard)
        }
    }

    /// Scan id: the digits after the single letter prefix of the scan token
    pub fn scan_id(&self, path: &Path) -> Result<i64> {
        let shape = self.filename_shape(path)?;
        let raw = token(path, shape.scan_token())?;
        let raw = raw.split(' ').next().unwrap_or(raw);
        let mut chars = raw.chars();
        chars.next();
        chars.as_str().parse::<i64>().map_err(|e| {
            malformed(
                path,
                format!("scan token '{raw}' at position {}: {e}", shape.scan_token()),
            )
        })
    }

    /// Arm id: second underscore segment of the name, space suffix dropped
    pub fn arm_id(&self, path: &Path) -> Result<String> {
        let segment = token(path, 1)?;
        Ok(segment.split(' ').next().unwrap_or(segment).to_string())
    }

    /// Raw instrument location code, found as marker letter followed by digits
    pub fn location_id(&self, path: &Path) -> Result<i64> {
        let stem = stem(path)?;
        let digits = LETTER_CODE
            .captures_iter(stem)
            .find(|caps| {
                caps.get(1)
                    .and_then(|m| m.as_str().chars().next())
                    .is_some_and(|c| c == self.location_marker)
            })
            .and_then(|caps| caps.get(2))
            .ok_or_else(|| {
                malformed(
                    path,
                    format!("no '{}<digits>' location tag", self.location_marker),
                )
            })?;

        digits
            .as_str()
            .parse::<i64>()
            .map_err(|e| malformed(path, format!("location tag out of range: {e}")))
    }

    /// Parse every field of a data file name
    pub fn parse(&self, path: &Path) -> Result<ParsedIdentifier> {
        Ok(ParsedIdentifier {
            path: path.to_path_buf(),
            subject_id: self.subject_id(path)?,
            data_location: self.data_location(path)?,
            scan_id: self.scan_id(path)?,
            arm_id: self.arm_id(path)?,
            raw_location: self.location_id(path)?,
            shape: self.filename_shape(path)?,
        })
    }
}

fn stem(path: &Path) -> Result<&str> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| malformed(path, "path has no readable final segment"))
}

fn token(path: &Path, position: usize) -> Result<&str> {
    stem(path)?
        .split('_')
        .nth(position)
        .ok_or_else(|| malformed(path, format!("missing token at position {position}")))
}

fn malformed(path: &Path, reason: impl Into<String>) -> StudyError {
    StudyError::MalformedIdentifier {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}
