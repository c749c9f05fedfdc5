//! Loading package-name lists from JSON files.
//!
//! A list file is an array of records with at least a `package_name`
//! field; any other fields (labels, notes, ...) are ignored.

use std::path::Path;

use serde::Deserialize;

use super::error::{AdbError, AdbResult};

#[derive(Debug, Deserialize)]
struct PackageRecord {
    package_name: String,
}

/// Google-app debloat list shipped with the crate, as used by
/// [`Device::debloat_google`](super::device::Device::debloat_google).
pub const GOOGLE_PACKAGE_LIST: &str = include_str!("lists/google.json");

/// Read the `package_name` column of a JSON list file.
pub fn load_package_names(path: impl AsRef<Path>) -> AdbResult<Vec<String>> {
    let path = path.as_ref();
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(AdbError::FileFormat {
            path: path.to_path_buf(),
            reason: "file must be in .json format".to_string(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| AdbError::FileFormat {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_package_names(&text).map_err(|e| AdbError::FileFormat {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

pub(crate) fn parse_package_names(json: &str) -> Result<Vec<String>, serde_json::Error> {
    let records: Vec<PackageRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(|r| r.package_name).collect())
}
