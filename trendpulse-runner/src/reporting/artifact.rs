//! Artifact serialization and replace-on-success file writes.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),

    #[error("output path {} has no file name", .0.display())]
    InvalidPath(PathBuf),
}

/// Serialize `value` as JSON with four-space indentation.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, ReportError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `contents` to `path` in one shot.
///
/// The bytes go to a hidden sibling file first, which is then renamed over
/// `path`; a reader sees either the old file or the complete new one.
pub fn write_artifact(path: &Path, contents: &str) -> Result<(), ReportError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| ReportError::InvalidPath(path.to_path_buf()))?;

    let mut tmp_name = OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let result = fs::write(&tmp_path, contents).and_then(|()| fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result.map_err(ReportError::from)
}
