//! Input loading: delimited price file → validated `PriceSeries`.
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. the file exists
//! 2. the whole file parses as CSV with a header row
//! 3. there is at least one data row
//! 4. a `close` column is present
//!
//! Values are not interpreted here; a non-numeric close is the signal
//! engine's concern.

use std::fs::File;
use std::io;
use std::path::Path;

use thiserror::Error;
use trendpulse_core::{PriceSeries, CLOSE_COLUMN};

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Missing input file")]
    Missing,

    #[error("Invalid CSV format")]
    Unreadable(#[source] io::Error),

    #[error("Invalid CSV format")]
    Malformed(#[from] csv::Error),

    #[error("Invalid CSV format")]
    NoColumns,

    #[error("Empty input file")]
    Empty,

    #[error("Missing required 'close' column")]
    MissingClose,
}

/// Load and validate the price table at `path`.
pub fn load_dataset(path: &Path) -> Result<PriceSeries, LoadError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(LoadError::Missing),
        Err(e) => return Err(LoadError::Unreadable(e)),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if columns.is_empty() {
        return Err(LoadError::NoColumns);
    }

    let records = reader
        .records()
        .collect::<Result<Vec<csv::StringRecord>, csv::Error>>()?;

    if records.is_empty() {
        return Err(LoadError::Empty);
    }

    let close_idx = columns
        .iter()
        .position(|c| c == CLOSE_COLUMN)
        .ok_or(LoadError::MissingClose)?;

    let close = records
        .iter()
        .map(|record| record.get(close_idx).unwrap_or_default().to_string())
        .collect();

    Ok(PriceSeries::new(columns, close))
}
