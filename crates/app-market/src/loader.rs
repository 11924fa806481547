//! CSV loading for the app dataset.

use crate::error::{AnalysisError, Result};
use crate::types::REQUIRED_COLUMNS;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Load an app dataset from a CSV file.
///
/// Every column is read as text. A store export starts with thousands of
/// free apps priced "0", so sampling rows to infer dtypes would type `Price`
/// as an integer and then fail on the first "$0.99".
pub fn load_apps_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AnalysisError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input file not found: {}", path.display()),
        )));
    }

    info!("Loading dataset from: {}", path.display());

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    debug!("Loaded columns: {:?}", df.get_column_names());
    info!("Dataset loaded successfully: {:?}", df.shape());

    Ok(df)
}

/// Check that every named column exists.
///
/// Fails with `ColumnNotFound` for the first one that is missing.
pub fn require_columns(df: &DataFrame, names: &[&str]) -> Result<()> {
    for name in names {
        if df.column(name).is_err() {
            return Err(AnalysisError::ColumnNotFound(name.to_string()));
        }
    }
    Ok(())
}

/// Check the columns the full analysis reads.
pub fn require_app_columns(df: &DataFrame) -> Result<()> {
    require_columns(df, &REQUIRED_COLUMNS)
}
