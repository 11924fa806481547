//! Shared utilities for the analysis stages.
//!
//! This module contains column access helpers and the text-normalization
//! rules used by the cleaner, kept in one place so every stage reads values
//! the same way.

use crate::error::{AnalysisError, Result};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use std::collections::HashMap;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Install-count decorations: the trailing bucket marker and thousands separators.
static INSTALLS_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+,]").expect("Invalid regex: installs noise"));

/// Price decorations: currency sign and thousands separators.
static PRICE_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[$,]").expect("Invalid regex: price noise"));

/// Strip `+` and `,` from an install-count string.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(strip_installs_noise("1,000,000+"), "1000000");
/// ```
pub fn strip_installs_noise(s: &str) -> String {
    INSTALLS_NOISE.replace_all(s.trim(), "").into_owned()
}

/// Strip `$` and `,` from a price string.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(strip_price_noise("$1,234.56"), "1234.56");
/// ```
pub fn strip_price_noise(s: &str) -> String {
    PRICE_NOISE.replace_all(s.trim(), "").into_owned()
}

/// Parse an install count such as `"10,000+"`.
pub fn parse_installs(s: &str) -> Option<f64> {
    strip_installs_noise(s).trim().parse::<f64>().ok()
}

/// Parse a list price such as `"$0.99"`.
pub fn parse_price(s: &str) -> Option<f64> {
    strip_price_noise(s).trim().parse::<f64>().ok()
}

// =============================================================================
// Column Access Utilities
// =============================================================================

/// Borrow a column as a Series, mapping a miss to `ColumnNotFound`.
pub fn column_series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(|col| col.as_materialized_series())
        .map_err(|_| AnalysisError::ColumnNotFound(name.to_string()))
}

/// Read a column as optional strings, casting non-string columns first.
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = column_series(df, name)?;
    let str_series = if series.dtype() == &DataType::String {
        series.clone()
    } else {
        series.cast(&DataType::String)?
    };

    Ok(str_series
        .str()?
        .into_iter()
        .map(|opt| opt.map(|s| s.to_string()))
        .collect())
}

/// Read a numeric column as optional f64 values.
///
/// Fails with `TypeConversionFailed` when the column still holds text,
/// which means cleaning has not run on it.
pub fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = column_series(df, name)?;
    if !is_numeric_dtype(series.dtype()) {
        return Err(AnalysisError::conversion(
            name,
            "Float64",
            format!("column has dtype {} (run cleaning first)", series.dtype()),
        ));
    }

    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series.f64()?.into_iter().collect())
}

// =============================================================================
// Counting Utilities
// =============================================================================

/// Count label occurrences, ordered by count descending.
///
/// Ties keep the order in which labels first appeared.
pub fn count_labels<I, S>(labels: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for label in labels {
        let label = label.as_ref();
        match positions.get(label) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(label.to_string(), counts.len());
                counts.push((label.to_string(), 1));
            }
        }
    }

    // sort_by is stable, so first appearance wins on equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Median of a set of values; `None` when empty.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Series::new("median".into(), values).median()
}

// =============================================================================
// Tests
// =============================================================================
