//! Column conversion functions for data cleaning.

use crate::error::{AnalysisError, Result};
use crate::utils::is_numeric_dtype;
use polars::prelude::*;

/// Result of converting one column to Float64.
pub(crate) struct Converted {
    pub series: Series,
    pub converted: usize,
    pub nulls: usize,
    pub already_numeric: bool,
}

/// Convert a column to non-negative Float64 values.
///
/// Text cells go through `parse`; a cell it rejects fails the whole column.
/// Numeric columns are cast as-is, which makes repeated cleaning a no-op.
pub(crate) fn to_non_negative_float(
    series: &Series,
    parse: fn(&str) -> Option<f64>,
) -> Result<Converted> {
    let name = series.name().to_string();

    if is_numeric_dtype(series.dtype()) {
        // NaN is a missing value in a numeric column
        let values: Vec<Option<f64>> = series
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|value| value.filter(|v| !v.is_nan()))
            .collect();
        for (idx, value) in values.iter().enumerate() {
            if let Some(v) = value {
                check_non_negative(&name, idx, *v, &v.to_string())?;
            }
        }
        let float_series = Series::new(series.name().clone(), values);
        let nulls = float_series.null_count();
        return Ok(Converted {
            converted: float_series.len() - nulls,
            nulls,
            series: float_series,
            already_numeric: true,
        });
    }

    if series.dtype() != &DataType::String {
        return Err(AnalysisError::conversion(
            &name,
            "Float64",
            format!("unsupported source dtype {}", series.dtype()),
        ));
    }

    let str_series = series.str()?;
    let mut result_vec: Vec<Option<f64>> = Vec::with_capacity(str_series.len());
    let mut converted = 0;

    for (idx, opt_val) in str_series.into_iter().enumerate() {
        match opt_val {
            Some(raw) => {
                let value = parse(raw).ok_or_else(|| {
                    AnalysisError::conversion(
                        &name,
                        "Float64",
                        format!("row {}: cannot parse '{}'", idx, raw),
                    )
                })?;
                check_non_negative(&name, idx, value, raw)?;
                result_vec.push(Some(value));
                converted += 1;
            }
            None => result_vec.push(None),
        }
    }

    let nulls = result_vec.len() - converted;
    Ok(Converted {
        series: Series::new(series.name().clone(), result_vec),
        converted,
        nulls,
        already_numeric: false,
    })
}

fn check_non_negative(column: &str, idx: usize, value: f64, raw: &str) -> Result<()> {
    // a parsed "NaN" compares false here and is rejected with the negatives
    if value >= 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::conversion(
            column,
            "Float64",
            format!("row {}: '{}' is not a non-negative number", idx, raw),
        ))
    }
}
