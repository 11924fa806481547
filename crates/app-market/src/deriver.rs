//! Derived metrics computed from the cleaned table.

use crate::error::{AnalysisError, Result, ResultExt};
use crate::types::{COL_INSTALLS, COL_PRICE, COL_REVENUE};
use crate::utils::{column_series, is_numeric_dtype};
use polars::prelude::*;
use tracing::debug;

/// Add `Revenue_Estimate = Price * Installs` to the table.
///
/// Free apps get 0. A null in either input gives a null estimate. An
/// existing `Revenue_Estimate` column is overwritten.
pub fn derive_revenue_estimate(df: &mut DataFrame) -> Result<()> {
    let price = numeric_input(df, COL_PRICE)?;
    let installs = numeric_input(df, COL_INSTALLS)?;

    let mut revenue = (&price * &installs).context("Computing revenue estimate")?;
    revenue.rename(COL_REVENUE.into());

    df.with_column(revenue)?;
    debug!("Derived column '{}'", COL_REVENUE);

    Ok(())
}

fn numeric_input(df: &DataFrame, name: &str) -> Result<Series> {
    let series = column_series(df, name)?;
    if !is_numeric_dtype(series.dtype()) {
        return Err(AnalysisError::conversion(
            name,
            "Float64",
            format!("column has dtype {} (run cleaning first)", series.dtype()),
        ));
    }
    Ok(series.cast(&DataType::Float64)?)
}
