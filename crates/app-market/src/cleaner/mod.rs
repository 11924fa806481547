//! Data cleaning module for the app dataset.
//!
//! This module turns the two textual numeric columns into Float64:
//! - `Installs`: bucket strings such as "10,000+"
//! - `Price`: currency strings such as "$0.99" (0 means free)
//!
//! Cleaning replaces the columns in the table. Running it on columns that
//! are already numeric only re-checks them.

mod converters;

use crate::error::{Result, ResultExt};
use crate::types::{COL_INSTALLS, COL_PRICE, ColumnCleaning};
use crate::utils::{column_series, parse_installs, parse_price};
use converters::to_non_negative_float;
use polars::prelude::*;
use tracing::{debug, info};

/// Data cleaner for the numeric text columns.
pub struct AppCleaner;

impl AppCleaner {
    /// Clean both `Installs` and `Price`.
    pub fn clean(&self, df: &mut DataFrame) -> Result<Vec<ColumnCleaning>> {
        info!("Cleaning numeric columns...");

        let installs = self.clean_installs(df)?;
        let price = self.clean_price(df)?;

        Ok(vec![installs, price])
    }

    /// Strip `+` and `,` from `Installs` and parse it as Float64.
    pub fn clean_installs(&self, df: &mut DataFrame) -> Result<ColumnCleaning> {
        self.clean_column(df, COL_INSTALLS, parse_installs)
    }

    /// Strip `$` and `,` from `Price` and parse it as Float64.
    pub fn clean_price(&self, df: &mut DataFrame) -> Result<ColumnCleaning> {
        self.clean_column(df, COL_PRICE, parse_price)
    }

    fn clean_column(
        &self,
        df: &mut DataFrame,
        column: &str,
        parse: fn(&str) -> Option<f64>,
    ) -> Result<ColumnCleaning> {
        let converted = to_non_negative_float(column_series(df, column)?, parse)?;

        let summary = ColumnCleaning {
            column: column.to_string(),
            converted: converted.converted,
            nulls: converted.nulls,
            already_numeric: converted.already_numeric,
        };

        df.replace(column, converted.series)
            .context(format!("Replacing cleaned column '{}'", column))?;

        if summary.already_numeric {
            debug!("Column '{}' already numeric, cast to Float64", column);
        } else {
            debug!(
                "Column '{}': converted {} values ({} nulls)",
                column, summary.converted, summary.nulls
            );
        }

        Ok(summary)
    }
}
