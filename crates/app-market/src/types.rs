//! Core types shared across the analysis stages.

use serde::{Deserialize, Serialize};

// =============================================================================
// Column Names
// =============================================================================

pub const COL_APP: &str = "App";
pub const COL_CATEGORY: &str = "Category";
pub const COL_INSTALLS: &str = "Installs";
pub const COL_PRICE: &str = "Price";
pub const COL_TYPE: &str = "Type";
pub const COL_GENRES: &str = "Genres";
pub const COL_REVENUE: &str = "Revenue_Estimate";

/// Columns the analysis reads from the input file.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_APP,
    COL_CATEGORY,
    COL_INSTALLS,
    COL_PRICE,
    COL_TYPE,
    COL_GENRES,
];

// =============================================================================
// Report Rows
// =============================================================================

/// One row of the top-grossing ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopGrossingApp {
    /// App name
    pub app: String,
    /// Store category
    pub category: String,
    /// Price x installs
    pub revenue_estimate: f64,
}

/// Frequency of a label (category or genre).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Summed installs of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInstalls {
    pub category: String,
    pub total_installs: f64,
}

/// Outcome of one cleaning pass over a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCleaning {
    /// Column name
    pub column: String,
    /// Non-null values converted from text
    pub converted: usize,
    /// Null cells left untouched
    pub nulls: usize,
    /// True when the column was numeric already and only cast
    pub already_numeric: bool,
}
