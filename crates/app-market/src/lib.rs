//! Mobile-App Marketplace Analysis Library
//!
//! Exploratory analysis of an app-store dataset built with Rust and Polars.
//!
//! # Overview
//!
//! The analysis is a single sequential pipeline:
//!
//! - **Loading**: Read the CSV file into a `DataFrame`
//! - **Cleaning**: Turn `Installs` ("10,000+") and `Price` ("$0.99") into Float64
//! - **Derivation**: Add `Revenue_Estimate = Price * Installs`
//! - **Reporting**: Top-grossing ranking, category and genre counts, median paid price
//! - **Charts**: Six chart specifications, exportable as Plotly figures
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use app_market::{AnalysisConfig, AnalysisPipeline, render_text};
//!
//! let config = AnalysisConfig::builder()
//!     .input_path("apps.csv")
//!     .output_dir("outputs")
//!     .build()?;
//!
//! let result = AnalysisPipeline::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//!
//! print!("{}", render_text(&result.report));
//! ```
//!
//! Each stage is also usable on its own, e.g. [`AppCleaner`] followed by
//! [`derive_revenue_estimate`] on a table built in memory.

pub mod charts;
pub mod cleaner;
pub mod config;
pub mod deriver;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use charts::{ChartKind, ChartSpec, ChartWriter, build_charts};
pub use cleaner::AppCleaner;
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use deriver::derive_revenue_estimate;
pub use error::{AnalysisError, ResultExt};
pub use loader::{load_apps_csv, require_app_columns, require_columns};
pub use pipeline::{
    AnalysisPipeline, AnalysisPipelineBuilder, AnalysisResult, AnalysisStage,
    ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
pub use reporting::{MarketReport, ReportGenerator, render_text};
pub use types::{CategoryInstalls, ColumnCleaning, LabelCount, TopGrossingApp};
pub use utils::{parse_installs, parse_price};
