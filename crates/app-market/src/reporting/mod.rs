//! Report generation module.
//!
//! This module computes the summary statistics of the analysis and renders
//! them for output.
//!
//! # Market Reports
//!
//! Use [`MarketReport`] as the single result of the reporting stage, suitable
//! for:
//! - Plain-text output to stdout (default CLI behavior)
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//!
//! # Example
//!
//! ```rust,ignore
//! use app_market::reporting::{ReportGenerator, render_text};
//!
//! let report = ReportGenerator::build_report("apps.csv", &df, cleaning, 10, "GAME")?;
//! print!("{}", render_text(&report));
//!
//! let generator = ReportGenerator::new(PathBuf::from("outputs"));
//! generator.write_report_to_file(&report, "apps")?;
//! ```

pub mod analysis;
mod generator;

pub use generator::{MarketReport, ReportGenerator, render_text};
