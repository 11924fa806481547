//! Configuration types for the marketplace analysis.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of apps in the top-grossing ranking.
pub const DEFAULT_TOP_N: usize = 10;

/// Default category counted inside the top-grossing ranking.
pub const DEFAULT_GAME_CATEGORY: &str = "GAME";

/// Configuration for the analysis pipeline.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use app_market::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .input_path("data/apps.csv")
///     .top_n(5)
///     .write_html(true)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// CSV file with the app records.
    /// Default: "apps.csv"
    pub input_path: PathBuf,

    /// Directory for chart files and the JSON report.
    /// Default: "./outputs"
    pub output_dir: PathBuf,

    /// Size of the top-grossing ranking.
    /// Default: 10
    pub top_n: usize,

    /// Category matched (exactly, case-sensitive) inside the ranking.
    /// Default: "GAME"
    pub game_category: String,

    /// Whether chart specifications are written to the output directory.
    /// Default: true
    pub write_charts: bool,

    /// Whether a standalone HTML page is written next to each chart.
    /// Default: false
    pub write_html: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("apps.csv"),
            output_dir: PathBuf::from("./outputs"),
            top_n: DEFAULT_TOP_N,
            game_category: DEFAULT_GAME_CATEGORY.to_string(),
            write_charts: true,
            write_html: false,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.top_n == 0 {
            return Err(ConfigValidationError::InvalidTopN(self.top_n));
        }

        if self.game_category.trim().is_empty() {
            return Err(ConfigValidationError::EmptyField("game_category".to_string()));
        }

        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyField("input_path".to_string()));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid top-N size: {0} (must be at least 1)")]
    InvalidTopN(usize),

    #[error("Configuration field '{0}' must not be empty")]
    EmptyField(String),
}

impl From<ConfigValidationError> for crate::error::AnalysisError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::AnalysisError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    input_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    top_n: Option<usize>,
    game_category: Option<String>,
    write_charts: Option<bool>,
    write_html: Option<bool>,
}

impl AnalysisConfigBuilder {
    /// Set the CSV file to analyze.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the output directory for charts and reports.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set how many apps the top-grossing ranking keeps.
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    /// Set the category counted inside the ranking.
    pub fn game_category(mut self, category: impl Into<String>) -> Self {
        self.game_category = Some(category.into());
        self
    }

    /// Enable or disable writing chart files.
    pub fn write_charts(mut self, write: bool) -> Self {
        self.write_charts = Some(write);
        self
    }

    /// Enable or disable the HTML page next to each chart.
    pub fn write_html(mut self, write: bool) -> Self {
        self.write_html = Some(write);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let config = AnalysisConfig {
            input_path: self.input_path.unwrap_or_else(|| PathBuf::from("apps.csv")),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from("./outputs")),
            top_n: self.top_n.unwrap_or(DEFAULT_TOP_N),
            game_category: self
                .game_category
                .unwrap_or_else(|| DEFAULT_GAME_CATEGORY.to_string()),
            write_charts: self.write_charts.unwrap_or(true),
            write_html: self.write_html.unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }
}
