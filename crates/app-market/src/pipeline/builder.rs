//! Main analysis pipeline.
//!
//! This module provides the `AnalysisPipeline` struct and builder that run
//! the loader, cleaner, deriver, reporter and visualizer in order.

use crate::charts::{ChartSpec, ChartWriter, build_charts};
use crate::cleaner::AppCleaner;
use crate::config::AnalysisConfig;
use crate::deriver::derive_revenue_estimate;
use crate::error::{AnalysisError, Result, ResultExt};
use crate::loader::{load_apps_csv, require_app_columns};
use crate::pipeline::progress::{
    AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::reporting::{MarketReport, ReportGenerator};
use polars::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Output of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Cleaned table with `Revenue_Estimate`
    pub data: DataFrame,
    /// Summary statistics
    pub report: MarketReport,
    /// The six chart specifications
    pub charts: Vec<ChartSpec>,
    /// Files written for the charts (empty when chart writing is off)
    pub chart_files: Vec<PathBuf>,
    /// Wall-clock duration of the run
    pub duration_ms: u64,
}

/// The analysis pipeline.
///
/// Use [`AnalysisPipeline::builder()`] to create one.
///
/// # Example
///
/// ```rust,ignore
/// use app_market::{AnalysisConfig, AnalysisPipeline};
///
/// let result = AnalysisPipeline::builder()
///     .config(AnalysisConfig::builder().input_path("apps.csv").build()?)
///     .build()?
///     .run()?;
///
/// println!("Median paid price: {:?}", result.report.median_paid_price);
/// ```
pub struct AnalysisPipeline {
    config: AnalysisConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    cleaner: AppCleaner,
}

static_assertions::assert_impl_all!(AnalysisPipeline: Send);

impl AnalysisPipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> AnalysisPipelineBuilder {
        AnalysisPipelineBuilder::default()
    }

    /// Load the configured CSV file and analyze it.
    pub fn run(&self) -> Result<AnalysisResult> {
        self.finish(self.run_internal())
    }

    /// Analyze a table that is already in memory.
    pub fn process(&self, df: DataFrame) -> Result<AnalysisResult> {
        self.finish(self.process_internal(df, Instant::now()))
    }

    fn finish(&self, outcome: Result<AnalysisResult>) -> Result<AnalysisResult> {
        match outcome {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete(format!(
                    "Analysis completed in {}ms",
                    result.duration_ms
                )));
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn run_internal(&self) -> Result<AnalysisResult> {
        let start = Instant::now();

        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Loading,
            format!("Reading {}", self.config.input_path.display()),
        ));
        let df = load_apps_csv(&self.config.input_path)
            .context(format!("Loading {}", self.config.input_path.display()))?;

        self.process_internal(df, start)
    }

    fn process_internal(&self, mut df: DataFrame, start: Instant) -> Result<AnalysisResult> {
        require_app_columns(&df)?;
        if df.height() == 0 {
            return Err(AnalysisError::EmptyDataset);
        }

        // Cleaning
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Cleaning,
            "Normalizing Installs and Price",
        ));
        let cleaning = self.cleaner.clean(&mut df)?;

        // Derivation
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Deriving,
            "Computing Revenue_Estimate",
        ));
        derive_revenue_estimate(&mut df)?;

        // Reporting
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Reporting,
            "Ranking apps and aggregating categories",
        ));
        let report = ReportGenerator::build_report(
            &self.config.input_path.display().to_string(),
            &df,
            cleaning,
            self.config.top_n,
            &self.config.game_category,
        )?;
        debug!(
            "Top {} ranking has {} apps, {} in '{}'",
            self.config.top_n,
            report.top_grossing.len(),
            report.games_in_top_count(),
            self.config.game_category
        );

        // Charts
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Charting,
            "Assembling chart specifications",
        ));
        let charts = build_charts(&df)?;
        let chart_files = if self.config.write_charts {
            let writer = ChartWriter::new(&self.config.output_dir, self.config.write_html);
            let files = writer.write_all(&charts)?;
            info!(
                "Wrote {} chart files to {}",
                files.len(),
                writer.charts_dir().display()
            );
            files
        } else {
            Vec::new()
        };

        Ok(AnalysisResult {
            data: df,
            report,
            charts,
            chart_files,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// Builder for creating an [`AnalysisPipeline`] instance.
#[derive(Default)]
pub struct AnalysisPipelineBuilder {
    config: Option<AnalysisConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(AnalysisPipelineBuilder: Send);

impl AnalysisPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving stage updates.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a closure to receive stage updates.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> Result<AnalysisPipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(AnalysisPipeline {
            config,
            progress_reporter: self.progress_reporter,
            cleaner: AppCleaner,
        })
    }
}
