//! Pipeline module.
//!
//! This module provides the analysis pipeline and its progress reporting.

mod builder;
pub mod progress;

pub use builder::{AnalysisPipeline, AnalysisPipelineBuilder, AnalysisResult};
pub use progress::{AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate};
