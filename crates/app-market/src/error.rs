//! Custom error types for the marketplace analysis.
//!
//! Every failure in the analysis is terminal: a malformed value, a missing
//! column or an unreadable file stops the run. The error hierarchy exists so
//! callers get a precise message and a stable code to match on.
//!
//! Errors are serializable as `{ code, message }` so they can be embedded in
//! JSON output.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the analysis pipeline.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// A cell could not be converted to the column's target type.
    #[error("Failed to convert column '{column}' to {target_type}: {reason}")]
    TypeConversionFailed {
        column: String,
        target_type: String,
        reason: String,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The loaded table has no rows.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AnalysisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Shorthand for a conversion failure on a named column.
    pub fn conversion(
        column: impl Into<String>,
        target_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        AnalysisError::TypeConversionFailed {
            column: column.into(),
            target_type: target_type.into(),
            reason: reason.into(),
        }
    }

    /// Get a stable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::TypeConversionFailed { .. } => "TYPE_CONVERSION_FAILED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::EmptyDataset => "EMPTY_DATASET",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }
}

impl Serialize for AnalysisError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AnalysisError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalysisError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            AnalysisError::ColumnNotFound("Price".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
        assert_eq!(AnalysisError::EmptyDataset.error_code(), "EMPTY_DATASET");
        assert_eq!(
            AnalysisError::conversion("Installs", "Float64", "bad").error_code(),
            "TYPE_CONVERSION_FAILED"
        );
    }

    #[test]
    fn test_error_serialization() {
        let error = AnalysisError::ColumnNotFound("Genres".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("Genres"));
    }

    #[test]
    fn test_with_context() {
        let error = AnalysisError::ColumnNotFound("App".to_string()).with_context("While loading");
        assert!(error.to_string().contains("While loading"));
        assert_eq!(error.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_conversion_message_names_column() {
        let error = AnalysisError::conversion("Price", "Float64", "row 3: 'Everyone'");
        let msg = error.to_string();
        assert!(msg.contains("'Price'"));
        assert!(msg.contains("Everyone"));
    }
}
