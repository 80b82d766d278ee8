//! Error types for the analysis pipeline
//!
//! One enum covers the three failure classes of a run: acquisition,
//! parsing and the remote enrichment service. Chart rendering failures get
//! their own variant since plotters errors are backend-generic.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Download request failed or returned a non-success status
    #[error("Download of '{file}' failed: {source}")]
    Download {
        file: String,
        #[source]
        source: reqwest::Error,
    },

    /// Gzip stream could not be decoded
    #[error("Failed to decompress '{path}': {source}")]
    Decompress {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV could not be read or a frame operation failed
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),

    /// Input table has no columns at all
    #[error("Dataset '{0}' has no columns")]
    EmptyDataset(PathBuf),

    /// A column the analysis needs is not present
    #[error("Missing column '{0}'")]
    MissingColumn(String),

    /// HTTP request failed (client setup or enrichment service)
    #[error("Network request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Enrichment service answered with something we cannot decode
    #[error("Unexpected enrichment response: {0}")]
    EnrichmentDecode(#[from] serde_json::Error),

    /// Plot could not be drawn or encoded
    #[error("Failed to render '{path}': {message}")]
    Render { path: PathBuf, message: String },

    /// File system operation failed
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn download(file: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Download {
            file: file.into(),
            source,
        }
    }

    pub fn decompress(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Decompress {
            path: path.into(),
            source,
        }
    }

    pub fn render(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Render {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message() {
        let err = PipelineError::MissingColumn("pval".to_string());
        assert_eq!(err.to_string(), "Missing column 'pval'");
    }

    #[test]
    fn test_render_message_includes_path() {
        let err = PipelineError::render("old_mice_go_terms.png", "font unavailable");
        assert_eq!(
            err.to_string(),
            "Failed to render 'old_mice_go_terms.png': font unavailable"
        );
    }
}
