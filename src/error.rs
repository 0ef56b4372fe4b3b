//! Error types for the chart pipelines.

use std::path::PathBuf;

/// Failure of a single chart pipeline.
///
/// Every variant is recoverable at the pipeline boundary: the chart it
/// belongs to is abandoned and the remaining charts still run.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("input file '{}' not found", path.display())]
    NotFound { path: PathBuf },
    #[error("malformed input in '{}': {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },
    #[error("input file '{}' has no data rows", path.display())]
    EmptyInput { path: PathBuf },
    #[error("failed to write '{}': {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
}

impl ChartError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ChartError::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Failure while turning a chart description into an image file.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("drawing error: {0}")]
    Drawing(String),
    #[error("nothing to draw: {0}")]
    NoData(String),
}
