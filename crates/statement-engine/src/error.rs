//! Error types for the statement pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a statement run
#[derive(Error, Debug)]
pub enum StatementError {
    #[error("failed to read the input table: {0}")]
    Ingest(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read logo '{}': {source}", .path.display())]
    Logo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("rendering failed: {0}")]
    Render(#[from] render_engine::RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
