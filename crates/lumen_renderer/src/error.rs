//! Renderer error type.

use thiserror::Error;

/// Errors that can occur while building a scene or rendering it.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Render cancelled")]
    Cancelled,

    #[error("Worker failed while shading pixel (row {row}, col {col}): {message}")]
    WorkerFailed {
        row: u32,
        col: u32,
        message: String,
    },

    #[error("Failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
