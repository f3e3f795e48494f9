//! Error types for scene construction and rendering.

use thiserror::Error;

/// Errors that can occur while building or rendering a scene.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Cannot build a BVH from an empty scene")]
    EmptyScene,

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
