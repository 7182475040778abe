//! Error types for the cloud atlas builder.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using AtlasError.
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Main error type for atlas building.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// A source image is missing, corrupt, or in a format no enabled codec decodes.
    #[error("Failed to load {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An output file could not be written.
    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The atlas raster could not be encoded as PNG.
    #[error("Failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),

    /// Invalid builder configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A configuration file could not be read.
    #[error("Failed to read config {path:?}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid JSON for `AtlasConfig`.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AtlasError {
    /// Whether this is a source image load failure.
    pub fn is_load(&self) -> bool {
        matches!(self, AtlasError::Load { .. })
    }

    /// Whether this is an output write failure.
    pub fn is_write(&self) -> bool {
        matches!(self, AtlasError::Write { .. })
    }
}
