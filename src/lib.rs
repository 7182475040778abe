//! # Cloud Atlas
//!
//! Composites four cloud textures into a single 2x2 RGBA atlas and writes
//! the `.tex` sidecar the engine's texture loader expects next to it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cloud_atlas::{build_atlas, AtlasConfig, PrintObserver};
//!
//! let config = AtlasConfig {
//!     source_dir: "assets/particle".into(),
//!     output_dir: "core/textures".into(),
//!     ..Default::default()
//! };
//!
//! // Writes core/textures/_SP_BUILTIN_cloud_atlas.png and .png.tex
//! let atlas = build_atlas(&config, &mut PrintObserver)?;
//! ```
//!
//! ## In-memory use
//!
//! ```ignore
//! use cloud_atlas::AtlasBuilder;
//!
//! let atlas = AtlasBuilder::new(256)?.build_from_images(&images);
//! let png_bytes = atlas.to_png()?;
//! ```
//!
//! Sources whose resampled alpha is fully opaque get their alpha rebuilt
//! from luminance, so flat grayscale cloud art doubles as its own mask.

pub mod error;
pub mod config;
pub mod atlas;
pub mod export;
pub mod pipeline;

// Re-export main types for convenience
pub use error::{AtlasError, Result};
pub use config::AtlasConfig;
pub use atlas::{AtlasBuilder, CloudAtlas, PreparedCell, Quadrant, MAX_ATLAS_SIZE};
pub use export::tex::{sidecar_path_for, TexMetadata};
pub use pipeline::{build_atlas, load_image, BuildObserver, PrintObserver};
