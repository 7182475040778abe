//! Output files written alongside the atlas image.

pub mod tex;

pub use tex::{sidecar_path_for, TexMetadata, TEX_EXTENSION};
