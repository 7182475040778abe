//! Builder configuration.
//!
//! Defaults reproduce the shader patch cloud atlas: four named cloud
//! textures composited into `_SP_BUILTIN_cloud_atlas.png` at 512x512.

use crate::atlas::MAX_ATLAS_SIZE;
use crate::error::{AtlasError, Result};
use crate::export::tex::sidecar_path_for;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default atlas edge length in pixels.
pub const DEFAULT_ATLAS_SIZE: u32 = 512;

/// Default output file name.
pub const DEFAULT_OUTPUT_NAME: &str = "_SP_BUILTIN_cloud_atlas.png";

/// Default source textures, in top-left, top-right, bottom-left, bottom-right order.
pub const DEFAULT_CELLS: [&str; 4] = [
    "cloud_1.png", // puffy cumulus
    "cloud2.png",  // dense dramatic
    "cloud5.png",  // light wispy
    "cloud7.png",  // detailed cumulus
];

/// Atlas builder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AtlasConfig {
    /// Directory the cell file names are resolved against.
    pub source_dir: PathBuf,
    /// Directory the atlas and its sidecar are written to.
    pub output_dir: PathBuf,
    /// File name of the atlas image inside `output_dir`.
    pub output_name: String,
    /// Source file names, one per quadrant.
    pub cells: [String; 4],
    /// Atlas width and height in pixels. Must be even.
    pub atlas_size: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            cells: DEFAULT_CELLS.map(String::from),
            atlas_size: DEFAULT_ATLAS_SIZE,
        }
    }
}

impl AtlasConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| AtlasError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Check the configuration before any I/O happens.
    pub fn validate(&self) -> Result<()> {
        if self.atlas_size == 0 {
            return Err(AtlasError::Config("atlas size must be non-zero".into()));
        }
        if self.atlas_size % 2 != 0 {
            return Err(AtlasError::Config(format!(
                "atlas size must be even, got {}",
                self.atlas_size
            )));
        }
        if self.atlas_size > MAX_ATLAS_SIZE {
            return Err(AtlasError::Config(format!(
                "atlas size {} exceeds the maximum of {}",
                self.atlas_size, MAX_ATLAS_SIZE
            )));
        }
        if self.output_name.is_empty() {
            return Err(AtlasError::Config("output name must not be empty".into()));
        }
        Ok(())
    }

    /// Render the configuration as pretty JSON, in the form `from_json_file` reads.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Edge length of one quadrant.
    pub fn cell_size(&self) -> u32 {
        self.atlas_size / 2
    }

    /// Full paths of the four source images, in quadrant order.
    pub fn cell_paths(&self) -> [PathBuf; 4] {
        self.cells.each_ref().map(|name| self.source_dir.join(name))
    }

    /// Full path of the atlas image.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_name)
    }

    /// Full path of the `.tex` sidecar.
    pub fn sidecar_path(&self) -> PathBuf {
        sidecar_path_for(&self.output_path())
    }
}
