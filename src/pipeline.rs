//! One-call driver: load, composite, and write an atlas from an `AtlasConfig`.

use crate::atlas::{AtlasBuilder, CloudAtlas, Quadrant};
use crate::config::AtlasConfig;
use crate::error::{AtlasError, Result};
use crate::export::tex::TexMetadata;
use std::path::Path;

/// Progress callbacks for `build_atlas`. All methods default to no-ops.
pub trait BuildObserver {
    /// A source image is about to be decoded.
    fn loading(&mut self, _name: &str) {}

    /// A cell was pasted at `offset`.
    fn placed(&mut self, _quadrant: Quadrant, _offset: (u32, u32)) {}

    /// The atlas image was written.
    fn saved_atlas(&mut self, _path: &Path) {}

    /// The `.tex` sidecar was written.
    fn saved_sidecar(&mut self, _path: &Path) {}
}

/// Silent observer.
impl BuildObserver for () {}

/// Observer that prints progress lines to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintObserver;

impl BuildObserver for PrintObserver {
    fn loading(&mut self, name: &str) {
        println!("Loading {}...", name);
    }

    fn placed(&mut self, _quadrant: Quadrant, (x, y): (u32, u32)) {
        println!("  Placed at ({}, {})", x, y);
    }

    fn saved_atlas(&mut self, path: &Path) {
        println!("\nSaved atlas to: {}", path.display());
    }

    fn saved_sidecar(&mut self, path: &Path) {
        println!("Created config: {}", path.display());
    }
}

/// Decode an image from disk.
pub fn load_image(path: &Path) -> Result<image::DynamicImage> {
    image::open(path).map_err(|source| AtlasError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the atlas described by `config` and write it with its sidecar.
///
/// Every source is decoded before anything is written, so a load failure
/// leaves no output behind. A write failure may leave the image without its
/// sidecar.
pub fn build_atlas<O: BuildObserver + ?Sized>(
    config: &AtlasConfig,
    observer: &mut O,
) -> Result<CloudAtlas> {
    config.validate()?;

    let mut builder = AtlasBuilder::new(config.cell_size())?;
    let paths = config.cell_paths();

    for ((quadrant, name), path) in Quadrant::ALL.into_iter().zip(&config.cells).zip(&paths) {
        observer.loading(name);
        let source = load_image(path)?;
        let offset = builder.place(quadrant, &source);
        observer.placed(quadrant, offset);
    }

    let atlas = builder.finish();

    let output_path = config.output_path();
    atlas.write_png(&output_path)?;
    observer.saved_atlas(&output_path);

    let sidecar_path = config.sidecar_path();
    TexMetadata::default().write_to(&sidecar_path)?;
    observer.saved_sidecar(&sidecar_path);

    Ok(atlas)
}
