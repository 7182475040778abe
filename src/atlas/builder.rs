//! Atlas builder: pastes prepared cells into their quadrants.

use super::cell::{prepare_cell, PreparedCell};
use super::{Quadrant, MAX_ATLAS_SIZE};
use crate::error::{AtlasError, Result};
use crate::export::tex::{sidecar_path_for, TexMetadata};
use image::{DynamicImage, ImageEncoder, RgbaImage};
use std::path::{Path, PathBuf};

/// A finished 2x2 atlas.
#[derive(Debug, Clone)]
pub struct CloudAtlas {
    image: RgbaImage,
    cell_size: u32,
    luminance_alpha: [bool; 4],
}

impl CloudAtlas {
    /// The composited RGBA raster.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Take ownership of the raster.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Edge length of one quadrant.
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Copy out the pixels of one quadrant.
    pub fn cell(&self, quadrant: Quadrant) -> RgbaImage {
        let (x, y) = quadrant.offset(self.cell_size);
        image::imageops::crop_imm(&self.image, x, y, self.cell_size, self.cell_size).to_image()
    }

    /// Whether the given quadrant's alpha was derived from luminance.
    pub fn has_luminance_alpha(&self, quadrant: Quadrant) -> bool {
        self.luminance_alpha[quadrant.index()]
    }

    /// Encode the atlas as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let cursor = std::io::Cursor::new(&mut bytes);
        let encoder = image::codecs::png::PngEncoder::new(cursor);

        encoder
            .write_image(
                self.image.as_raw(),
                self.image.width(),
                self.image.height(),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(AtlasError::Encode)?;

        Ok(bytes)
    }

    /// Write the atlas PNG to `path`.
    pub fn write_png(&self, path: &Path) -> Result<()> {
        let bytes = self.to_png()?;
        std::fs::write(path, &bytes).map_err(|source| AtlasError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("wrote {} bytes to {:?}", bytes.len(), path);
        Ok(())
    }

    /// Write the atlas PNG and its `.tex` sidecar. Returns the sidecar path.
    ///
    /// The image is written first; if the sidecar fails the image stays on disk.
    pub fn write(&self, path: &Path) -> Result<PathBuf> {
        self.write_png(path)?;
        let tex_path = sidecar_path_for(path);
        TexMetadata::default().write_to(&tex_path)?;
        Ok(tex_path)
    }
}

/// Builder for a fixed 2x2 atlas.
pub struct AtlasBuilder {
    cell_size: u32,
    image: RgbaImage,
    luminance_alpha: [bool; 4],
}

impl AtlasBuilder {
    /// Create a builder whose atlas is `2 * cell_size` square, fully transparent.
    pub fn new(cell_size: u32) -> Result<Self> {
        if cell_size == 0 {
            return Err(AtlasError::Config("cell size must be non-zero".into()));
        }
        if cell_size > MAX_ATLAS_SIZE / 2 {
            return Err(AtlasError::Config(format!(
                "cell size {} exceeds the {}px atlas limit",
                cell_size, MAX_ATLAS_SIZE
            )));
        }
        let atlas_size = cell_size * 2;

        Ok(Self {
            cell_size,
            image: RgbaImage::new(atlas_size, atlas_size),
            luminance_alpha: [false; 4],
        })
    }

    /// Edge length of one quadrant.
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Prepare `source` and paste it into `quadrant`. Returns the paste offset.
    pub fn place(&mut self, quadrant: Quadrant, source: &DynamicImage) -> (u32, u32) {
        let cell = prepare_cell(source, self.cell_size);
        self.place_prepared(quadrant, &cell)
    }

    /// Paste an already prepared cell into `quadrant`, replacing the pixels
    /// underneath rather than blending with them.
    pub fn place_prepared(&mut self, quadrant: Quadrant, cell: &PreparedCell) -> (u32, u32) {
        let (x, y) = quadrant.offset(self.cell_size);
        image::imageops::replace(&mut self.image, &cell.image, x as i64, y as i64);
        self.luminance_alpha[quadrant.index()] = cell.luminance_alpha;
        log::info!("placed {:?} cell at ({}, {})", quadrant, x, y);
        (x, y)
    }

    /// Finish building.
    pub fn finish(self) -> CloudAtlas {
        CloudAtlas {
            image: self.image,
            cell_size: self.cell_size,
            luminance_alpha: self.luminance_alpha,
        }
    }

    /// Build an atlas from four in-memory images in quadrant order.
    pub fn build_from_images(mut self, images: &[DynamicImage; 4]) -> CloudAtlas {
        for (quadrant, img) in Quadrant::ALL.into_iter().zip(images) {
            self.place(quadrant, img);
        }
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(size: u32, color: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(size, size, Rgba(color)))
    }

    #[test]
    fn test_zero_cell_size_rejected() {
        assert!(matches!(AtlasBuilder::new(0), Err(AtlasError::Config(_))));
    }

    #[test]
    fn test_oversized_cell_rejected() {
        assert!(matches!(AtlasBuilder::new(2_000_000_000), Err(AtlasError::Config(_))));
        assert!(matches!(
            AtlasBuilder::new(MAX_ATLAS_SIZE / 2 + 1),
            Err(AtlasError::Config(_))
        ));
    }

    #[test]
    fn test_empty_atlas_is_transparent() {
        let builder = AtlasBuilder::new(8).unwrap();
        assert_eq!(builder.cell_size(), 8);

        let atlas = builder.finish();
        assert_eq!(atlas.cell_size(), 8);
        assert!(atlas.image().pixels().all(|p| p.0 == [0, 0, 0, 0]));

        let image = atlas.into_image();
        assert_eq!(image.dimensions(), (16, 16));
    }

    #[test]
    fn test_quadrants_land_in_place() {
        let images = [
            solid(8, [255, 0, 0, 128]),
            solid(8, [0, 255, 0, 128]),
            solid(8, [0, 0, 255, 128]),
            solid(8, [255, 255, 255, 128]),
        ];
        let atlas = AtlasBuilder::new(8).unwrap().build_from_images(&images);

        assert_eq!(atlas.image().get_pixel(0, 0).0, [255, 0, 0, 128]);
        assert_eq!(atlas.image().get_pixel(7, 7).0, [255, 0, 0, 128]);
        assert_eq!(atlas.image().get_pixel(8, 0).0, [0, 255, 0, 128]);
        assert_eq!(atlas.image().get_pixel(0, 8).0, [0, 0, 255, 128]);
        assert_eq!(atlas.image().get_pixel(15, 15).0, [255, 255, 255, 128]);
        for q in Quadrant::ALL {
            assert!(!atlas.has_luminance_alpha(q));
        }
    }

    #[test]
    fn test_paste_replaces_without_blending() {
        let mut builder = AtlasBuilder::new(4).unwrap();
        builder.place(Quadrant::TopLeft, &solid(4, [255, 255, 255, 200]));
        builder.place(Quadrant::TopLeft, &solid(4, [10, 20, 30, 40]));
        let atlas = builder.finish();

        assert_eq!(atlas.cell(Quadrant::TopLeft), solid(4, [10, 20, 30, 40]).to_rgba8());
    }

    #[test]
    fn test_opaque_cell_uses_luminance() {
        let mut builder = AtlasBuilder::new(4).unwrap();
        builder.place(Quadrant::BottomRight, &solid(4, [100, 100, 100, 255]));
        let atlas = builder.finish();

        assert!(atlas.has_luminance_alpha(Quadrant::BottomRight));
        assert!(atlas
            .cell(Quadrant::BottomRight)
            .pixels()
            .all(|p| p.0 == [100, 100, 100, 100]));
        assert!(atlas.cell(Quadrant::TopLeft).pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_to_png_decodes_back() {
        let atlas = AtlasBuilder::new(4)
            .unwrap()
            .build_from_images(&[
                solid(4, [1, 2, 3, 4]),
                solid(4, [5, 6, 7, 8]),
                solid(4, [9, 10, 11, 12]),
                solid(4, [13, 14, 15, 16]),
            ]);
        let png = atlas.to_png().unwrap();
        let decoded = image::load_from_memory(&png).unwrap();

        assert_eq!(decoded.color(), image::ColorType::Rgba8);
        assert_eq!(&decoded.to_rgba8(), atlas.image());
    }

    #[test]
    fn test_write_creates_image_and_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clouds.png");
        let atlas = AtlasBuilder::new(2).unwrap().finish();

        let tex_path = atlas.write(&path).unwrap();
        assert_eq!(tex_path, dir.path().join("clouds.png.tex"));
        assert!(path.exists());
        assert_eq!(
            std::fs::read_to_string(&tex_path).unwrap(),
            TexMetadata::default().render()
        );
    }
}
