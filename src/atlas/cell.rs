//! Per-quadrant cell preparation: RGBA conversion, resampling, and the
//! luminance-as-alpha heuristic.

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};

/// Filter used to resample every source to the cell size.
pub const CELL_FILTER: FilterType = FilterType::Lanczos3;

/// ITU-R 601-2 luma weights in 16.16 fixed point. They sum to 65536, so a
/// gray pixel maps to itself.
const LUMA_R: u32 = 19595;
const LUMA_G: u32 = 38470;
const LUMA_B: u32 = 7471;

/// Luminance of an RGB triple.
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B + 0x8000) >> 16) as u8
}

/// Whether every pixel has alpha 255.
pub fn is_fully_opaque(img: &RgbaImage) -> bool {
    img.pixels().all(|p| p[3] == u8::MAX)
}

/// Replace alpha with the luminance of each pixel's color, leaving RGB untouched.
pub fn apply_luminance_alpha(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        pixel[3] = luminance(r, g, b);
    }
}

/// Scale color channels by alpha, rounding to nearest.
pub fn premultiply_alpha(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let a = pixel[3] as u32;
        for c in 0..3 {
            pixel[c] = ((pixel[c] as u32 * a + 127) / 255) as u8;
        }
    }
}

/// Undo `premultiply_alpha`. Pixels with alpha 0 or 255 are left as they are.
pub fn unpremultiply_alpha(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let a = pixel[3] as u32;
        if a == 0 || a == 255 {
            continue;
        }
        for c in 0..3 {
            pixel[c] = ((pixel[c] as u32 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Lanczos resample in premultiplied space, so transparent texels do not
/// bleed their color into translucent edges.
fn resample(rgba: &RgbaImage, cell_size: u32) -> RgbaImage {
    if is_fully_opaque(rgba) {
        return image::imageops::resize(rgba, cell_size, cell_size, CELL_FILTER);
    }

    let mut premultiplied = rgba.clone();
    premultiply_alpha(&mut premultiplied);
    let mut resized = image::imageops::resize(&premultiplied, cell_size, cell_size, CELL_FILTER);
    unpremultiply_alpha(&mut resized);
    resized
}

/// A source image normalized for one atlas quadrant.
#[derive(Debug, Clone)]
pub struct PreparedCell {
    /// RGBA8 pixels, exactly `cell_size` on each side.
    pub image: RgbaImage,
    /// Whether alpha was rebuilt from luminance.
    pub luminance_alpha: bool,
}

/// Convert to RGBA8, resample to `cell_size` square, and derive alpha from
/// luminance when the resampled cell carries no transparency at all.
pub fn prepare_cell(source: &DynamicImage, cell_size: u32) -> PreparedCell {
    let rgba = source.to_rgba8();
    let mut image = if rgba.dimensions() == (cell_size, cell_size) {
        rgba
    } else {
        resample(&rgba, cell_size)
    };

    let luminance_alpha = is_fully_opaque(&image);
    if luminance_alpha {
        apply_luminance_alpha(&mut image);
    }
    log::debug!(
        "prepared {}x{} cell from {}x{} source, luminance alpha: {}",
        cell_size,
        cell_size,
        source.width(),
        source.height(),
        luminance_alpha
    );

    PreparedCell { image, luminance_alpha }
}
