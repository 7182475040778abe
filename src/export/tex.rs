//! `.tex` loader sidecar.
//!
//! The engine's texture munger reads a `<image>.tex` file next to each
//! source image. The atlas is sampled directly by the cloud shader, so it
//! must skip compression, mip generation, sRGB decoding and alpha
//! premultiplication.

use crate::error::{AtlasError, Result};
use std::ffi::OsString;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Suffix appended to the image path to form the sidecar path.
pub const TEX_EXTENSION: &str = ".tex";

/// Loader settings for the atlas image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexMetadata {
    pub uncompressed: bool,
    pub no_mips: bool,
    pub srgb: bool,
    pub premultiply_alpha: bool,
    pub direct_texture: bool,
}

impl Default for TexMetadata {
    fn default() -> Self {
        Self {
            uncompressed: true,
            no_mips: true,
            srgb: false,
            premultiply_alpha: false,
            direct_texture: true,
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

impl TexMetadata {
    /// Render the sidecar contents, one `Key: value` line each.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(128);
        writeln!(out, "Type: image").unwrap();
        writeln!(out, "Uncompressed: {}", yes_no(self.uncompressed)).unwrap();
        writeln!(out, "NoMips: {}", yes_no(self.no_mips)).unwrap();
        writeln!(out, "sRGB: {}", yes_no(self.srgb)).unwrap();
        writeln!(out, "PremultiplyAlpha: {}", yes_no(self.premultiply_alpha)).unwrap();
        writeln!(out, "_SP_DirectTexture: {}", yes_no(self.direct_texture)).unwrap();
        out
    }

    /// Write the sidecar to `path`, overwriting any existing file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render()).map_err(|source| AtlasError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("wrote sidecar {:?}", path);
        Ok(())
    }
}

/// Sidecar path for an image: the full image path with `.tex` appended.
pub fn sidecar_path_for(image_path: &Path) -> PathBuf {
    let mut raw: OsString = image_path.as_os_str().to_owned();
    raw.push(TEX_EXTENSION);
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_render() {
        let expected = "Type: image\n\
                        Uncompressed: yes\n\
                        NoMips: yes\n\
                        sRGB: no\n\
                        PremultiplyAlpha: no\n\
                        _SP_DirectTexture: yes\n";
        assert_eq!(TexMetadata::default().render(), expected);
    }

    #[test]
    fn test_render_has_six_lines() {
        assert_eq!(TexMetadata::default().render().lines().count(), 6);
    }

    #[test]
    fn test_sidecar_path_appends_suffix() {
        assert_eq!(
            sidecar_path_for(Path::new("out/atlas.png")),
            PathBuf::from("out/atlas.png.tex")
        );
        assert_eq!(sidecar_path_for(Path::new("noext")), PathBuf::from("noext.tex"));
    }

    #[test]
    fn test_write_to_missing_dir_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("atlas.png.tex");
        let err = TexMetadata::default().write_to(&path).unwrap_err();
        assert!(err.is_write());
    }

    #[test]
    fn test_write_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas.png.tex");

        TexMetadata::default().write_to(&path).unwrap();
        let first = std::fs::read(&path).unwrap();
        TexMetadata::default().write_to(&path).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
    }
}
