//! Image file decoding.

use crate::errors::{at_artifact, from_image, Result};
use qadiff_core::image::PixelGrid;
use std::path::Path;

/// Decode an image file into a 3-channel 8-bit grid.
///
/// Alpha is dropped and grayscale is expanded, so every decoded grid is RGB.
///
/// # Errors
///
/// - `Io`: the file could not be read
/// - `Decode`: the content is not a valid image
pub fn load_pixel_grid(path: &Path) -> Result<PixelGrid> {
    let img = image::open(path).map_err(|e| from_image(path, e))?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    tracing::debug!(path = %path.display(), width, height, "decoded image");

    PixelGrid::new(height as usize, width as usize, 3, rgb.into_raw())
        .map_err(|e| at_artifact(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use qadiff_core::errors::DiffErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_png_roundtrips_samples() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grid.png");
        let img = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8 * 10, y as u8 * 20, 7]));
        img.save(&path).unwrap();

        let grid = load_pixel_grid(&path).unwrap();
        assert_eq!(grid.shape(), (2, 3, 3));
        assert_eq!(grid.get(1, 2, 0), Some(20));
        assert_eq!(grid.get(1, 2, 1), Some(20));
        assert_eq!(grid.get(0, 0, 2), Some(7));
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"this is definitely not a png file").unwrap();

        let err = load_pixel_grid(&path).unwrap_err();
        assert_eq!(err.kind(), DiffErrorKind::Decode);
        assert_eq!(err.artifact(), Some(path.display().to_string().as_str()));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_pixel_grid(&dir.path().join("absent.png")).unwrap_err();
        assert_eq!(err.kind(), DiffErrorKind::Io);
    }
}
