//! Image comparison entry point.

use crate::errors::{DiffError, DiffErrorKind, Result};
use crate::image::grid::PixelGrid;
use crate::image::metrics::{
    channel_nonzero_counts, mean_squared_error, structural_similarity, to_grayscale,
};
use crate::image::resize::resize_width_area;
use serde::{Deserialize, Serialize};

/// Outcome of comparing two shape-compatible images.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageComparison {
    /// Every channel has zero differing pixels
    pub structurally_equal: bool,
    /// Mean squared error of the grayscale planes (0.0 when identical, but
    /// distinct colors can share a luma value)
    pub mse: f64,
    /// Mean structural similarity of the grayscale planes, in [-1, 1]
    pub ssim: f64,
    /// Differing-pixel count per color channel
    pub channel_diff_nonzero: Vec<usize>,
    /// Shape both grids were compared at: (height, width, channels)
    pub compared_shape: (usize, usize, usize),
    /// True if the target was resampled to the baseline width
    pub target_resized: bool,
}

impl ImageComparison {
    /// Overall verdict: structural check passes, `mse == 0` and `ssim == 1`.
    pub fn is_equal(&self) -> bool {
        self.structurally_equal && self.mse == 0.0 && self.ssim == 1.0
    }

    /// Total number of differing (pixel, channel) samples.
    pub fn total_diff_nonzero(&self) -> usize {
        self.channel_diff_nonzero.iter().sum()
    }
}

/// Compare `source` against `target`.
///
/// If the widths differ, `target` is resampled to `baseline_width` with its
/// height preserved; the source is never altered. A `baseline_width` other
/// than the source width can never line up, so it is rejected before any
/// resampling. The structural check runs
/// on the color channels, MSE and SSIM on grayscale planes in a separate
/// pass.
///
/// # Errors
///
/// All errors mean "comparison not possible", never "not equal":
///
/// - `EmptyImage`: either grid has zero area
/// - `InvalidInput`: `baseline_width` is zero while a resize is needed
/// - `ShapeMismatch`: shapes still disagree after width normalization
pub fn compare_images(
    source: &PixelGrid,
    target: &PixelGrid,
    baseline_width: usize,
) -> Result<ImageComparison> {
    for (side, grid) in [("source", source), ("target", target)] {
        if grid.is_empty() {
            return Err(DiffError::new(DiffErrorKind::EmptyImage)
                .with_op("compare_images")
                .with_message(format!(
                    "{} image has zero area ({}x{}x{})",
                    side,
                    grid.height(),
                    grid.width(),
                    grid.channels()
                )));
        }
    }

    let resized;
    let (target, target_resized) = if source.width() != target.width() {
        if baseline_width != 0 && baseline_width != source.width() {
            return Err(DiffError::new(DiffErrorKind::ShapeMismatch)
                .with_op("compare_images")
                .with_message(format!(
                    "source width {} differs from baseline width {}",
                    source.width(),
                    baseline_width
                )));
        }
        resized = resize_width_area(target, baseline_width)?;
        (&resized, true)
    } else {
        (target, false)
    };

    if source.shape() != target.shape() {
        return Err(DiffError::new(DiffErrorKind::ShapeMismatch)
            .with_op("compare_images")
            .with_message(format!(
                "source is {:?} but normalized target is {:?}",
                source.shape(),
                target.shape()
            )));
    }

    let channel_diff_nonzero = channel_nonzero_counts(source, target);
    let structurally_equal = channel_diff_nonzero.iter().all(|&n| n == 0);

    let source_gray = to_grayscale(source);
    let target_gray = to_grayscale(target);
    let mse = mean_squared_error(&source_gray, &target_gray);
    let ssim = structural_similarity(&source_gray, &target_gray);

    // luma can collide for distinct colors, so only this direction holds
    debug_assert!(
        !structurally_equal || mse == 0.0,
        "structurally equal images with nonzero MSE"
    );

    Ok(ImageComparison {
        structurally_equal,
        mse,
        ssim,
        channel_diff_nonzero,
        compared_shape: source.shape(),
        target_resized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_images_equal() {
        let grid = PixelGrid::filled(4, 4, 3, 128).unwrap();
        let result = compare_images(&grid, &grid, 4).unwrap();
        assert!(result.is_equal());
        assert_eq!(result.channel_diff_nonzero, vec![0, 0, 0]);
        assert!(!result.target_resized);
    }

    #[test]
    fn test_target_wider_is_resampled_to_baseline() {
        let source = PixelGrid::filled(3, 4, 3, 50).unwrap();
        let target = PixelGrid::filled(3, 8, 3, 50).unwrap();
        let result = compare_images(&source, &target, 4).unwrap();
        assert!(result.target_resized);
        assert!(result.is_equal());
        assert_eq!(result.compared_shape, (3, 4, 3));
    }

    #[test]
    fn test_height_mismatch_is_not_comparable() {
        let source = PixelGrid::filled(3, 4, 3, 50).unwrap();
        let target = PixelGrid::filled(5, 4, 3, 50).unwrap();
        let err = compare_images(&source, &target, 4).unwrap_err();
        assert_eq!(err.kind(), DiffErrorKind::ShapeMismatch);
    }

    #[test]
    fn test_baseline_width_other_than_source_is_not_comparable() {
        let source = PixelGrid::filled(3, 4, 3, 50).unwrap();
        let target = PixelGrid::filled(3, 8, 3, 50).unwrap();
        let err = compare_images(&source, &target, 6).unwrap_err();
        assert_eq!(err.kind(), DiffErrorKind::ShapeMismatch);
    }

    #[test]
    fn test_huge_baseline_width_is_rejected_without_resampling() {
        let source = PixelGrid::filled(2, 4, 3, 50).unwrap();
        let target = PixelGrid::filled(2, 8, 3, 50).unwrap();
        let err = compare_images(&source, &target, usize::MAX / 2).unwrap_err();
        assert_eq!(err.kind(), DiffErrorKind::ShapeMismatch);
    }

    #[test]
    fn test_zero_baseline_width_is_invalid_input() {
        let source = PixelGrid::filled(2, 4, 3, 50).unwrap();
        let target = PixelGrid::filled(2, 8, 3, 50).unwrap();
        let err = compare_images(&source, &target, 0).unwrap_err();
        assert_eq!(err.kind(), DiffErrorKind::InvalidInput);
    }

    #[test]
    fn test_luma_collision_is_still_unequal() {
        // 0.587 * 31 and 0.299 + 0.114 * 157 are the same gray level
        let source = PixelGrid::new(1, 1, 3, vec![0, 31, 0]).unwrap();
        let target = PixelGrid::new(1, 1, 3, vec![1, 0, 157]).unwrap();
        let result = compare_images(&source, &target, 1).unwrap();
        assert!(!result.structurally_equal);
        assert_eq!(result.channel_diff_nonzero, vec![1, 1, 1]);
        assert!(result.mse < 1e-9);
        assert!(!result.is_equal());
    }

    #[test]
    fn test_empty_image_is_not_comparable() {
        let source = PixelGrid::new(0, 0, 3, Vec::new()).unwrap();
        let target = PixelGrid::filled(1, 1, 3, 0).unwrap();
        let err = compare_images(&source, &target, 1).unwrap_err();
        assert_eq!(err.kind(), DiffErrorKind::EmptyImage);
    }
}
