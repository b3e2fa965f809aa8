//! Image comparator scenarios on in-memory grids.

use qadiff_core::errors::DiffErrorKind;
use qadiff_core::image::{compare_images, PixelGrid};

fn gradient(height: usize, width: usize) -> PixelGrid {
    let mut data = Vec::with_capacity(height * width * 3);
    for r in 0..height {
        for c in 0..width {
            data.push((r * 17 % 256) as u8);
            data.push((c * 23 % 256) as u8);
            data.push(((r + c) * 5 % 256) as u8);
        }
    }
    PixelGrid::new(height, width, 3, data).unwrap()
}

#[test]
fn test_identical_gradient_is_equal_with_perfect_metrics() {
    // Given
    let grid = gradient(20, 24);

    // When
    let result = compare_images(&grid, &grid.clone(), 24).unwrap();

    // Then
    assert!(result.structurally_equal);
    assert_eq!(result.mse, 0.0);
    assert_eq!(result.ssim, 1.0);
    assert!(result.is_equal());
}

#[test]
fn test_single_sample_change_is_detected_in_all_checks() {
    let source = gradient(20, 24);
    let mut target = source.clone();
    let old = target.get(10, 10, 2).unwrap();
    assert!(target.set(10, 10, 2, old.wrapping_add(1)));

    let result = compare_images(&source, &target, 24).unwrap();

    assert!(!result.structurally_equal);
    assert_eq!(result.channel_diff_nonzero, vec![0, 0, 1]);
    assert!(result.mse > 0.0);
    assert!(result.ssim < 1.0);
    assert!(!result.is_equal());
}

#[test]
fn test_target_brighter_than_source_counts_as_difference() {
    let source = PixelGrid::filled(8, 8, 3, 10).unwrap();
    let target = PixelGrid::filled(8, 8, 3, 200).unwrap();

    let result = compare_images(&source, &target, 8).unwrap();

    assert_eq!(result.channel_diff_nonzero, vec![64, 64, 64]);
    assert_eq!(result.total_diff_nonzero(), 192);
}

#[test]
fn test_double_width_uniform_target_normalizes_to_equal() {
    let source = PixelGrid::filled(6, 10, 3, 90).unwrap();
    let target = PixelGrid::filled(6, 20, 3, 90).unwrap();

    let result = compare_images(&source, &target, 10).unwrap();

    assert!(result.target_resized);
    assert!(result.is_equal());
}

#[test]
fn test_grayscale_grids_are_supported() {
    let source = PixelGrid::filled(9, 9, 1, 0).unwrap();
    let mut target = source.clone();
    target.set(4, 4, 0, 255);

    let result = compare_images(&source, &target, 9).unwrap();

    assert_eq!(result.channel_diff_nonzero, vec![1]);
    assert!((result.mse - 255.0 * 255.0 / 81.0).abs() < 1e-9);
}

#[test]
fn test_channel_count_mismatch_is_not_comparable() {
    let source = PixelGrid::filled(4, 4, 3, 0).unwrap();
    let target = PixelGrid::filled(4, 4, 1, 0).unwrap();

    let err = compare_images(&source, &target, 4).unwrap_err();

    assert_eq!(err.kind(), DiffErrorKind::ShapeMismatch);
    assert_eq!(err.code(), "ERR_SHAPE_MISMATCH");
}

#[test]
fn test_unsupported_channel_count_rejected_at_construction() {
    let err = PixelGrid::new(1, 1, 4, vec![0; 4]).unwrap_err();
    assert_eq!(err.kind(), DiffErrorKind::InvalidInput);
}
