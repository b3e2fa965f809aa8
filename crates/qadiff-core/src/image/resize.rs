//! Width-only area resampling.
//!
//! Each destination column averages the source columns it covers, weighted
//! by the fraction of each source column inside its footprint. Height and
//! channel count are never altered.

use crate::errors::{DiffError, DiffErrorKind, Result};
use crate::image::grid::PixelGrid;

/// Resample `grid` to `new_width` columns, keeping its height.
///
/// Returns a clone when the width already matches.
///
/// # Errors
///
/// - `InvalidInput`: `new_width` is zero
/// - `EmptyImage`: `grid` has no pixels to resample
pub fn resize_width_area(grid: &PixelGrid, new_width: usize) -> Result<PixelGrid> {
    if new_width == 0 {
        return Err(DiffError::new(DiffErrorKind::InvalidInput)
            .with_op("resize_width_area")
            .with_message("baseline width must be positive"));
    }
    if grid.is_empty() {
        return Err(DiffError::new(DiffErrorKind::EmptyImage)
            .with_op("resize_width_area")
            .with_message("cannot resample a zero-area image"));
    }
    if grid.width() == new_width {
        return Ok(grid.clone());
    }

    let (height, src_width, channels) = grid.shape();
    let scale = src_width as f64 / new_width as f64;
    let footprints: Vec<Vec<(usize, f64)>> = (0..new_width)
        .map(|x| column_footprint(x, scale, src_width))
        .collect();

    let mut out = Vec::with_capacity(height * new_width * channels);
    let mut acc = vec![0.0f64; channels];
    for row in 0..height {
        let src = grid.row(row);
        for footprint in &footprints {
            acc.iter_mut().for_each(|a| *a = 0.0);
            let mut total = 0.0;
            for &(sx, weight) in footprint {
                total += weight;
                let px = &src[sx * channels..(sx + 1) * channels];
                for (a, &sample) in acc.iter_mut().zip(px) {
                    *a += weight * f64::from(sample);
                }
            }
            for a in &acc {
                out.push(quantize(a / total));
            }
        }
    }

    PixelGrid::new(height, new_width, channels, out)
}

/// Source columns overlapping destination column `x`, with overlap weights.
fn column_footprint(x: usize, scale: f64, src_width: usize) -> Vec<(usize, f64)> {
    let start = x as f64 * scale;
    let end = ((x + 1) as f64 * scale).min(src_width as f64);
    let first = (start.floor() as usize).min(src_width - 1);
    let last = (end.ceil() as usize).clamp(first + 1, src_width);

    let footprint: Vec<(usize, f64)> = (first..last)
        .filter_map(|sx| {
            let lo = start.max(sx as f64);
            let hi = end.min((sx + 1) as f64);
            let weight = hi - lo;
            (weight > 0.0).then_some((sx, weight))
        })
        .collect();

    if footprint.is_empty() {
        vec![(first, 1.0)]
    } else {
        footprint
    }
}

fn quantize(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_row(values: &[u8]) -> PixelGrid {
        PixelGrid::new(1, values.len(), 1, values.to_vec()).unwrap()
    }

    #[test]
    fn test_downscale_by_two_averages_pairs() {
        let grid = gray_row(&[10, 20, 30, 50]);
        let out = resize_width_area(&grid, 2).unwrap();
        assert_eq!(out.data(), &[15, 40]);
    }

    #[test]
    fn test_fractional_downscale_weights_partial_columns() {
        // 3 -> 2: columns cover [0,1.5) and [1.5,3)
        let grid = gray_row(&[0, 90, 180]);
        let out = resize_width_area(&grid, 2).unwrap();
        // (0*1 + 90*0.5)/1.5 = 30, (90*0.5 + 180*1)/1.5 = 150
        assert_eq!(out.data(), &[30, 150]);
    }

    #[test]
    fn test_upscale_repeats_columns() {
        let grid = gray_row(&[7, 200]);
        let out = resize_width_area(&grid, 4).unwrap();
        assert_eq!(out.data(), &[7, 7, 200, 200]);
    }

    #[test]
    fn test_height_and_channels_preserved() {
        let grid = PixelGrid::filled(5, 8, 3, 42).unwrap();
        let out = resize_width_area(&grid, 3).unwrap();
        assert_eq!(out.shape(), (5, 3, 3));
        assert!(out.data().iter().all(|&v| v == 42));
    }

    #[test]
    fn test_same_width_is_identity() {
        let grid = gray_row(&[1, 2, 3]);
        assert_eq!(resize_width_area(&grid, 3).unwrap(), grid);
    }

    #[test]
    fn test_zero_width_rejected() {
        let grid = gray_row(&[1, 2, 3]);
        let err = resize_width_area(&grid, 0).unwrap_err();
        assert_eq!(err.kind(), DiffErrorKind::InvalidInput);
    }
}
