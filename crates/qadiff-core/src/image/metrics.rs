//! Divergence metrics over grayscale planes.
//!
//! Luma is kept in `f64` so that a one-step change in any single color
//! channel still moves the gray value. Distinct colors can still share a
//! luma value (`(0, 31, 0)` and `(1, 0, 157)`), so a zero MSE does not by
//! itself mean the color grids are equal.

use crate::image::grid::PixelGrid;

/// BT.601 luma weights for R, G, B.
const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// SSIM window edge length (uniform 7×7 filter).
pub const SSIM_WINDOW: usize = 7;

const SSIM_DYNAMIC_RANGE: f64 = 255.0;
const SSIM_K1: f64 = 0.01;
const SSIM_K2: f64 = 0.03;

/// A single-channel floating point image.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayPlane {
    pub height: usize,
    pub width: usize,
    pub values: Vec<f64>,
}

/// Convert a grid to luma. Single-channel grids pass through unchanged.
pub fn to_grayscale(grid: &PixelGrid) -> GrayPlane {
    let values = match grid.channels() {
        3 => grid
            .data()
            .chunks_exact(3)
            .map(|px| {
                px.iter()
                    .zip(LUMA_WEIGHTS)
                    .map(|(&s, w)| w * f64::from(s))
                    .sum()
            })
            .collect(),
        _ => grid.data().iter().map(|&s| f64::from(s)).collect(),
    };
    GrayPlane {
        height: grid.height(),
        width: grid.width(),
        values,
    }
}

/// Count of pixels whose absolute difference is non-zero, per channel.
///
/// Both grids must share a shape.
pub fn channel_nonzero_counts(source: &PixelGrid, target: &PixelGrid) -> Vec<usize> {
    let channels = source.channels();
    let mut counts = vec![0usize; channels];
    for (a, b) in source
        .data()
        .chunks_exact(channels)
        .zip(target.data().chunks_exact(channels))
    {
        for (count, (&x, &y)) in counts.iter_mut().zip(a.iter().zip(b)) {
            if x.abs_diff(y) != 0 {
                *count += 1;
            }
        }
    }
    counts
}

/// Mean squared error: sum of squared differences over `height * width`.
pub fn mean_squared_error(a: &GrayPlane, b: &GrayPlane) -> f64 {
    let area = (a.height * a.width) as f64;
    if area == 0.0 {
        return 0.0;
    }
    let sum: f64 = a
        .values
        .iter()
        .zip(&b.values)
        .map(|(x, y)| (x - y).powi(2))
        .sum();
    sum / area
}

/// Mean structural similarity over every fully contained 7×7 window.
///
/// Planes smaller than the window in either dimension are scored as one
/// whole-image window. Identical planes score exactly 1.0.
pub fn structural_similarity(a: &GrayPlane, b: &GrayPlane) -> f64 {
    if a.values == b.values {
        return 1.0;
    }
    let (h, w) = (a.height, a.width);
    if h < SSIM_WINDOW || w < SSIM_WINDOW {
        return window_ssim(&WindowStats::whole(a, b)).clamp(-1.0, 1.0);
    }

    let tables = SummedAreaTables::build(a, b);
    let mut total = 0.0;
    let mut windows = 0usize;
    for y in 0..=(h - SSIM_WINDOW) {
        for x in 0..=(w - SSIM_WINDOW) {
            total += window_ssim(&tables.window(y, x, SSIM_WINDOW));
            windows += 1;
        }
    }
    (total / windows as f64).clamp(-1.0, 1.0)
}

/// Raw moments of one window.
#[derive(Debug, Clone, Copy)]
struct WindowStats {
    n: f64,
    sum_x: f64,
    sum_y: f64,
    sum_xx: f64,
    sum_yy: f64,
    sum_xy: f64,
}

impl WindowStats {
    fn whole(a: &GrayPlane, b: &GrayPlane) -> Self {
        let mut stats = Self {
            n: a.values.len() as f64,
            sum_x: 0.0,
            sum_y: 0.0,
            sum_xx: 0.0,
            sum_yy: 0.0,
            sum_xy: 0.0,
        };
        for (&x, &y) in a.values.iter().zip(&b.values) {
            stats.sum_x += x;
            stats.sum_y += y;
            stats.sum_xx += x * x;
            stats.sum_yy += y * y;
            stats.sum_xy += x * y;
        }
        stats
    }
}

fn window_ssim(s: &WindowStats) -> f64 {
    let c1 = (SSIM_K1 * SSIM_DYNAMIC_RANGE).powi(2);
    let c2 = (SSIM_K2 * SSIM_DYNAMIC_RANGE).powi(2);

    let n = s.n;
    let mu_x = s.sum_x / n;
    let mu_y = s.sum_y / n;
    // sample covariance
    let norm = if n > 1.0 { n / (n - 1.0) } else { 1.0 };
    let var_x = (s.sum_xx / n - mu_x * mu_x) * norm;
    let var_y = (s.sum_yy / n - mu_y * mu_y) * norm;
    let cov_xy = (s.sum_xy / n - mu_x * mu_y) * norm;

    let numerator = (2.0 * mu_x * mu_y + c1) * (2.0 * cov_xy + c2);
    let denominator = (mu_x * mu_x + mu_y * mu_y + c1) * (var_x + var_y + c2);
    numerator / denominator
}

/// Integral images of x, y, x², y², xy with a zero top row / left column.
struct SummedAreaTables {
    stride: usize,
    x: Vec<f64>,
    y: Vec<f64>,
    xx: Vec<f64>,
    yy: Vec<f64>,
    xy: Vec<f64>,
}

impl SummedAreaTables {
    fn build(a: &GrayPlane, b: &GrayPlane) -> Self {
        let (h, w) = (a.height, a.width);
        let stride = w + 1;
        let len = (h + 1) * stride;
        let mut t = Self {
            stride,
            x: vec![0.0; len],
            y: vec![0.0; len],
            xx: vec![0.0; len],
            yy: vec![0.0; len],
            xy: vec![0.0; len],
        };
        for row in 0..h {
            let mut rx = 0.0;
            let mut ry = 0.0;
            let mut rxx = 0.0;
            let mut ryy = 0.0;
            let mut rxy = 0.0;
            for col in 0..w {
                let vx = a.values[row * w + col];
                let vy = b.values[row * w + col];
                rx += vx;
                ry += vy;
                rxx += vx * vx;
                ryy += vy * vy;
                rxy += vx * vy;
                let above = row * stride + col + 1;
                let here = (row + 1) * stride + col + 1;
                t.x[here] = t.x[above] + rx;
                t.y[here] = t.y[above] + ry;
                t.xx[here] = t.xx[above] + rxx;
                t.yy[here] = t.yy[above] + ryy;
                t.xy[here] = t.xy[above] + rxy;
            }
        }
        t
    }

    fn window(&self, top: usize, left: usize, size: usize) -> WindowStats {
        let s = self.stride;
        let (r0, c0, r1, c1) = (top, left, top + size, left + size);
        let rect = |t: &[f64]| t[r1 * s + c1] - t[r0 * s + c1] - t[r1 * s + c0] + t[r0 * s + c0];
        WindowStats {
            n: (size * size) as f64,
            sum_x: rect(&self.x),
            sum_y: rect(&self.y),
            sum_xx: rect(&self.xx),
            sum_yy: rect(&self.yy),
            sum_xy: rect(&self.xy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(height: usize, width: usize, f: impl Fn(usize, usize) -> f64) -> GrayPlane {
        let mut values = Vec::with_capacity(height * width);
        for r in 0..height {
            for c in 0..width {
                values.push(f(r, c));
            }
        }
        GrayPlane {
            height,
            width,
            values,
        }
    }

    #[test]
    fn test_grayscale_uses_luma_weights() {
        let grid = PixelGrid::new(1, 2, 3, vec![255, 0, 0, 0, 0, 255]).unwrap();
        let gray = to_grayscale(&grid);
        assert!((gray.values[0] - 0.299 * 255.0).abs() < 1e-9);
        assert!((gray.values[1] - 0.114 * 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_channel_counts_use_absolute_difference() {
        // target brighter than source in channel 2 only
        let a = PixelGrid::new(1, 2, 3, vec![5, 5, 5, 5, 5, 5]).unwrap();
        let b = PixelGrid::new(1, 2, 3, vec![5, 5, 9, 5, 5, 9]).unwrap();
        assert_eq!(channel_nonzero_counts(&a, &b), vec![0, 0, 2]);
    }

    #[test]
    fn test_mse_divides_by_area() {
        let a = plane(2, 2, |_, _| 0.0);
        let b = plane(2, 2, |r, c| if r == 0 && c == 0 { 4.0 } else { 0.0 });
        assert_eq!(mean_squared_error(&a, &b), 4.0);
    }

    #[test]
    fn test_ssim_identical_is_one() {
        let a = plane(12, 15, |r, c| ((r * 31 + c * 7) % 256) as f64);
        assert_eq!(structural_similarity(&a, &a.clone()), 1.0);
    }

    #[test]
    fn test_ssim_drops_for_noise() {
        let a = plane(16, 16, |r, c| ((r * 16 + c) % 256) as f64);
        let b = plane(16, 16, |r, c| (((r * 16 + c) * 97) % 256) as f64);
        let score = structural_similarity(&a, &b);
        assert!(score < 0.9, "expected low similarity, got {}", score);
        assert!((-1.0..=1.0).contains(&score));
    }

    #[test]
    fn test_ssim_small_plane_uses_single_window() {
        let a = plane(3, 3, |r, c| (r * 3 + c) as f64 * 10.0);
        let b = plane(3, 3, |r, c| (r * 3 + c) as f64 * 10.0 + 1.0);
        let score = structural_similarity(&a, &b);
        assert!(score > 0.9 && score < 1.0, "got {}", score);
    }

    #[test]
    fn test_ssim_inverted_pattern_is_negative() {
        let a = plane(8, 8, |r, c| if (r + c) % 2 == 0 { 255.0 } else { 0.0 });
        let b = plane(8, 8, |r, c| if (r + c) % 2 == 0 { 0.0 } else { 255.0 });
        assert!(structural_similarity(&a, &b) < 0.0);
    }
}
