//! Image comparison.
//!
//! Compares two decoded pixel grids and reports an exact structural verdict
//! alongside MSE and SSIM divergence metrics.
//!
//! ## Entry point
//!
//! ```
//! use qadiff_core::image::{compare_images, PixelGrid};
//!
//! let baseline = PixelGrid::filled(4, 4, 3, 200).unwrap();
//! let candidate = PixelGrid::filled(4, 4, 3, 200).unwrap();
//! let result = compare_images(&baseline, &candidate, 4).unwrap();
//! assert!(result.is_equal());
//! ```
//!
//! ## Guarantees
//!
//! - **Asymmetric normalization**: only the target is resampled, only in
//!   width, only when widths differ.
//! - **Agreement**: `structurally_equal` holds exactly when `mse == 0.0`.
//! - **Not comparable is an error**: shape or empty-input problems return
//!   `Err`, never an unequal result.

pub mod compare;
pub mod grid;
pub mod metrics;
pub mod resize;

pub use compare::{compare_images, ImageComparison};
pub use grid::PixelGrid;
