//! Decoded pixel grids.

use crate::errors::{DiffError, DiffErrorKind, Result};

/// A decoded image: `height × width × channels` unsigned 8-bit samples,
/// stored row-major with channels interleaved.
///
/// Only 1-channel (gray) and 3-channel (RGB) layouts are accepted, which is
/// what the decoders produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    height: usize,
    width: usize,
    channels: usize,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Build a grid from raw interleaved samples.
    ///
    /// Zero-area grids are accepted here and rejected at comparison time, so
    /// a collaborator can hand over whatever it decoded.
    ///
    /// # Errors
    ///
    /// - `InvalidInput`: unsupported channel count, or `data.len()` is not
    ///   `height * width * channels`
    pub fn new(height: usize, width: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        if channels != 1 && channels != 3 {
            return Err(DiffError::new(DiffErrorKind::InvalidInput)
                .with_op("pixel_grid_new")
                .with_message(format!(
                    "unsupported channel count {}, expected 1 or 3",
                    channels
                )));
        }
        let expected = sample_count(height, width, channels)?;
        if data.len() != expected {
            return Err(DiffError::new(DiffErrorKind::InvalidInput)
                .with_op("pixel_grid_new")
                .with_message(format!(
                    "pixel buffer has {} samples, expected {} ({}x{}x{})",
                    data.len(),
                    expected,
                    height,
                    width,
                    channels
                )));
        }
        Ok(Self {
            height,
            width,
            channels,
            data,
        })
    }

    /// A grid with every sample set to `value`.
    ///
    /// # Errors
    ///
    /// Same as [`PixelGrid::new`].
    pub fn filled(height: usize, width: usize, channels: usize, value: u8) -> Result<Self> {
        let len = sample_count(height, width, channels)?;
        Self::new(height, width, channels, vec![value; len])
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// `(height, width, channels)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.channels)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Sample at `(row, col, channel)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        if row >= self.height || col >= self.width || channel >= self.channels {
            return None;
        }
        self.data
            .get((row * self.width + col) * self.channels + channel)
            .copied()
    }

    /// Overwrite one sample. Returns `false` when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, channel: usize, value: u8) -> bool {
        if row >= self.height || col >= self.width || channel >= self.channels {
            return false;
        }
        let idx = (row * self.width + col) * self.channels + channel;
        match self.data.get_mut(idx) {
            Some(sample) => {
                *sample = value;
                true
            }
            None => false,
        }
    }

    /// One row of interleaved samples.
    pub(crate) fn row(&self, row: usize) -> &[u8] {
        let stride = self.width * self.channels;
        &self.data[row * stride..(row + 1) * stride]
    }
}

fn sample_count(height: usize, width: usize, channels: usize) -> Result<usize> {
    height
        .checked_mul(width)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| {
            DiffError::new(DiffErrorKind::InvalidInput)
                .with_op("pixel_grid_new")
                .with_message("grid dimensions overflow")
        })
}
