//! Raster data types

use ndarray::{Array2, Array3, ArrayView2, Axis};

use crate::image_pipeline::common::error::{PreviewError, Result};

/// Decoded multi-channel raster.
///
/// Samples are stored as `f64` in `(height, width, channels)` order. A raster
/// always has at least one row, one column and one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    data: Array3<f64>,
}

impl Raster {
    /// Wraps a `(height, width, channels)` array.
    pub fn new(data: Array3<f64>) -> Result<Self> {
        let (height, width, channels) = data.dim();
        if height == 0 || width == 0 || channels == 0 {
            return Err(PreviewError::ShapeError {
                height,
                width,
                channels,
            });
        }
        Ok(Self { data })
    }

    /// Promotes a single `(height, width)` plane to a one-channel raster.
    pub fn from_plane(plane: Array2<f64>) -> Result<Self> {
        Self::new(plane.insert_axis(Axis(2)))
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn channel_count(&self) -> usize {
        self.data.dim().2
    }

    /// Returns the plane for `index`, or `None` when the raster has no such channel.
    pub fn channel(&self, index: usize) -> Option<ArrayView2<'_, f64>> {
        (index < self.channel_count()).then(|| self.data.index_axis(Axis(2), index))
    }

    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }
}
