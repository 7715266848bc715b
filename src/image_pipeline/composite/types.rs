//! Selection and output types

use std::collections::BTreeSet;

use ndarray::Array3;

/// Set of channel indices chosen for display.
///
/// Iteration is ascending, which fixes the processing order. Indices past the
/// raster's channel count are kept but ignored by the compositor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSelection {
    indices: BTreeSet<usize>,
}

impl ChannelSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Indices that exist in a raster with `channel_count` channels.
    pub fn in_range(&self, channel_count: usize) -> impl Iterator<Item = usize> + '_ {
        self.indices.range(..channel_count).copied()
    }
}

impl FromIterator<usize> for ChannelSelection {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[usize; N]> for ChannelSelection {
    fn from(indices: [usize; N]) -> Self {
        indices.into_iter().collect()
    }
}

/// Composited 8-bit RGB preview, `(height, width, 3)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewBuffer {
    data: Array3<u8>,
}

impl PreviewBuffer {
    pub(crate) fn new(data: Array3<u8>) -> Self {
        debug_assert_eq!(data.dim().2, 3);
        Self { data }
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn data(&self) -> &Array3<u8> {
        &self.data
    }

    /// True when every sample is zero.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }

    /// Interleaved `[R, G, B, R, G, B, ...]` bytes in row-major order.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }
}
