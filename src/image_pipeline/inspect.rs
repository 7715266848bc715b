//! Channel inspection
//!
//! Reports how many channels a raster has, which of them are selected by
//! default, and the labels the selection UI shows for them.

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::{PreviewError, Result};
use crate::image_pipeline::composite::ChannelSelection;
use crate::image_pipeline::raster::Raster;

/// Number of leading channels pre-selected for a freshly opened raster.
pub const DEFAULT_SELECTION_LIMIT: usize = 4;

const LABEL_PREFIX: &str = "Channel";

/// Channel layout of a raster as seen by the selection UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub channel_count: usize,
    /// Ascending indices `0..min(channel_count, DEFAULT_SELECTION_LIMIT)`.
    pub default_selection: Vec<usize>,
}

impl ChannelInfo {
    pub fn labels(&self) -> Vec<ChannelLabel> {
        (0..self.channel_count).map(ChannelLabel::new).collect()
    }

    pub fn default_channels(&self) -> ChannelSelection {
        self.default_selection.iter().copied().collect()
    }
}

/// Derives the channel count and default selection from a raster's shape.
pub fn inspect(raster: &Raster) -> ChannelInfo {
    let channel_count = raster.channel_count();
    ChannelInfo {
        channel_count,
        default_selection: (0..channel_count.min(DEFAULT_SELECTION_LIMIT)).collect(),
    }
}

/// UI-facing name of a channel, rendered as `Channel_<index>`.
///
/// Parsing accepts any `<prefix>_<index>` form so labels produced by older
/// front ends still resolve to the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelLabel {
    index: usize,
}

impl ChannelLabel {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for ChannelLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", LABEL_PREFIX, self.index)
    }
}

impl FromStr for ChannelLabel {
    type Err = PreviewError;

    fn from_str(s: &str) -> Result<Self> {
        s.rsplit_once('_')
            .and_then(|(_, index)| index.parse().ok())
            .map(Self::new)
            .ok_or_else(|| PreviewError::InvalidChannelLabel(s.to_string()))
    }
}

/// Parses UI labels into a selection, failing on the first malformed label.
pub fn parse_labels<S: AsRef<str>>(labels: &[S]) -> Result<ChannelSelection> {
    labels
        .iter()
        .map(|label| label.as_ref().parse::<ChannelLabel>().map(|l| l.index()))
        .collect()
}
