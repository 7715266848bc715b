//! Channel compositing module
//!
//! Maps a selection of raster channels onto an 8-bit RGB preview: channels
//! 0, 1 and 2 feed the red, green and blue slots, every other channel is
//! colour-mapped and overlaid by per-pixel maximum.

mod colormap;
mod compositor;
mod role;
pub mod types;

#[cfg(test)]
mod tests;

pub use colormap::Inferno;
pub use compositor::{DEFAULT_EPSILON, composite, composite_with_epsilon};
pub use role::ChannelRole;
pub use types::{ChannelSelection, PreviewBuffer};
