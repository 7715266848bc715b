//! Preview encoding module
//!
//! Writes composited previews as PNG or RGB TIFF, and holds the pipeline
//! configuration.

mod writer;
mod png_writer;
mod tiff_writer;
pub mod types;

pub use writer::{AnyPreviewWriter, PreviewWriter};
pub use png_writer::PngPreviewWriter;
pub use tiff_writer::TiffPreviewWriter;
pub use types::{PreviewConfig, PreviewConfigBuilder, PreviewFormat, TiffCompression};
