//! Raster reading module
//!
//! This module decodes multi-channel raster files into an in-memory
//! `(height, width, channels)` array.

mod reader;
mod tiff_reader;
pub mod types;


pub use reader::RasterReader;
pub use tiff_reader::TiffRasterReader;
pub use types::Raster;
