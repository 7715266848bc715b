//! Pipeline conversions module
//!
//! This module contains the orchestration that turns raster files into
//! channel previews.

mod tiff_to_preview;
mod timing;


pub use tiff_to_preview::TiffPreviewPipeline;
pub use timing::{PipelineTimings, StepTiming, Timer};
