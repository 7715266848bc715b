use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::composite::PreviewBuffer;
use crate::image_pipeline::preview::png_writer::PngPreviewWriter;
use crate::image_pipeline::preview::tiff_writer::TiffPreviewWriter;
use crate::image_pipeline::preview::types::{PreviewConfig, PreviewFormat};

pub trait PreviewWriter {
    fn write_preview(&self, preview: &PreviewBuffer, output: &mut dyn Write, config: &PreviewConfig) -> Result<()>;
}

/// Dispatches on `config.format`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyPreviewWriter;

impl PreviewWriter for AnyPreviewWriter {
    fn write_preview(&self, preview: &PreviewBuffer, output: &mut dyn Write, config: &PreviewConfig) -> Result<()> {
        match config.format {
            PreviewFormat::Png => PngPreviewWriter.write_preview(preview, output, config),
            PreviewFormat::Tiff => TiffPreviewWriter.write_preview(preview, output, config),
        }
    }
}
