use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::debug;

use crate::image_pipeline::common::error::{PreviewError, Result};
use crate::image_pipeline::composite::PreviewBuffer;
use crate::image_pipeline::preview::types::PreviewConfig;
use crate::image_pipeline::preview::writer::PreviewWriter;

pub struct PngPreviewWriter;

impl PreviewWriter for PngPreviewWriter {
    fn write_preview(&self, preview: &PreviewBuffer, output: &mut dyn Write, _config: &PreviewConfig) -> Result<()> {
        debug!("Encoding PNG preview: {}x{}", preview.width(), preview.height());

        PngEncoder::new(output)
            .write_image(
                &preview.to_rgb_bytes(),
                preview.width() as u32,
                preview.height() as u32,
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| PreviewError::EncodeError(e.to_string()))?;

        debug!("PNG encoding complete");
        Ok(())
    }
}
