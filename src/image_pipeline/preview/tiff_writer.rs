use std::io::Write;

use tiff::encoder::{Compression, TiffEncoder, colortype, compression::DeflateLevel};
use tracing::debug;

use crate::image_pipeline::common::error::{PreviewError, Result};
use crate::image_pipeline::composite::PreviewBuffer;
use crate::image_pipeline::preview::types::{PreviewConfig, TiffCompression};
use crate::image_pipeline::preview::writer::PreviewWriter;

pub struct TiffPreviewWriter;

impl PreviewWriter for TiffPreviewWriter {
    fn write_preview(&self, preview: &PreviewBuffer, output: &mut dyn Write, config: &PreviewConfig) -> Result<()> {
        debug!("Encoding TIFF preview: {}x{}", preview.width(), preview.height());

        // The encoder needs Seek, so build the file in memory first.
        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::Deflate => Compression::Deflate(DeflateLevel::Balanced),
        };

        {
            let mut encoder = TiffEncoder::new(std::io::Cursor::new(&mut buffer))
                .map_err(|e| PreviewError::EncodeError(e.to_string()))?
                .with_compression(compression);

            encoder
                .write_image::<colortype::RGB8>(
                    preview.width() as u32,
                    preview.height() as u32,
                    &preview.to_rgb_bytes(),
                )
                .map_err(|e| PreviewError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
