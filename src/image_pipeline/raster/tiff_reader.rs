//! Raster reader implementation using the tiff library.
//!
//! Every page (IFD) of the file is decoded. Each page contributes as many
//! channels as it has samples per pixel, and page channels are stacked in
//! page order, so interleaved multi-sample files, band-planar files and
//! multi-page stacks all come out as a single `(height, width, channels)`
//! raster.

use std::io::{Cursor, Read, Seek};

use ndarray::{Array3, ArrayView2, Axis, concatenate, s};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::{PlanarConfiguration, Tag};
use tracing::debug;

use crate::image_pipeline::common::error::{PreviewError, Result};
use crate::image_pipeline::raster::reader::RasterReader;
use crate::image_pipeline::raster::types::Raster;

/// Raster reader that uses the tiff library for decoding.
pub struct TiffRasterReader;

impl TiffRasterReader {
    fn decode_page<R: Read + Seek>(decoder: &mut Decoder<R>, page: usize) -> Result<Array3<f64>> {
        let (width, height) = decoder
            .dimensions()
            .map_err(|e| page_error(page, e))?;
        let (width, height) = (width as usize, height as usize);

        let samples_per_pixel = tag_u16(decoder, Tag::SamplesPerPixel, page)?.unwrap_or(1) as usize;
        let planar = tag_u16(decoder, Tag::PlanarConfiguration, page)?
            .and_then(PlanarConfiguration::from_u16)
            == Some(PlanarConfiguration::Planar);

        if width == 0 || height == 0 || samples_per_pixel == 0 {
            return Err(PreviewError::ShapeError {
                height,
                width,
                channels: samples_per_pixel,
            });
        }

        debug!(
            "Decoding page {}: {}x{} with {} sample(s) per pixel{}",
            page,
            width,
            height,
            samples_per_pixel,
            if planar { ", planar" } else { "" }
        );

        if planar && samples_per_pixel > 1 {
            Self::decode_planes(decoder, page, height, width, samples_per_pixel)
        } else {
            Self::decode_chunky(decoder, page, height, width, samples_per_pixel)
        }
    }

    /// Interleaved samples: one `read_image` call yields every channel.
    fn decode_chunky<R: Read + Seek>(
        decoder: &mut Decoder<R>,
        page: usize,
        height: usize,
        width: usize,
        samples_per_pixel: usize,
    ) -> Result<Array3<f64>> {
        let decoded = decoder.read_image().map_err(|e| page_error(page, e))?;
        let samples = samples_to_f64(decoded)?;

        let expected = height * width * samples_per_pixel;
        if samples.len() != expected {
            return Err(PreviewError::DecodeError(format!(
                "page {page}: decoded {} samples, expected {expected} \
                 ({width}x{height}, {samples_per_pixel} per pixel)",
                samples.len(),
            )));
        }

        Array3::from_shape_vec((height, width, samples_per_pixel), samples)
            .map_err(|e| page_error(page, e))
    }

    /// Band-planar samples: `read_image` only covers the first plane, so
    /// every chunk of every plane is decoded and placed individually.
    ///
    /// Chunks are numbered plane by plane, row-major within a plane.
    fn decode_planes<R: Read + Seek>(
        decoder: &mut Decoder<R>,
        page: usize,
        height: usize,
        width: usize,
        planes: usize,
    ) -> Result<Array3<f64>> {
        let (chunk_width, chunk_height) = decoder.chunk_dimensions();
        let (chunk_width, chunk_height) = (chunk_width as usize, chunk_height as usize);
        if chunk_width == 0 || chunk_height == 0 {
            return Err(PreviewError::DecodeError(format!(
                "page {page}: zero-sized chunks"
            )));
        }

        let across = width.div_ceil(chunk_width);
        let per_plane = across * height.div_ceil(chunk_height);

        let mut data = Array3::<f64>::zeros((height, width, planes));
        for index in 0..per_plane * planes {
            let plane = index / per_plane;
            let local = index % per_plane;
            let top = (local / across) * chunk_height;
            let left = (local % across) * chunk_width;

            let chunk = u32::try_from(index).map_err(|e| page_error(page, e))?;
            let (data_width, data_height) = decoder.chunk_data_dimensions(chunk);
            let (data_width, data_height) = (data_width as usize, data_height as usize);
            if top + data_height > height || left + data_width > width {
                return Err(PreviewError::DecodeError(format!(
                    "page {page}: chunk {index} exceeds the image bounds"
                )));
            }

            let decoded = decoder.read_chunk(chunk).map_err(|e| page_error(page, e))?;
            let samples = samples_to_f64(decoded)?;
            let block = samples
                .get(..data_width * data_height)
                .ok_or_else(|| {
                    PreviewError::DecodeError(format!(
                        "page {page}: chunk {index} holds {} samples, expected {}",
                        samples.len(),
                        data_width * data_height
                    ))
                })
                .and_then(|block| {
                    ArrayView2::from_shape((data_height, data_width), block)
                        .map_err(|e| page_error(page, e))
                })?;

            data.slice_mut(s![top..top + data_height, left..left + data_width, plane])
                .assign(&block);
        }

        Ok(data)
    }
}

impl RasterReader for TiffRasterReader {
    /// Reads and decodes every page of a TIFF file from a byte array.
    ///
    /// # Errors
    ///
    /// * `DecodeError` if the bytes are not a TIFF, use an unsupported sample
    ///   type, decode to a sample count the page does not declare, or pages
    ///   disagree on their dimensions
    /// * `ShapeError` if a page has zero width, height or samples per pixel
    fn read_raster(&self, data: &[u8]) -> Result<Raster> {
        debug!("Decoding TIFF raster, {} bytes", data.len());

        let mut decoder = Decoder::new(Cursor::new(data))
            .map_err(|e| PreviewError::DecodeError(e.to_string()))?;

        let mut pages = vec![Self::decode_page(&mut decoder, 0)?];
        while decoder.more_images() {
            decoder
                .next_image()
                .map_err(|e| PreviewError::DecodeError(e.to_string()))?;
            let page = Self::decode_page(&mut decoder, pages.len())?;

            let (height, width, _) = pages[0].dim();
            if page.dim().0 != height || page.dim().1 != width {
                return Err(PreviewError::DecodeError(format!(
                    "page {} is {}x{}, expected {}x{}",
                    pages.len(),
                    page.dim().1,
                    page.dim().0,
                    width,
                    height
                )));
            }
            pages.push(page);
        }

        let page_count = pages.len();
        let stacked = if page_count == 1 {
            pages.remove(0)
        } else {
            let views: Vec<_> = pages.iter().map(|p| p.view()).collect();
            concatenate(Axis(2), &views).map_err(|e| PreviewError::DecodeError(e.to_string()))?
        };

        debug!(
            "Decoded raster: {} page(s), shape {:?}",
            page_count,
            stacked.dim()
        );

        Raster::new(stacked)
    }
}

fn page_error(page: usize, e: impl std::fmt::Display) -> PreviewError {
    PreviewError::DecodeError(format!("page {page}: {e}"))
}

fn tag_u16<R: Read + Seek>(decoder: &mut Decoder<R>, tag: Tag, page: usize) -> Result<Option<u16>> {
    decoder
        .find_tag(tag)
        .and_then(|value| value.map(|v| v.into_u16()).transpose())
        .map_err(|e| page_error(page, e))
}

/// Widens decoded samples to `f64`. Integers up to 2^53 stay exact.
fn samples_to_f64(decoded: DecodingResult) -> Result<Vec<f64>> {
    let samples = match decoded {
        DecodingResult::U8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U64(v) => v.into_iter().map(|s| s as f64).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I64(v) => v.into_iter().map(|s| s as f64).collect(),
        DecodingResult::F32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F64(v) => v,
        #[allow(unreachable_patterns)]
        _ => {
            return Err(PreviewError::DecodeError(
                "unsupported sample format".to_string(),
            ));
        }
    };
    Ok(samples)
}
