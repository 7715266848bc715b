use std::io::Write;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::image_pipeline::{
    common::error::{PreviewError, Result},
    composite::{ChannelSelection, PreviewBuffer, composite_with_epsilon},
    conversions::timing::PipelineTimings,
    inspect::{ChannelInfo, inspect},
    preview::{AnyPreviewWriter, PreviewConfig, PreviewWriter},
    raster::{Raster, RasterReader, TiffRasterReader},
};

pub struct TiffPreviewPipeline<R: RasterReader, W: PreviewWriter> {
    reader: R,
    writer: W,
    config: PreviewConfig,
}

impl TiffPreviewPipeline<TiffRasterReader, AnyPreviewWriter> {
    pub fn new(config: PreviewConfig) -> Self {
        Self {
            reader: TiffRasterReader,
            writer: AnyPreviewWriter,
            config,
        }
    }
}

impl<R: RasterReader, W: PreviewWriter> TiffPreviewPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: PreviewConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, height: usize, width: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(
                    "Raster dimensions {}x{} exceed maximum {}",
                    width, height, max
                );
                return Err(PreviewError::DimensionLimitExceeded { height, width, max });
            }
        }

        Ok(())
    }

    fn load_timed(&self, input_data: &[u8], timings: &mut PipelineTimings) -> Result<Raster> {
        let raster = timings.measure("decode_raster", || {
            let _span = tracing::info_span!("decode_raster").entered();
            self.reader.read_raster(input_data)
        })?;

        timings.measure("validate_dimensions", || {
            let _span = tracing::info_span!(
                "validate_dimensions",
                width = raster.width(),
                height = raster.height()
            )
            .entered();
            self.validate_dimensions(raster.height(), raster.width())
        })?;

        Ok(raster)
    }

    /// Decodes and validates a raster.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn load(&self, input_data: &[u8]) -> Result<Raster> {
        self.load_timed(input_data, &mut PipelineTimings::new())
    }

    /// Reports the channel layout of an encoded raster.
    pub fn inspect(&self, input_data: &[u8]) -> Result<ChannelInfo> {
        let raster = self.load(input_data)?;
        let info = inspect(&raster);
        info!(
            channels = info.channel_count,
            default = ?info.default_selection,
            "Inspected raster"
        );
        Ok(info)
    }

    /// Composites an already decoded raster with the configured epsilon.
    pub fn composite(&self, raster: &Raster, selection: &ChannelSelection) -> PreviewBuffer {
        let _span = tracing::info_span!("composite", channels = selection.len()).entered();
        composite_with_epsilon(raster, selection, self.config.epsilon)
    }

    /// Decodes an encoded raster and composites `selection` of it.
    pub fn preview(&self, input_data: &[u8], selection: &ChannelSelection) -> Result<PreviewBuffer> {
        let raster = self.load(input_data)?;
        Ok(self.composite(&raster, selection))
    }

    pub fn write(&self, preview: &PreviewBuffer, output: &mut dyn Write) -> Result<()> {
        let _span = tracing::info_span!("encode_preview", format = ?self.config.format).entered();
        self.writer.write_preview(preview, output, &self.config)
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn render(
        &self,
        input_data: &[u8],
        selection: &ChannelSelection,
        output: &mut dyn Write,
    ) -> Result<()> {
        self.render_with_timings(input_data, selection, output)
            .map(|_| ())
    }

    pub fn render_with_timings(
        &self,
        input_data: &[u8],
        selection: &ChannelSelection,
        output: &mut dyn Write,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        info!("Starting preview render");

        let raster = self.load_timed(input_data, &mut timings)?;
        let preview = timings.measure("composite", || self.composite(&raster, selection));
        timings.measure("encode_preview", || self.write(&preview, output))?;

        info!(
            width = preview.width(),
            height = preview.height(),
            channels = raster.channel_count(),
            "Render complete in {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok(timings)
    }

    #[instrument(skip(self, input_path, output_path, selection))]
    pub fn render_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        selection: &ChannelSelection,
        output_path: Q,
    ) -> Result<()> {
        self.render_file_with_timings(input_path, selection, output_path)
            .map(|_| ())
    }

    pub fn render_file_with_timings<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        selection: &ChannelSelection,
        output_path: Q,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Rendering file"
        );

        let input_data = timings.measure("read_input_file", || read_input(input_path))?;

        let mut output_file = timings.measure("create_output_file", || {
            std::fs::File::create(output_path).map_err(|e| {
                PreviewError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })
        })?;

        let render_timings = self.render_with_timings(&input_data, selection, &mut output_file)?;
        for step in render_timings.steps() {
            timings.add_step(step.name.clone(), step.duration);
        }

        Ok(timings)
    }

    /// Reads and decodes a raster file.
    pub fn load_file<P: AsRef<Path>>(&self, input_path: P) -> Result<Raster> {
        let input_data = read_input(input_path.as_ref())?;
        self.load(&input_data)
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }
}

fn read_input(input_path: &Path) -> Result<Vec<u8>> {
    std::fs::read(input_path)
        .map_err(|e| PreviewError::InputReadError(format!("{}: {}", input_path.display(), e)))
}
