//! Preview pipeline configuration types

use crate::image_pipeline::composite::DEFAULT_EPSILON;

/// Encoded form of a written preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewFormat {
    #[default]
    Png,
    /// 8-bit RGB TIFF using the configured compression
    Tiff,
}

impl PreviewFormat {
    pub fn extension(self) -> &'static str {
        match self {
            PreviewFormat::Png => "png",
            PreviewFormat::Tiff => "tiff",
        }
    }
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - balanced level
    Deflate,
}

/// Configuration for decoding, compositing and writing previews
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Guard added to each channel's range during normalization
    pub epsilon: f64,
    /// Output encoding
    pub format: PreviewFormat,
    /// Compression used when `format` is TIFF
    pub compression: TiffCompression,
    /// Whether to validate raster dimensions after decoding
    pub validate_dimensions: bool,
    /// Largest accepted height or width, checked when validating
    pub max_dimension: Option<usize>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            format: PreviewFormat::Png,
            compression: TiffCompression::Deflate,
            validate_dimensions: true,
            max_dimension: Some(50000),
        }
    }
}

impl PreviewConfig {
    pub fn builder() -> PreviewConfigBuilder {
        PreviewConfigBuilder::default()
    }
}

/// Builder for PreviewConfig
#[derive(Default)]
pub struct PreviewConfigBuilder {
    epsilon: Option<f64>,
    format: Option<PreviewFormat>,
    compression: Option<TiffCompression>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
}

impl PreviewConfigBuilder {
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    pub fn format(mut self, format: PreviewFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> PreviewConfig {
        let default = PreviewConfig::default();
        PreviewConfig {
            epsilon: self.epsilon.unwrap_or(default.epsilon),
            format: self.format.unwrap_or(default.format),
            compression: self.compression.unwrap_or(default.compression),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
