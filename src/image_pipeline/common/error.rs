use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode raster: {0}")]
    DecodeError(String),

    #[error("Failed to encode preview: {0}")]
    EncodeError(String),

    #[error("Degenerate raster shape: height={height}, width={width}, channels={channels}")]
    ShapeError {
        height: usize,
        width: usize,
        channels: usize,
    },

    #[error("Raster {height}x{width} exceeds maximum dimension {max}")]
    DimensionLimitExceeded {
        height: usize,
        width: usize,
        max: usize,
    },

    #[error("Invalid channel label: {0:?}")]
    InvalidChannelLabel(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PreviewError>;
