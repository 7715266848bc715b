//! Channel preview pipeline module
//!
//! This module turns multi-channel TIFF rasters into RGB previews, with
//! separate modules for raster reading, channel inspection, compositing,
//! preview encoding, pipeline orchestration and per-viewer session state.

pub mod raster;
pub mod inspect;
pub mod composite;
pub mod preview;
pub mod conversions;
pub mod session;
pub mod common;

#[cfg(test)]
mod test_support;

pub use common::{
    PreviewError,
    Result,
};

pub use raster::{
    Raster,
    RasterReader,
    TiffRasterReader,
};

pub use inspect::{
    ChannelInfo,
    ChannelLabel,
    DEFAULT_SELECTION_LIMIT,
    inspect,
    parse_labels,
};

pub use composite::{
    ChannelRole,
    ChannelSelection,
    PreviewBuffer,
    composite,
};

pub use preview::{
    AnyPreviewWriter,
    PngPreviewWriter,
    PreviewConfig,
    PreviewConfigBuilder,
    PreviewFormat,
    PreviewWriter,
    TiffCompression,
    TiffPreviewWriter,
};

pub use conversions::{
    PipelineTimings,
    TiffPreviewPipeline,
};

pub use session::{
    DisplaySink,
    FileSink,
    PreviewSession,
    resolve_path,
    scan_directory,
};
