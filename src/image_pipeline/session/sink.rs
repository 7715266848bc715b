use std::path::PathBuf;

use tracing::{info, warn};

use crate::image_pipeline::common::error::{PreviewError, Result};
use crate::image_pipeline::composite::PreviewBuffer;
use crate::image_pipeline::preview::{AnyPreviewWriter, PreviewConfig, PreviewWriter};

/// Surface that displays previews.
pub trait DisplaySink {
    fn show(&mut self, preview: &PreviewBuffer) -> Result<()>;

    /// Shows "no image" along with a user-facing reason.
    fn clear(&mut self, message: &str);
}

/// Sink that writes every shown preview to one file.
pub struct FileSink {
    path: PathBuf,
    config: PreviewConfig,
    last_message: Option<String>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, config: PreviewConfig) -> Self {
        Self {
            path: path.into(),
            config,
            last_message: None,
        }
    }

    /// Reason given by the most recent `clear`, reset by `show`.
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }
}

impl DisplaySink for FileSink {
    fn show(&mut self, preview: &PreviewBuffer) -> Result<()> {
        let mut file = std::fs::File::create(&self.path).map_err(|e| {
            PreviewError::OutputWriteError(format!("{}: {}", self.path.display(), e))
        })?;
        AnyPreviewWriter.write_preview(preview, &mut file, &self.config)?;
        self.last_message = None;
        info!(
            path = %self.path.display(),
            "Wrote {}x{} preview",
            preview.width(),
            preview.height()
        );
        Ok(())
    }

    fn clear(&mut self, message: &str) {
        warn!("No preview: {}", message);
        self.last_message = Some(message.to_string());
    }
}
