use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, instrument};

use crate::image_pipeline::{
    common::error::Result,
    composite::ChannelSelection,
    conversions::TiffPreviewPipeline,
    inspect::{ChannelInfo, inspect, parse_labels},
    preview::{AnyPreviewWriter, PreviewConfig},
    raster::{Raster, RasterReader, TiffRasterReader},
    session::{resolver::resolve_path, scanner::scan_directory, sink::DisplaySink},
};

const NO_IMAGE_MESSAGE: &str = "no image selected";

struct SessionState<S> {
    base_dir: Option<PathBuf>,
    current: Option<PathBuf>,
    raster: Option<Raster>,
    selection: ChannelSelection,
    sink: S,
}

/// One viewer's state plus the sink it publishes to.
///
/// Every operation holds a single lock across decode, composite and publish,
/// so requests are applied in the order they acquire the session and an
/// older, slower request can never overwrite a newer preview.
pub struct PreviewSession<S: DisplaySink, R: RasterReader = TiffRasterReader> {
    pipeline: TiffPreviewPipeline<R, AnyPreviewWriter>,
    state: Mutex<SessionState<S>>,
}

impl<S: DisplaySink> PreviewSession<S, TiffRasterReader> {
    pub fn new(sink: S, config: PreviewConfig) -> Self {
        Self::with_reader(TiffRasterReader, sink, config)
    }
}

impl<S: DisplaySink, R: RasterReader> PreviewSession<S, R> {
    pub fn with_reader(reader: R, sink: S, config: PreviewConfig) -> Self {
        Self {
            pipeline: TiffPreviewPipeline::with_custom(reader, AnyPreviewWriter, config),
            state: Mutex::new(SessionState {
                base_dir: None,
                current: None,
                raster: None,
                selection: ChannelSelection::new(),
                sink,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState<S>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_base_dir(&self, dir: impl Into<PathBuf>) {
        self.lock().base_dir = Some(dir.into());
    }

    pub fn base_dir(&self) -> Option<PathBuf> {
        self.lock().base_dir.clone()
    }

    /// TIFF files under the base directory, relative to it.
    pub fn list_files(&self) -> Result<Vec<PathBuf>> {
        match self.base_dir() {
            Some(dir) => scan_directory(&dir),
            None => Ok(Vec::new()),
        }
    }

    pub fn current_path(&self) -> Option<PathBuf> {
        self.lock().current.clone()
    }

    pub fn selection(&self) -> ChannelSelection {
        self.lock().selection.clone()
    }

    /// Opens whatever the UI points at: an uploaded path, or a file listed
    /// under the base directory. With nothing selected the display is
    /// cleared and `None` returned.
    pub fn open(&self, selected: Option<&str>, uploaded: Option<&Path>) -> Result<Option<ChannelInfo>> {
        let mut state = self.lock();
        let Some(path) = resolve_path(state.base_dir.as_deref(), selected, uploaded) else {
            state.current = None;
            state.raster = None;
            state.selection = ChannelSelection::new();
            state.sink.clear(NO_IMAGE_MESSAGE);
            return Ok(None);
        };
        self.open_locked(&mut state, path, None).map(Some)
    }

    /// Opens `path`, resetting the selection to the default channels.
    ///
    /// Re-opening the file already loaded reuses its decoded raster.
    pub fn open_path(&self, path: impl Into<PathBuf>) -> Result<ChannelInfo> {
        let mut state = self.lock();
        self.open_locked(&mut state, path.into(), None)
    }

    /// Opens `path` with `selection` already applied, publishing once.
    pub fn open_path_with_selection(
        &self,
        path: impl Into<PathBuf>,
        selection: ChannelSelection,
    ) -> Result<ChannelInfo> {
        let mut state = self.lock();
        self.open_locked(&mut state, path.into(), Some(selection))
    }

    /// Decodes the current file again, keeping the selection.
    pub fn reload(&self) -> Result<()> {
        let mut state = self.lock();
        if let Some(path) = state.current.clone() {
            self.load_locked(&mut state, path, true)?;
        }
        self.publish(&mut state)
    }

    pub fn select(&self, selection: ChannelSelection) -> Result<()> {
        let mut state = self.lock();
        state.selection = selection;
        self.publish(&mut state)
    }

    /// Parses `Channel_<i>` labels once and selects the resulting indices.
    pub fn select_labels<L: AsRef<str>>(&self, labels: &[L]) -> Result<()> {
        let selection = parse_labels(labels)?;
        self.select(selection)
    }

    /// Publishes the preview for the current state again.
    pub fn refresh(&self) -> Result<()> {
        let mut state = self.lock();
        self.publish(&mut state)
    }

    /// Runs `f` against the sink while holding the session lock.
    pub fn with_sink<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&self.lock().sink)
    }

    fn open_locked(
        &self,
        state: &mut SessionState<S>,
        path: PathBuf,
        selection: Option<ChannelSelection>,
    ) -> Result<ChannelInfo> {
        let info = self.load_locked(state, path, false)?;
        state.selection = selection.unwrap_or_else(|| info.default_channels());
        self.publish(state)?;
        Ok(info)
    }

    #[instrument(skip(self, state, path), fields(path = %path.display()))]
    fn load_locked(&self, state: &mut SessionState<S>, path: PathBuf, force: bool) -> Result<ChannelInfo> {
        let cached = !force && state.current.as_ref() == Some(&path);

        let raster = match state.raster.take().filter(|_| cached) {
            Some(raster) => {
                debug!("Reusing decoded raster");
                raster
            }
            None => {
                state.current = Some(path.clone());
                match self.pipeline.load_file(&path) {
                    Ok(raster) => raster,
                    Err(e) => {
                        state.sink.clear(&e.to_string());
                        return Err(e);
                    }
                }
            }
        };

        let info = inspect(&raster);
        state.raster = Some(raster);
        info!(
            channels = info.channel_count,
            default = ?info.default_selection,
            "Opened raster"
        );
        Ok(info)
    }

    fn publish(&self, state: &mut SessionState<S>) -> Result<()> {
        let Some(raster) = state.raster.as_ref() else {
            state.sink.clear(NO_IMAGE_MESSAGE);
            return Ok(());
        };

        let preview = self.pipeline.composite(raster, &state.selection);
        if let Err(e) = state.sink.show(&preview) {
            state.sink.clear(&e.to_string());
            return Err(e);
        }
        Ok(())
    }
}
