//! Session layer
//!
//! Owns the mutable state of one viewer (base directory, open file, channel
//! selection, decoded raster) and the glue around the core: directory
//! scanning, path resolution and the display sink.

mod preview_session;
mod resolver;
mod scanner;
mod sink;


pub use preview_session::PreviewSession;
pub use resolver::resolve_path;
pub use scanner::{is_tiff, scan_directory};
pub use sink::{DisplaySink, FileSink};
