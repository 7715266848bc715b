use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tiff_preview_rs::image_pipeline::{
    ChannelSelection, FileSink, PipelineTimings, PreviewConfig, PreviewError, PreviewFormat,
    PreviewSession, TiffCompression, TiffPreviewPipeline, parse_labels, resolve_path,
    scan_directory,
};
use tiff_preview_rs::logger;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "tiff-preview", version, about = "Preview selected channels of multi-channel TIFF files")]
struct Cli {
    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List TIFF files under a directory, recursively.
    List {
        dir: PathBuf,
    },
    /// Print the channel labels of a raster and its default selection.
    Inspect(SourceArgs),
    /// Composite the selected channels and write the preview.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Directory that `--file` is relative to.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// File listed under `--dir`.
    #[arg(long)]
    file: Option<String>,

    /// Directly supplied file; wins over `--dir`/`--file`.
    #[arg(long)]
    upload: Option<PathBuf>,
}

impl SourceArgs {
    fn resolve(&self) -> anyhow::Result<PathBuf> {
        resolve_path(self.dir.as_deref(), self.file.as_deref(), self.upload.as_deref())
            .context("nothing selected: pass --file (with --dir) or --upload")
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Channel indices to show, e.g. `0,1,3`. Defaults to the first four.
    #[arg(long, value_delimiter = ',', conflicts_with = "labels")]
    channels: Option<Vec<usize>>,

    /// Channel labels to show, e.g. `Channel_0,Channel_3`.
    #[arg(long, value_delimiter = ',')]
    labels: Option<Vec<String>>,

    /// Output path. Defaults to `<input>.preview.<png|tiff>` next to the input.
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// Compression for TIFF output.
    #[arg(long, value_enum, default_value_t = CompressionChoice::Deflate)]
    compression: CompressionChoice,

    /// Normalization guard added to every channel's range.
    #[arg(long, default_value_t = 1e-6)]
    epsilon: f64,

    /// Log a per-step timing summary.
    #[arg(long)]
    timings: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Tiff,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CompressionChoice {
    None,
    Lzw,
    Deflate,
}

impl RenderArgs {
    fn config(&self) -> PreviewConfig {
        PreviewConfig::builder()
            .epsilon(self.epsilon)
            .format(match self.format {
                FormatChoice::Png => PreviewFormat::Png,
                FormatChoice::Tiff => PreviewFormat::Tiff,
            })
            .compression(match self.compression {
                CompressionChoice::None => TiffCompression::None,
                CompressionChoice::Lzw => TiffCompression::Lzw,
                CompressionChoice::Deflate => TiffCompression::Deflate,
            })
            .build()
    }

    fn output_path(&self, input: &Path, format: PreviewFormat) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| input.with_extension(format!("preview.{}", format.extension())))
    }

    fn selection(&self) -> anyhow::Result<Option<ChannelSelection>> {
        if let Some(channels) = &self.channels {
            return Ok(Some(channels.iter().copied().collect()));
        }
        match &self.labels {
            Some(labels) => Ok(Some(parse_labels(labels.as_slice())?)),
            None => Ok(None),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logger::init(&cli.log);

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.cmd {
        Command::List { dir } => list(&dir),
        Command::Inspect(source) => inspect(&source),
        Command::Render(args) => render(&args),
    }
}

fn list(dir: &Path) -> anyhow::Result<()> {
    let files = scan_directory(dir).with_context(|| format!("scan {}", dir.display()))?;
    for file in &files {
        println!("{}", file.display());
    }
    info!("{} TIFF file(s) under {}", files.len(), dir.display());
    Ok(())
}

fn inspect(source: &SourceArgs) -> anyhow::Result<()> {
    let path = source.resolve()?;
    let pipeline = TiffPreviewPipeline::new(PreviewConfig::default());
    let raster = pipeline
        .load_file(&path)
        .with_context(|| format!("load {}", path.display()))?;
    let info = tiff_preview_rs::image_pipeline::inspect(&raster);

    println!(
        "{}: {}x{}, {} channel(s)",
        path.display(),
        raster.width(),
        raster.height(),
        info.channel_count
    );
    let defaults = info.default_channels();
    for label in info.labels() {
        let marker = if defaults.contains(label.index()) { "[x]" } else { "[ ]" };
        println!("  {} {}", marker, label);
    }
    Ok(())
}

fn render(args: &RenderArgs) -> anyhow::Result<()> {
    let path = args.source.resolve()?;
    let config = args.config();
    let out = args.output_path(&path, config.format);
    let selection = args.selection()?;

    if args.timings {
        let pipeline = TiffPreviewPipeline::new(config);
        let mut timings = PipelineTimings::new();

        let raster = timings
            .measure("load_file", || pipeline.load_file(&path))
            .with_context(|| format!("load {}", path.display()))?;
        let selection = selection.unwrap_or_else(|| {
            tiff_preview_rs::image_pipeline::inspect(&raster).default_channels()
        });
        let preview = timings.measure("composite", || pipeline.composite(&raster, &selection));
        timings
            .measure("encode_preview", || {
                let mut file = std::fs::File::create(&out).map_err(|e| {
                    PreviewError::OutputWriteError(format!("{}: {}", out.display(), e))
                })?;
                pipeline.write(&preview, &mut file)
            })
            .with_context(|| format!("write {}", out.display()))?;

        timings.log_summary();
        info!("Preview written to {}", out.display());
        return Ok(());
    }

    let session = PreviewSession::new(FileSink::new(&out, config.clone()), config);
    let info = match selection {
        Some(selection) => session.open_path_with_selection(&path, selection),
        None => session.open_path(&path),
    }
    .with_context(|| format!("open {}", path.display()))?;
    info!(
        "{} has {} channel(s), default selection {:?}",
        path.display(),
        info.channel_count,
        info.default_selection
    );

    info!("Preview written to {}", out.display());
    Ok(())
}
