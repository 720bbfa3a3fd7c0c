use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use linkage_reel::eval::evaluator::Evaluator;
use linkage_reel::scene::text_layout::TextLayoutEngine;
use linkage_reel::{
    Composition, FfmpegSink, FfmpegSinkOpts, FrameIndex, PngSequenceSink, Quality, RenderConfig,
    RenderSession, write_png,
};

#[derive(Parser, Debug)]
#[command(name = "linkage-reel", version, about = "Render the Chinese financial-sector linkages explainer")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render every frame as a PNG sequence.
    Frames(FramesArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render the last frame of every segment as a PNG.
    Stills(StillsArgs),
    /// Write the recorded composition as JSON.
    Plan(PlanArgs),
    /// Print the segment table.
    Segments(ConfigArgs),
}

/// Shared configuration flags; they override values from `--config`.
#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    /// Render config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resolution and frame-rate preset.
    #[arg(long, value_enum)]
    quality: Option<Quality>,

    #[arg(long)]
    fps: Option<u32>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Directory with extra font files.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Render every frame even when it repeats the previous state.
    #[arg(long, default_value_t = false)]
    no_elision: bool,
}

impl ConfigArgs {
    fn resolve(&self) -> anyhow::Result<RenderConfig> {
        let mut cfg = match &self.config {
            Some(path) => RenderConfig::from_path(path)?,
            None => RenderConfig::default(),
        };
        if let Some(q) = self.quality {
            cfg.quality = q;
        }
        cfg.fps = self.fps.or(cfg.fps);
        cfg.width = self.width.or(cfg.width);
        cfg.height = self.height.or(cfg.height);
        if self.fonts_dir.is_some() {
            cfg.fonts_dir = self.fonts_dir.clone();
        }
        cfg.parallel |= self.parallel;
        cfg.threads = self.threads.or(cfg.threads);
        if let Some(n) = self.chunk_size {
            cfg.chunk_size = n;
        }
        if self.no_elision {
            cfg.static_frame_elision = false;
        }
        cfg.validate().context("invalid render config")?;
        Ok(cfg)
    }

    fn record(&self) -> anyhow::Result<Recording> {
        let cfg = self.resolve()?;
        let fonts = TextLayoutEngine::new(&cfg.render_settings());
        let fontdb = fonts.fontdb();
        let comp = cfg
            .director_with_fonts(fonts)?
            .run()
            .context("record presentation")?;
        Ok(Recording { cfg, comp, fontdb })
    }
}

/// A recorded composition with the fonts its text was measured against.
struct Recording {
    cfg: RenderConfig,
    comp: Composition,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Recording {
    fn session(self) -> anyhow::Result<RenderSession> {
        Ok(RenderSession::with_fontdb(
            self.comp,
            self.cfg.session_opts(),
            self.fontdb,
        )?)
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output MP4 path.
    #[arg(long, default_value = "linkage-reel.mp4")]
    out: PathBuf,

    /// Fail instead of overwriting an existing output.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    /// x264 constant rate factor.
    #[arg(long, default_value_t = 18)]
    crf: u8,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Frame index (0-based).
    #[arg(long, conflicts_with = "time", required_unless_present = "time")]
    frame: Option<u64>,

    /// Time in seconds.
    #[arg(long)]
    time: Option<f64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct StillsArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("linkage_reel=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Stills(args) => cmd_stills(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Segments(args) => cmd_segments(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut sess = args.config.record()?.session()?;
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        overwrite: !args.no_overwrite,
        crf: args.crf,
        ..FfmpegSinkOpts::new(&args.out)
    });
    let stats = sess
        .render_all(&mut sink)
        .with_context(|| format!("render '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {} rendered)",
        args.out.display(),
        stats.frames_total,
        stats.frames_rendered
    );
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut sess = args.config.record()?.session()?;
    let mut sink = PngSequenceSink::new(&args.out_dir);
    let stats = sess.render_all(&mut sink)?;
    eprintln!("wrote {} frames to {}", stats.frames_total, args.out_dir.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let rec = args.config.record()?;
    let comp = &rec.comp;
    let frame = match (args.frame, args.time) {
        (Some(f), _) => FrameIndex(f),
        (None, Some(t)) => {
            anyhow::ensure!(t.is_finite() && t >= 0.0, "--time must be >= 0");
            FrameIndex(comp.fps.secs_to_frames_floor(t))
        }
        (None, None) => anyhow::bail!("either --frame or --time is required"),
    };
    let bg = comp.background.to_rgba8();
    let mut sess = rec.session()?;
    let rgba = sess
        .render_frame(frame)
        .with_context(|| format!("render frame {}", frame.0))?;
    write_png(&args.out, &rgba, bg)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_stills(args: StillsArgs) -> anyhow::Result<()> {
    let rec = args.config.record()?;
    let bg = rec.comp.background.to_rgba8();
    let marks = rec.comp.segments.clone();
    let mut sess = rec.session()?;
    for (i, mark) in marks.iter().enumerate() {
        // Segments end on a fade, so take the last fully drawn frame instead.
        let Some(frame) = Evaluator::last_settled_frame(sess.composition(), mark.range)? else {
            tracing::warn!(segment = %mark.label, "segment has no settled frame");
            continue;
        };
        let rgba = sess.render_frame(frame)?;
        let path = args.out_dir.join(format!("{:02}_{}.png", i + 1, mark.label));
        write_png(&path, &rgba, bg)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let comp = args.config.record()?.comp;
    let json = serde_json::to_string_pretty(&comp).context("serialize composition")?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_segments(args: ConfigArgs) -> anyhow::Result<()> {
    let comp = args.record()?.comp;
    println!("{:<3} {:<20} {:>8} {:>8} {:>8}", "#", "segment", "start", "end", "secs");
    for (i, mark) in comp.segments.iter().enumerate() {
        println!(
            "{:<3} {:<20} {:>8} {:>8} {:>8.2}",
            i + 1,
            mark.label,
            mark.range.start.0,
            mark.range.end.0,
            comp.fps.frames_to_secs(mark.range.len_frames()),
        );
    }
    println!("total: {:.2}s, {} frames", comp.duration_secs(), comp.duration.0);
    Ok(())
}
