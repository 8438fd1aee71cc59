use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

use espresso::{
    AnimationSession, ChartDocument, Ease, Fps, FrameIndex, FrameState, JsonLinesSink, SessionOpts,
};

#[derive(Parser, Debug)]
#[command(name = "espresso", version, about = "Animated chart frames for Reels and carousels")]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,

    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

/// Values that replace the document's animation settings.
#[derive(Args, Debug)]
struct Overrides {
    /// Easing name (linear, quad, cubic). Unknown names fall back to cubic-out.
    #[arg(long, global = true)]
    easing: Option<String>,

    /// Frames per second.
    #[arg(long, global = true)]
    fps: Option<u32>,

    /// Growth duration in seconds (the hold is added on top).
    #[arg(long, global = true)]
    duration: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the timeline of a chart document.
    Info(InfoArgs),
    /// Evaluate one frame as pretty JSON.
    Frame(FrameArgs),
    /// Evaluate the fully revealed (static) frame.
    Still(StillArgs),
    /// Evaluate the whole timeline into a JSON Lines file.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct InfoArgs {
    /// Input chart document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Input chart document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output JSON path. Prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StillArgs {
    /// Input chart document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path. Prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input chart document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON Lines path.
    #[arg(long)]
    out: PathBuf,

    /// Evaluate frames on a rayon thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Info(args) => cmd_info(&cli.overrides, args),
        Command::Frame(args) => cmd_frame(&cli.overrides, args),
        Command::Still(args) => cmd_still(&cli.overrides, args),
        Command::Render(args) => cmd_render(&cli.overrides, args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_document(path: &Path, overrides: &Overrides) -> anyhow::Result<ChartDocument> {
    let mut doc = ChartDocument::from_path(path)
        .with_context(|| format!("load chart document '{}'", path.display()))?;
    if let Some(name) = &overrides.easing {
        doc.animation.easing = Ease::from_name(name);
    }
    if let Some(fps) = overrides.fps {
        doc.animation.fps = Fps::try_from(fps).context("--fps")?;
    }
    if let Some(secs) = overrides.duration {
        doc.animation.duration_secs = secs;
    }
    doc.validate()
        .with_context(|| format!("validate chart document '{}'", path.display()))?;
    Ok(doc)
}

fn cmd_info(overrides: &Overrides, args: InfoArgs) -> anyhow::Result<()> {
    let doc = read_document(&args.in_path, overrides)?;
    let session = AnimationSession::new(&doc, SessionOpts::default())?;
    let clock = session.clock();
    let canvas = session.canvas();
    println!("chart:            {}", doc.chart.kind());
    println!("canvas:           {}x{}", canvas.width, canvas.height);
    println!("fps:              {}", clock.fps().get());
    println!("easing:           {}", session.ease());
    println!("animation frames: {}", clock.animation_frames());
    println!("hold frames:      {}", clock.hold_frames());
    println!(
        "total frames:     {} ({:.1}s)",
        clock.total_frames(),
        clock.total_secs()
    );
    Ok(())
}

fn cmd_frame(overrides: &Overrides, args: FrameArgs) -> anyhow::Result<()> {
    let doc = read_document(&args.in_path, overrides)?;
    let session = AnimationSession::new(&doc, SessionOpts::default())?;
    let state = session.evaluate_frame(FrameIndex(args.frame))?;
    emit_state(&state, args.out.as_deref())
}

fn cmd_still(overrides: &Overrides, args: StillArgs) -> anyhow::Result<()> {
    let doc = read_document(&args.in_path, overrides)?;
    let session = AnimationSession::new(&doc, SessionOpts::default())?;
    emit_state(&session.final_frame(), args.out.as_deref())
}

fn cmd_render(overrides: &Overrides, args: RenderArgs) -> anyhow::Result<()> {
    let doc = read_document(&args.in_path, overrides)?;
    let opts = SessionOpts {
        parallel: args.parallel,
        threads: args.threads,
        ..SessionOpts::default()
    };
    let session = AnimationSession::new(&doc, opts)?;
    let mut sink = JsonLinesSink::new(&args.out, !args.no_overwrite);
    let stats = session.render_all(&mut sink)?;

    let clock = session.clock();
    tracing::info!(
        animated = stats.frames_animated,
        held = stats.frames_held,
        "timeline evaluated"
    );
    eprintln!(
        "wrote {} ({} frames, {:.1}s @ {}fps, {} KB)",
        args.out.display(),
        stats.frames_total,
        clock.total_secs(),
        clock.fps().get(),
        sink.bytes_written().div_ceil(1024)
    );
    Ok(())
}

fn emit_state(state: &FrameState, out: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(state).context("serialize frame state")?;
    match out {
        Some(path) => {
            espresso::encode::ensure_parent_dir(path)?;
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {} (frame {})", path.display(), state.frame);
        }
        None => println!("{json}"),
    }
    Ok(())
}
