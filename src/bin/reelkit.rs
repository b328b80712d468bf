use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "reelkit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a request and print the plan, its fingerprint and the ffmpeg command.
    Plan(PlanArgs),
    /// Plan a request and render it (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print `ffprobe` metadata for a media file.
    Probe(ProbeArgs),
    /// Print the installed engine version.
    Version,
}

#[derive(Parser, Debug)]
struct RequestArgs {
    /// Request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Planner configuration JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory asset references are resolved against. Defaults to the request's directory.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Print caption font paths with the SHA-256 of each font file.
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    request: RequestArgs,

    /// Directory the printed command writes its output into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    request: RequestArgs,

    /// Output file. Defaults to the operation's conventional name in the current directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Media file to probe.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Print the parsed summary instead of raw ffprobe JSON.
    #[arg(long)]
    summary: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelkit=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Render(args) => cmd_render(args),
        Command::Probe(args) => cmd_probe(args),
        Command::Version => cmd_version(),
    }
}

struct Loaded {
    request: reelkit::Request,
    config: reelkit::PlannerConfig,
    resolver: reelkit::LocalResolver,
}

fn load(args: &RequestArgs) -> anyhow::Result<Loaded> {
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read request '{}'", args.in_path.display()))?;
    let request = reelkit::Request::from_json_str(&text)
        .with_context(|| format!("parse request '{}'", args.in_path.display()))?;

    let config = match &args.config {
        Some(path) => reelkit::PlannerConfig::load(path)?,
        None => reelkit::PlannerConfig::default(),
    };

    let root = match &args.assets {
        Some(dir) => dir.clone(),
        None => request_dir(&args.in_path),
    };
    let resolver = reelkit::LocalResolver::new(&root)?;

    if args.dump_fonts {
        dump_font_diagnostics(&config.fonts)?;
    }

    Ok(Loaded {
        request,
        config,
        resolver,
    })
}

fn request_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let loaded = load(&args.request)?;
    let plan = reelkit::plan_request(&loaded.request, &loaded.resolver, &loaded.config)?;

    let output = args.out_dir.join(loaded.request.default_file_name());
    let job = reelkit::FfmpegJob::from_plan(&plan, &output, Path::new("<work>"))?;

    println!("{}", plan.to_json_pretty()?);
    eprintln!("fingerprint: {}", plan.fingerprint()?);
    eprintln!("command:     {}", job.command_line());
    for side in &job.side_files {
        eprintln!("side file {}:", side.path.display());
        for line in side.contents.lines() {
            eprintln!("  {line}");
        }
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let loaded = load(&args.request)?;
    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(loaded.request.default_file_name()));

    let engine = reelkit::FfmpegEngine::default();
    let rendered = reelkit::render_request(
        &loaded.request,
        &loaded.resolver,
        &loaded.config,
        &engine,
        &out,
    )?;

    eprintln!(
        "wrote {} ({}, plan {})",
        rendered.path.display(),
        rendered.mime_type,
        rendered.plan_fingerprint
    );
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    if args.summary {
        let info = reelkit::assets::probe::probe_media(&args.in_path)?;
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print!("{}", reelkit::assets::probe::probe_json(&args.in_path)?);
    }
    Ok(())
}

fn cmd_version() -> anyhow::Result<()> {
    println!("reelkit {}", env!("CARGO_PKG_VERSION"));
    print!("{}", reelkit::assets::probe::engine_version()?);
    Ok(())
}

fn dump_font_diagnostics(fonts: &reelkit::FontTable) -> anyhow::Result<()> {
    eprintln!("caption font diagnostics:");
    let missing = fonts.missing();
    for (family, path) in [("latin", &fonts.latin), ("devanagari", &fonts.devanagari)] {
        eprintln!("  {family}:");
        eprintln!("    path:   {}", path.display());
        if missing.contains(&path.as_path()) {
            eprintln!("    sha256: <missing>");
            continue;
        }
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        eprintln!("    sha256: {}", sha256_hex(&bytes));
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
