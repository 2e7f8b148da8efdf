use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lens-bubble", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single transition frame as a PNG.
    Frame(FrameArgs),
    /// Render evenly spaced progress samples from 0 to 1 as numbered PNGs.
    Sweep(SweepArgs),
    /// Write the GLSL vertex and fragment programs to a directory.
    Shaders(ShadersArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input transition config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Override the config's progress.
    #[arg(long, allow_hyphen_values = true)]
    progress: Option<f64>,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Input transition config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of frames; progress runs from 0 to 1 inclusive.
    #[arg(long, default_value_t = 30)]
    frames: u32,
}

#[derive(Parser, Debug)]
struct ShadersArgs {
    /// Output directory for `lens_bubble.vert` and `lens_bubble.frag`.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    initialise_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Shaders(args) => cmd_shaders(args),
    }
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

struct Prepared {
    config: lens_bubble::TransitionConfig,
    textures: lens_bubble::LoadedTextures,
}

fn prepare(in_path: &Path) -> anyhow::Result<Prepared> {
    let config = lens_bubble::TransitionConfig::load(in_path)
        .with_context(|| format!("load config '{}'", in_path.display()))?;
    let root = in_path.parent().unwrap_or_else(|| Path::new("."));
    let textures = config.load_textures(root).context("load transition images")?;
    Ok(Prepared { config, textures })
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let Prepared { config, textures } = prepare(&args.in_path)?;
    let progress = args.progress.unwrap_or(config.progress);
    anyhow::ensure!(progress.is_finite(), "--progress must be finite");

    let frame = lens_bubble::render_frame_with_opts(
        config.resolution()?,
        progress,
        &textures.from,
        &textures.to,
        &config.render_opts(),
    )?;
    write_png(&args.out, &frame)
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.frames >= 2, "--frames must be >= 2");
    let Prepared { config, textures } = prepare(&args.in_path)?;
    let resolution = config.resolution()?;
    let opts = config.render_opts();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let last = f64::from(args.frames - 1);
    for i in 0..args.frames {
        let progress = f64::from(i) / last;
        let frame = lens_bubble::render_frame_with_opts(
            resolution,
            progress,
            &textures.from,
            &textures.to,
            &opts,
        )?;
        write_png(&args.out_dir.join(format!("frame_{i:04}.png")), &frame)?;
    }
    Ok(())
}

fn cmd_shaders(args: ShadersArgs) -> anyhow::Result<()> {
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for (name, src) in [
        ("lens_bubble.vert", lens_bubble::VERTEX_SHADER),
        ("lens_bubble.frag", lens_bubble::FRAGMENT_SHADER),
    ] {
        let path = args.out_dir.join(name);
        std::fs::write(&path, src).with_context(|| format!("write '{}'", path.display()))?;
        tracing::info!("wrote {}", path.display());
    }
    Ok(())
}

fn write_png(path: &Path, frame: &lens_bubble::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;

    tracing::info!("wrote {}", path.display());
    Ok(())
}
