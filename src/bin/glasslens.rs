use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use glasslens::{
    LensConfig, LensPreset, LensSession, Point, RadialLensRenderer, RenderOutcome, Rgba8Premul,
    Size, SourceImage, Surface, Viewport, cover_fit, paint_cover_background, parse_point,
    parse_size,
};

#[derive(Parser, Debug)]
#[command(name = "glasslens", version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the cover fit of an image size in a viewport as JSON.
    Fit(FitArgs),
    /// Render one frame with the lens at a pointer position as a PNG.
    Frame(FrameArgs),
    /// Move the pointer along a line and write one PNG per frame.
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
struct FitArgs {
    /// Image size, `WxH`.
    #[arg(long, value_parser = parse_size)]
    image: Size,

    /// Viewport size, `WxH`.
    #[arg(long, value_parser = parse_size)]
    viewport: Size,
}

#[derive(Args, Debug)]
struct LensArgs {
    /// Source image (PNG, JPEG, SVG, ...).
    #[arg(long)]
    image: PathBuf,

    /// Viewport size, `WxH`.
    #[arg(long, value_parser = parse_size)]
    viewport: Size,

    /// Named preset (glass, capture, project, analyze).
    #[arg(long, conflicts_with = "config")]
    preset: Option<String>,

    /// Lens config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the lens radius.
    #[arg(long)]
    radius: Option<f64>,

    /// Override the magnification.
    #[arg(long)]
    magnification: Option<f64>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    lens: LensArgs,

    /// Pointer position, `X,Y`.
    #[arg(long, value_parser = parse_point)]
    pointer: Point,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SweepArgs {
    #[command(flatten)]
    lens: LensArgs,

    /// Pointer start, `X,Y`.
    #[arg(long, value_parser = parse_point)]
    from: Point,

    /// Pointer end, `X,Y`.
    #[arg(long, value_parser = parse_point)]
    to: Point,

    /// Number of frames.
    #[arg(long, default_value_t = 24)]
    frames: u32,

    /// Output directory for `frame_NNNN.png`.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Fit(args) => cmd_fit(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Sweep(args) => cmd_sweep(args),
    }
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let fit = cover_fit(args.image, args.viewport)?;
    println!("{}", serde_json::to_string_pretty(&fit)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = load_config(&args.lens)?;
    let (viewport, image, background) = prepare(&args.lens)?;

    let mut renderer = RadialLensRenderer::new(config, viewport)?;
    renderer.set_image(image);
    renderer.set_pointer(args.pointer.x, args.pointer.y);

    let mut surface = background;
    match renderer.render(&mut surface)? {
        RenderOutcome::Drawn(c) => {
            tracing::debug!(x = c.x, y = c.y, r = c.r, "lens drawn");
        }
        other => tracing::warn!(?other, "lens not drawn"),
    }

    surface.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    if args.frames == 0 {
        anyhow::bail!("--frames must be at least 1");
    }
    let config = load_config(&args.lens)?;
    let (viewport, image, background) = prepare(&args.lens)?;

    let mut session = LensSession::new(config, viewport)?;
    session.set_image(image);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let last = f64::from(args.frames.saturating_sub(1).max(1));
    for i in 0..args.frames {
        let t = f64::from(i) / last;
        let p = args.from.lerp(args.to, t);
        session.pointer_move(p.x, p.y);

        let mut surface = background.clone();
        let report = session.tick(&mut surface);
        if let Some(err) = report.error {
            anyhow::bail!("frame {i}: {err}");
        }
        surface.save_png(&frame_path(&args.out_dir, i))?;
    }

    eprintln!("wrote {} frames to {}", args.frames, args.out_dir.display());
    Ok(())
}

fn load_config(args: &LensArgs) -> anyhow::Result<LensConfig> {
    let mut config = match (&args.preset, &args.config) {
        (Some(name), _) => LensConfig::preset(LensPreset::from_name(name)?),
        (None, Some(path)) => LensConfig::from_path(path)?,
        (None, None) => LensConfig::default(),
    };
    if let Some(r) = args.radius {
        config.radius = r;
    }
    if let Some(m) = args.magnification {
        config.magnification = m;
    }
    config.validate()?;
    Ok(config)
}

fn prepare(args: &LensArgs) -> anyhow::Result<(Viewport, SourceImage, Surface)> {
    let viewport = Viewport::new(args.viewport.width, args.viewport.height);
    let (w, h) = surface_size(args.viewport)?;
    let image = SourceImage::open(&args.image)
        .with_context(|| format!("load image '{}'", args.image.display()))?;

    let fit = cover_fit(image.size(), viewport.size())?;
    let mut background = Surface::filled(w, h, Rgba8Premul::from_straight([0, 0, 0, 255]));
    paint_cover_background(&mut background, &image, fit)?;
    Ok((viewport, image, background))
}

fn surface_size(size: Size) -> anyhow::Result<(u32, u32)> {
    let (w, h) = (size.width, size.height);
    if w.fract() != 0.0 || h.fract() != 0.0 {
        anyhow::bail!("viewport {w}x{h} must be whole pixels");
    }
    if !(1.0..=f64::from(u16::MAX)).contains(&w) || !(1.0..=f64::from(u16::MAX)).contains(&h) {
        anyhow::bail!("viewport {w}x{h} is out of range");
    }
    Ok((w as u32, h as u32))
}

fn frame_path(dir: &Path, i: u32) -> PathBuf {
    dir.join(format!("frame_{i:04}.png"))
}
