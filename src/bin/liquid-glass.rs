use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "liquid-glass", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame of a scene as a PNG.
    Frame(FrameArgs),
    /// Render a built-in demo scene as a PNG.
    Demo(DemoArgs),
    /// Render every frame of a scene, reporting repack statistics.
    Sequence(SequenceArgs),
    /// Print the packed parameter block of a scene frame as JSON.
    DumpParams(DumpArgs),
}

#[derive(Args, Debug)]
struct RenderFlags {
    /// Shade rows in parallel.
    #[arg(long)]
    parallel: bool,

    /// Dedicated worker thread count (implies --parallel).
    #[arg(long)]
    threads: Option<usize>,

    /// Override the scene's blur tap placement.
    #[arg(long, value_enum)]
    blur_mode: Option<BlurChoice>,
}

impl RenderFlags {
    fn render_opts(&self) -> liquid_glass::RenderOpts {
        liquid_glass::RenderOpts {
            parallel: self.parallel || self.threads.is_some(),
            threads: self.threads,
        }
    }

    fn apply(&self, scene: &mut liquid_glass::Scene) {
        if let Some(mode) = self.blur_mode {
            scene.pipeline.blur_mode = mode.into();
        }
    }
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    render: RenderFlags,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Demo to render.
    #[arg(value_enum)]
    demo: DemoChoice,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the demo scene JSON next to the PNG.
    #[arg(long)]
    save_scene: bool,

    #[command(flatten)]
    render: RenderFlags,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    #[command(flatten)]
    render: RenderFlags,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DemoChoice {
    Button,
    Preview,
}

impl From<DemoChoice> for liquid_glass::Demo {
    fn from(v: DemoChoice) -> Self {
        match v {
            DemoChoice::Button => Self::Button,
            DemoChoice::Preview => Self::Preview,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BlurChoice {
    Gaussian,
    LensAware,
}

impl From<BlurChoice> for liquid_glass::BlurMode {
    fn from(v: BlurChoice) -> Self {
        match v {
            BlurChoice::Gaussian => Self::Gaussian,
            BlurChoice::LensAware => Self::LensAware,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Demo(args) => cmd_demo(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::DumpParams(args) => cmd_dump_params(args),
    }
}

fn read_scene(path: &Path) -> anyhow::Result<liquid_glass::Scene> {
    liquid_glass::Scene::from_path(path)
        .with_context(|| format!("load scene '{}'", path.display()))
}

fn check_frame(scene: &liquid_glass::Scene, frame: u64) -> anyhow::Result<()> {
    if frame >= scene.frames {
        anyhow::bail!(
            "frame {frame} is out of range (scene has {} frames)",
            scene.frames
        );
    }
    Ok(())
}

/// Lay out and render one frame through a fresh driver.
fn render_single(
    scene: &liquid_glass::Scene,
    frame: u64,
    assets_root: &Path,
    opts: &liquid_glass::RenderOpts,
) -> anyhow::Result<liquid_glass::FrameRGBA> {
    let background = scene
        .paint_background(assets_root)
        .context("paint background")?;
    let mut driver = scene.driver();
    {
        let mut pass = driver.begin_frame();
        scene.report_frame(&mut pass, frame);
    }
    Ok(driver.render(&background, scene.canvas, opts)?)
}

fn write_png(path: &Path, frame: &liquid_glass::FrameRGBA) -> anyhow::Result<()> {
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
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut scene = read_scene(&args.in_path)?;
    args.render.apply(&mut scene);
    check_frame(&scene, args.frame)?;

    let root = liquid_glass::assets_root(&args.in_path);
    let frame = render_single(&scene, args.frame, &root, &args.render.render_opts())?;
    write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let demo = liquid_glass::Demo::from(args.demo);
    let mut scene = demo.scene();
    args.render.apply(&mut scene);

    if args.save_scene {
        let json_path = args.out.with_extension("json");
        let json = serde_json::to_string_pretty(&scene).context("serialize demo scene")?;
        std::fs::write(&json_path, json)
            .with_context(|| format!("write scene '{}'", json_path.display()))?;
        eprintln!("wrote {}", json_path.display());
    }

    let frame = render_single(&scene, 0, Path::new("."), &args.render.render_opts())
        .with_context(|| format!("render demo '{}'", demo.name()))?;
    write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let mut scene = read_scene(&args.in_path)?;
    args.render.apply(&mut scene);

    let root = liquid_glass::assets_root(&args.in_path);
    let background = scene
        .paint_background(&root)
        .context("paint background")?;
    let opts = args.render.render_opts();
    let mut driver = scene.driver();

    for f in 0..scene.frames {
        {
            let mut pass = driver.begin_frame();
            scene.report_frame(&mut pass, f);
        }
        let frame = driver
            .render(&background, scene.canvas, &opts)
            .with_context(|| format!("render frame {f}"))?;
        write_png(&args.out_dir.join(format!("frame_{f:04}.png")), &frame)?;
    }

    let stats = driver.stats();
    println!(
        "{}",
        serde_json::to_string_pretty(&stats).context("serialize frame stats")?
    );
    eprintln!(
        "wrote {} frames to {}",
        scene.frames,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_dump_params(args: DumpArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    check_frame(&scene, args.frame)?;

    let mut driver = scene.driver();
    {
        let mut pass = driver.begin_frame();
        scene.report_frame(&mut pass, args.frame);
    }
    let bound = driver.prepare();
    let out = serde_json::json!({
        "frame": args.frame,
        "revision": bound.revision(),
        "dropped": bound.dropped(),
        "uniforms": bound.params().to_uniform_json(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("serialize parameter block")?
    );
    Ok(())
}
