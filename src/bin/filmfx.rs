use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use filmfx::{
    Dims, FilmPipeline, FilmSettings, LightLeakPreset, RandomStream, RasterBuffer, TintPreset,
    VignettePreset,
};
use image::ImageDecoder as _;
use rayon::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "filmfx", version)]
struct Cli {
    /// Log every pipeline stage.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply the film look to one or more photographs.
    Develop(DevelopArgs),
    /// Write a raw vignette mask or light-leak layer as a PNG.
    Layer(LayerArgs),
}

#[derive(Parser, Debug)]
struct DevelopArgs {
    /// Input images.
    #[arg(long = "in", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Directory receiving `<stem>_edit.<ext>` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Settings JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Light-leak preset, by index (1-5) or name.
    #[arg(long)]
    leak_preset: Option<LightLeakPreset>,

    /// Vignette preset, by index (0-2) or name.
    #[arg(long)]
    vignette: Option<VignettePreset>,

    /// Tint name (brown, red, blue).
    #[arg(long)]
    tint: Option<TintPreset>,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayerKind {
    Vignette,
    Leaks,
}

#[derive(Parser, Debug)]
struct LayerArgs {
    /// Layer to generate.
    #[arg(long, value_enum)]
    kind: LayerKind,

    /// Layer width in pixels.
    #[arg(long)]
    width: u32,

    /// Layer height in pixels.
    #[arg(long)]
    height: u32,

    /// Preset index or name for the chosen kind.
    #[arg(long)]
    preset: Option<String>,

    /// Seed for light-leak figures; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Develop(args) => cmd_develop(args),
        Command::Layer(args) => cmd_layer(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_develop(args: DevelopArgs) -> anyhow::Result<()> {
    let mut settings = match &args.config {
        Some(path) => FilmSettings::from_path(path)?,
        None => FilmSettings::default(),
    };
    if let Some(preset) = args.leak_preset {
        settings.light_leak_preset = preset;
        settings.light_leak_config = None;
    }
    if let Some(preset) = args.vignette {
        settings.vignette_preset = preset;
        settings.vignette_config = None;
    }
    if let Some(tint) = args.tint {
        settings.tint = tint;
        settings.tint_config = None;
    }
    settings.validate()?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, inputs = args.inputs.len(), "developing");

    let pool = build_thread_pool(args.threads)?;
    let results: Vec<anyhow::Result<PathBuf>> = pool.install(|| {
        args.inputs
            .par_iter()
            .enumerate()
            .map(|(i, path)| develop_one(path, &args.out_dir, &settings, seed, i as u64))
            .collect()
    });

    let mut failed = 0usize;
    for (path, res) in args.inputs.iter().zip(results) {
        match res {
            Ok(out) => eprintln!("wrote {}", out.display()),
            Err(e) => {
                failed += 1;
                eprintln!("failed {}: {e:#}", path.display());
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} images failed", args.inputs.len());
    }
    Ok(())
}

fn develop_one(
    path: &Path,
    out_dir: &Path,
    settings: &FilmSettings,
    seed: u64,
    index: u64,
) -> anyhow::Result<PathBuf> {
    let image = decode(path)?;
    let mut pipeline = FilmPipeline::new(settings.clone())?;
    let mut rng = RandomStream::for_item(seed, index);
    let developed = pipeline
        .run(&image, &mut rng)
        .with_context(|| format!("develop '{}'", path.display()))?;

    let out_path = output_path(path, out_dir)?;
    developed
        .to_dynamic()?
        .save(&out_path)
        .with_context(|| format!("write image '{}'", out_path.display()))?;
    Ok(out_path)
}

/// Decode an image and undo its EXIF orientation.
fn decode(path: &Path) -> anyhow::Result<RasterBuffer> {
    let mut decoder = image::ImageReader::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("detect format of '{}'", path.display()))?
        .into_decoder()
        .with_context(|| format!("decode '{}'", path.display()))?;
    let orientation = decoder
        .orientation()
        .with_context(|| format!("read orientation of '{}'", path.display()))?;
    let mut img = image::DynamicImage::from_decoder(decoder)
        .with_context(|| format!("decode '{}'", path.display()))?;
    img.apply_orientation(orientation);
    Ok(RasterBuffer::from_dynamic(&img)?)
}

fn output_path(input: &Path, out_dir: &Path) -> anyhow::Result<PathBuf> {
    let stem = input
        .file_stem()
        .with_context(|| format!("input '{}' has no file name", input.display()))?
        .to_string_lossy();
    let name = match input.extension() {
        Some(ext) => format!("{stem}_edit.{}", ext.to_string_lossy()),
        None => format!("{stem}_edit.png"),
    };
    Ok(out_dir.join(name))
}

fn cmd_layer(args: LayerArgs) -> anyhow::Result<()> {
    let dims = Dims::new(args.width, args.height)?;
    let layer = match args.kind {
        LayerKind::Vignette => {
            let preset = match &args.preset {
                Some(p) => p.parse::<VignettePreset>()?,
                None => VignettePreset::PaleRect,
            };
            filmfx::effects::vignette::generate_vignette_mask(dims, &preset.config())?
        }
        LayerKind::Leaks => {
            let preset = match &args.preset {
                Some(p) => p.parse::<LightLeakPreset>()?,
                None => LightLeakPreset::Nice,
            };
            let seed = args.seed.unwrap_or_else(rand::random);
            tracing::info!(seed, preset = preset.name(), "generating light leak layer");
            filmfx::effects::light_leak::generate_light_leak_layer(
                dims,
                &preset.config(),
                &mut RandomStream::from_seed(seed),
            )?
        }
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    layer
        .to_dynamic()?
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> anyhow::Result<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        anyhow::bail!("--threads must be >= 1 when set");
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().context("build rayon thread pool")
}
