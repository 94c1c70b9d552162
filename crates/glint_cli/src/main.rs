//! `glint`: render a preset scene to a PPM file.
//!
//! Usage: `glint <scene> [--settings <file.json>] [--output <file.ppm>] [--seed <n>]`

mod scenes;

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use glint_renderer::{render_parallel, save_ppm, BvhNode, Camera, RenderSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;

use scenes::Preset;

/// Parsed command line.
#[derive(Debug, PartialEq)]
struct Args {
    preset: Preset,
    settings: Option<PathBuf>,
    output: PathBuf,
    seed: Option<u64>,
}

fn usage(program: &str) -> String {
    let names: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
    format!(
        "Usage: {} <scene> [--settings <file.json>] [--output <file.ppm>] [--seed <n>]\nScenes: {}",
        program,
        names.join(", ")
    )
}

fn parse_args(args: &[String]) -> Result<Args> {
    let program = args.first().map(String::as_str).unwrap_or("glint");
    let Some(scene) = args.get(1) else {
        bail!("{}", usage(program));
    };
    let preset: Preset = scene.parse().with_context(|| usage(program))?;

    let mut settings = None;
    let mut output = None;
    let mut seed = None;

    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        let mut value = || {
            rest.next()
                .with_context(|| format!("Missing value for {}", flag))
        };
        match flag.as_str() {
            "--settings" => settings = Some(PathBuf::from(value()?)),
            "--output" => output = Some(PathBuf::from(value()?)),
            "--seed" => {
                let raw = value()?;
                seed = Some(
                    raw.parse::<u64>()
                        .with_context(|| format!("Invalid seed '{}'", raw))?,
                );
            }
            other => bail!("Unknown option '{}'\n{}", other, usage(program)),
        }
    }

    Ok(Args {
        preset,
        settings,
        output: output.unwrap_or_else(|| PathBuf::from(format!("{}.ppm", preset.name()))),
        seed,
    })
}

fn run(args: Args) -> Result<()> {
    let mut settings = match &args.settings {
        Some(path) => RenderSettings::from_json_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => RenderSettings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let scene = args.preset.build(&mut rng);
    let config = settings
        .camera_for(scene.camera)
        .context("Invalid camera configuration")?;
    let camera = Camera::new(config).context("Invalid camera configuration")?;

    log::info!(
        "Scene '{}': {} objects, seed {}",
        args.preset.name(),
        scene.world.len(),
        settings.seed
    );
    let world = BvhNode::new(&scene.world, &mut rng);

    let image = render_parallel(&camera, &world, settings.seed, settings.bucket_size);

    save_ppm(&args.output, &image)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    run(parse_args(&args)?)
}
