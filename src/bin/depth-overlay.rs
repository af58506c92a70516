use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use lidar_depth_overlay::{load_image, load_rig, load_scan, run, FovMode, MarkerStyle, RigConfig};

#[derive(Parser, Debug)]
#[command(name = "depth-overlay")]
#[command(version, about = "Depth map overlay generator for a camera/LiDAR rig")]
struct Args {
    /// Scene image
    #[arg(short, long, default_value = "input/example_scene.jpg")]
    image: PathBuf,

    /// LiDAR distance measurements as JSON object (angle -> mm)
    #[arg(short, long, default_value = "input/example_data.json")]
    data: PathBuf,

    /// Rig config (JSON), built-in defaults if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory receiving points_only.png and combined.png
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Marker style: opacity or gradient
    #[arg(long)]
    style: Option<MarkerStyle>,

    /// FOV mode: reconciled or camera-equal
    #[arg(long)]
    fov_mode: Option<FovMode>,

    /// More logging, repeat for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut rig = match &args.config {
        Some(path) => load_rig(path)?,
        None => RigConfig::default(),
    };
    if let Some(style) = args.style {
        rig = rig.with_style(style);
    }
    if let Some(fov_mode) = args.fov_mode {
        rig = rig.with_fov_mode(fov_mode);
    }

    let scan = load_scan(&args.data)?;
    let image = load_image(&args.image)
        .with_context(|| format!("Loading scene image {:?}", args.image))?;

    let output = run(&image, &scan, &rig)
        .with_context(|| format!("Projecting {:?} onto {:?}", args.data, args.image))?;
    log::info!(
        "{} markers, effective FOV {:.2} deg, {} samples skipped",
        output.projection.points().len(),
        output.projection.effective_fov_deg(),
        output.skipped_samples
    );
    output.write(&args.output_dir)?;
    Ok(())
}
