//! Face caricature command line driver: deforms a face mesh file against the mean face.

use anyhow::{Context, Result};
use clap::Parser;
use face_caricature::{
    config::Config,
    emphasis::EmphasisMode,
    mean_face::MeanFaceReference,
    pose_normalization::normalize,
    utils::parse_vector3,
    vertex_set::VertexSet,
};
use log::{debug, info, warn};
use nalgebra::Vector3;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mean face file (x;y;z per line), overrides the configured path
    #[arg(short, long)]
    mean: Option<PathBuf>,

    /// Tracked face file to deform (x;y;z per line)
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the deformed face (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emphasis mode (none, normal, caricature, real_texture)
    #[arg(long)]
    mode: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Raw tracker rotation in radians, as x,y,z
    #[arg(long, allow_hyphen_values = true)]
    rotation: Option<String>,

    /// Raw tracker translation, as x,y,z
    #[arg(long, allow_hyphen_values = true)]
    translation: Option<String>,

    /// Treat the camera frame as mirrored
    #[arg(long)]
    mirrored: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Face Caricature");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {e}. Using defaults.");
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(mean_path) = args.mean {
        config.mean_face.path = mean_path;
    }
    if args.mirrored {
        config.pose.mirrored = true;
    }
    config.validate()?;

    let mode = match &args.mode {
        Some(name) => name.parse::<EmphasisMode>()?,
        None => config.emphasis.initial_mode,
    };

    let mean = MeanFaceReference::load_with_topology(&config.mean_face.path, &config.mean_face.topology)
        .with_context(|| format!("Failed to load mean face {}", config.mean_face.path.display()))?;

    let input = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input face {}", args.input.display()))?;
    let tracked = VertexSet::parse_delimited(&input)?;

    let engine = config.shape_emphasis();
    debug!(
        "Emphasis weights {:?}, depth offset {}",
        engine.coefficients(),
        engine.depth_offset()
    );
    let deformed = engine.deform(&tracked, &mean, mode)?;
    info!("Deformed {} vertices in {mode} mode", deformed.len());

    if args.rotation.is_some() || args.translation.is_some() {
        let rotation = args.rotation.as_deref().map(parse_vector3).transpose()?.unwrap_or_else(Vector3::zeros);
        let translation = args.translation.as_deref().map(parse_vector3).transpose()?.unwrap_or_else(Vector3::zeros);
        let pose = normalize(translation, rotation, config.pose.mirrored, config.pose.platform_mirrors_axes);
        info!(
            "Scene pose: translation ({:.3}, {:.3}, {:.3}), rotation ({:.2}, {:.2}, {:.2})",
            pose.translation.x, pose.translation.y, pose.translation.z, pose.rotation.x, pose.rotation.y, pose.rotation.z
        );
    }

    let output = deformed.to_delimited();
    match &args.output {
        Some(path) => {
            std::fs::write(path, output).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote deformed face to {}", path.display());
        }
        None => print!("{output}"),
    }

    Ok(())
}
