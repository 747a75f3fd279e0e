//! affine3d - wireframe transform playground for the terminal
//!
//! Controls:
//!   - WASD / Q E: Translate the model along Y, X and Z
//!   - Arrow Keys / PgUp PgDn: Rotate about X, Y and Z
//!   - + / -: Scale
//!   - x y z: Spin about a world axis, Shift+F: enter an axis through two points
//!   - Space / v / [ ]: Pause, reverse, change spin speed
//!   - Mouse drag: Orbit, wheel: field of view, Ctrl+wheel: camera distance
//!   - ESC: Quit

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use affine3d_core::{Scene, SceneConfig, WireModel};
use affine3d_terminal::{model::letter_b, TerminalApp, MAX_FPS};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelKind {
    /// Extruded capital letter B
    Letter,
    Cube,
}

#[derive(Parser, Debug)]
#[command(name = "affine3d", version, about = "Interactive 3D wireframe transforms in the terminal")]
struct Args {
    /// JSON scene configuration; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "letter")]
    model: ModelKind,

    /// Write logs here. The screen is taken by the renderer, so without this
    /// nothing is logged.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Frames per second, 1 to 240
    #[arg(
        long,
        default_value = "60",
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_FPS))
    )]
    fps: u32,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SceneConfig> {
    let Some(path) = path else {
        return Ok(SceneConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    SceneConfig::from_json_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = load_config(args.config.as_deref())?;
    let model = match args.model {
        ModelKind::Letter => letter_b(1.5),
        ModelKind::Cube => WireModel::cube(2.0),
    };
    info!(
        model = ?args.model,
        vertices = model.vertices().len(),
        edges = model.edges().len(),
        "starting"
    );

    let scene = Scene::new(model, config);
    let mut app = TerminalApp::new(scene, args.fps).context("cannot query terminal size")?;
    app.run().context("terminal session failed")?;
    Ok(())
}
