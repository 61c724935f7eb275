/// Command line flags and logging setup
use clap::Parser;
use orbit3d_core::scene::DEFAULT_SPIN;
use orbit3d_core::RotationState;
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

/// Rotating wireframe point-cloud in the terminal.
///
/// Click to add a vertex, P pauses rotation, H toggles the HUD, Q quits.
#[derive(Parser, Debug, Clone)]
#[command(name = "orbit3d", version)]
pub struct Args {
    /// Frame-rate cap; 0 runs uncapped
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Per-frame rotation about x, y and z in radians
    #[arg(
        long,
        num_args = 3,
        value_names = ["DX", "DY", "DZ"],
        allow_negative_numbers = true,
        default_values_t = [DEFAULT_SPIN.x, DEFAULT_SPIN.y, DEFAULT_SPIN.z]
    )]
    pub spin: Vec<f64>,

    /// Show the status line on startup
    #[arg(long)]
    pub hud: bool,

    /// Write log output here instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `orbit3d_core=debug`; RUST_LOG wins when set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    pub fn spin(&self) -> RotationState {
        match self.spin.as_slice() {
            [x, y, z] => RotationState::new(*x, *y, *z),
            _ => DEFAULT_SPIN,
        }
    }

    /// Target duration of one frame, if capped
    pub fn frame_time(&self) -> Option<Duration> {
        if self.fps == 0 {
            None
        } else {
            Some(Duration::from_nanos(1_000_000_000 / self.fps as u64))
        }
    }
}

/// Install env_logger. While the terminal is in raw mode stderr shares the
/// screen, so `--log-file` is the way to keep logs readable.
pub fn init_logging(args: &Args) -> Result<(), AppError> {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&args.log_level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init()?;
    Ok(())
}
