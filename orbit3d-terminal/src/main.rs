/// orbit3d - Rotating wireframe point-cloud
///
/// Renders an orbiting body and its cube of vertices in the terminal.
/// Controls:
///   - Mouse click: Add a vertex under the pointer
///   - P: Pause rotation
///   - H: Toggle the status line
///   - Q/ESC/Ctrl-C: Quit

use anyhow::{Context, Result};
use clap::Parser;
use orbit3d_terminal::{config, Args, TerminalApp};

fn main() -> Result<()> {
    let args = Args::parse();
    config::init_logging(&args).context("failed to set up logging")?;

    let mut app = TerminalApp::new(&args).context("failed to query terminal size")?;
    app.run().context("terminal renderer failed")?;

    log::info!("exited cleanly");
    Ok(())
}
