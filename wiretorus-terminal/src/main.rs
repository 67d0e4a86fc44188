/// wiretorus Terminal Demo - Rotating Torus
///
/// Spins the built-in wireframe torus about its vertical axis.
/// Press Q, ESC or Ctrl-C to quit.

use wiretorus_core::{Mesh, RenderConfig, RenderError};
use wiretorus_terminal::TerminalApp;

fn main() -> Result<(), RenderError> {
    println!("wiretorus Terminal Renderer - Loading...");

    let mut app = TerminalApp::new(Mesh::torus(), RenderConfig::default())?;
    let frames = app.run()?;

    println!("Rendered {frames} frames");
    Ok(())
}
