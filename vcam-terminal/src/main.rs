/// VCam Terminal Viewer - Fly a virtual camera around three boxes
///
/// Controls:
///   - W/S, A/D: Move forward/back, left/right
///   - Space/C: Move up/down
///   - Arrow Keys: Look up/down/left/right
///   - E/Q: Roll
///   - +/-: Zoom
///   - R: Reset camera
///   - P/ESC: Quit
///
/// Set VCAM_ROTATION_POLICY=euler to accumulate rotations around world axes.

use env_logger::Env;
use log::info;
use vcam_core::{FrameLoop, Scene, ViewerConfig, ViewerError};
use vcam_terminal::TerminalBackend;

fn main() -> Result<(), ViewerError> {
    // The viewer owns the alternate screen, so stay quiet unless asked
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = ViewerConfig::from_env()?;
    let scene = Scene::default_scene();
    info!(
        "starting viewer: {} meshes, {} rotation, tick {:?}",
        scene.meshes().len(),
        config.rotation_policy,
        config.tick_interval
    );

    println!("VCam Terminal Viewer - starting (press P to quit)...");

    let mut backend = TerminalBackend::new(&config)?;
    let mut viewer = FrameLoop::new(scene, config);
    viewer.run(&mut backend)?;

    println!("Rendered {} frames.", viewer.frames());
    Ok(())
}
