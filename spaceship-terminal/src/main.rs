/// Spaceship - fly around a spinning wireframe in the terminal
///
/// Controls:
///   - W / S: Thrust / brake
///   - A / D or Left / Right: Turn
///   - R / F or Up / Down: Look up / down
///   - Mouse: Look around
///   - Q / ESC / Ctrl-C: Quit
///
/// Usage: spaceship [--config <dir>]
use anyhow::Context;
use spaceship_core::Mesh;
use spaceship_terminal::config::DebugConfig;
use spaceship_terminal::{AppConfig, TerminalApp};
use std::env;
use std::fs::File;

fn config_dir() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn init_logging(debug: &DebugConfig) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(debug.log_level.as_str()),
    );
    if let Some(path) = &debug.log_file {
        let file = File::create(path).with_context(|| format!("opening log file {}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init().context("initializing logger")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = match config_dir() {
        Some(dir) => AppConfig::load_from(&dir)
            .with_context(|| format!("loading configuration from {}", dir))?,
        None => AppConfig::load().context("loading configuration from config")?,
    };
    init_logging(&config.debug)?;

    let mesh = Mesh::builtin(config.scene.mesh, config.scene.size);
    log::info!(
        "Starting with {:?} ({} vertices, {} faces)",
        config.scene.mesh,
        mesh.vertices().len(),
        mesh.faces().len()
    );

    let mut app = TerminalApp::new(mesh, config).context("reading terminal size")?;
    app.run().context("running terminal renderer")?;

    log::info!("Exited cleanly");
    Ok(())
}
