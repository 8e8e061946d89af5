mod config;

use anyhow::Context;
use backend::logging::init_logging;
use backend::{GeometryBuffer, RenderLoop, RunSummary, Shaders, System};
use clap::Parser;
use config::{Cli, Config};

/// Acquires context, program and quad in that order, then renders until the
/// window closes. Any acquisition failure ends the run before the first frame.
fn run(config: Config) -> anyhow::Result<RunSummary> {
    let system = System::new(&config.window).context("failed to initialize window")?;

    let shaders = Shaders::from_files(&system, &config.vertex_shader, &config.fragment_shader)
        .context("failed to create shader")?;

    let quad = GeometryBuffer::fullscreen_quad(&system).context("failed to upload quad geometry")?;

    let mut render_loop = RenderLoop::new(system, shaders, quad).with_max_frames(config.max_frames);
    Ok(render_loop.run())
}

fn main() {
    let config = Config::from(Cli::parse());
    init_logging(config.logging.clone());

    match run(config) {
        Ok(summary) => {
            log::info!(
                "rendered {} frames in {:.2}s",
                summary.frames,
                summary.elapsed
            );
        }
        Err(e) => {
            log::error!("{e:#}");
            std::process::exit(1);
        }
    }
}
