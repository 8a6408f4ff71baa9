//! # Gravity
//!
//! Opens the sandbox window with the canonical four bodies.
//!
//! The binary ships with the logging renderer only, so the window stays
//! blank until a drawing [`Renderer`](gravity::app::Renderer) is supplied
//! through `GravityApp::with_renderer`. The simulation still runs and
//! reports through the log.
//!
//! Drag to pan, scroll to zoom, right click and hold then drag to add a body.
//! Space pauses, R resets, C clears, Escape quits. Set `RUST_LOG=debug` to see
//! merges, spawns and tick timing.

use anyhow::Context;
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("{}", gravity::ui::INSTRUCTIONS.replace('\n', " "));

    let app = gravity::default();
    app.run().context("gravity window exited with an error")?;

    Ok(())
}
