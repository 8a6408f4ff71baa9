//! # Headless Demo
//!
//! Runs the sandbox without a window: a random cloud of bodies collapses
//! under its own gravity while the log reports merges and momentum drift.
//!
//! ```text
//! RUST_LOG=debug cargo run --example headless
//! ```

use std::time::{Duration, Instant};

use anyhow::{ensure, Result};
use cgmath::{InnerSpace, Vector2};
use gravity::prelude::*;
use log::info;
use rand::Rng;

const BODY_COUNT: usize = 40;
const TICKS: u32 = 600;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = rand::rng();
    let bodies: BodySet = (0..BODY_COUNT)
        .map(|_| {
            let position = Vector2::new(rng.random_range(-600.0..600.0), rng.random_range(-600.0..600.0));
            let velocity = Vector2::new(rng.random_range(-0.5..0.5), rng.random_range(-0.5..0.5));
            Body::new(position, velocity, rng.random_range(0.05..0.6))
        })
        .collect();

    let params = SimulationParameters::default()
        .with_trail_length(120)?
        .with_time_scale(2.0)?;
    let controller = SimulationController::with_parameters(params).with_bodies(bodies);
    let mut app = GravityApp::with_renderer(controller, LogRenderer::new(120));

    let initial_mass = app.controller().bodies().total_mass();
    let initial_momentum = app.controller().bodies().total_momentum();

    // Drive the timer with a synthetic clock so the run is as fast as possible
    let start = Instant::now();
    app.start(start);
    let period = app.scheduler().period();
    let mut now = start;
    let mut merges = 0;
    for _ in 0..TICKS {
        now += period;
        if let Some(report) = app.pump(now) {
            merges += report.merges;
        }
    }

    let final_bodies = app.controller().bodies();
    let drift = (final_bodies.total_momentum() - initial_momentum).magnitude();
    info!(
        "{} ticks in {:?} simulated: {} merges, {} of {} bodies left, momentum drift {:.3e}",
        app.controller().tick_count(),
        Duration::from_secs_f64(period.as_secs_f64() * TICKS as f64),
        merges,
        final_bodies.len(),
        BODY_COUNT,
        drift
    );

    ensure!(
        (final_bodies.total_mass() - initial_mass).abs() < 1e-9,
        "mass was not conserved"
    );

    Ok(())
}
