// src/simulation/controller.rs
//! Orchestration of one tick and the mutation entry points
//!
//! A tick records trails, merges overlapping bodies, then integrates gravity,
//! always in that order: merging first keeps a pair that has just collided
//! from also pulling on itself in the same step.

use cgmath::Vector2;
use log::{debug, info, warn};

use super::body::{Body, BodySet};
use super::collision::CollisionMerger;
use super::gravity::GravityIntegrator;
use super::params::{SimulationParameters, DEFAULT_FRAME_RATE, DEFAULT_TIME_SCALE, DEFAULT_TRAIL_LENGTH};
use super::trail::TrailRecorder;
use super::traits::{Simulation, TickReport};
use crate::error::Result;
use crate::view::camera::ViewTransform;

/// Flash level removed per rendered frame after a clear
pub const FLASH_FADE_PER_FRAME: f64 = 0.05;

/// Owns the bodies, the parameters and the per-tick pipeline
#[derive(Debug, Clone)]
pub struct SimulationController {
    bodies: BodySet,
    params: SimulationParameters,
    view: ViewTransform,
    recorder: TrailRecorder,
    merger: CollisionMerger,
    integrator: GravityIntegrator,
    flash: f64,
    last_merge_count: usize,
    tick_count: u64,
}

impl Default for SimulationController {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationController {
    /// Start running with the four canonical bodies
    pub fn new() -> Self {
        Self::with_parameters(SimulationParameters::default())
    }

    pub fn with_parameters(params: SimulationParameters) -> Self {
        Self {
            bodies: BodySet::canonical(),
            params,
            view: ViewTransform::default(),
            recorder: TrailRecorder::new(),
            merger: CollisionMerger::new(),
            integrator: GravityIntegrator::new(),
            flash: 0.0,
            last_merge_count: 0,
            tick_count: 0,
        }
    }

    /// Replace the starting bodies
    pub fn with_bodies(mut self, bodies: BodySet) -> Self {
        self.bodies = bodies;
        self
    }

    /// Swap in a differently tuned integrator
    pub fn with_integrator(mut self, integrator: GravityIntegrator) -> Self {
        self.integrator = integrator;
        self
    }

    /// Advance one tick unless paused
    pub fn tick(&mut self) -> TickReport {
        if self.params.paused {
            return TickReport {
                redraw: true,
                advanced: false,
                merges: 0,
                body_count: self.bodies.len(),
            };
        }

        self.recorder.record(&mut self.bodies, self.params.trail_length);
        let merges = self.merger.resolve(&mut self.bodies);
        self.integrator
            .step(&mut self.bodies, self.params.frame_rate, self.params.time_scale);

        if merges > 0 {
            debug!("tick {}: {} merge(s), {} bodies left", self.tick_count, merges, self.bodies.len());
        }
        self.last_merge_count = merges;
        self.tick_count += 1;

        TickReport {
            redraw: true,
            advanced: true,
            merges,
            body_count: self.bodies.len(),
        }
    }

    /// Restore the canonical bodies, the view and the trail length
    pub fn reset(&mut self) {
        self.bodies = BodySet::canonical();
        self.view.reset();
        self.params.trail_length = DEFAULT_TRAIL_LENGTH;
        self.last_merge_count = 0;
        info!("Simulation reset to {} bodies", self.bodies.len());
    }

    /// Reset, and also restore frame rate and time scale
    pub fn reset_all(&mut self) {
        self.params.frame_rate = DEFAULT_FRAME_RATE;
        self.params.time_scale = DEFAULT_TIME_SCALE;
        self.reset();
    }

    /// Remove every body and start the clear flash
    pub fn clear(&mut self) {
        let removed = self.bodies.len();
        self.bodies.clear();
        self.flash = 1.0;
        self.last_merge_count = 0;
        info!("Cleared {} bodies", removed);
    }

    /// Add a body with an empty trail, returning its index
    ///
    /// The mass is raised to the minimum positive mass if needed.
    pub fn add_body(&mut self, position: Vector2<f64>, velocity: Vector2<f64>, mass: f64) -> usize {
        let body = Body::new(position, velocity, mass);
        debug!(
            "Adding body at ({:.1}, {:.1}) with velocity ({:.2}, {:.2}) and mass {:.2}",
            position.x, position.y, velocity.x, velocity.y, body.mass
        );
        self.bodies.push(body)
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.params.paused = paused;
    }

    /// Flip the paused state, returning the new one
    pub fn toggle_pause(&mut self) -> bool {
        self.params.paused = !self.params.paused;
        info!("Simulation {}", if self.params.paused { "paused" } else { "resumed" });
        self.params.paused
    }

    pub fn set_time_scale(&mut self, time_scale: f64) -> Result<()> {
        self.params.set_time_scale(time_scale).map_err(|err| {
            warn!("Rejected time scale: {err}");
            err
        })
    }

    /// Change the target frame rate
    ///
    /// The host must restart its timer with the new period.
    pub fn set_frame_rate(&mut self, frame_rate: f64) -> Result<()> {
        self.params.set_frame_rate(frame_rate).map_err(|err| {
            warn!("Rejected frame rate: {err}");
            err
        })?;
        info!("Frame rate set to {:.1}", frame_rate);
        Ok(())
    }

    pub fn set_trail_length(&mut self, trail_length: usize) -> Result<()> {
        self.params.set_trail_length(trail_length).map_err(|err| {
            warn!("Rejected trail length: {err}");
            err
        })
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewTransform {
        &mut self.view
    }

    /// Current clear-flash brightness in `[0, 1]`
    pub fn flash_level(&self) -> f64 {
        self.flash
    }

    /// Fade the clear flash by one rendered frame
    pub fn fade_flash(&mut self) {
        self.flash = (self.flash - FLASH_FADE_PER_FRAME).max(0.0);
    }

    /// Merges performed by the most recent tick
    pub fn last_merge_count(&self) -> usize {
        self.last_merge_count
    }

    /// Ticks that actually advanced the simulation
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl Simulation for SimulationController {
    fn tick(&mut self) -> TickReport {
        SimulationController::tick(self)
    }

    fn frame_rate(&self) -> f64 {
        self.params.frame_rate
    }

    fn bodies(&self) -> &[Body] {
        self.bodies.as_slice()
    }

    fn name(&self) -> &str {
        "Gravity"
    }

    fn is_paused(&self) -> bool {
        self.params.paused
    }

    fn set_paused(&mut self, paused: bool) {
        SimulationController::set_paused(self, paused);
    }

    fn reset(&mut self) {
        SimulationController::reset(self);
    }
}
