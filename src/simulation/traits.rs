//! Core simulation trait
//!
//! Defines the interface the host drives once per timer period. The host
//! owns the window, the timer and the drawing; the simulation owns the state.

use super::body::Body;

/// Summary of one tick, returned to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Safe to redraw now
    pub redraw: bool,
    /// False when the tick was skipped because the simulation is paused
    pub advanced: bool,
    /// Pairs merged during this tick
    pub merges: usize,
    /// Bodies alive after the tick
    pub body_count: usize,
}

/// Lifecycle methods the host calls to run a simulation
pub trait Simulation {
    /// Advance by one tick
    ///
    /// Called once per timer period. A paused simulation returns a report with
    /// `advanced == false` but still asks for a redraw.
    fn tick(&mut self) -> TickReport;

    /// Target ticks per second; the host's timer follows this
    fn frame_rate(&self) -> f64;

    /// Bodies to draw
    fn bodies(&self) -> &[Body];

    /// Get simulation name for display
    fn name(&self) -> &str;

    fn is_paused(&self) -> bool;

    fn set_paused(&mut self, paused: bool);

    /// Reset simulation to initial state
    fn reset(&mut self);
}
