// src/simulation/params.rs
//! Runtime knobs for the simulation
//!
//! The UI layer never reaches into the engine directly; it reads and writes
//! these through the controller.

use crate::error::{GravityError, Result};

pub const DEFAULT_FRAME_RATE: f64 = 60.0;
pub const MIN_FRAME_RATE: f64 = 5.0;
pub const MAX_FRAME_RATE: f64 = 145.0;

pub const DEFAULT_TIME_SCALE: f64 = 1.0;

pub const DEFAULT_TRAIL_LENGTH: usize = 360;
pub const MAX_TRAIL_LENGTH: usize = 1000;

/// Clamp a frame rate into the supported range, falling back to the
/// default when it is not a number
pub fn clamp_frame_rate(frame_rate: f64) -> f64 {
    if frame_rate.is_nan() {
        DEFAULT_FRAME_RATE
    } else {
        frame_rate.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE)
    }
}

/// Process-wide simulation parameters
///
/// Fields are only reachable through the validating setters, so a value held
/// here is always in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    /// Target ticks per second
    pub(crate) frame_rate: f64,
    /// Simulated time multiplier; zero freezes, negative reverses
    pub(crate) time_scale: f64,
    /// Maximum retained trail entries per body
    pub(crate) trail_length: usize,
    /// When set, ticks leave the bodies untouched
    pub(crate) paused: bool,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            time_scale: DEFAULT_TIME_SCALE,
            trail_length: DEFAULT_TRAIL_LENGTH,
            paused: false,
        }
    }
}

impl SimulationParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame_rate(mut self, frame_rate: f64) -> Result<Self> {
        self.set_frame_rate(frame_rate)?;
        Ok(self)
    }

    pub fn with_time_scale(mut self, time_scale: f64) -> Result<Self> {
        self.set_time_scale(time_scale)?;
        Ok(self)
    }

    pub fn with_trail_length(mut self, trail_length: usize) -> Result<Self> {
        self.set_trail_length(trail_length)?;
        Ok(self)
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn trail_length(&self) -> usize {
        self.trail_length
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn set_frame_rate(&mut self, frame_rate: f64) -> Result<()> {
        if !frame_rate.is_finite() || !(MIN_FRAME_RATE..=MAX_FRAME_RATE).contains(&frame_rate) {
            return Err(GravityError::InvalidFrameRate(frame_rate));
        }
        self.frame_rate = frame_rate;
        Ok(())
    }

    pub fn set_time_scale(&mut self, time_scale: f64) -> Result<()> {
        if !time_scale.is_finite() {
            return Err(GravityError::InvalidTimeScale(time_scale));
        }
        self.time_scale = time_scale;
        Ok(())
    }

    pub fn set_trail_length(&mut self, trail_length: usize) -> Result<()> {
        if trail_length > MAX_TRAIL_LENGTH {
            return Err(GravityError::InvalidTrailLength(trail_length));
        }
        self.trail_length = trail_length;
        Ok(())
    }
}
