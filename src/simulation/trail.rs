// src/simulation/trail.rs
//! Motion trail history
//!
//! Every tick each body's position is pushed onto the front of its trail.
//! Trails over the cap are trimmed from the back, but only a few entries per
//! tick, so lowering the trail length makes trails shrink smoothly instead of
//! snapping short.

use super::body::BodySet;

/// Maximum excess entries dropped from one trail per tick
pub const MAX_TRIM_PER_TICK: usize = 3;

/// Appends positions to trails and trims them toward the cap
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailRecorder;

impl TrailRecorder {
    pub fn new() -> Self {
        Self
    }

    /// Record the current position of every body
    pub fn record(&self, bodies: &mut BodySet, trail_length: usize) {
        for body in bodies.iter_mut() {
            body.trail.push_front(body.position);

            for _ in 0..MAX_TRIM_PER_TICK {
                if body.trail.len() <= trail_length {
                    break;
                }
                body.trail.pop_back();
            }
        }
    }
}
