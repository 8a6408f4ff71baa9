// src/view/camera.rs
//! 2D view transform: zoom about the pointer and pan by dragging
//!
//! Screen coordinates are window pixels; world coordinates are simulation
//! units. `screen = centre + world * zoom`.

use cgmath::Vector2;

/// Zoom multiplier for one scroll step away from the user (zoom in)
pub const ZOOM_IN_FACTOR: f64 = 1.05;
/// Zoom multiplier for one scroll step toward the user (zoom out)
pub const ZOOM_OUT_FACTOR: f64 = 0.95;

pub const DEFAULT_ZOOM: f64 = 1.0;
pub const DEFAULT_CENTRE: (f64, f64) = (350.0, 320.0);

/// Direction of a discrete scroll step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Maps between screen and world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    zoom: f64,
    centre: Vector2<f64>,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            centre: Vector2::new(DEFAULT_CENTRE.0, DEFAULT_CENTRE.1),
        }
    }
}

impl ViewTransform {
    pub fn new(zoom: f64, centre: Vector2<f64>) -> Self {
        Self { zoom, centre }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Screen position of the world origin
    pub fn centre(&self) -> Vector2<f64> {
        self.centre
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn screen_to_world(&self, screen: Vector2<f64>) -> Vector2<f64> {
        (screen - self.centre) / self.zoom
    }

    pub fn world_to_screen(&self, world: Vector2<f64>) -> Vector2<f64> {
        self.centre + world * self.zoom
    }

    /// Length in pixels of a world-space length
    pub fn scale_length(&self, length: f64) -> f64 {
        length * self.zoom
    }

    /// Shift the view by a screen-space delta
    pub fn pan(&mut self, delta: Vector2<f64>) {
        self.centre += delta;
    }

    /// Zoom one step, keeping the world point under `anchor` fixed on screen
    pub fn scroll(&mut self, direction: ScrollDirection, anchor: Vector2<f64>) {
        let factor = match direction {
            ScrollDirection::Up => ZOOM_IN_FACTOR,
            ScrollDirection::Down => ZOOM_OUT_FACTOR,
        };
        let world = self.screen_to_world(anchor);
        self.zoom *= factor;
        self.centre = anchor - world * self.zoom;
    }
}
