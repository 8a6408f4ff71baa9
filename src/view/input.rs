// src/view/input.rs
//! Pointer gestures
//!
//! Primary drag pans the view. Secondary press starts a spawn gesture: while
//! the pointer stays exactly on the press point the pending body gains mass
//! every frame, and dragging away aims it. Releasing produces a
//! [`SpawnRequest`] for the controller.

use cgmath::{Vector2, Zero};

use super::camera::{ScrollDirection, ViewTransform};
use crate::simulation::body::RADIUS_PER_MASS;

/// Mass gained per rendered frame while a spawn press is held still
pub const HOLD_MASS_PER_FRAME: f64 = 0.03;

/// Screen pixels of drag per unit of launch velocity
pub const DRAG_PER_VELOCITY: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Pans the view
    Primary,
    /// Spawns bodies
    Secondary,
    Other,
}

/// A body the user asked to create
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    /// World-space position of the press
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    /// Accumulated hold mass, possibly zero
    pub mass: f64,
}

/// What the renderer should draw for a spawn in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPreview {
    /// Screen position of the press
    pub origin: Vector2<f64>,
    /// Current screen position of the pointer
    pub cursor: Vector2<f64>,
    /// Screen radius of the pending body
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Hold {
    origin: Vector2<f64>,
    mass: f64,
}

/// Tracks pointer state between window events
#[derive(Debug, Clone, PartialEq)]
pub struct PointerInput {
    cursor: Vector2<f64>,
    panning: bool,
    hold: Option<Hold>,
}

impl Default for PointerInput {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerInput {
    pub fn new() -> Self {
        Self {
            cursor: Vector2::zero(),
            panning: false,
            hold: None,
        }
    }

    pub fn cursor(&self) -> Vector2<f64> {
        self.cursor
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    pub fn is_holding(&self) -> bool {
        self.hold.is_some()
    }

    pub fn cursor_moved(&mut self, position: Vector2<f64>, view: &mut ViewTransform) {
        if self.panning {
            view.pan(position - self.cursor);
        }
        self.cursor = position;
    }

    pub fn button_pressed(&mut self, button: PointerButton) {
        match button {
            PointerButton::Primary => self.panning = true,
            PointerButton::Secondary => {
                self.hold = Some(Hold {
                    origin: self.cursor,
                    mass: 0.0,
                })
            }
            PointerButton::Other => {}
        }
    }

    /// Finish a gesture; a secondary release yields the body to spawn
    pub fn button_released(&mut self, button: PointerButton, view: &ViewTransform) -> Option<SpawnRequest> {
        match button {
            PointerButton::Primary => {
                self.panning = false;
                None
            }
            PointerButton::Secondary => self.hold.take().map(|hold| SpawnRequest {
                position: view.screen_to_world(hold.origin),
                velocity: (self.cursor - hold.origin) / DRAG_PER_VELOCITY,
                mass: hold.mass,
            }),
            PointerButton::Other => None,
        }
    }

    pub fn scrolled(&mut self, direction: ScrollDirection, view: &mut ViewTransform) {
        view.scroll(direction, self.cursor);
    }

    /// Grow a held spawn by one frame if the pointer has not moved off it
    pub fn advance_frame(&mut self) {
        if let Some(hold) = self.hold.as_mut() {
            if hold.origin == self.cursor {
                hold.mass += HOLD_MASS_PER_FRAME;
            }
        }
    }

    pub fn preview(&self, view: &ViewTransform) -> Option<SpawnPreview> {
        self.hold.map(|hold| SpawnPreview {
            origin: hold.origin,
            cursor: self.cursor,
            radius: view.scale_length(RADIUS_PER_MASS * hold.mass),
        })
    }
}
