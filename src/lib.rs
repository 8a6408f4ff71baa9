// src/lib.rs
//! Gravity
//!
//! A 2D N-body gravity sandbox: point masses attract each other, merge on
//! contact and leave fading trails. The engine lives in [`simulation`]; the
//! winit host in [`app`] drives it from a repeating timer and hands each frame
//! to a pluggable [`app::Renderer`].

pub mod app;
pub mod error;
pub mod performance;
pub mod prelude;
pub mod scheduler;
pub mod simulation;
pub mod ui;
pub mod view;

// Re-export main types for convenience
pub use app::GravityApp;
pub use error::{GravityError, Result};

/// Creates a gravity application with the canonical bodies
pub fn default() -> GravityApp<app::LogRenderer> {
    GravityApp::new()
}
