// src/error.rs
//! Error types for the gravity sandbox
//!
//! The physics itself never fails; errors only come from rejected parameter
//! values and from the windowing host.

use thiserror::Error;

/// Errors reported by parameter mutators and the application host
#[derive(Debug, Error)]
pub enum GravityError {
    #[error("frame rate {0} is outside the supported range 5..=145")]
    InvalidFrameRate(f64),

    #[error("trail length {0} is outside the supported range 0..=1000")]
    InvalidTrailLength(usize),

    #[error("time scale must be finite, got {0}")]
    InvalidTimeScale(f64),

    #[error("failed to create or run the event loop")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create the window")]
    Window(#[from] winit::error::OsError),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, GravityError>;
