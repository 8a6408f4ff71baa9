//! # Gravity Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use gravity::prelude::*;
//!
//! let mut controller = SimulationController::new();
//! controller.add_body(Vector2::new(40.0, 0.0), Vector2::new(0.0, 1.0), 0.5);
//!
//! let report = controller.tick();
//! assert!(report.advanced);
//! assert_eq!(report.body_count, 5);
//! ```

// Re-export core application types
pub use crate::app::{GravityApp, HostEvent, LogRenderer, RenderFrame, Renderer};
pub use crate::default;
pub use crate::error::GravityError;

// Re-export the simulation engine
pub use crate::simulation::{
    Body, BodySet, CollisionMerger, GravityIntegrator, Simulation, SimulationController,
    SimulationParameters, TickReport, TrailRecorder,
};

// Re-export view, input and panel types
pub use crate::scheduler::TickScheduler;
pub use crate::ui::{apply_action, ControlRanges, PanelAction};
pub use crate::view::{PointerButton, PointerInput, ScrollDirection, ViewTransform};

pub use cgmath::Vector2;
