//! # User Interface Module
//!
//! Toolkit-independent model of the control panel: Reset, Clear and Pause
//! buttons plus sliders for trail length, frame rate and time scale.
//!
//! ## Key Components
//!
//! - [`ControlRanges`] - slider ranges, steps and defaults
//! - [`PanelAction`] - what a widget asks for
//! - [`apply_action`] - routes an action to the controller and reports
//!   whether the tick timer must be restarted
//!
//! ## Usage
//!
//! ```rust
//! use gravity::simulation::SimulationController;
//! use gravity::ui::{apply_action, time_scale_label, PanelAction};
//!
//! let mut controller = SimulationController::new();
//! let effect = apply_action(&mut controller, PanelAction::SetTimeScale(2.0)).unwrap();
//! assert!(!effect.reschedule);
//! assert_eq!(time_scale_label(controller.parameters().time_scale()), "2.00");
//! ```

pub mod panel;

pub use panel::{
    apply_action, frame_rate_label, pause_label, time_scale_label, trail_length_label, ControlRanges,
    PanelAction, PanelEffect, SliderRange, INSTRUCTIONS,
};
