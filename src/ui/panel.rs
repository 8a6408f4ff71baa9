// src/ui/panel.rs
//! Control panel model
//!
//! Slider ranges, value labels and the actions the panel's widgets emit.
//! Any toolkit can draw these; the host routes [`PanelAction`]s through
//! [`apply_action`].

use crate::error::Result;
use crate::simulation::controller::SimulationController;
use crate::simulation::params::{
    DEFAULT_FRAME_RATE, DEFAULT_TIME_SCALE, DEFAULT_TRAIL_LENGTH, MAX_FRAME_RATE, MAX_TRAIL_LENGTH,
    MIN_FRAME_RATE,
};

/// Help text shown under the sliders
pub const INSTRUCTIONS: &str =
    "Move around by dragging,\nzoom with scroll wheel;\nto add new bodies right\nclick and hold, then drag.";

/// Range and step of one slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl SliderRange {
    /// Clamp a raw widget value into range
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Ranges for the three sliders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlRanges {
    pub trail_length: SliderRange,
    pub frame_rate: SliderRange,
    pub time_scale: SliderRange,
}

impl Default for ControlRanges {
    fn default() -> Self {
        Self {
            trail_length: SliderRange {
                min: 0.0,
                max: MAX_TRAIL_LENGTH as f64,
                step: 1.0,
                default: DEFAULT_TRAIL_LENGTH as f64,
            },
            frame_rate: SliderRange {
                min: MIN_FRAME_RATE,
                max: MAX_FRAME_RATE,
                step: 0.1,
                default: DEFAULT_FRAME_RATE,
            },
            time_scale: SliderRange {
                min: -1.0,
                max: 11.0,
                step: 0.1,
                default: DEFAULT_TIME_SCALE,
            },
        }
    }
}

/// Something a panel widget asked for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelAction {
    Reset,
    Clear,
    TogglePause,
    SetTrailLength(usize),
    SetFrameRate(f64),
    SetTimeScale(f64),
}

/// Side effects the host must carry out after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelEffect {
    /// The frame rate changed, so the tick timer must be restarted
    pub reschedule: bool,
}

/// Route an action to the controller
pub fn apply_action(controller: &mut SimulationController, action: PanelAction) -> Result<PanelEffect> {
    let before = controller.parameters().frame_rate();

    match action {
        PanelAction::Reset => controller.reset_all(),
        PanelAction::Clear => controller.clear(),
        PanelAction::TogglePause => {
            controller.toggle_pause();
        }
        PanelAction::SetTrailLength(length) => controller.set_trail_length(length)?,
        PanelAction::SetFrameRate(rate) => controller.set_frame_rate(rate)?,
        PanelAction::SetTimeScale(scale) => controller.set_time_scale(scale)?,
    }

    Ok(PanelEffect {
        reschedule: controller.parameters().frame_rate() != before,
    })
}

pub fn trail_length_label(length: usize) -> String {
    length.to_string()
}

pub fn frame_rate_label(frame_rate: f64) -> String {
    format!("{:.1}", frame_rate)
}

pub fn time_scale_label(time_scale: f64) -> String {
    format!("{:.2}", time_scale)
}

pub fn pause_label(paused: bool) -> &'static str {
    if paused {
        "Unpause"
    } else {
        "Pause"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(trail_length_label(360), "360");
        assert_eq!(frame_rate_label(60.0), "60.0");
        assert_eq!(frame_rate_label(144.96), "145.0");
        assert_eq!(time_scale_label(1.0), "1.00");
        assert_eq!(time_scale_label(-0.5), "-0.50");
        assert_eq!(pause_label(true), "Unpause");
        assert_eq!(pause_label(false), "Pause");
    }

    #[test]
    fn test_ranges_match_parameter_limits() {
        let ranges = ControlRanges::default();
        assert_eq!(ranges.frame_rate.clamp(500.0), 145.0);
        assert_eq!(ranges.frame_rate.clamp(1.0), 5.0);
        assert_eq!(ranges.trail_length.clamp(2000.0), 1000.0);
        assert_eq!(ranges.time_scale.default, 1.0);
    }

    #[test]
    fn test_frame_rate_action_requests_reschedule() {
        let mut controller = SimulationController::new();
        let effect = apply_action(&mut controller, PanelAction::SetFrameRate(30.0)).unwrap();
        assert!(effect.reschedule);

        let effect = apply_action(&mut controller, PanelAction::SetTimeScale(2.0)).unwrap();
        assert!(!effect.reschedule);

        // Reset puts the frame rate back, so the timer must follow
        let effect = apply_action(&mut controller, PanelAction::Reset).unwrap();
        assert!(effect.reschedule);
        assert_eq!(controller.parameters().time_scale(), 1.0);
    }

    #[test]
    fn test_invalid_action_is_an_error() {
        let mut controller = SimulationController::new();
        assert!(apply_action(&mut controller, PanelAction::SetTrailLength(1001)).is_err());
        assert_eq!(controller.parameters().trail_length(), 360);
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut controller = SimulationController::new();
        apply_action(&mut controller, PanelAction::TogglePause).unwrap();
        assert!(controller.parameters().paused());
        apply_action(&mut controller, PanelAction::Clear).unwrap();
        assert!(controller.bodies().is_empty());
    }
}
