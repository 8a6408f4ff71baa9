//! Application host
//!
//! Owns the window, the tick timer and the pointer state, and hands each
//! frame to a [`Renderer`]. Window events are first translated into
//! [`HostEvent`]s so the same logic drives the windowed and headless hosts.

use cgmath::Vector2;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::error::{GravityError, Result};
use crate::performance::{PerformanceMetrics, PerformanceMonitor};
use crate::scheduler::TickScheduler;
use crate::simulation::body::Body;
use crate::simulation::controller::SimulationController;
use crate::simulation::params::SimulationParameters;
use crate::simulation::traits::{Simulation, TickReport};
use crate::ui::{apply_action, ControlRanges, PanelAction};
use crate::view::{PointerButton, PointerInput, ScrollDirection, SpawnPreview, ViewTransform};

/// How often tick metrics are logged
const METRICS_LOG_INTERVAL: Duration = Duration::from_secs(1);

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    /// Bodies with their trails; draw each with radius `10 * mass`
    pub bodies: &'a [Body],
    pub view: &'a ViewTransform,
    /// Background brightness left over from a clear, in `[0, 1]`
    pub flash: f64,
    pub paused: bool,
    pub spawn_preview: Option<SpawnPreview>,
    pub metrics: &'a PerformanceMetrics,
}

/// Drawing layer supplied by the embedder
pub trait Renderer {
    /// Called once the window exists
    fn attach(&mut self, _window: Arc<Window>) {}

    fn draw(&mut self, frame: &RenderFrame<'_>);
}

/// Renderer that only logs a frame summary every `every` frames
#[derive(Debug, Clone)]
pub struct LogRenderer {
    frames: u64,
    every: u64,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            frames: 0,
            every: every.max(1),
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &RenderFrame<'_>) {
        self.frames += 1;
        if self.frames % self.every == 0 {
            let mass: f64 = frame.bodies.iter().map(|b| b.mass).sum();
            debug!(
                "frame {}: {} bodies, total mass {:.2}, zoom {:.2}{}",
                self.frames,
                frame.bodies.len(),
                mass,
                frame.view.zoom(),
                if frame.paused { " (paused)" } else { "" }
            );
        }
    }
}

/// Host-level input, independent of the windowing library
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    CursorMoved(Vector2<f64>),
    Pressed(PointerButton),
    Released(PointerButton),
    Scrolled(ScrollDirection),
    Action(PanelAction),
}

/// Result of a key press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCommand {
    Action(PanelAction),
    Quit,
}

/// Keyboard shortcuts for the panel controls
///
/// Space pauses, R resets, C clears, `[`/`]` step the frame rate, `-`/`=`
/// step the time scale, `,`/`.` step the trail length, Escape quits.
pub fn key_command(code: KeyCode, params: &SimulationParameters, ranges: &ControlRanges) -> Option<KeyCommand> {
    let frame_rate = |delta: f64| {
        KeyCommand::Action(PanelAction::SetFrameRate(
            ranges.frame_rate.clamp(params.frame_rate() + delta),
        ))
    };
    let time_scale = |delta: f64| {
        KeyCommand::Action(PanelAction::SetTimeScale(
            ranges.time_scale.clamp(params.time_scale() + delta),
        ))
    };
    let trail_length = |delta: f64| {
        let length = ranges.trail_length.clamp(params.trail_length() as f64 + delta);
        KeyCommand::Action(PanelAction::SetTrailLength(length as usize))
    };

    match code {
        KeyCode::Escape => Some(KeyCommand::Quit),
        KeyCode::Space => Some(KeyCommand::Action(PanelAction::TogglePause)),
        KeyCode::KeyR => Some(KeyCommand::Action(PanelAction::Reset)),
        KeyCode::KeyC => Some(KeyCommand::Action(PanelAction::Clear)),
        KeyCode::BracketRight => Some(frame_rate(5.0)),
        KeyCode::BracketLeft => Some(frame_rate(-5.0)),
        KeyCode::Equal => Some(time_scale(ranges.time_scale.step)),
        KeyCode::Minus => Some(time_scale(-ranges.time_scale.step)),
        KeyCode::Period => Some(trail_length(10.0)),
        KeyCode::Comma => Some(trail_length(-10.0)),
        _ => None,
    }
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        _ => PointerButton::Other,
    }
}

fn scroll_direction(delta: MouseScrollDelta) -> Option<ScrollDirection> {
    let y = match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64,
        MouseScrollDelta::PixelDelta(position) => position.y,
    };
    if y > 0.0 {
        Some(ScrollDirection::Up)
    } else if y < 0.0 {
        Some(ScrollDirection::Down)
    } else {
        None
    }
}

/// Run one tick through the simulation and time it
pub fn tick_simulation<S: Simulation + ?Sized>(
    simulation: &mut S,
    monitor: &mut PerformanceMonitor,
    now: Instant,
) -> TickReport {
    monitor.begin_tick(now);
    let report = simulation.tick();
    monitor.end_tick(Instant::now(), report.body_count);
    report
}

/// The gravity sandbox application
pub struct GravityApp<R: Renderer> {
    controller: SimulationController,
    scheduler: TickScheduler,
    input: PointerInput,
    monitor: PerformanceMonitor,
    ranges: ControlRanges,
    renderer: R,
    window: Option<Arc<Window>>,
    last_metrics_log: Option<Instant>,
    failure: Option<GravityError>,
}

impl GravityApp<LogRenderer> {
    /// An app with the canonical bodies and a logging renderer
    pub fn new() -> Self {
        Self::with_renderer(SimulationController::new(), LogRenderer::default())
    }
}

impl Default for GravityApp<LogRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer> GravityApp<R> {
    pub fn with_renderer(controller: SimulationController, renderer: R) -> Self {
        let scheduler = TickScheduler::new(controller.parameters().frame_rate());
        Self {
            controller,
            scheduler,
            input: PointerInput::new(),
            monitor: PerformanceMonitor::new(),
            ranges: ControlRanges::default(),
            renderer,
            window: None,
            last_metrics_log: None,
            failure: None,
        }
    }

    pub fn controller(&self) -> &SimulationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SimulationController {
        &mut self.controller
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        self.monitor.metrics()
    }

    /// Start the tick timer
    pub fn start(&mut self, now: Instant) {
        self.scheduler.start(now);
        info!(
            "Starting {} at {:.1} ticks/s with {} bodies",
            self.controller.name(),
            self.controller.parameters().frame_rate(),
            self.controller.bodies().len()
        );
    }

    /// Apply one host event
    pub fn handle_event(&mut self, event: HostEvent, now: Instant) -> Result<()> {
        match event {
            HostEvent::CursorMoved(position) => {
                self.input.cursor_moved(position, self.controller.view_mut());
            }
            HostEvent::Pressed(button) => self.input.button_pressed(button),
            HostEvent::Released(button) => {
                if let Some(spawn) = self.input.button_released(button, self.controller.view()) {
                    self.controller.add_body(spawn.position, spawn.velocity, spawn.mass);
                }
            }
            HostEvent::Scrolled(direction) => {
                self.input.scrolled(direction, self.controller.view_mut());
            }
            HostEvent::Action(action) => {
                let effect = apply_action(&mut self.controller, action)?;
                if effect.reschedule {
                    self.scheduler
                        .set_frame_rate(self.controller.parameters().frame_rate(), now);
                    self.monitor.reset();
                }
            }
        }
        Ok(())
    }

    /// Tick if the timer is due
    pub fn step(&mut self, now: Instant) -> Option<TickReport> {
        if !self.scheduler.poll(now) {
            return None;
        }

        let report = tick_simulation(&mut self.controller, &mut self.monitor, now);

        let log_due = self
            .last_metrics_log
            .map_or(true, |last| now.saturating_duration_since(last) >= METRICS_LOG_INTERVAL);
        if log_due {
            let metrics = self.monitor.metrics();
            debug!(
                "{:.1} ticks/s, tick {:.3} ms (min {:.3}, max {:.3}), {} bodies",
                metrics.tick_rate,
                metrics.tick_time_ms,
                metrics.min_tick_time_ms,
                metrics.max_tick_time_ms,
                metrics.body_count
            );
            self.last_metrics_log = Some(now);
        }

        Some(report)
    }

    /// Draw one frame and advance the per-frame cosmetics
    pub fn render(&mut self) {
        self.controller.fade_flash();

        let frame = RenderFrame {
            bodies: self.controller.bodies().as_slice(),
            view: self.controller.view(),
            flash: self.controller.flash_level(),
            paused: self.controller.parameters().paused(),
            spawn_preview: self.input.preview(self.controller.view()),
            metrics: self.monitor.metrics(),
        };
        self.renderer.draw(&frame);

        self.input.advance_frame();
    }

    /// Headless driver: tick and render if the timer is due
    pub fn pump(&mut self, now: Instant) -> Option<TickReport> {
        let report = self.step(now)?;
        if report.redraw {
            self.render();
        }
        Some(report)
    }

    /// Open the window and run until it closes
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut self)?;

        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn translate(&self, event: &WindowEvent) -> Option<HostEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(HostEvent::CursorMoved(Vector2::new(position.x, position.y)))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = pointer_button(*button);
                Some(match state {
                    ElementState::Pressed => HostEvent::Pressed(button),
                    ElementState::Released => HostEvent::Released(button),
                })
            }
            WindowEvent::MouseWheel { delta, .. } => scroll_direction(*delta).map(HostEvent::Scrolled),
            _ => None,
        }
    }
}

impl<R: Renderer> ApplicationHandler for GravityApp<R> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("Gravity")
            .with_inner_size(LogicalSize::new(1000.0, 800.0));

        match event_loop.create_window(attributes) {
            Ok(window) => {
                let window = Arc::new(window);
                self.renderer.attach(window.clone());
                self.window = Some(window);
                self.start(Instant::now());
            }
            Err(err) => {
                error!("Could not create window: {err}");
                self.failure = Some(err.into());
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::RedrawRequested => {
                self.render();
                return;
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                match key_command(*code, self.controller.parameters(), &self.ranges) {
                    Some(KeyCommand::Quit) => event_loop.exit(),
                    Some(KeyCommand::Action(action)) => {
                        if let Err(err) = self.handle_event(HostEvent::Action(action), Instant::now()) {
                            error!("{err}");
                        }
                    }
                    None => {}
                }
                return;
            }
            _ => {}
        }

        if let Some(host_event) = self.translate(&event) {
            if let Err(err) = self.handle_event(host_event, Instant::now()) {
                error!("{err}");
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.step(Instant::now()).is_some() {
            if let Some(window) = self.window.as_ref() {
                window.request_redraw();
            }
        }

        if let Some(deadline) = self.scheduler.next_deadline() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }
}
