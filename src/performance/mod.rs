//! # Performance Metrics
//!
//! Tracks how the simulation keeps up with its target frame rate: the
//! measured interval between ticks, how long each tick takes, and how many
//! bodies were live.
//!
//! ## Usage
//!
//! ```rust
//! use gravity::performance::PerformanceMonitor;
//! use std::time::Instant;
//!
//! let mut monitor = PerformanceMonitor::new();
//!
//! // Around every tick
//! monitor.begin_tick(Instant::now());
//! // ... tick ...
//! monitor.end_tick(Instant::now(), 4);
//!
//! let metrics = monitor.metrics();
//! println!("{:.1} ticks/s", metrics.tick_rate);
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default sliding window, about two seconds at 60 ticks per second
pub const DEFAULT_SAMPLES: usize = 120;

/// Snapshot of tick timing
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    /// Measured ticks per second, from start-to-start intervals
    pub tick_rate: f32,
    /// Average tick duration in milliseconds
    pub tick_time_ms: f32,
    /// Shortest tick duration in the window
    pub min_tick_time_ms: f32,
    /// Longest tick duration in the window
    pub max_tick_time_ms: f32,
    /// Bodies alive after the last tick
    pub body_count: usize,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            tick_rate: 0.0,
            tick_time_ms: 0.0,
            min_tick_time_ms: 0.0,
            max_tick_time_ms: 0.0,
            body_count: 0,
        }
    }
}

/// Tick timing monitor over a sliding window
#[derive(Debug, Clone)]
pub struct PerformanceMonitor {
    /// Intervals between consecutive tick starts
    intervals: VecDeque<Duration>,
    /// Time spent inside each tick
    tick_times: VecDeque<Duration>,
    max_samples: usize,
    last_start: Option<Instant>,
    tick_start: Option<Instant>,
    metrics: PerformanceMetrics,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::with_samples(DEFAULT_SAMPLES)
    }

    /// Create a monitor with a custom window size
    pub fn with_samples(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            intervals: VecDeque::with_capacity(max_samples),
            tick_times: VecDeque::with_capacity(max_samples),
            max_samples,
            last_start: None,
            tick_start: None,
            metrics: PerformanceMetrics::default(),
        }
    }

    /// Mark the beginning of a tick
    pub fn begin_tick(&mut self, now: Instant) {
        if let Some(last) = self.last_start {
            push_sample(&mut self.intervals, now.saturating_duration_since(last), self.max_samples);
        }
        self.last_start = Some(now);
        self.tick_start = Some(now);
    }

    /// Mark the end of a tick and refresh the metrics
    pub fn end_tick(&mut self, now: Instant, body_count: usize) {
        if let Some(start) = self.tick_start.take() {
            push_sample(&mut self.tick_times, now.saturating_duration_since(start), self.max_samples);
            self.metrics.body_count = body_count;
            self.update_metrics();
        }
    }

    fn update_metrics(&mut self) {
        if let Some(avg) = average(&self.intervals) {
            let secs = avg.as_secs_f32();
            self.metrics.tick_rate = if secs > 0.0 { 1.0 / secs } else { 0.0 };
        }

        if let Some(avg) = average(&self.tick_times) {
            self.metrics.tick_time_ms = avg.as_secs_f32() * 1000.0;
        }

        if let (Some(min), Some(max)) = (self.tick_times.iter().min(), self.tick_times.iter().max()) {
            self.metrics.min_tick_time_ms = min.as_secs_f32() * 1000.0;
            self.metrics.max_tick_time_ms = max.as_secs_f32() * 1000.0;
        }
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    /// Tick durations in milliseconds, oldest first
    pub fn tick_time_history(&self) -> Vec<f32> {
        self.tick_times
            .iter()
            .map(|duration| duration.as_secs_f32() * 1000.0)
            .collect()
    }

    /// Forget all samples
    ///
    /// Called when the frame rate changes so old intervals do not skew the
    /// measured rate.
    pub fn reset(&mut self) {
        self.intervals.clear();
        self.tick_times.clear();
        self.last_start = None;
        self.tick_start = None;
        self.metrics = PerformanceMetrics::default();
    }
}

fn push_sample(samples: &mut VecDeque<Duration>, sample: Duration, max: usize) {
    if samples.len() >= max {
        samples.pop_front();
    }
    samples.push_back(sample);
}

fn average(samples: &VecDeque<Duration>) -> Option<Duration> {
    if samples.is_empty() {
        return None;
    }
    let total: Duration = samples.iter().sum();
    Some(total / samples.len() as u32)
}
