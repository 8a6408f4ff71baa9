//! Repeating tick scheduler
//!
//! One repeating task whose period follows the frame rate. Changing the rate
//! cancels the pending deadline and restarts the task from "now"; a tick that
//! is already running is never interrupted. Each firing schedules the next
//! deadline one period after the instant it fired, so a host that falls
//! behind runs late ticks one at a time instead of in a burst.
//!
//! The scheduler never reads the clock itself. Callers pass `now`, which
//! keeps it deterministic under test.

use log::trace;
use std::time::{Duration, Instant};

use crate::simulation::params::clamp_frame_rate;

/// Schedules a single repeating tick
#[derive(Debug, Clone)]
pub struct TickScheduler {
    period: Duration,
    next_deadline: Option<Instant>,
    fired: u64,
    restarts: u64,
}

impl TickScheduler {
    /// A stopped scheduler for the given frame rate
    pub fn new(frame_rate: f64) -> Self {
        Self {
            period: period_for(frame_rate),
            next_deadline: None,
            fired: 0,
            restarts: 0,
        }
    }

    /// Period between ticks
    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.next_deadline.is_some()
    }

    /// When the next tick is due, if running
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_deadline
    }

    /// Number of ticks fired so far
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Number of times the task was restarted by a period change
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// Start the task; the first tick is due one period from `now`
    pub fn start(&mut self, now: Instant) {
        self.next_deadline = Some(now + self.period);
    }

    /// Cancel the pending tick
    pub fn cancel(&mut self) {
        self.next_deadline = None;
    }

    /// Change the period, cancelling and restarting a running task
    pub fn set_frame_rate(&mut self, frame_rate: f64, now: Instant) {
        self.period = period_for(frame_rate);
        if self.is_running() {
            self.cancel();
            self.start(now);
            self.restarts += 1;
        }
        trace!("Tick period now {:?}", self.period);
    }

    /// Fire if the deadline has passed, scheduling the next one
    ///
    /// Returns true when the caller should run a tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_deadline {
            Some(deadline) if now >= deadline => {
                self.next_deadline = Some(now + self.period);
                self.fired += 1;
                trace!("Tick {} fired", self.fired);
                true
            }
            _ => false,
        }
    }
}

/// Frame rates outside the supported range are clamped into it
fn period_for(frame_rate: f64) -> Duration {
    Duration::from_secs_f64(1.0 / clamp_frame_rate(frame_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_frame_rate() {
        let scheduler = TickScheduler::new(50.0);
        assert_eq!(scheduler.period(), Duration::from_millis(20));
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_fires_once_per_period() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new(100.0);
        assert!(!scheduler.poll(start + Duration::from_secs(1)));

        scheduler.start(start);
        assert!(!scheduler.poll(start + Duration::from_millis(5)));
        assert!(scheduler.poll(start + Duration::from_millis(10)));
        assert!(!scheduler.poll(start + Duration::from_millis(15)));
        assert!(scheduler.poll(start + Duration::from_millis(20)));
        assert_eq!(scheduler.fired(), 2);
    }

    #[test]
    fn test_late_host_does_not_burst() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new(100.0);
        scheduler.start(start);

        let late = start + Duration::from_millis(100);
        assert!(scheduler.poll(late));
        assert!(!scheduler.poll(late));
        assert_eq!(scheduler.next_deadline(), Some(late + Duration::from_millis(10)));
    }

    #[test]
    fn test_frame_rate_change_restarts() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new(10.0);
        scheduler.start(start);

        let now = start + Duration::from_millis(50);
        scheduler.set_frame_rate(50.0, now);

        assert_eq!(scheduler.restarts(), 1);
        assert_eq!(scheduler.next_deadline(), Some(now + Duration::from_millis(20)));
        assert!(!scheduler.poll(now + Duration::from_millis(19)));
        assert!(scheduler.poll(now + Duration::from_millis(20)));
    }

    #[test]
    fn test_frame_rate_change_while_stopped() {
        let mut scheduler = TickScheduler::new(10.0);
        scheduler.set_frame_rate(20.0, Instant::now());
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.restarts(), 0);
        assert_eq!(scheduler.period(), Duration::from_millis(50));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut scheduler = TickScheduler::new(60.0);
        scheduler.start(start);
        scheduler.cancel();
        assert!(!scheduler.poll(start + Duration::from_secs(10)));
    }

    #[test]
    fn test_out_of_range_frame_rate_is_clamped() {
        assert_eq!(TickScheduler::new(0.0).period(), Duration::from_secs_f64(1.0 / 5.0));
        assert_eq!(TickScheduler::new(-60.0).period(), Duration::from_secs_f64(1.0 / 5.0));
        assert_eq!(TickScheduler::new(1000.0).period(), Duration::from_secs_f64(1.0 / 145.0));
        assert_eq!(TickScheduler::new(f64::NAN).period(), Duration::from_secs_f64(1.0 / 60.0));

        let mut scheduler = TickScheduler::new(60.0);
        scheduler.set_frame_rate(0.0, Instant::now());
        assert_eq!(scheduler.period(), Duration::from_secs_f64(1.0 / 5.0));
    }
}
