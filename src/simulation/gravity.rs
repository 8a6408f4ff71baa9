// src/simulation/gravity.rs
//! Pairwise Newtonian gravity with a frame-rate independent Euler step
//!
//! For every unordered pair the force is accumulated into both velocities,
//! then each body is moved as soon as its own pair loop is finished. Since a
//! body's pairs with later bodies are all visited before anything later moves,
//! every distance in a tick is measured between pre-update positions.
//!
//! The step is scaled by `(60 / frame_rate) * time_scale`, so the simulation
//! covers the same ground per second at any frame rate. A time scale of zero
//! freezes motion; negative values run it backwards.

use cgmath::{InnerSpace, Vector2};

use super::body::{Body, BodySet};
use super::params::clamp_frame_rate;

/// Gravitational constant in simulation units
pub const GRAVITATIONAL_CONSTANT: f64 = 100.0;

/// Pairs farther apart than this exert no force
pub const CUTOFF_DISTANCE: f64 = 2000.0;

/// Pairs closer than this exert no force (coincident bodies)
pub const MIN_DISTANCE: f64 = 1e-9;

/// Frame rate at which one tick covers exactly one nominal time unit
pub const NOMINAL_FRAME_RATE: f64 = 60.0;

/// Advances velocities and positions under mutual gravity
#[derive(Debug, Clone, Copy)]
pub struct GravityIntegrator {
    gravitational_constant: f64,
    cutoff_distance: f64,
}

impl Default for GravityIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

impl GravityIntegrator {
    pub fn new() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            cutoff_distance: CUTOFF_DISTANCE,
        }
    }

    /// Override the gravitational constant
    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    /// Override the interaction cutoff
    pub fn with_cutoff_distance(mut self, cutoff: f64) -> Self {
        self.cutoff_distance = cutoff;
        self
    }

    /// Nominal time units covered by one tick
    ///
    /// The frame rate is clamped into its supported range and a non-finite
    /// time scale freezes the step, so the result is always finite.
    pub fn step_scale(frame_rate: f64, time_scale: f64) -> f64 {
        if !time_scale.is_finite() {
            return 0.0;
        }
        NOMINAL_FRAME_RATE / clamp_frame_rate(frame_rate) * time_scale
    }

    /// Advance every body by one tick
    pub fn step(&self, bodies: &mut BodySet, frame_rate: f64, time_scale: f64) {
        let scale = Self::step_scale(frame_rate, time_scale);
        let bodies = bodies.as_mut_slice();

        for i in 0..bodies.len() {
            let (head, tail) = bodies.split_at_mut(i + 1);
            let first = &mut head[i];

            for second in tail.iter_mut() {
                self.apply_pair(first, second, scale);
            }

            first.position += first.velocity * scale;
        }
    }

    /// Force magnitude between two bodies, or `None` when the pair is skipped
    pub fn force_between(&self, a: &Body, b: &Body) -> Option<f64> {
        let distance = (a.position - b.position).magnitude();
        self.force_at(distance, a.mass, b.mass)
    }

    fn force_at(&self, distance: f64, m1: f64, m2: f64) -> Option<f64> {
        if distance > self.cutoff_distance || distance < MIN_DISTANCE {
            return None;
        }
        Some(self.gravitational_constant * m1 * m2 / (distance * distance))
    }

    fn apply_pair(&self, first: &mut Body, second: &mut Body, scale: f64) {
        let offset: Vector2<f64> = first.position - second.position;
        let distance = offset.magnitude();

        let Some(force) = self.force_at(distance, first.mass, second.mass) else {
            return;
        };

        // (cos, sin) of the angle from second to first
        let direction = offset / distance;

        first.velocity -= direction * (force / first.mass * scale);
        second.velocity += direction * (force / second.mass * scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Zero;

    fn pair(separation: f64, m1: f64, m2: f64) -> BodySet {
        vec![
            Body::new(Vector2::zero(), Vector2::zero(), m1),
            Body::new(Vector2::new(separation, 0.0), Vector2::zero(), m2),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_bodies_attract() {
        let mut set = pair(100.0, 1.0, 1.0);
        GravityIntegrator::new().step(&mut set, 60.0, 1.0);

        let a = set.get(0).unwrap();
        let b = set.get(1).unwrap();
        // f = 100 * 1 * 1 / 100^2
        assert!((a.velocity.x - 0.01).abs() < 1e-12);
        assert!((b.velocity.x + 0.01).abs() < 1e-12);
        assert!(a.position.x > 0.0);
        assert!(b.position.x < 100.0);
    }

    #[test]
    fn test_acceleration_scales_with_inverse_mass() {
        let mut set = pair(100.0, 1.0, 4.0);
        GravityIntegrator::new().step(&mut set, 60.0, 1.0);

        let light = set.get(0).unwrap();
        let heavy = set.get(1).unwrap();
        assert!((light.velocity.x / -heavy.velocity.x - 4.0).abs() < 1e-9);
        // Momentum is unchanged by the force pass
        assert!(set.total_momentum().x.abs() < 1e-12);
    }

    #[test]
    fn test_no_force_beyond_cutoff() {
        let mut set = pair(2000.5, 5.0, 5.0);
        GravityIntegrator::new().step(&mut set, 60.0, 1.0);
        assert!(set.iter().all(|b| b.velocity == Vector2::zero()));
        assert_eq!(set.get(1).unwrap().position.x, 2000.5);
    }

    #[test]
    fn test_force_at_cutoff_still_applies() {
        let set = pair(2000.0, 1.0, 1.0);
        let force = GravityIntegrator::new().force_between(set.get(0).unwrap(), set.get(1).unwrap());
        assert!(force.is_some());
    }

    #[test]
    fn test_coincident_bodies_exert_no_force() {
        let mut set = pair(0.0, 1.0, 1.0);
        GravityIntegrator::new().step(&mut set, 60.0, 1.0);
        for body in set.iter() {
            assert!(body.velocity.x.is_finite() && body.velocity.y.is_finite());
            assert_eq!(body.velocity, Vector2::zero());
        }
    }

    #[test]
    fn test_time_scale_is_linear_for_isolated_body() {
        let body = Body::new(Vector2::new(10.0, 10.0), Vector2::new(0.5, -0.25), 1.0);
        let integrator = GravityIntegrator::new();

        let mut once: BodySet = std::iter::once(body.clone()).collect();
        let mut twice: BodySet = std::iter::once(body.clone()).collect();
        integrator.step(&mut once, 60.0, 1.0);
        integrator.step(&mut twice, 60.0, 2.0);

        let d1 = once.get(0).unwrap().position - body.position;
        let d2 = twice.get(0).unwrap().position - body.position;
        assert!((d2.x - 2.0 * d1.x).abs() < 1e-12);
        assert!((d2.y - 2.0 * d1.y).abs() < 1e-12);
    }

    #[test]
    fn test_frame_rate_normalisation() {
        let body = Body::new(Vector2::zero(), Vector2::new(1.0, 0.0), 1.0);
        let integrator = GravityIntegrator::new();

        // Two ticks at 120 fps cover one tick at 60 fps
        let mut fast: BodySet = std::iter::once(body.clone()).collect();
        integrator.step(&mut fast, 120.0, 1.0);
        integrator.step(&mut fast, 120.0, 1.0);
        let mut slow: BodySet = std::iter::once(body).collect();
        integrator.step(&mut slow, 60.0, 1.0);

        assert!((fast.get(0).unwrap().position.x - slow.get(0).unwrap().position.x).abs() < 1e-12);
    }

    #[test]
    fn test_zero_and_negative_time_scale() {
        let body = Body::new(Vector2::zero(), Vector2::new(1.0, 1.0), 1.0);
        let integrator = GravityIntegrator::new();

        let mut frozen: BodySet = std::iter::once(body.clone()).collect();
        integrator.step(&mut frozen, 60.0, 0.0);
        assert_eq!(frozen.get(0).unwrap().position, Vector2::zero());

        let mut reversed: BodySet = std::iter::once(body).collect();
        integrator.step(&mut reversed, 60.0, -1.0);
        assert_eq!(reversed.get(0).unwrap().position, Vector2::new(-1.0, -1.0));
    }

    #[test]
    fn test_empty_and_single_sets() {
        let integrator = GravityIntegrator::new();
        let mut empty = BodySet::new();
        integrator.step(&mut empty, 60.0, 1.0);
        assert!(empty.is_empty());

        let mut single: BodySet =
            std::iter::once(Body::new(Vector2::zero(), Vector2::new(2.0, 0.0), 1.0)).collect();
        integrator.step(&mut single, 60.0, 1.0);
        assert_eq!(single.get(0).unwrap().position, Vector2::new(2.0, 0.0));
        assert_eq!(single.get(0).unwrap().velocity, Vector2::new(2.0, 0.0));
    }

    #[test]
    fn test_tuned_constant_and_cutoff() {
        let integrator = GravityIntegrator::new()
            .with_gravitational_constant(200.0)
            .with_cutoff_distance(50.0);

        let near = pair(40.0, 1.0, 1.0);
        let force = integrator.force_between(near.get(0).unwrap(), near.get(1).unwrap()).unwrap();
        assert!((force - 200.0 / 1600.0).abs() < 1e-12);

        let mut far = pair(100.0, 1.0, 1.0);
        integrator.step(&mut far, 60.0, 1.0);
        assert!(far.iter().all(|b| b.velocity == Vector2::zero()));
    }

    #[test]
    fn test_unsupported_rates_keep_positions_finite() {
        assert_eq!(GravityIntegrator::step_scale(0.0, 1.0), 60.0 / 5.0);
        assert_eq!(GravityIntegrator::step_scale(-10.0, 1.0), 60.0 / 5.0);
        assert_eq!(GravityIntegrator::step_scale(60.0, f64::NAN), 0.0);

        let integrator = GravityIntegrator::new();
        for (frame_rate, time_scale) in [(0.0, 1.0), (-1.0, 1.0), (f64::NAN, 1.0), (60.0, f64::INFINITY)] {
            let mut set = pair(100.0, 1.0, 1.0);
            integrator.step(&mut set, frame_rate, time_scale);
            for body in set.iter() {
                assert!(body.position.x.is_finite() && body.position.y.is_finite());
                assert!(body.velocity.x.is_finite() && body.velocity.y.is_finite());
            }
        }
    }
}
