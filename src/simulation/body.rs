// src/simulation/body.rs
//! Point masses and the live collection the engine advances
//!
//! A [`Body`] is a 2D point mass with a motion trail. Its mass doubles as the
//! visual scale: a body is drawn (and collides) with radius `10 * mass`.

use cgmath::{Vector2, Zero};
use std::collections::VecDeque;

/// Smallest mass a body may carry
pub const MIN_MASS: f64 = 0.01;

/// World-space radius per unit of mass
pub const RADIUS_PER_MASS: f64 = 10.0;

/// A simulated point mass
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Position in simulation space
    pub position: Vector2<f64>,
    /// Velocity in simulation units per nominal tick
    pub velocity: Vector2<f64>,
    /// Mass, always positive
    pub mass: f64,
    /// Past positions, most recent first
    pub trail: VecDeque<Vector2<f64>>,
}

impl Body {
    /// Create a body with an empty trail
    ///
    /// Non-positive or non-finite masses are raised to [`MIN_MASS`].
    pub fn new(position: Vector2<f64>, velocity: Vector2<f64>, mass: f64) -> Self {
        Self {
            position,
            velocity,
            mass: clamp_mass(mass),
            trail: VecDeque::new(),
        }
    }

    /// Radius used for drawing and overlap tests
    pub fn radius(&self) -> f64 {
        RADIUS_PER_MASS * self.mass
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }
}

fn clamp_mass(mass: f64) -> f64 {
    if mass.is_finite() && mass > MIN_MASS {
        mass
    } else {
        MIN_MASS
    }
}

/// The live collection of bodies
///
/// Iteration order carries no physical meaning, but it is stable: bodies keep
/// their relative order across merges, so a tick is deterministic for a
/// given input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodySet {
    bodies: Vec<Body>,
}

impl BodySet {
    /// An empty set
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    /// The four-body starting configuration
    ///
    /// Four unit masses on the corners of a 100x100 square, each moving
    /// tangentially so the group starts to swirl.
    pub fn canonical() -> Self {
        let bodies = [
            ((0.0, 0.0), (1.2, 0.0)),
            ((0.0, 100.0), (0.0, -1.2)),
            ((100.0, 0.0), (0.0, 1.2)),
            ((100.0, 100.0), (-1.2, 0.0)),
        ]
        .into_iter()
        .map(|((px, py), (vx, vy))| Body::new(Vector2::new(px, py), Vector2::new(vx, vy), 1.0))
        .collect();

        Self { bodies }
    }

    /// Append a body, returning its index
    pub fn push(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    /// Remove every body
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Body> {
        self.bodies.iter_mut()
    }

    /// Read-only view for renderers
    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Drop every body whose flag in `removed` is set, keeping order
    pub(crate) fn remove_flagged(&mut self, removed: &[bool]) {
        let mut index = 0;
        self.bodies.retain(|_| {
            let keep = !removed.get(index).copied().unwrap_or(false);
            index += 1;
            keep
        });
    }

    /// Total momentum of the set
    pub fn total_momentum(&self) -> Vector2<f64> {
        self.bodies
            .iter()
            .fold(Vector2::zero(), |acc, body| acc + body.momentum())
    }

    /// Total mass of the set
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|body| body.mass).sum()
    }
}

impl<'a> IntoIterator for &'a BodySet {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}

impl FromIterator<Body> for BodySet {
    fn from_iter<I: IntoIterator<Item = Body>>(iter: I) -> Self {
        Self {
            bodies: iter.into_iter().collect(),
        }
    }
}
