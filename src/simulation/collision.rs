// src/simulation/collision.rs
//! Inelastic merging of overlapping bodies
//!
//! Two bodies overlap when their centres are closer than the sum of their
//! radii (`10 * (m1 + m2)`). The heavier one absorbs the lighter: it takes
//! the combined mass and the momentum-conserving velocity, and keeps its own
//! position and trail. On equal masses the body earlier in the set absorbs.
//!
//! The scan visits each unordered pair once, in index order. Absorbed bodies
//! are tombstoned for the rest of the pass and removed afterwards, so indices
//! stay valid while scanning. A survivor carries its merged state into its
//! remaining pairs, which lets a chain of three or more bodies collapse in a
//! single tick with mass and momentum conserved.

use cgmath::InnerSpace;

use super::body::{Body, BodySet, RADIUS_PER_MASS};

/// Detects overlaps and merges colliding pairs
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionMerger;

/// Outcome of merging two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absorber {
    First,
    Second,
}

impl CollisionMerger {
    pub fn new() -> Self {
        Self
    }

    /// True when the two bodies overlap
    pub fn overlaps(a: &Body, b: &Body) -> bool {
        let distance = (a.position - b.position).magnitude();
        distance < RADIUS_PER_MASS * (a.mass + b.mass)
    }

    /// Which of two colliding bodies survives
    pub fn absorber(a: &Body, b: &Body) -> Absorber {
        if b.mass > a.mass {
            Absorber::Second
        } else {
            Absorber::First
        }
    }

    /// Merge `absorbed` into `absorber`, conserving mass and momentum
    pub fn absorb(absorber: &mut Body, absorbed: &Body) {
        let mass = absorber.mass + absorbed.mass;
        let momentum = absorber.momentum() + absorbed.momentum();

        absorber.mass = mass;
        absorber.velocity = momentum / mass;
    }

    /// Resolve every overlap in the set, returning the number of merges
    pub fn resolve(&self, bodies: &mut BodySet) -> usize {
        let count = bodies.len();
        if count < 2 {
            return 0;
        }

        let mut removed = vec![false; count];
        let mut merges = 0;
        let slice = bodies.as_mut_slice();

        for i in 0..count {
            if removed[i] {
                continue;
            }

            for j in (i + 1)..count {
                if removed[j] {
                    continue;
                }

                let (head, tail) = slice.split_at_mut(j);
                let first = &mut head[i];
                let second = &mut tail[0];

                if !Self::overlaps(first, second) {
                    continue;
                }

                merges += 1;
                match Self::absorber(first, second) {
                    Absorber::First => {
                        Self::absorb(first, second);
                        removed[j] = true;
                    }
                    Absorber::Second => {
                        Self::absorb(second, first);
                        removed[i] = true;
                        break;
                    }
                }
            }
        }

        if merges > 0 {
            bodies.remove_flagged(&removed);
        }
        merges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector2, Zero};
    use rand::Rng;

    fn body(x: f64, y: f64, vx: f64, vy: f64, mass: f64) -> Body {
        Body::new(Vector2::new(x, y), Vector2::new(vx, vy), mass)
    }

    #[test]
    fn test_merge_conserves_mass_and_momentum() {
        let mut set: BodySet = vec![body(0.0, 0.0, 1.0, 2.0, 1.0), body(5.0, 0.0, -3.0, 0.5, 2.0)]
            .into_iter()
            .collect();
        let before = set.total_momentum();

        let merges = CollisionMerger::new().resolve(&mut set);

        assert_eq!(merges, 1);
        assert_eq!(set.len(), 1);
        let merged = set.get(0).unwrap();
        assert!((merged.mass - 3.0).abs() < 1e-12);
        // (1*1 + 2*-3) / 3, (1*2 + 2*0.5) / 3
        assert!((merged.velocity.x - (-5.0 / 3.0)).abs() < 1e-12);
        assert!((merged.velocity.y - 1.0).abs() < 1e-12);
        let after = set.total_momentum();
        assert!((after - before).magnitude() < 1e-12);
    }

    #[test]
    fn test_heavier_body_keeps_position_and_trail() {
        let mut light = body(0.0, 0.0, 0.0, 0.0, 1.0);
        light.trail.push_front(Vector2::new(-1.0, -1.0));
        let mut heavy = body(15.0, 0.0, 0.0, 0.0, 3.0);
        heavy.trail.push_front(Vector2::new(42.0, 0.0));

        let mut set: BodySet = vec![light, heavy].into_iter().collect();
        CollisionMerger::new().resolve(&mut set);

        assert_eq!(set.len(), 1);
        let merged = set.get(0).unwrap();
        assert_eq!(merged.position, Vector2::new(15.0, 0.0));
        assert_eq!(merged.trail.len(), 1);
        assert_eq!(merged.trail[0], Vector2::new(42.0, 0.0));
    }

    #[test]
    fn test_equal_masses_first_absorbs() {
        let mut set: BodySet = vec![body(0.0, 0.0, 0.0, 0.0, 1.0), body(3.0, 4.0, 0.0, 0.0, 1.0)]
            .into_iter()
            .collect();
        CollisionMerger::new().resolve(&mut set);

        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).unwrap().position, Vector2::zero());
        assert_eq!(set.get(0).unwrap().mass, 2.0);
    }

    #[test]
    fn test_coincident_bodies_merge() {
        let mut set: BodySet = vec![body(7.0, 7.0, 0.0, 0.0, 1.0), body(7.0, 7.0, 0.0, 0.0, 1.0)]
            .into_iter()
            .collect();
        CollisionMerger::new().resolve(&mut set);

        assert_eq!(set.len(), 1);
        let merged = set.get(0).unwrap();
        assert_eq!(merged.mass, 2.0);
        assert_eq!(merged.position, Vector2::new(7.0, 7.0));
    }

    #[test]
    fn test_separated_bodies_untouched() {
        // Radii sum is exactly 20: touching is not overlapping
        let mut set: BodySet = vec![body(0.0, 0.0, 1.0, 0.0, 1.0), body(20.0, 0.0, 0.0, 0.0, 1.0)]
            .into_iter()
            .collect();
        let snapshot = set.clone();
        assert_eq!(CollisionMerger::new().resolve(&mut set), 0);
        assert_eq!(set, snapshot);
    }

    #[test]
    fn test_chain_collapses_in_one_pass() {
        // 0 overlaps 1; 0 only reaches 2 once it has absorbed 1
        let mut set: BodySet = vec![
            body(0.0, 0.0, 1.0, 0.0, 1.0),
            body(15.0, 0.0, 0.0, 1.0, 1.0),
            body(25.0, 0.0, -1.0, 0.0, 1.0),
        ]
        .into_iter()
        .collect();
        let before = set.total_momentum();

        let merges = CollisionMerger::new().resolve(&mut set);

        assert_eq!(merges, 2);
        assert_eq!(set.len(), 1);
        let merged = set.get(0).unwrap();
        assert_eq!(merged.mass, 3.0);
        assert_eq!(merged.position, Vector2::zero());
        assert!((set.total_momentum() - before).magnitude() < 1e-12);
    }

    #[test]
    fn test_later_heavier_body_absorbs_and_continues() {
        // Body 1 absorbs body 0, then still merges with body 2
        let mut set: BodySet = vec![
            body(0.0, 0.0, 0.0, 0.0, 1.0),
            body(25.0, 0.0, 0.0, 0.0, 2.0),
            body(50.0, 0.0, 0.0, 0.0, 1.0),
        ]
        .into_iter()
        .collect();

        let merges = CollisionMerger::new().resolve(&mut set);

        assert_eq!(merges, 2);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).unwrap().position, Vector2::new(25.0, 0.0));
        assert_eq!(set.get(0).unwrap().mass, 4.0);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let make = || -> BodySet {
            (0..6)
                .map(|i| body(i as f64 * 12.0, (i % 2) as f64 * 5.0, i as f64, -(i as f64), 0.5 + i as f64 * 0.1))
                .collect()
        };
        let mut a = make();
        let mut b = make();
        CollisionMerger::new().resolve(&mut a);
        CollisionMerger::new().resolve(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_clusters_conserve_mass_and_momentum() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let mut set: BodySet = (0..12)
                .map(|_| {
                    body(
                        rng.random_range(-60.0..60.0),
                        rng.random_range(-60.0..60.0),
                        rng.random_range(-2.0..2.0),
                        rng.random_range(-2.0..2.0),
                        rng.random_range(0.1..2.0),
                    )
                })
                .collect();
            let mass = set.total_mass();
            let momentum = set.total_momentum();

            CollisionMerger::new().resolve(&mut set);

            assert!((set.total_mass() - mass).abs() < 1e-9);
            assert!((set.total_momentum() - momentum).magnitude() < 1e-9);
            assert!(set.iter().all(|b| b.mass > 0.0));
        }
    }

    #[test]
    fn test_empty_and_single_sets() {
        let mut empty = BodySet::new();
        assert_eq!(CollisionMerger::new().resolve(&mut empty), 0);

        let mut single: BodySet = std::iter::once(body(0.0, 0.0, 0.0, 0.0, 1.0)).collect();
        assert_eq!(CollisionMerger::new().resolve(&mut single), 0);
        assert_eq!(single.len(), 1);
    }
}
