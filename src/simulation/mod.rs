// src/simulation/mod.rs
//! Simulation engine
//!
//! Point masses under pairwise Newtonian gravity. Each tick records trails,
//! merges overlapping bodies, then integrates; [`SimulationController`]
//! runs that pipeline and owns the parameters.

pub mod body;
pub mod collision;
pub mod controller;
pub mod gravity;
pub mod params;
pub mod trail;
pub mod traits;

pub use body::{Body, BodySet, MIN_MASS};
pub use collision::CollisionMerger;
pub use controller::SimulationController;
pub use gravity::GravityIntegrator;
pub use params::SimulationParameters;
pub use trail::TrailRecorder;
pub use traits::{Simulation, TickReport};
