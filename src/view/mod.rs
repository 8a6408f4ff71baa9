//! View and pointer handling
//!
//! The engine knows nothing about screens. This module turns pointer input
//! into pans, zooms and spawn requests against a 2D view transform.

pub mod camera;
pub mod input;

pub use camera::{ScrollDirection, ViewTransform};
pub use input::{PointerButton, PointerInput, SpawnPreview, SpawnRequest};
