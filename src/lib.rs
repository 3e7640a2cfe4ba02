//! Crystal structure to scene-graph conversion.
//!
//! A [`model::Structure`] (lattice + fractional sites) becomes a
//! [`rendering::SceneDocument`]: element-grouped spheres, the unit-cell
//! wireframe, a periodic bond graph drawn as cylinders, and orientation axes.
//! The conversion is pure and synchronous; independent calls may run
//! concurrently on separate threads.

pub mod config;
pub mod io;
pub mod model;
pub mod physics;
pub mod rendering;
pub mod utils;

pub use config::{Config, RadiusStrategy, SceneOptions};
pub use model::{Lattice, Site, Structure};
pub use rendering::scene::{build_scene, SceneBuilder, SceneError, SceneSummary};
pub use rendering::SceneDocument;
