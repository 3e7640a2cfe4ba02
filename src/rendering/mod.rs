pub mod atoms;
pub mod axes;
pub mod primitives;
pub mod scene;
pub mod unit_cell;

// Re-export the scene types to keep the API clean for the rest of the crate
pub use primitives::{NodeContents, Primitive, SceneDocument, SceneNode};
pub use scene::build_scene;
