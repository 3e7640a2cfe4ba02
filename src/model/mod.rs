//src/model/mod.rs
pub mod elements;
pub mod structure;

// Re-exports for cleaner imports
pub use elements::{color_for, normalize_symbol};
pub use structure::{Lattice, LatticeError, LatticeParameters, Site, Structure};
