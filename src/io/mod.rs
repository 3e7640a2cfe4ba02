// src/io/mod.rs
pub mod structure_json;

pub use structure_json::{read as load_structure, StructureReadError};
