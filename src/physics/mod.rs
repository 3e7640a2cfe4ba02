// src/physics/mod.rs
pub mod bonding;

pub use bonding::{find_bonds, Bond, BondConfig, BondError, BondGraph, NeighborStrategy, OffCellBonds};
