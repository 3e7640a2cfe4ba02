// src/rendering/scene.rs

use super::atoms::build_atoms;
use super::axes::build_axes;
use super::primitives::{Primitive, SceneDocument, SceneNode};
use super::unit_cell::build_unit_cell;
use crate::config::{ConfigError, SceneOptions};
use crate::model::structure::{Lattice, LatticeError, LatticeParameters, Site, Structure};
use crate::physics::bonding::find_bonds;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

pub const ATOMS_GROUP: &str = "atoms";
pub const UNIT_CELL_GROUP: &str = "unit_cell";
pub const BONDS_GROUP: &str = "bonds";
pub const AXES_GROUP: &str = "axes";

// --- Errors ---

#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
  DegenerateLattice(LatticeError),
  InvalidOptions(ConfigError),
}

impl fmt::Display for SceneError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      SceneError::DegenerateLattice(e) => write!(f, "{}", e),
      SceneError::InvalidOptions(e) => write!(f, "{}", e),
    }
  }
}

impl std::error::Error for SceneError {}

impl From<LatticeError> for SceneError {
  fn from(e: LatticeError) -> Self {
    SceneError::DegenerateLattice(e)
  }
}

impl From<ConfigError> for SceneError {
  fn from(e: ConfigError) -> Self {
    SceneError::InvalidOptions(e)
  }
}

// --- Builders ---

/// Which scene a conversion produces.
///
/// `Minimal` never runs the neighbor search or the axis builder, whatever the
/// options say. `Bonded` adds the `bonds` and `axes` groups requested by the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneBuilder {
  Minimal,
  Bonded,
}

impl SceneBuilder {
  pub fn from_options(options: &SceneOptions) -> Self {
    if options.include_bonds || options.include_axes {
      SceneBuilder::Bonded
    } else {
      SceneBuilder::Minimal
    }
  }

  pub fn build(
    self,
    structure: &Structure,
    options: &SceneOptions,
  ) -> Result<SceneDocument, SceneError> {
    match self {
      SceneBuilder::Minimal => options.validate_style()?,
      SceneBuilder::Bonded => options.validate()?,
    }
    let start = Instant::now();

    // Guaranteed baseline
    let mut groups = vec![
      SceneNode::with_children(
        ATOMS_GROUP,
        build_atoms(structure, options.radius_strategy, &options.style),
      ),
      SceneNode::with_primitives(UNIT_CELL_GROUP, vec![build_unit_cell(&structure.lattice)]),
    ];

    // No sites: atoms and wireframe only
    if self == SceneBuilder::Bonded && !structure.is_empty() {
      if options.include_bonds {
        if let Some(bonds) = bonds_group(structure, options) {
          groups.push(bonds);
        }
      }
      if options.include_axes {
        match build_axes(&structure.lattice, options.axis_mode, &options.axes) {
          Ok(arrows) => groups.push(SceneNode::with_primitives(AXES_GROUP, arrows)),
          Err(e) => log::warn!("Axes omitted from scene: {}", e),
        }
      }
    }

    log::debug!(
      "{:?} scene for {} sites built in {:.2?}",
      self,
      structure.len(),
      start.elapsed()
    );

    Ok(SceneDocument::new(groups))
  }
}

fn bonds_group(structure: &Structure, options: &SceneOptions) -> Option<SceneNode> {
  let graph = match find_bonds(structure, &options.bonds) {
    Ok(graph) => graph,
    Err(e) => {
      log::warn!("Bonds omitted from scene: {}", e);
      return None;
    }
  };

  let cylinders = Primitive::Cylinders {
    position_pairs: graph.segments(structure, &options.bonds),
    color: options.bonds.color.clone(),
    radius: options.bonds.radius,
  };
  Some(SceneNode::with_primitives(BONDS_GROUP, vec![cylinders]))
}

/// Converts a structure into a scene document.
///
/// Fails only on invalid options. Bond and axis problems drop their group and
/// log a warning; `atoms` and `unit_cell` are always present. A structure
/// without sites gets only those two.
pub fn build_scene(
  structure: &Structure,
  options: &SceneOptions,
) -> Result<SceneDocument, SceneError> {
  SceneBuilder::from_options(options).build(structure, options)
}

/// Same as [`build_scene`] for callers holding a raw row matrix; a degenerate
/// basis surfaces as [`SceneError::DegenerateLattice`].
pub fn build_scene_from_parts(
  matrix: [[f64; 3]; 3],
  sites: Vec<Site>,
  options: &SceneOptions,
) -> Result<SceneDocument, SceneError> {
  let structure = Structure::new(Lattice::new(matrix)?, sites);
  build_scene(&structure, options)
}

// --- Summary ---

/// Facts about the converted structure returned next to its scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSummary {
  pub formula: String,
  pub lattice: LatticeParameters,
  pub n_sites: usize,
}

impl SceneSummary {
  pub fn of(structure: &Structure) -> Self {
    Self {
      formula: structure.formula(),
      lattice: structure.lattice.parameters(),
      n_sites: structure.len(),
    }
  }
}
