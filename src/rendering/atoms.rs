// src/rendering/atoms.rs

use super::primitives::{Primitive, SceneNode};
use crate::config::{RadiusStrategy, SceneStyle};
use crate::model::elements::{color_for, covalent_radius, ionic_radius, vdw_radius};
use crate::model::structure::{Lattice, Structure};
use crate::utils::geometry::Point3;

/// Sphere radius for [`RadiusStrategy::Uniform`]: `min(a, b, c) * fraction`.
///
/// This is a presentation heuristic, not a physical radius. Tying the size to
/// the shortest cell edge keeps spheres from swallowing each other in small cells.
pub fn radius_for(lattice: &Lattice, fraction: f64) -> f64 {
  let [a, b, c] = lattice.lengths();
  a.min(b).min(c) * fraction
}

fn element_radius(
  symbol: &str,
  strategy: RadiusStrategy,
  uniform: f64,
  style: &SceneStyle,
) -> f64 {
  let tabulated = match strategy {
    RadiusStrategy::Uniform => return uniform,
    RadiusStrategy::Covalent => covalent_radius(symbol),
    RadiusStrategy::VanDerWaals => vdw_radius(symbol),
    RadiusStrategy::Ionic => ionic_radius(symbol),
  };

  if tabulated > 0.0 {
    tabulated * style.sphere_scale
  } else {
    style.fallback_radius
  }
}

/// Sites bucketed by element symbol, in order of first occurrence.
pub fn group_sites(structure: &Structure) -> Vec<(String, Vec<Point3>)> {
  let mut groups: Vec<(String, Vec<Point3>)> = Vec::new();

  for (i, site) in structure.sites.iter().enumerate() {
    let pos = structure.cart_position(i);
    match groups.iter_mut().find(|(el, _)| *el == site.element) {
      Some((_, positions)) => positions.push(pos),
      None => groups.push((site.element.clone(), vec![pos])),
    }
  }

  groups
}

/// One child node per element, each holding a single `spheres` primitive.
pub fn build_atoms(
  structure: &Structure,
  strategy: RadiusStrategy,
  style: &SceneStyle,
) -> Vec<SceneNode> {
  let uniform = radius_for(&structure.lattice, style.uniform_fraction);

  group_sites(structure)
    .into_iter()
    .map(|(element, positions)| {
      let sphere = Primitive::Spheres {
        color: color_for(&element).to_string(),
        radius: element_radius(&element, strategy, uniform, style),
        positions,
      };
      SceneNode::with_primitives(element, vec![sphere])
    })
    .collect()
}
