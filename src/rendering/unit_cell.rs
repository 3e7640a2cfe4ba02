// src/rendering/unit_cell.rs

use super::primitives::Primitive;
use crate::model::structure::Lattice;

/// Cell corners in fractional coordinates.
const O: [f64; 3] = [0.0, 0.0, 0.0];
const A: [f64; 3] = [1.0, 0.0, 0.0];
const B: [f64; 3] = [0.0, 1.0, 0.0];
const C: [f64; 3] = [0.0, 0.0, 1.0];
const AB: [f64; 3] = [1.0, 1.0, 0.0];
const AC: [f64; 3] = [1.0, 0.0, 1.0];
const BC: [f64; 3] = [0.0, 1.0, 1.0];
const ABC: [f64; 3] = [1.0, 1.0, 1.0];

/// The 12 parallelepiped edges: 3 from the origin, 6 between the single and
/// paired corners, 3 into the far corner.
pub const CELL_EDGES: [([f64; 3], [f64; 3]); 12] = [
  (O, A),
  (O, B),
  (O, C),
  (A, AB),
  (A, AC),
  (B, AB),
  (B, BC),
  (C, AC),
  (C, BC),
  (AB, ABC),
  (AC, ABC),
  (BC, ABC),
];

/// Wireframe of the cell as one `lines` primitive with 24 points.
pub fn build_unit_cell(lattice: &Lattice) -> Primitive {
  let positions = CELL_EDGES
    .iter()
    .flat_map(|(from, to)| [lattice.to_cartesian(*from), lattice.to_cartesian(*to)])
    .collect();

  Primitive::Lines { positions }
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_abs_diff_eq;

  #[test]
  fn test_cube_edges() {
    let lat = Lattice::new([[5.43, 0.0, 0.0], [0.0, 5.43, 0.0], [0.0, 0.0, 5.43]]).unwrap();
    let Primitive::Lines { positions } = build_unit_cell(&lat) else {
      panic!("expected lines");
    };

    assert_eq!(positions.len(), 24);
    for pair in positions.chunks(2) {
      let d = crate::utils::geometry::distance(pair[0], pair[1]);
      assert_abs_diff_eq!(d, 5.43, epsilon = 1e-12);
    }
    assert_eq!(positions[0], [0.0, 0.0, 0.0]);
    assert_eq!(positions[23], [5.43, 5.43, 5.43]);
  }

  #[test]
  fn test_triclinic_order() {
    let m = [[4.0, 0.0, 0.0], [1.0, 3.0, 0.0], [0.5, 0.5, 6.0]];
    let lat = Lattice::new(m).unwrap();
    let Primitive::Lines { positions } = build_unit_cell(&lat) else {
      panic!("expected lines");
    };

    assert_eq!(positions.len(), 24);
    // (b, b+c) is the 7th edge
    assert_eq!(positions[12], m[1]);
    assert_eq!(positions[13], [1.5, 3.5, 6.0]);
  }
}
