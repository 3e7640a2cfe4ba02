// src/utils/linalg.rs

use nalgebra::{Matrix3, Vector3};

fn row_matrix(lattice: [[f64; 3]; 3]) -> Matrix3<f64> {
  Matrix3::from_row_slice(&[
    lattice[0][0],
    lattice[0][1],
    lattice[0][2],
    lattice[1][0],
    lattice[1][1],
    lattice[1][2],
    lattice[2][0],
    lattice[2][1],
    lattice[2][2],
  ])
}

/// Convert fractional coordinates to Cartesian using lattice matrix
///
/// # Arguments
/// * `frac` - Fractional coordinates [x, y, z]
/// * `lattice` - Lattice vectors as row matrix [[ax, ay, az], [bx, by, bz], [cx, cy, cz]]
///
/// # Formula
/// ```text
/// Cartesian = Fractional · M  (row vector times row matrix)
///           = M^T × Fractional
/// ```
pub fn frac_to_cart(frac: [f64; 3], lattice: [[f64; 3]; 3]) -> [f64; 3] {
  let cart_vec = row_matrix(lattice).transpose() * Vector3::from(frac);
  [cart_vec.x, cart_vec.y, cart_vec.z]
}

/// Convert Cartesian coordinates to fractional using lattice matrix
///
/// Returns `None` if the lattice is singular.
///
/// # Formula
/// ```text
/// Fractional = (M^T)^-1 × Cartesian
/// ```
pub fn cart_to_frac(cart: [f64; 3], lattice: [[f64; 3]; 3]) -> Option<[f64; 3]> {
  let inv_lat = row_matrix(lattice).transpose().try_inverse()?;
  let frac_vec = inv_lat * Vector3::from(cart);
  Some([frac_vec.x, frac_vec.y, frac_vec.z])
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_abs_diff_eq;

  #[test]
  fn test_cubic_lattice() {
    let lattice = [[5.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 5.0]];
    let cart = frac_to_cart([0.5, 0.5, 0.5], lattice);

    assert_abs_diff_eq!(cart[0], 2.5, epsilon = 1e-10);
    assert_abs_diff_eq!(cart[1], 2.5, epsilon = 1e-10);
    assert_abs_diff_eq!(cart[2], 2.5, epsilon = 1e-10);
  }

  #[test]
  fn test_row_convention() {
    // b has an x component; the transposed convention would put it into y
    let lattice = [[4.0, 0.0, 0.0], [2.0, 3.0, 0.0], [0.0, 0.0, 5.0]];
    let cart = frac_to_cart([0.0, 1.0, 0.0], lattice);
    assert_eq!(cart, [2.0, 3.0, 0.0]);
  }

  #[test]
  fn test_roundtrip_oblique() {
    let lattice = [[4.0, 0.0, 0.0], [2.0, 3.46, 0.0], [0.7, -1.1, 5.0]];
    let samples = [
      [0.333, 0.667, 0.25],
      [0.0, 0.0, 0.0],
      [0.999, 0.001, 0.5],
      [-0.25, 1.25, 0.75],
    ];

    for frac_orig in samples {
      let cart = frac_to_cart(frac_orig, lattice);
      let frac_back = cart_to_frac(cart, lattice).unwrap();
      for k in 0..3 {
        assert_abs_diff_eq!(frac_back[k], frac_orig[k], epsilon = 1e-9);
      }
    }
  }

  #[test]
  fn test_singular() {
    let lattice = [[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
    assert!(cart_to_frac([1.0, 1.0, 1.0], lattice).is_none());
  }
}
