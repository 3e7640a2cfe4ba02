// src/model/structure.rs

use crate::model::elements::normalize_symbol;
use crate::utils::geometry;
use crate::utils::linalg;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Basis vectors shorter than this are treated as zero length.
pub const BASIS_EPSILON: f64 = 1e-8;

/// Cells with a smaller volume (Å³) are treated as flat.
pub const VOLUME_EPSILON: f64 = 1e-8;

const AXIS_NAMES: [char; 3] = ['a', 'b', 'c'];

// --- Errors ---

#[derive(Debug, Clone, PartialEq)]
pub enum LatticeError {
  ZeroBasisVector { axis: char, norm: f64 },
  DegenerateVolume { volume: f64 },
  NonFinite,
  InvalidParameters(String),
}

impl fmt::Display for LatticeError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      LatticeError::ZeroBasisVector { axis, norm } => write!(
        f,
        "Degenerate lattice: basis vector {} norm {} is below epsilon {}",
        axis, norm, BASIS_EPSILON
      ),
      LatticeError::DegenerateVolume { volume } => write!(
        f,
        "Degenerate lattice: cell volume {} is below epsilon {} (coplanar basis vectors)",
        volume, VOLUME_EPSILON
      ),
      LatticeError::NonFinite => write!(f, "Degenerate lattice: basis contains NaN or infinity"),
      LatticeError::InvalidParameters(msg) => write!(f, "Invalid lattice parameters: {}", msg),
    }
  }
}

impl std::error::Error for LatticeError {}

// --- Lattice ---

/// Scalar description of a cell: lengths in Å, angles in degrees, volume in Å³.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeParameters {
  pub a: f64,
  pub b: f64,
  pub c: f64,
  pub alpha: f64,
  pub beta: f64,
  pub gamma: f64,
  pub volume: f64,
}

/// Periodic cell spanned by three row vectors `[a_vec, b_vec, c_vec]`.
///
/// A `Lattice` can only be obtained through [`Lattice::new`] (or serde, which
/// routes through it), so every instance is non-degenerate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[[f64; 3]; 3]", into = "[[f64; 3]; 3]")]
pub struct Lattice {
  matrix: [[f64; 3]; 3],
  params: LatticeParameters,
}

impl Lattice {
  pub fn new(matrix: [[f64; 3]; 3]) -> Result<Self, LatticeError> {
    if matrix.iter().flatten().any(|v| !v.is_finite()) {
      return Err(LatticeError::NonFinite);
    }

    let lengths = [
      geometry::norm(matrix[0]),
      geometry::norm(matrix[1]),
      geometry::norm(matrix[2]),
    ];
    for (axis, &norm) in AXIS_NAMES.iter().zip(lengths.iter()) {
      if norm < BASIS_EPSILON {
        return Err(LatticeError::ZeroBasisVector { axis: *axis, norm });
      }
    }

    let volume = geometry::dot(matrix[0], geometry::cross(matrix[1], matrix[2])).abs();
    if volume < VOLUME_EPSILON {
      return Err(LatticeError::DegenerateVolume { volume });
    }

    let params = LatticeParameters {
      a: lengths[0],
      b: lengths[1],
      c: lengths[2],
      alpha: geometry::angle_between(matrix[1], matrix[2]),
      beta: geometry::angle_between(matrix[0], matrix[2]),
      gamma: geometry::angle_between(matrix[0], matrix[1]),
      volume,
    };

    Ok(Self { matrix, params })
  }

  /// Builds a cell from lengths (Å) and angles (degrees).
  ///
  /// Standard orientation: `a` along x, `b` in the xy plane.
  pub fn from_parameters(
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
  ) -> Result<Self, LatticeError> {
    for (name, angle) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
      if !(angle > 0.0 && angle < 180.0) {
        return Err(LatticeError::InvalidParameters(format!(
          "{} = {} must lie in (0, 180) degrees",
          name, angle
        )));
      }
    }

    let (cos_a, cos_b) = (alpha.to_radians().cos(), beta.to_radians().cos());
    let (sin_g, cos_g) = gamma.to_radians().sin_cos();

    let cx = c * cos_b;
    let cy = c * (cos_a - cos_b * cos_g) / sin_g;
    let cz_sq = c * c - cx * cx - cy * cy;
    if cz_sq <= 0.0 {
      return Err(LatticeError::InvalidParameters(format!(
        "angles ({}, {}, {}) do not describe a closed cell",
        alpha, beta, gamma
      )));
    }

    Self::new([
      [a, 0.0, 0.0],
      [b * cos_g, b * sin_g, 0.0],
      [cx, cy, cz_sq.sqrt()],
    ])
  }

  /// Row matrix `[a_vec, b_vec, c_vec]`.
  pub fn matrix(&self) -> [[f64; 3]; 3] {
    self.matrix
  }

  pub fn parameters(&self) -> LatticeParameters {
    self.params
  }

  pub fn lengths(&self) -> [f64; 3] {
    [self.params.a, self.params.b, self.params.c]
  }

  pub fn volume(&self) -> f64 {
    self.params.volume
  }

  pub fn to_cartesian(&self, frac: [f64; 3]) -> [f64; 3] {
    linalg::frac_to_cart(frac, self.matrix)
  }

  /// Inverse of [`Lattice::to_cartesian`]. Never `None` for a validated lattice
  /// but the signature keeps the singular case explicit.
  pub fn to_fractional(&self, cart: [f64; 3]) -> Option<[f64; 3]> {
    linalg::cart_to_frac(cart, self.matrix)
  }

  /// Cartesian offset of the periodic image `t = (n_a, n_b, n_c)`.
  pub fn translation(&self, t: [i32; 3]) -> [f64; 3] {
    self.to_cartesian([t[0] as f64, t[1] as f64, t[2] as f64])
  }
}

impl TryFrom<[[f64; 3]; 3]> for Lattice {
  type Error = LatticeError;

  fn try_from(matrix: [[f64; 3]; 3]) -> Result<Self, Self::Error> {
    Lattice::new(matrix)
  }
}

impl From<Lattice> for [[f64; 3]; 3] {
  fn from(lattice: Lattice) -> Self {
    lattice.matrix
  }
}

// --- Sites ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Site {
  /// Element symbol, possibly with an oxidation suffix ("Fe2+").
  pub element: String,
  /// Fractional coordinates, conventionally in [0, 1).
  pub frac: [f64; 3],
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub occupancy: Option<f64>,
}

impl Site {
  pub fn new(element: impl Into<String>, frac: [f64; 3]) -> Self {
    Self {
      element: element.into(),
      frac,
      occupancy: None,
    }
  }
}

// --- Structure ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Structure {
  pub lattice: Lattice,
  pub sites: Vec<Site>,
}

impl Structure {
  pub fn new(lattice: Lattice, sites: Vec<Site>) -> Self {
    Self { lattice, sites }
  }

  pub fn len(&self) -> usize {
    self.sites.len()
  }

  pub fn is_empty(&self) -> bool {
    self.sites.is_empty()
  }

  /// Cartesian position of site `idx`.
  pub fn cart_position(&self, idx: usize) -> [f64; 3] {
    self.lattice.to_cartesian(self.sites[idx].frac)
  }

  /// Reduced formula with elements in order of first appearance: 8 Si sites
  /// give "Si", Fe4O6 gives "Fe2O3". Oxidation suffixes are ignored.
  pub fn formula(&self) -> String {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for site in &self.sites {
      let el = normalize_symbol(&site.element);
      if el.is_empty() {
        continue;
      }
      match counts.iter_mut().find(|(e, _)| *e == el) {
        Some((_, n)) => *n += 1,
        None => counts.push((el, 1)),
      }
    }

    let divisor = counts.iter().fold(0, |g, (_, n)| gcd(g, *n)).max(1);
    counts
      .iter()
      .map(|(el, n)| match n / divisor {
        1 => el.clone(),
        k => format!("{}{}", el, k),
      })
      .collect()
  }
}

fn gcd(a: usize, b: usize) -> usize {
  if b == 0 { a } else { gcd(b, a % b) }
}
