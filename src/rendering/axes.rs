// src/rendering/axes.rs

use super::primitives::Primitive;
use crate::config::ConfigError;
use crate::model::structure::Lattice;
use crate::utils::geometry::{self, Point3};
use serde::{Deserialize, Serialize};
use std::fmt;

const NORM_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisMode {
  /// Along the normalized basis vectors a, b, c.
  #[default]
  Lattice,
  /// Along x, y, z.
  Cartesian,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AxisError {
  NonFinite { axis: usize },
}

impl fmt::Display for AxisError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      AxisError::NonFinite { axis } => write!(f, "Axis {} produced a non-finite direction", axis),
    }
  }
}

impl std::error::Error for AxisError {}

/// Display tuning for the orientation arrows. None of these are geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
  /// Arrow length (Å)
  pub scale: f64,
  pub head_length: f64,
  pub head_width: f64,
  /// Shaft radius
  pub radius: f64,
  pub origin: Point3,
  /// Per-axis visibility, in a/b/c (or x/y/z) order
  pub show: [bool; 3],
  pub colors: [String; 3],
}

impl Default for AxisConfig {
  fn default() -> Self {
    Self {
      scale: 1.6,
      head_length: 0.32,
      head_width: 0.18,
      radius: 0.07,
      origin: [0.0; 3],
      show: [true; 3],
      colors: [
        "#d93333".to_string(), // X Red
        "#33b333".to_string(), // Y Green
        "#3366d9".to_string(), // Z Blue
      ],
    }
  }
}

impl AxisConfig {
  pub fn validate(&self) -> Result<(), ConfigError> {
    for (name, value) in [
      ("scale", self.scale),
      ("head_length", self.head_length),
      ("head_width", self.head_width),
      ("radius", self.radius),
    ] {
      if !(value > 0.0 && value.is_finite()) {
        return Err(ConfigError::Axes(format!(
          "{} must be positive, got {}",
          name, value
        )));
      }
    }
    if !geometry::is_finite(self.origin) {
      return Err(ConfigError::Axes("origin must be finite".to_string()));
    }
    Ok(())
  }
}

/// One `arrows` primitive per visible axis.
pub fn build_axes(
  lattice: &Lattice,
  mode: AxisMode,
  config: &AxisConfig,
) -> Result<Vec<Primitive>, AxisError> {
  let directions: [Point3; 3] = match mode {
    AxisMode::Lattice => {
      let m = lattice.matrix();
      [
        geometry::normalize_or_zero(m[0], NORM_EPSILON),
        geometry::normalize_or_zero(m[1], NORM_EPSILON),
        geometry::normalize_or_zero(m[2], NORM_EPSILON),
      ]
    }
    AxisMode::Cartesian => [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
  };

  let mut arrows = Vec::with_capacity(3);
  for (axis, dir) in directions.iter().enumerate() {
    if !config.show[axis] {
      continue;
    }

    let tip = geometry::add(config.origin, geometry::scale(*dir, config.scale));
    if !geometry::is_finite(tip) {
      return Err(AxisError::NonFinite { axis });
    }

    arrows.push(Primitive::Arrows {
      position_pairs: vec![(config.origin, tip)],
      color: config.colors[axis].clone(),
      radius: config.radius,
      head_length: config.head_length,
      head_width: config.head_width,
    });
  }

  Ok(arrows)
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_abs_diff_eq;

  fn hexagonal() -> Lattice {
    Lattice::from_parameters(3.0, 3.0, 5.0, 90.0, 90.0, 120.0).unwrap()
  }

  fn tip(p: &Primitive) -> Point3 {
    match p {
      Primitive::Arrows { position_pairs, .. } => position_pairs[0].1,
      _ => panic!("expected arrows"),
    }
  }

  #[test]
  fn test_lattice_mode_follows_basis() {
    let arrows = build_axes(&hexagonal(), AxisMode::Lattice, &AxisConfig::default()).unwrap();
    assert_eq!(arrows.len(), 3);

    let b_tip = tip(&arrows[1]);
    assert_abs_diff_eq!(geometry::norm(b_tip), 1.6, epsilon = 1e-12);
    assert_abs_diff_eq!(b_tip[0], -0.8, epsilon = 1e-9);
  }

  #[test]
  fn test_cartesian_mode_and_defaults() {
    let arrows = build_axes(&hexagonal(), AxisMode::Cartesian, &AxisConfig::default()).unwrap();
    assert_eq!(tip(&arrows[1]), [0.0, 1.6, 0.0]);
    match &arrows[0] {
      Primitive::Arrows {
        radius,
        head_length,
        head_width,
        ..
      } => {
        assert_eq!(*radius, 0.07);
        assert_eq!(*head_length, 0.32);
        assert_eq!(*head_width, 0.18);
      }
      _ => panic!("expected arrows"),
    }
  }

  #[test]
  fn test_hidden_axis() {
    let config = AxisConfig {
      show: [true, false, true],
      ..Default::default()
    };
    let arrows = build_axes(&hexagonal(), AxisMode::Cartesian, &config).unwrap();
    assert_eq!(arrows.len(), 2);
    assert_eq!(tip(&arrows[1]), [0.0, 0.0, 1.6]);
  }

  #[test]
  fn test_overflowing_scale_is_an_error() {
    let config = AxisConfig {
      scale: f64::MAX,
      origin: [f64::MAX, 0.0, 0.0],
      ..Default::default()
    };
    assert_eq!(
      build_axes(&hexagonal(), AxisMode::Cartesian, &config),
      Err(AxisError::NonFinite { axis: 0 })
    );
  }

  #[test]
  fn test_validate() {
    let config = AxisConfig {
      head_width: 0.0,
      ..Default::default()
    };
    assert!(config.validate().is_err());
    assert!(AxisConfig::default().validate().is_ok());
  }
}
