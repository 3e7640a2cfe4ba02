// src/config.rs

use crate::physics::bonding::{BondConfig, BondError};
use crate::rendering::axes::{AxisConfig, AxisMode};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

// --- Errors ---

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
  Bonds(BondError),
  Axes(String),
  Style(String),
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      ConfigError::Bonds(e) => write!(f, "{}", e),
      ConfigError::Axes(msg) => write!(f, "Invalid axis configuration: {}", msg),
      ConfigError::Style(msg) => write!(f, "Invalid style: {}", msg),
    }
  }
}

impl std::error::Error for ConfigError {}

impl From<BondError> for ConfigError {
  fn from(e: BondError) -> Self {
    ConfigError::Bonds(e)
  }
}

// --- Enums ---

/// How sphere radii are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusStrategy {
  /// One radius for every element, scaled to the smallest cell edge.
  #[default]
  Uniform,
  Covalent,
  VanDerWaals,
  Ionic,
}

// --- SceneStyle ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStyle {
  /// Fraction of min(a, b, c) used by `RadiusStrategy::Uniform`.
  pub uniform_fraction: f64,
  /// Multiplier on tabulated radii for the other strategies.
  pub sphere_scale: f64,
  /// Radius for elements missing from the selected table (Å).
  pub fallback_radius: f64,
}

impl Default for SceneStyle {
  fn default() -> Self {
    Self {
      uniform_fraction: 0.08,
      sphere_scale: 0.5,
      fallback_radius: 0.5,
    }
  }
}

// --- SceneOptions ---

/// Everything `build_scene` can be asked to do.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneOptions {
  pub include_bonds: bool,
  pub include_axes: bool,
  pub axis_mode: AxisMode,
  pub radius_strategy: RadiusStrategy,
  pub style: SceneStyle,
  pub bonds: BondConfig,
  pub axes: AxisConfig,
}

impl Default for SceneOptions {
  fn default() -> Self {
    Self {
      include_bonds: true,
      include_axes: true,
      axis_mode: AxisMode::Lattice,
      radius_strategy: RadiusStrategy::Uniform,
      style: SceneStyle::default(),
      bonds: BondConfig::default(),
      axes: AxisConfig::default(),
    }
  }
}

impl SceneOptions {
  /// Wireframe and spheres only.
  pub fn minimal() -> Self {
    Self {
      include_bonds: false,
      include_axes: false,
      ..Default::default()
    }
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    self.validate_style()?;
    if self.include_bonds {
      self.bonds.validate()?;
    }
    if self.include_axes {
      self.axes.validate()?;
    }
    Ok(())
  }

  /// Checks only what the atoms and unit-cell groups read.
  pub fn validate_style(&self) -> Result<(), ConfigError> {
    let s = &self.style;
    if !(s.uniform_fraction > 0.0) {
      return Err(ConfigError::Style(format!(
        "uniform_fraction must be positive, got {}",
        s.uniform_fraction
      )));
    }
    if !(s.sphere_scale > 0.0) || !(s.fallback_radius > 0.0) {
      return Err(ConfigError::Style(format!(
        "sphere_scale and fallback_radius must be positive, got {} and {}",
        s.sphere_scale, s.fallback_radius
      )));
    }
    Ok(())
  }
}

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
  #[serde(default)]
  pub scene: SceneOptions,
}

impl Config {
  /// Loads config from standard OS location (e.g., ~/.config/lattice-scene/settings.json)
  pub fn load() -> (Self, String) {
    Self::load_from(&Self::get_path())
  }

  pub fn load_from(path: &PathBuf) -> (Self, String) {
    if !path.exists() {
      return (
        Self::default(),
        "No config found. Using defaults.".to_string(),
      );
    }

    match File::open(path) {
      Ok(file) => {
        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, Config>(reader) {
          Ok(cfg) => match cfg.scene.validate() {
            Ok(()) => (cfg, format!("Config loaded from {:?}", path)),
            Err(e) => (Self::default(), format!("Ignoring config {:?}: {}", path, e)),
          },
          Err(e) => (Self::default(), format!("Error parsing config: {}", e)),
        }
      }
      Err(e) => (Self::default(), format!("Error opening config: {}", e)),
    }
  }

  /// Saves config to standard OS location
  pub fn save(&self) -> String {
    self.save_to(&Self::get_path())
  }

  pub fn save_to(&self, path: &PathBuf) -> String {
    if let Some(parent) = path.parent() {
      let _ = fs::create_dir_all(parent);
    }

    match File::create(path) {
      Ok(file) => {
        let writer = BufWriter::new(file);
        match serde_json::to_writer_pretty(writer, self) {
          Ok(_) => format!("Config saved to {:?}", path),
          Err(e) => format!("Failed to save config: {}", e),
        }
      }
      Err(e) => format!("Could not create config file: {}", e),
    }
  }

  pub fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "lattice", "lattice-scene") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_partial_json_fills_defaults() {
    let cfg: Config =
      serde_json::from_str(r#"{"scene": {"include_axes": false, "axis_mode": "cartesian"}}"#)
        .unwrap();
    assert!(!cfg.scene.include_axes);
    assert!(cfg.scene.include_bonds);
    assert_eq!(cfg.scene.axis_mode, AxisMode::Cartesian);
    assert_eq!(cfg.scene.axes.scale, 1.6);
  }

  #[test]
  fn test_strategy_names() {
    let s: RadiusStrategy = serde_json::from_str("\"van_der_waals\"").unwrap();
    assert_eq!(s, RadiusStrategy::VanDerWaals);
  }

  #[test]
  fn test_validate_rejects_bad_values() {
    let mut opts = SceneOptions::default();
    opts.style.uniform_fraction = 0.0;
    assert!(matches!(opts.validate(), Err(ConfigError::Style(_))));

    let mut opts = SceneOptions::default();
    opts.bonds.radius = -1.0;
    assert!(matches!(opts.validate(), Err(ConfigError::Bonds(_))));

    // Disabled steps are not validated
    opts.include_bonds = false;
    assert!(opts.validate().is_ok());
  }

  #[test]
  fn test_missing_file_uses_defaults() {
    let (cfg, msg) = Config::load_from(&PathBuf::from("/nonexistent/lattice-scene.json"));
    assert_eq!(cfg, Config::default());
    assert!(msg.contains("defaults"));
  }

  #[test]
  fn test_save_and_load() {
    let path = std::env::temp_dir().join(format!("lattice-scene-{}.json", std::process::id()));
    let mut cfg = Config::default();
    cfg.scene.radius_strategy = RadiusStrategy::Covalent;
    let msg = cfg.save_to(&path);
    assert!(msg.starts_with("Config saved"));

    let (loaded, _) = Config::load_from(&path);
    assert_eq!(loaded, cfg);
    let _ = fs::remove_file(&path);
  }
}
