//! Converts a structure JSON document into a scene JSON document.
//!
//! ```sh
//! lattice-scene si.structure.json --pretty
//! lattice-scene si.structure.json --no-axes --scene-out si.scene.json
//! lattice-scene si.structure.json --minimal --summary-out si.summary.json
//! ```

use clap::{Parser, ValueEnum};
use lattice_scene::config::{Config, RadiusStrategy};
use lattice_scene::io::structure_json;
use lattice_scene::rendering::axes::AxisMode;
use lattice_scene::rendering::scene::{SceneBuilder, SceneSummary};
use lattice_scene::utils::logger;
use log::LevelFilter;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RadiusArg {
  Uniform,
  Covalent,
  VanDerWaals,
  Ionic,
}

impl From<RadiusArg> for RadiusStrategy {
  fn from(arg: RadiusArg) -> Self {
    match arg {
      RadiusArg::Uniform => RadiusStrategy::Uniform,
      RadiusArg::Covalent => RadiusStrategy::Covalent,
      RadiusArg::VanDerWaals => RadiusStrategy::VanDerWaals,
      RadiusArg::Ionic => RadiusStrategy::Ionic,
    }
  }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AxisArg {
  Lattice,
  Cartesian,
}

#[derive(Parser)]
#[command(name = "lattice-scene")]
#[command(about = "Structure JSON -> scene JSON (atoms, unit cell, bonds, axes)")]
#[command(version)]
struct Cli {
  /// Structure document (pymatgen `Structure.as_dict()` or native JSON).
  input: PathBuf,

  /// Output path for scene JSON (default: <stem>.scene.json).
  #[arg(long)]
  scene_out: Option<PathBuf>,

  /// Also write formula, lattice parameters and site count here.
  #[arg(long)]
  summary_out: Option<PathBuf>,

  /// Settings file (default: the OS config directory).
  #[arg(long)]
  config: Option<PathBuf>,

  /// Write the effective options back to the settings file.
  #[arg(long)]
  save_config: bool,

  /// Wireframe and spheres only.
  #[arg(long)]
  minimal: bool,

  #[arg(long)]
  no_bonds: bool,

  #[arg(long)]
  no_axes: bool,

  #[arg(long, value_enum)]
  axis_mode: Option<AxisArg>,

  #[arg(long, value_enum)]
  radius_strategy: Option<RadiusArg>,

  /// Pretty-print JSON outputs.
  #[arg(long)]
  pretty: bool,

  /// Debug logging.
  #[arg(short, long, conflicts_with = "quiet")]
  verbose: bool,

  /// Errors only.
  #[arg(short, long)]
  quiet: bool,
}

fn default_scene_path(input: &Path) -> PathBuf {
  let stem = input
    .file_stem()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_else(|| "structure".to_string());
  // "si.structure.json" -> "si.scene.json"
  let stem = stem.strip_suffix(".structure").unwrap_or(&stem).to_string();
  input.with_file_name(format!("{}.scene.json", stem))
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T, pretty: bool) -> Result<(), String> {
  let file = File::create(path).map_err(|e| format!("Could not create {:?}: {}", path, e))?;
  let writer = BufWriter::new(file);
  let res = if pretty {
    serde_json::to_writer_pretty(writer, value)
  } else {
    serde_json::to_writer(writer, value)
  };
  res.map_err(|e| format!("Failed to write {:?}: {}", path, e))
}

fn run(cli: Cli) -> Result<(), String> {
  let config_path = cli.config.clone().unwrap_or_else(Config::get_path);
  let (mut config, msg) = Config::load_from(&config_path);
  log::debug!("{}", msg);

  let options = &mut config.scene;
  if cli.no_bonds {
    options.include_bonds = false;
  }
  if cli.no_axes {
    options.include_axes = false;
  }
  if let Some(mode) = cli.axis_mode {
    options.axis_mode = match mode {
      AxisArg::Lattice => AxisMode::Lattice,
      AxisArg::Cartesian => AxisMode::Cartesian,
    };
  }
  if let Some(strategy) = cli.radius_strategy {
    options.radius_strategy = strategy.into();
  }

  if cli.save_config {
    log::info!("{}", config.save_to(&config_path));
  }

  let structure = structure_json::read(&cli.input).map_err(|e| format!("Error: {}", e))?;

  let builder = if cli.minimal {
    SceneBuilder::Minimal
  } else {
    SceneBuilder::from_options(&config.scene)
  };
  let scene = builder
    .build(&structure, &config.scene)
    .map_err(|e| format!("Error: failed to build scene: {}", e))?;

  let scene_out = cli
    .scene_out
    .clone()
    .unwrap_or_else(|| default_scene_path(&cli.input));
  write_json(&scene_out, &scene, cli.pretty)?;
  println!("Wrote {}", scene_out.display());

  if let Some(summary_out) = &cli.summary_out {
    write_json(summary_out, &SceneSummary::of(&structure), cli.pretty)?;
    println!("Wrote {}", summary_out.display());
  }

  Ok(())
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let level = if cli.verbose {
    LevelFilter::Debug
  } else if cli.quiet {
    LevelFilter::Error
  } else {
    LevelFilter::Warn
  };
  let _ = logger::init(level);

  if !cli.input.is_file() {
    log::error!("Error: file not found: {}", cli.input.display());
    return ExitCode::from(2);
  }

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(msg) => {
      log::error!("{}", msg);
      ExitCode::from(1)
    }
  }
}
