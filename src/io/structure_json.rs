// src/io/structure_json.rs
//
// Structure documents as produced by pymatgen's `Structure.as_dict()`, or the
// crate's own `Structure` serialization.

use crate::model::structure::{Lattice, LatticeError, Site, Structure};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

#[derive(Debug)]
pub enum StructureReadError {
    Io(io::Error),
    Json(serde_json::Error),
    EmptySpecies { site: usize },
    Lattice(LatticeError),
}

impl fmt::Display for StructureReadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StructureReadError::Io(e) => write!(f, "Could not read structure: {}", e),
            StructureReadError::Json(e) => write!(f, "Malformed structure JSON: {}", e),
            StructureReadError::EmptySpecies { site } => {
                write!(f, "Site {} has no species", site)
            }
            StructureReadError::Lattice(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StructureReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StructureReadError::Io(e) => Some(e),
            StructureReadError::Json(e) => Some(e),
            StructureReadError::Lattice(e) => Some(e),
            StructureReadError::EmptySpecies { .. } => None,
        }
    }
}

impl From<io::Error> for StructureReadError {
    fn from(e: io::Error) -> Self {
        StructureReadError::Io(e)
    }
}

impl From<serde_json::Error> for StructureReadError {
    fn from(e: serde_json::Error) -> Self {
        StructureReadError::Json(e)
    }
}

impl From<LatticeError> for StructureReadError {
    fn from(e: LatticeError) -> Self {
        StructureReadError::Lattice(e)
    }
}

// --- Raw document shapes ---

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLattice {
    Matrix([[f64; 3]; 3]),
    Pymatgen { matrix: [[f64; 3]; 3] },
}

#[derive(Deserialize)]
struct RawSpecies {
    element: String,
    #[serde(default = "full_occupancy")]
    occu: f64,
    #[serde(default)]
    oxidation_state: Option<f64>,
}

fn full_occupancy() -> f64 {
    1.0
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSite {
    Native {
        element: String,
        frac: [f64; 3],
        #[serde(default)]
        occupancy: Option<f64>,
    },
    Pymatgen {
        species: Vec<RawSpecies>,
        abc: [f64; 3],
    },
}

#[derive(Deserialize)]
struct RawStructure {
    lattice: RawLattice,
    sites: Vec<RawSite>,
}

// --- Conversion ---

/// "Fe" + 2 -> "Fe2+", "O" + -2 -> "O2-", fractional states keep their decimals.
fn species_symbol(species: &RawSpecies) -> String {
    match species.oxidation_state {
        Some(ox) if ox != 0.0 => {
            let sign = if ox > 0.0 { '+' } else { '-' };
            let mag = ox.abs();
            if mag.fract() == 0.0 {
                format!("{}{}{}", species.element, mag as i64, sign)
            } else {
                format!("{}{}{}", species.element, mag, sign)
            }
        }
        _ => species.element.clone(),
    }
}

fn convert_site(idx: usize, raw: RawSite) -> Result<Site, StructureReadError> {
    match raw {
        RawSite::Native {
            element,
            frac,
            occupancy,
        } => Ok(Site {
            element,
            frac,
            occupancy,
        }),
        RawSite::Pymatgen { species, abc } => {
            // Disordered sites are shown as their dominant species
            let dominant = species
                .iter()
                .max_by(|a, b| a.occu.total_cmp(&b.occu))
                .ok_or(StructureReadError::EmptySpecies { site: idx })?;

            let occupancy = if species.len() == 1 && dominant.occu == 1.0 {
                None
            } else {
                Some(dominant.occu)
            };

            Ok(Site {
                element: species_symbol(dominant),
                frac: abc,
                occupancy,
            })
        }
    }
}

pub fn parse_str(text: &str) -> Result<Structure, StructureReadError> {
    let raw: RawStructure = serde_json::from_str(text)?;
    from_raw(raw)
}

pub fn read(path: &Path) -> Result<Structure, StructureReadError> {
    let reader = BufReader::new(File::open(path)?);
    let raw: RawStructure = serde_json::from_reader(reader)?;
    from_raw(raw)
}

fn from_raw(raw: RawStructure) -> Result<Structure, StructureReadError> {
    let matrix = match raw.lattice {
        RawLattice::Matrix(m) => m,
        RawLattice::Pymatgen { matrix } => matrix,
    };
    let lattice = Lattice::new(matrix)?;

    let sites = raw
        .sites
        .into_iter()
        .enumerate()
        .map(|(i, s)| convert_site(i, s))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Read structure with {} sites", sites.len());
    Ok(Structure::new(lattice, sites))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PYMATGEN_SI: &str = r#"{
        "@module": "pymatgen.core.structure",
        "@class": "Structure",
        "charge": 0,
        "lattice": {
            "matrix": [[3.84, 0.0, 0.0], [1.92, 3.3255, 0.0], [0.0, -2.2170, 3.1353]],
            "pbc": [true, true, true],
            "a": 3.84, "b": 3.84, "c": 3.84,
            "alpha": 120.0, "beta": 90.0, "gamma": 60.0,
            "volume": 40.04
        },
        "sites": [
            {"species": [{"element": "Si", "occu": 1}], "abc": [0.0, 0.0, 0.0],
             "xyz": [0.0, 0.0, 0.0], "label": "Si", "properties": {}},
            {"species": [{"element": "Si", "occu": 1}], "abc": [0.75, 0.5, 0.75],
             "xyz": [3.84, 1.09, 2.35], "label": "Si", "properties": {}}
        ]
    }"#;

    #[test]
    fn test_pymatgen_dict() {
        let s = parse_str(PYMATGEN_SI).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.sites[1].element, "Si");
        assert_eq!(s.sites[1].frac, [0.75, 0.5, 0.75]);
        assert_eq!(s.sites[1].occupancy, None);
        assert_eq!(s.lattice.matrix()[1], [1.92, 3.3255, 0.0]);
    }

    #[test]
    fn test_native_document() {
        let s = parse_str(
            r#"{"lattice": [[2,0,0],[0,2,0],[0,0,2]],
                "sites": [{"element": "Fe", "frac": [0,0,0], "occupancy": 0.5}]}"#,
        )
        .unwrap();
        assert_eq!(s.sites[0].occupancy, Some(0.5));
    }

    #[test]
    fn test_disordered_and_oxidized() {
        let s = parse_str(
            r#"{"lattice": {"matrix": [[4,0,0],[0,4,0],[0,0,4]]},
                "sites": [
                  {"species": [{"element": "Fe", "occu": 0.3, "oxidation_state": 3},
                               {"element": "Mn", "occu": 0.7, "oxidation_state": 2}],
                   "abc": [0, 0, 0]},
                  {"species": [{"element": "O", "occu": 1.0, "oxidation_state": -2}],
                   "abc": [0.5, 0.5, 0.5]}
                ]}"#,
        )
        .unwrap();
        assert_eq!(s.sites[0].element, "Mn2+");
        assert_eq!(s.sites[0].occupancy, Some(0.7));
        assert_eq!(s.sites[1].element, "O2-");
    }

    #[test]
    fn test_oxidized_formula() {
        let s = parse_str(
            r#"{"lattice": {"matrix": [[5,0,0],[0,5,0],[0,0,5]]},
                "sites": [
                  {"species": [{"element": "Fe", "occu": 1, "oxidation_state": 3}], "abc": [0, 0, 0]},
                  {"species": [{"element": "Fe", "occu": 1, "oxidation_state": 3}], "abc": [0.5, 0, 0]},
                  {"species": [{"element": "O", "occu": 1, "oxidation_state": -2}], "abc": [0, 0.5, 0]},
                  {"species": [{"element": "O", "occu": 1, "oxidation_state": -2}], "abc": [0, 0, 0.5]},
                  {"species": [{"element": "O", "occu": 1, "oxidation_state": -2}], "abc": [0.5, 0.5, 0.5]}
                ]}"#,
        )
        .unwrap();
        assert_eq!(s.sites[0].element, "Fe3+");
        assert_eq!(s.formula(), "Fe2O3");
    }

    #[test]
    fn test_read_file() {
        let path = std::env::temp_dir().join(format!("lattice-scene-si-{}.json", std::process::id()));
        std::fs::write(&path, PYMATGEN_SI).unwrap();
        let s = read(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(s.len(), 2);
        assert_eq!(s.formula(), "Si");

        assert!(matches!(read(&path), Err(StructureReadError::Io(_))));
    }

    #[test]
    fn test_missing_fields_and_bad_lattice() {
        assert!(matches!(
            parse_str(r#"{"sites": []}"#),
            Err(StructureReadError::Json(_))
        ));
        assert!(matches!(
            parse_str(r#"{"lattice": [[0,0,0],[0,1,0],[0,0,1]], "sites": []}"#),
            Err(StructureReadError::Lattice(LatticeError::ZeroBasisVector { axis: 'a', .. }))
        ));
        assert!(matches!(
            parse_str(r#"{"lattice": [[1,0,0],[0,1,0],[0,0,1]], "sites": [{"species": [], "abc": [0,0,0]}]}"#),
            Err(StructureReadError::EmptySpecies { site: 0 })
        ));
    }
}
