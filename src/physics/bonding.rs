// src/physics/bonding.rs

use crate::model::elements::covalent_radius;
use crate::model::structure::Structure;
use crate::utils::geometry::{self, Point3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Pairs closer than this (Å) are treated as overlapping sites, not bonds.
pub const MIN_BOND_DISTANCE: f64 = 0.4;

// --- 1. ERROR HANDLING ---

#[derive(Debug, Clone, PartialEq)]
pub enum BondError {
    NonFiniteCoordinate { site: usize },
    SearchTooLarge { requested: usize, max: usize },
    InvalidConfig(String),
}

impl fmt::Display for BondError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BondError::NonFiniteCoordinate { site } => {
                write!(f, "Site {} has a non-finite fractional coordinate", site)
            }
            BondError::SearchTooLarge { requested, max } => write!(
                f,
                "Neighbor search too large: {} pair evaluations requested, max {} allowed",
                requested, max
            ),
            BondError::InvalidConfig(msg) => write!(f, "Invalid bond configuration: {}", msg),
        }
    }
}

impl std::error::Error for BondError {}

// --- 2. CONFIGURATION ---

/// Rule deciding which candidate neighbors of a site count as bonded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NeighborStrategy {
    /// Every neighbor within `(1 + tolerance)` of the site's shortest distance.
    MinimumDistance { tolerance: f64 },
    /// Every neighbor closer than `(r_cov(i) + r_cov(j)) * tolerance`.
    /// Pairs involving an element without a tabulated radius are skipped.
    CovalentRadii { tolerance: f64 },
}

impl Default for NeighborStrategy {
    fn default() -> Self {
        NeighborStrategy::MinimumDistance { tolerance: 0.1 }
    }
}

/// What happens to a bond reaching into a neighboring cell when image atoms
/// are not drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffCellBonds {
    #[default]
    Omit,
    /// Draw both halves up to the cell boundary.
    Clip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BondConfig {
    pub strategy: NeighborStrategy,

    /// Candidates farther than this (Å) are never considered.
    pub max_search_radius: f64,

    /// Images searched per lattice direction: `-image_range..=image_range`.
    pub image_range: i32,

    /// Allow a site to bond to its own periodic images.
    pub include_self_images: bool,

    /// Render bonds to images at the image position, outside the cell.
    pub draw_image_atoms: bool,

    /// Used only when `draw_image_atoms` is off.
    pub off_cell: OffCellBonds,

    /// Keep only bonds selected from both ends.
    pub hide_incomplete_edges: bool,

    /// Upper bound on `sites² × shell` distance evaluations.
    pub max_pair_evaluations: usize,

    /// Cylinder radius (Å) and color of rendered bonds.
    pub radius: f64,
    pub color: String,
}

impl Default for BondConfig {
    fn default() -> Self {
        Self {
            strategy: NeighborStrategy::default(),
            max_search_radius: 4.0,
            image_range: 1,
            include_self_images: false,
            draw_image_atoms: true,
            off_cell: OffCellBonds::Omit,
            hide_incomplete_edges: true,
            max_pair_evaluations: 50_000_000,
            radius: 0.1,
            color: "#808080".to_string(),
        }
    }
}

impl BondConfig {
    pub fn validate(&self) -> Result<(), BondError> {
        let tolerance = match self.strategy {
            NeighborStrategy::MinimumDistance { tolerance } => tolerance,
            NeighborStrategy::CovalentRadii { tolerance } => tolerance,
        };
        if !(tolerance >= 0.0 && tolerance.is_finite()) {
            return Err(BondError::InvalidConfig(format!(
                "tolerance must be non-negative, got {}",
                tolerance
            )));
        }
        if !(self.max_search_radius > 0.0) {
            return Err(BondError::InvalidConfig(format!(
                "max_search_radius must be positive, got {}",
                self.max_search_radius
            )));
        }
        if !(0..=4).contains(&self.image_range) {
            return Err(BondError::InvalidConfig(format!(
                "image_range must be within 0..=4, got {}",
                self.image_range
            )));
        }
        if !(self.radius > 0.0) {
            return Err(BondError::InvalidConfig(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        Ok(())
    }
}

// --- 3. RESULTS ---

/// One bond between site `i` in the home cell and site `j` translated by
/// `image` lattice vectors. Stored once per unordered pair: `i <= j`, and for
/// `i == j` the image is lexicographically positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
    pub image: [i32; 3],
    pub distance: f64,
    /// Cartesian position of site `i`.
    pub start: Point3,
    /// Cartesian position of the (possibly translated) site `j`.
    pub end: Point3,
    /// Both endpoints selected each other.
    pub mutual: bool,
}

impl Bond {
    pub fn crosses_cell(&self) -> bool {
        self.image != [0, 0, 0]
    }
}

#[derive(Debug, Clone, Default)]
pub struct BondGraph {
    bonds: Vec<Bond>,
    n_sites: usize,
}

impl BondGraph {
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }

    /// Number of bond ends touching site `idx`.
    pub fn coordination(&self, idx: usize) -> usize {
        self.bonds
            .iter()
            .map(|b| (b.i == idx) as usize + (b.j == idx) as usize)
            .sum()
    }

    pub fn coordination_numbers(&self) -> Vec<usize> {
        (0..self.n_sites).map(|i| self.coordination(i)).collect()
    }

    /// Cartesian endpoint pairs to render, applying the image policy of `config`.
    pub fn segments(&self, structure: &Structure, config: &BondConfig) -> Vec<(Point3, Point3)> {
        let mut out = Vec::with_capacity(self.bonds.len());
        for bond in &self.bonds {
            if !bond.crosses_cell() || config.draw_image_atoms {
                out.push((bond.start, bond.end));
                continue;
            }

            if config.off_cell == OffCellBonds::Clip {
                let fi = structure.sites[bond.i].frac;
                let fj = structure.sites[bond.j].frac;
                let t = bond.image.map(|v| v as f64);

                // i towards the image of j, then j towards the image of i
                let halves = [
                    (fi, geometry::sub(geometry::add(fj, t), fi)),
                    (fj, geometry::sub(geometry::sub(fi, t), fj)),
                ];
                for (from, dir) in halves {
                    let s = clip_to_cell(from, dir);
                    if s > 0.0 {
                        let to = geometry::add(from, geometry::scale(dir, s));
                        out.push((
                            structure.lattice.to_cartesian(from),
                            structure.lattice.to_cartesian(to),
                        ));
                    }
                }
            }
        }
        out
    }
}

// --- 4. MAIN CALCULATION ---

#[derive(Debug, Clone, Copy)]
struct Candidate {
    j: usize,
    image: [i32; 3],
    distance: f64,
}

/// Periodic nearest-neighbor bond search.
///
/// # Algorithm
/// 1. For every site `i`, measure the distance to every site `j` translated by
///    each image in the `{-r..=r}³` shell
/// 2. Select neighbors of `i` with the configured [`NeighborStrategy`]
/// 3. Mark directed selections that are reciprocated as mutual
/// 4. Merge `(i, j, t)` with `(j, i, -t)` into a single [`Bond`]
///
/// A site with no candidate inside `max_search_radius` simply has no bonds.
pub fn find_bonds(structure: &Structure, config: &BondConfig) -> Result<BondGraph, BondError> {
    config.validate()?;

    let n = structure.sites.len();
    if n == 0 {
        return Ok(BondGraph::default());
    }

    let side = (2 * config.image_range + 1) as usize;
    let requested = n.saturating_mul(n).saturating_mul(side * side * side);
    if requested > config.max_pair_evaluations {
        return Err(BondError::SearchTooLarge {
            requested,
            max: config.max_pair_evaluations,
        });
    }

    if let Some(site) = structure.sites.iter().position(|s| !geometry::is_finite(s.frac)) {
        return Err(BondError::NonFiniteCoordinate { site });
    }

    let cart: Vec<Point3> = (0..n).map(|i| structure.cart_position(i)).collect();
    let shell = image_shell(structure, config.image_range);

    // --- Directed selection, parallel over sites ---
    let selected: Vec<Vec<Candidate>> = (0..n)
        .into_par_iter()
        .map(|i| select_neighbors(i, structure, &cart, &shell, config))
        .collect();

    let directed: HashSet<(usize, usize, [i32; 3])> = selected
        .iter()
        .enumerate()
        .flat_map(|(i, picks)| picks.iter().map(move |c| (i, c.j, c.image)))
        .collect();

    // --- Merge both directions ---
    let mut seen = HashSet::new();
    let mut bonds = Vec::new();
    let mut hidden = 0usize;

    for (i, picks) in selected.iter().enumerate() {
        for c in picks {
            let key = canonical(i, c.j, c.image);
            if !seen.insert(key) {
                continue;
            }

            let mutual = directed.contains(&(c.j, i, negate(c.image)));
            if config.hide_incomplete_edges && !mutual {
                hidden += 1;
                continue;
            }

            let (bi, bj, bt) = key;
            bonds.push(Bond {
                i: bi,
                j: bj,
                image: bt,
                distance: c.distance,
                start: cart[bi],
                end: geometry::add(cart[bj], structure.lattice.translation(bt)),
                mutual,
            });
        }
    }

    log::debug!(
        "Bond search: {} sites, {} images, {} bonds ({} incomplete hidden)",
        n,
        shell.len(),
        bonds.len(),
        hidden
    );

    Ok(BondGraph { bonds, n_sites: n })
}

fn select_neighbors(
    i: usize,
    structure: &Structure,
    cart: &[Point3],
    shell: &[([i32; 3], Point3)],
    config: &BondConfig,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for (j, pos_j) in cart.iter().enumerate() {
        if j == i && !config.include_self_images {
            continue;
        }
        for (image, offset) in shell {
            if j == i && *image == [0, 0, 0] {
                continue;
            }
            let distance = geometry::distance(cart[i], geometry::add(*pos_j, *offset));
            if distance < MIN_BOND_DISTANCE || distance > config.max_search_radius {
                continue;
            }
            candidates.push(Candidate {
                j,
                image: *image,
                distance,
            });
        }
    }

    match config.strategy {
        NeighborStrategy::MinimumDistance { tolerance } => {
            let d_min = candidates
                .iter()
                .map(|c| c.distance)
                .fold(f64::INFINITY, f64::min);
            let cutoff = d_min * (1.0 + tolerance);
            candidates.retain(|c| c.distance <= cutoff);
        }
        NeighborStrategy::CovalentRadii { tolerance } => {
            let r_i = covalent_radius(&structure.sites[i].element);
            candidates.retain(|c| {
                let r_j = covalent_radius(&structure.sites[c.j].element);
                r_i > 0.0 && r_j > 0.0 && c.distance < (r_i + r_j) * tolerance
            });
        }
    }

    candidates
}

/// Image translations in fixed nested order, with their cartesian offsets.
fn image_shell(structure: &Structure, range: i32) -> Vec<([i32; 3], Point3)> {
    let mut shell = Vec::new();
    for na in -range..=range {
        for nb in -range..=range {
            for nc in -range..=range {
                let t = [na, nb, nc];
                shell.push((t, structure.lattice.translation(t)));
            }
        }
    }
    shell
}

fn negate(t: [i32; 3]) -> [i32; 3] {
    [-t[0], -t[1], -t[2]]
}

fn canonical(i: usize, j: usize, t: [i32; 3]) -> (usize, usize, [i32; 3]) {
    if i < j || (i == j && t > [0, 0, 0]) {
        (i, j, t)
    } else {
        (j, i, negate(t))
    }
}

/// Largest `s` in [0, 1] keeping `from + s * dir` inside the unit cube.
fn clip_to_cell(from: Point3, dir: Point3) -> f64 {
    let mut s = 1.0f64;
    for k in 0..3 {
        if dir[k] > 0.0 {
            s = s.min((1.0 - from[k]) / dir[k]);
        } else if dir[k] < 0.0 {
            s = s.min(-from[k] / dir[k]);
        }
    }
    s.max(0.0)
}
