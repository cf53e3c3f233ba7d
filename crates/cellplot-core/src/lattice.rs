//! Canonical unit-cell geometry for each supported lattice type.
//!
//! Every lattice type maps to a fixed vertex list and edge-connectivity
//! table describing the outline of one unit cell, centred on the origin.
//! The tables are constants: building the same lattice twice yields
//! identical geometry. Axis-length ratios (b/a, c/a) scale the canonical
//! cell; the a axis always has unit length.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from lattice-type resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LatticeError {
    #[error("unknown lattice type '{0}' (valid: cubic, tetragonal, orthorhombic, hexagonal)")]
    UnknownLatticeType(String),
}

/// The supported Bravais lattice families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatticeType {
    Cubic,
    Tetragonal,
    Orthorhombic,
    Hexagonal,
}

impl LatticeType {
    /// All supported lattice types, in display order.
    pub const ALL: [LatticeType; 4] = [
        LatticeType::Cubic,
        LatticeType::Tetragonal,
        LatticeType::Orthorhombic,
        LatticeType::Hexagonal,
    ];

    /// Lower-case tag used on the command line and in file names.
    pub fn tag(&self) -> &'static str {
        match self {
            LatticeType::Cubic => "cubic",
            LatticeType::Tetragonal => "tetragonal",
            LatticeType::Orthorhombic => "orthorhombic",
            LatticeType::Hexagonal => "hexagonal",
        }
    }
}

impl fmt::Display for LatticeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for LatticeType {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cubic" => Ok(LatticeType::Cubic),
            "tetragonal" => Ok(LatticeType::Tetragonal),
            "orthorhombic" => Ok(LatticeType::Orthorhombic),
            "hexagonal" => Ok(LatticeType::Hexagonal),
            other => Err(LatticeError::UnknownLatticeType(other.to_string())),
        }
    }
}

/// Axis-length ratios of the unit cell, relative to the a axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellRatios {
    /// b/a ratio. Only meaningful for orthorhombic cells.
    pub b_over_a: f64,
    /// c/a ratio. Meaningful for tetragonal, orthorhombic, and hexagonal cells.
    pub c_over_a: f64,
}

impl CellRatios {
    /// Conventional defaults per lattice type: 1.0 everywhere except the
    /// hexagonal close-packed ideal c/a of 1.633.
    pub fn conventional(lattice: LatticeType) -> Self {
        let c_over_a = match lattice {
            LatticeType::Hexagonal => 1.633,
            _ => 1.0,
        };
        Self { b_over_a: 1.0, c_over_a }
    }
}

impl Default for CellRatios {
    fn default() -> Self {
        Self { b_over_a: 1.0, c_over_a: 1.0 }
    }
}

/// A direction expressed in fractional coordinates (u, v, w) of the
/// lattice's own basis, drawn as an arrow from the cell origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrystalVector {
    pub u: f64,
    pub v: f64,
    pub w: f64,
}

impl CrystalVector {
    pub fn new(u: f64, v: f64, w: f64) -> Self {
        Self { u, v, w }
    }

    /// Whether all components are finite (rejects NaN and infinities).
    pub fn is_finite(&self) -> bool {
        self.u.is_finite() && self.v.is_finite() && self.w.is_finite()
    }

    /// Resolve the fractional coordinates against a lattice basis:
    /// u·a1 + v·a2 + w·a3.
    pub fn to_cartesian(&self, basis: &[Vector3<f64>; 3]) -> Vector3<f64> {
        basis[0] * self.u + basis[1] * self.v + basis[2] * self.w
    }
}

/// Edge table shared by all cuboid-shaped cells. Vertex index bit k selects
/// the sign of axis k, so connected corners differ in exactly one bit.
const CUBOID_EDGES: [(usize, usize); 12] = [
    // bottom ring (z = -c/2)
    (0, 1),
    (1, 3),
    (3, 2),
    (2, 0),
    // top ring (z = +c/2)
    (4, 5),
    (5, 7),
    (7, 6),
    (6, 4),
    // verticals
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// The canonical geometry of one unit cell: vertices, edge connectivity,
/// and the real-space basis vectors used to resolve crystal vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCellGeometry {
    /// Cell corner positions, centred on the origin.
    pub vertices: Vec<Point3<f64>>,
    /// Pairs of vertex indices forming the cell outline.
    pub edges: Vec<(usize, usize)>,
    /// Lattice basis vectors a1, a2, a3 (a1 has unit length).
    pub basis: [Vector3<f64>; 3],
}

impl UnitCellGeometry {
    /// Build the canonical cell for a lattice type. Pure function of its
    /// arguments; repeated calls return identical geometry.
    pub fn build(lattice: LatticeType, ratios: &CellRatios) -> Self {
        match lattice {
            LatticeType::Cubic => Self::cuboid(1.0, 1.0),
            LatticeType::Tetragonal => Self::cuboid(1.0, ratios.c_over_a),
            LatticeType::Orthorhombic => Self::cuboid(ratios.b_over_a, ratios.c_over_a),
            LatticeType::Hexagonal => Self::hexagonal_prism(ratios.c_over_a),
        }
    }

    /// Cuboid cell with unit a edge: corners at (±1/2, ±b/2, ±c/2).
    fn cuboid(b: f64, c: f64) -> Self {
        let half = [0.5, 0.5 * b, 0.5 * c];
        let vertices = (0..8)
            .map(|i| {
                let sign = |bit: usize| if i >> bit & 1 == 1 { 1.0 } else { -1.0 };
                Point3::new(sign(0) * half[0], sign(1) * half[1], sign(2) * half[2])
            })
            .collect();
        Self {
            vertices,
            edges: CUBOID_EDGES.to_vec(),
            basis: [
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, b, 0.0),
                Vector3::new(0.0, 0.0, c),
            ],
        }
    }

    /// Hexagonal prism: a regular hexagon of circumradius 1 at z = ±c/2,
    /// i.e. the 6-fold sweep of the edge (1, 0, -c/2)–(1, 0, c/2).
    fn hexagonal_prism(c: f64) -> Self {
        let mut vertices = Vec::with_capacity(12);
        for &z in &[-0.5 * c, 0.5 * c] {
            for k in 0..6 {
                let theta = std::f64::consts::FRAC_PI_3 * k as f64;
                vertices.push(Point3::new(theta.cos(), theta.sin(), z));
            }
        }

        let mut edges = Vec::with_capacity(18);
        for k in 0..6 {
            edges.push((k, (k + 1) % 6)); // bottom ring
        }
        for k in 0..6 {
            edges.push((6 + k, 6 + (k + 1) % 6)); // top ring
        }
        for k in 0..6 {
            edges.push((k, 6 + k)); // verticals
        }

        Self {
            vertices,
            edges,
            basis: [
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(-0.5, 3.0_f64.sqrt() / 2.0, 0.0),
                Vector3::new(0.0, 0.0, c),
            ],
        }
    }
}
