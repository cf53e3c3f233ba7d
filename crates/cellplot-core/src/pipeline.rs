//! The straight-line rendering pipeline.
//!
//! [`SceneSpec`] captures everything that determines a scene; two identical
//! specs always produce identical scenes. [`build_scene`] runs the stages
//! in order — build the canonical cell, rotate, project, assemble — with
//! input validation at each stage boundary. Every stage is a pure function,
//! so failures are terminal and never retried.

use nalgebra::{Point2, Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::emit::ScriptEmitter;
use crate::lattice::{CellRatios, CrystalVector, LatticeError, LatticeType, UnitCellGeometry};
use crate::projection::{project, Projection, ProjectionError};
use crate::rotation::{rotate_points, EulerAngles};
use crate::scene::{assemble, AxisSet, PrimitiveClass, Scene, SceneError, SceneLayers};

/// Axis labels are anchored this far along the axis, past the tip.
const AXIS_LABEL_POS: f64 = 1.25;

/// Crystal-frame indicators are drawn slightly larger than the global ones
/// so both stay legible when overlaid.
const CRYSTAL_AXES_SCALE: f64 = 1.25;

/// Errors from any stage of the pipeline. All are raised synchronously and
/// abort the invocation before anything is emitted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Lattice(#[from] LatticeError),

    #[error("invalid Euler angles: {0}")]
    InvalidAngles(String),

    #[error("invalid vector: {0}")]
    InvalidVector(String),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Full description of one unit-cell scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSpec {
    pub lattice: LatticeType,
    pub ratios: CellRatios,
    pub angles: EulerAngles,
    #[serde(default)]
    pub projection: Projection,
    /// Draw the fixed laboratory coordinate frame.
    #[serde(default)]
    pub global_axes: bool,
    /// Draw the rotated crystal coordinate frame.
    #[serde(default)]
    pub crystal_axes: bool,
    /// Arrow in the crystal basis, rotated with the cell.
    #[serde(default)]
    pub crystal_vector: Option<CrystalVector>,
    /// Arrow in the fixed lab frame, never rotated.
    #[serde(default)]
    pub lab_vector: Option<[f64; 3]>,
}

impl SceneSpec {
    /// A spec with conventional ratios, orthographic projection, and no
    /// overlays.
    pub fn new(lattice: LatticeType, angles: EulerAngles) -> Self {
        Self {
            lattice,
            ratios: CellRatios::conventional(lattice),
            angles,
            projection: Projection::default(),
            global_axes: false,
            crystal_axes: false,
            crystal_vector: None,
            lab_vector: None,
        }
    }
}

/// Run the geometry stages and assemble the ordered primitive list.
pub fn build_scene(spec: &SceneSpec) -> Result<Scene, PipelineError> {
    if !spec.angles.is_finite() {
        return Err(PipelineError::InvalidAngles(format!(
            "non-finite component in (φ1={}, Φ={}, φ2={})",
            spec.angles.phi1, spec.angles.cap_phi, spec.angles.phi2
        )));
    }
    if let Some(v) = &spec.crystal_vector {
        if !v.is_finite() {
            return Err(PipelineError::InvalidVector(format!(
                "non-finite crystal vector component in ({}, {}, {})",
                v.u, v.v, v.w
            )));
        }
    }
    if let Some(v) = &spec.lab_vector {
        if !v.iter().all(|c| c.is_finite()) {
            return Err(PipelineError::InvalidVector(format!(
                "non-finite lab vector component in ({}, {}, {})",
                v[0], v[1], v[2]
            )));
        }
    }

    let cell = UnitCellGeometry::build(spec.lattice, &spec.ratios);
    let rotation = spec.angles.rotation_matrix();

    let rotated = rotate_points(&cell.vertices, &rotation);
    let projected = project(&rotated, &spec.projection)?;
    let cell_edges = cell
        .edges
        .iter()
        .map(|&(i, j)| (projected[i], projected[j]))
        .collect();

    let global_axes = if spec.global_axes {
        Some(axis_set(
            [Vector3::x(), Vector3::y(), Vector3::z()],
            ["$x$", "$y$", "$z$"],
            1.0,
            None,
            &spec.projection,
            PrimitiveClass::GlobalAxis,
        )?)
    } else {
        None
    };

    let crystal_axes = if spec.crystal_axes {
        Some(axis_set(
            cell.basis.map(|a| a.normalize()),
            ["$a$", "$b$", "$c$"],
            CRYSTAL_AXES_SCALE,
            Some(&rotation),
            &spec.projection,
            PrimitiveClass::CrystalAxis,
        )?)
    } else {
        None
    };

    let crystal_vector = match &spec.crystal_vector {
        Some(v) => {
            let tip = rotation * Point3::from(v.to_cartesian(&cell.basis));
            Some(arrow(tip, &spec.projection)?)
        }
        None => None,
    };

    let lab_vector = match &spec.lab_vector {
        Some(v) => Some(arrow(Point3::new(v[0], v[1], v[2]), &spec.projection)?),
        None => None,
    };

    let scene = assemble(SceneLayers {
        cell_edges,
        global_axes,
        crystal_axes,
        lab_vector,
        crystal_vector,
    })?;
    log::debug!(
        "assembled {} scene with {} primitives",
        spec.lattice,
        scene.len()
    );
    Ok(scene)
}

/// Build and serialise a scene in one call.
pub fn render(spec: &SceneSpec, emitter: &dyn ScriptEmitter) -> Result<String, PipelineError> {
    Ok(emitter.emit(&build_scene(spec)?))
}

/// Project three axis indicators from the origin, with label anchors placed
/// past each tip. The optional rotation makes the set follow the crystal
/// frame; without it the set marks the fixed lab frame.
fn axis_set(
    directions: [Vector3<f64>; 3],
    labels: [&str; 3],
    scale: f64,
    rotation: Option<&Rotation3<f64>>,
    projection: &Projection,
    class: PrimitiveClass,
) -> Result<AxisSet, ProjectionError> {
    // Batch: origin, three tips, three label anchors.
    let mut points = vec![Point3::origin()];
    for dir in &directions {
        points.push(Point3::from(dir * scale));
    }
    for dir in &directions {
        points.push(Point3::from(dir * scale * AXIS_LABEL_POS));
    }
    if let Some(r) = rotation {
        points = rotate_points(&points, r);
    }
    let projected = project(&points, projection)?;

    let origin = projected[0];
    Ok(AxisSet {
        segments: [
            (origin, projected[1]),
            (origin, projected[2]),
            (origin, projected[3]),
        ],
        labels: [
            (projected[4], labels[0].to_string()),
            (projected[5], labels[1].to_string()),
            (projected[6], labels[2].to_string()),
        ],
        class,
    })
}

/// Project a single arrow from the origin to `tip`.
fn arrow(
    tip: Point3<f64>,
    projection: &Projection,
) -> Result<(Point2<f64>, Point2<f64>), ProjectionError> {
    let projected = project(&[Point3::origin(), tip], projection)?;
    Ok((projected[0], projected[1]))
}
