//! Projection of rotated 3D points onto the 2D drawing plane.
//!
//! Two modes exist. Orthographic projection drops the z coordinate after
//! rotation. Perspective projection first scales x and y by
//! f = d / (d − z), where d is the view distance along z, so points nearer
//! the eye appear larger. As d → ∞ the perspective result converges to the
//! orthographic one.

use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the projection stage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error(
        "degenerate perspective: view distance {view_distance} does not exceed the scene depth {max_depth}"
    )]
    DegenerateProjection { view_distance: f64, max_depth: f64 },
}

/// Projection mode for mapping 3D scene points to the drawing plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Projection {
    /// Parallel projection: (x, y, z) → (x, y).
    Orthographic,
    /// Foreshortened projection with the eye at z = view_distance.
    Perspective { view_distance: f64 },
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Orthographic
    }
}

/// Project a set of points onto the drawing plane, preserving order so
/// downstream index references into the input stay valid.
///
/// Perspective mode requires the view distance to exceed the largest |z|
/// among the points; otherwise the scaling factor blows up or flips sign
/// and the projection fails with [`ProjectionError::DegenerateProjection`].
pub fn project(
    points: &[Point3<f64>],
    projection: &Projection,
) -> Result<Vec<Point2<f64>>, ProjectionError> {
    match *projection {
        Projection::Orthographic => Ok(points.iter().map(|p| Point2::new(p.x, p.y)).collect()),
        Projection::Perspective { view_distance } => {
            let max_depth = points.iter().map(|p| p.z.abs()).fold(0.0, f64::max);
            if !(view_distance > max_depth) {
                return Err(ProjectionError::DegenerateProjection { view_distance, max_depth });
            }
            Ok(points
                .iter()
                .map(|p| {
                    let f = view_distance / (view_distance - p.z);
                    Point2::new(f * p.x, f * p.y)
                })
                .collect())
        }
    }
}
