//! Batch processing of EDAX/TSL orientation map files.
//!
//! Each data row of an `.ang` (or `.ctf`-style) scan file carries the Bunge
//! Euler angles in its first three columns followed by the x/y map
//! coordinates. One unit cell is rendered per measurement point, translated
//! to its map position scaled so the point cloud's bounding-box diagonal
//! matches the requested drawing size.

use std::path::Path;

use anyhow::{bail, Context, Result};
use nalgebra::Vector2;

use cellplot_core::lattice::{CellRatios, LatticeType};
use cellplot_core::pipeline::{build_scene, SceneSpec};
use cellplot_core::projection::Projection;
use cellplot_core::rotation::EulerAngles;
use cellplot_core::scene::{Primitive2D, PrimitiveClass, Scene};

/// One measurement point of an orientation map.
#[derive(Debug, Clone, PartialEq)]
pub struct Orientation {
    pub angles: EulerAngles,
    pub x: f64,
    pub y: f64,
}

/// Settings for a batch layout, shared by every cell in the map.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub lattice: LatticeType,
    pub ratios: CellRatios,
    pub projection: Projection,
    /// Bounding-box diagonal of the layout in drawing units.
    pub scale: f64,
    /// Number the cells in file order.
    pub label: bool,
    /// Angles in the file are radians rather than degrees.
    pub radians: bool,
}

/// Read an orientation file and compose one scene containing every cell.
pub fn run_batch(job: &BatchJob, path: &Path) -> Result<Scene> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    // .ang files start the data columns with φ1; other TSL exports carry a
    // leading index column.
    let skip_leading = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| !e.eq_ignore_ascii_case("ang"))
        .unwrap_or(true);

    let orientations = parse_orientation_file(&content, skip_leading, job.radians)?;
    if orientations.is_empty() {
        bail!("{} contains no orientation rows", path.display());
    }
    log::info!("{}: {} orientations", path.display(), orientations.len());

    let offsets = layout_offsets(&orientations, job.scale);

    let mut combined = Scene::default();
    for (orientation, offset) in orientations.iter().zip(&offsets) {
        let mut spec = SceneSpec::new(job.lattice, orientation.angles);
        spec.ratios = job.ratios;
        spec.projection = job.projection;
        let scene = build_scene(&spec)?;
        combined.extend(scene.translated(offset));
    }
    if job.label {
        for (i, offset) in offsets.iter().enumerate() {
            combined.push(Primitive2D::Label {
                at: nalgebra::Point2::from(*offset),
                text: format!("{}", i + 1),
                class: PrimitiveClass::Annotation,
            });
        }
    }
    Ok(combined)
}

/// Parse the rows of an orientation file. Lines starting with `#` are
/// comments; fields are separated by whitespace or, if the first data line
/// contains one, by commas.
pub fn parse_orientation_file(
    content: &str,
    skip_leading_column: bool,
    radians: bool,
) -> Result<Vec<Orientation>> {
    let offset = usize::from(skip_leading_column);
    let mut rows = Vec::new();

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = if line.contains(',') {
            line.split(',').map(str::trim).collect()
        } else {
            line.split_whitespace().collect()
        };
        if fields.len() < offset + 5 {
            bail!(
                "line {}: expected at least {} columns, found {}",
                lineno + 1,
                offset + 5,
                fields.len()
            );
        }
        let mut values = [0.0_f64; 5];
        for (v, field) in values.iter_mut().zip(&fields[offset..offset + 5]) {
            *v = field
                .parse()
                .with_context(|| format!("line {}: invalid number '{}'", lineno + 1, field))?;
        }
        let angles = if radians {
            EulerAngles::from_radians(values[0], values[1], values[2])
        } else {
            EulerAngles::new(values[0], values[1], values[2])
        };
        rows.push(Orientation {
            angles: angles.normalised(),
            x: values[3],
            y: values[4],
        });
    }
    Ok(rows)
}

/// Drawing-plane offsets for the cells: map positions centred on their
/// bounding box and scaled so the box diagonal equals `scale`.
pub fn layout_offsets(orientations: &[Orientation], scale: f64) -> Vec<Vector2<f64>> {
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for o in orientations {
        min_x = min_x.min(o.x);
        min_y = min_y.min(o.y);
        max_x = max_x.max(o.x);
        max_y = max_y.max(o.y);
    }
    let centre = Vector2::new(0.5 * (min_x + max_x), 0.5 * (min_y + max_y));
    let diagonal = Vector2::new(max_x - min_x, max_y - min_y).norm();
    // A single point (or identical points) has no extent to normalise.
    let factor = if diagonal > 0.0 { scale / diagonal } else { 1.0 };

    orientations
        .iter()
        .map(|o| (Vector2::new(o.x, o.y) - centre) * factor)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ANG_SAMPLE: &str = "\
# TSL OIM export
# phi1 PHI phi2 x y iq ci
12.0 23.0 34.0 0.0 0.0 120.3 0.9
45.0 10.0 0.0 2.0 0.0 118.1 0.8
90.0 90.0 90.0 2.0 1.5 119.9 0.7
";

    #[test]
    fn test_parse_skips_comments_and_reads_columns() {
        let rows = parse_orientation_file(ANG_SAMPLE, false, false).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].angles, EulerAngles::new(12.0, 23.0, 34.0));
        assert_relative_eq!(rows[2].x, 2.0);
        assert_relative_eq!(rows[2].y, 1.5);
    }

    #[test]
    fn test_parse_comma_separated_with_leading_column() {
        let content = "1, 12.0, 23.0, 34.0, 0.5, 0.25\n";
        let rows = parse_orientation_file(content, true, false).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].angles, EulerAngles::new(12.0, 23.0, 34.0));
        assert_relative_eq!(rows[0].x, 0.5);
    }

    #[test]
    fn test_parse_rejects_short_rows() {
        assert!(parse_orientation_file("1.0 2.0 3.0\n", false, false).is_err());
    }

    #[test]
    fn test_parse_converts_radians() {
        let content = format!("{} 0 0 0 0\n", std::f64::consts::PI);
        let rows = parse_orientation_file(&content, false, true).unwrap();
        assert_relative_eq!(rows[0].angles.phi1, 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_layout_is_centred_and_scaled() {
        let rows = parse_orientation_file(ANG_SAMPLE, false, false).unwrap();
        let offsets = layout_offsets(&rows, 5.0);
        // Bounding box is 2.0 × 1.5, diagonal 2.5, so the factor is 2.0.
        assert_relative_eq!(offsets[0].x, -2.0, epsilon = 1e-12);
        assert_relative_eq!(offsets[0].y, -1.5, epsilon = 1e-12);
        assert_relative_eq!(offsets[2].x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(offsets[2].y, 1.5, epsilon = 1e-12);
        // Centroid of min/max corners maps to the origin.
        let mid: Vector2<f64> = (offsets[0] + offsets[2]) / 2.0;
        assert_relative_eq!(mid.norm(), 0.0, epsilon = 1e-12);
    }
}
