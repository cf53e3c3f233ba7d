//! Cellplot command-line interface.
//!
//! Generate vector-based crystal unit-cell overlays from Euler angles:
//! ```sh
//! cellplot --type hexagonal --eulers 12 23 34 --axes --perspective
//! cellplot --type cubic --batch scan.ang --scale 7 --label
//! ```
//!
//! The output is a TikZ script; turning it into a PDF or PNG is left to a
//! LaTeX toolchain.

mod batch;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cellplot_core::emit::{ScriptEmitter, TikzEmitter, TikzOptions};
use cellplot_core::lattice::{CellRatios, CrystalVector, LatticeType};
use cellplot_core::pipeline::{build_scene, SceneSpec};
use cellplot_core::projection::Projection;
use cellplot_core::rotation::EulerAngles;

#[derive(Parser)]
#[command(name = "cellplot")]
#[command(about = "Generate vector-based crystal unit-cell overlays from Euler angles")]
#[command(version)]
struct Cli {
    /// Lattice type of the unit cell.
    #[arg(long = "type", default_value = "cubic", help_heading = "Geometry")]
    lattice: LatticeType,

    /// Bunge (3-1-3) Euler angles.
    #[arg(
        long,
        num_args = 3,
        value_names = ["PHI1", "PHI", "PHI2"],
        default_values_t = [0.0, 0.0, 0.0],
        allow_negative_numbers = true,
        help_heading = "Geometry"
    )]
    eulers: Vec<f64>,

    /// Euler angles are given in radians.
    #[arg(long, help_heading = "Geometry")]
    radians: bool,

    /// Unit-cell c/a ratio (defaults to the lattice convention).
    #[arg(short = 'c', value_name = "C/A", help_heading = "Geometry")]
    c_over_a: Option<f64>,

    /// Unit-cell b/a ratio.
    #[arg(short = 'b', value_name = "B/A", help_heading = "Geometry")]
    b_over_a: Option<f64>,

    /// Show both coordinate frames (global and crystal).
    #[arg(long, help_heading = "Plotting")]
    axes: bool,

    /// Show the global (lab) coordinate frame.
    #[arg(long, help_heading = "Plotting")]
    globalaxes: bool,

    /// Show the crystal coordinate frame.
    #[arg(long, help_heading = "Plotting")]
    crystalaxes: bool,

    /// Draw a vector given in the crystal frame.
    #[arg(long, num_args = 3, value_names = ["U", "V", "W"], allow_negative_numbers = true, help_heading = "Plotting")]
    crystalvector: Option<Vec<f64>>,

    /// Draw a vector given in the lab frame.
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true, help_heading = "Plotting")]
    globalvector: Option<Vec<f64>>,

    /// Use perspective instead of orthographic projection.
    #[arg(long, help_heading = "Plotting")]
    perspective: bool,

    /// Perspective view distance along z.
    #[arg(long, default_value_t = 8.0, help_heading = "Plotting")]
    distance: f64,

    /// Opacity of the cell outline [0, 1].
    #[arg(long, default_value_t = 0.8, help_heading = "Plotting")]
    opacity: f64,

    /// Output file name (derived from lattice and angles if omitted).
    #[arg(long, help_heading = "Figure")]
    name: Option<PathBuf>,

    /// Emit a standalone LaTeX document instead of a bare tikzpicture.
    #[arg(long, help_heading = "Figure")]
    standalone: bool,

    /// EDAX/TSL orientation map file to process in batch.
    #[arg(long, value_name = "FILE", help_heading = "Batch processing")]
    batch: Option<PathBuf>,

    /// Diagonal of the batch bounding box in drawing units.
    #[arg(long, default_value_t = 7.0, help_heading = "Batch processing")]
    scale: f64,

    /// Number each unit cell in the batch layout.
    #[arg(long, help_heading = "Batch processing")]
    label: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut ratios = CellRatios::conventional(cli.lattice);
    if let Some(b) = cli.b_over_a {
        ratios.b_over_a = b;
    }
    if let Some(c) = cli.c_over_a {
        ratios.c_over_a = c;
    }

    let projection = if cli.perspective {
        Projection::Perspective { view_distance: cli.distance }
    } else {
        Projection::Orthographic
    };

    let emitter = TikzEmitter::new(TikzOptions {
        opacity: cli.opacity,
        standalone: cli.standalone,
        ..Default::default()
    });

    let (scene, default_name) = match &cli.batch {
        Some(path) => {
            let job = batch::BatchJob {
                lattice: cli.lattice,
                ratios,
                projection,
                scale: cli.scale,
                label: cli.label,
                radians: cli.radians,
            };
            let scene = batch::run_batch(&job, path)?;
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("batch");
            (scene, format!("unitcell_{}_{}.tex", cli.lattice, stem))
        }
        None => {
            let angles = parse_angles(&cli.eulers, cli.radians);
            let mut spec = SceneSpec::new(cli.lattice, angles);
            spec.ratios = ratios;
            spec.projection = projection;
            spec.global_axes = cli.axes || cli.globalaxes;
            spec.crystal_axes = cli.axes || cli.crystalaxes;
            spec.crystal_vector = cli
                .crystalvector
                .as_ref()
                .map(|v| CrystalVector::new(v[0], v[1], v[2]));
            spec.lab_vector = cli.globalvector.as_ref().map(|v| [v[0], v[1], v[2]]);

            let scene = build_scene(&spec)?;
            (scene, output_basename(cli.lattice, &angles))
        }
    };

    // Serialise fully in memory first so a failure never leaves a partial
    // output file behind.
    let script = emitter.emit(&scene);
    let path = cli.name.unwrap_or_else(|| PathBuf::from(default_name));
    std::fs::write(&path, script)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("scene with {} primitives emitted", scene.len());
    println!("Script written to: {}", path.display());
    Ok(())
}

/// Build normalised angles from the three CLI values.
fn parse_angles(eulers: &[f64], radians: bool) -> EulerAngles {
    let angles = if radians {
        EulerAngles::from_radians(eulers[0], eulers[1], eulers[2])
    } else {
        EulerAngles::new(eulers[0], eulers[1], eulers[2])
    };
    angles.normalised()
}

/// Deterministic output name encoding the lattice and rounded angles,
/// e.g. `unitcell_hexagonal_12_23_34.tex`.
fn output_basename(lattice: LatticeType, angles: &EulerAngles) -> String {
    format!(
        "unitcell_{}_{}_{}_{}.tex",
        lattice,
        angles.phi1.round() as i64,
        angles.cap_phi.round() as i64,
        angles.phi2.round() as i64
    )
}
