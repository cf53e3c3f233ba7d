//! TikZ script emitter.
//!
//! Produces a `tikzpicture` environment with one `\draw`/`\node` statement
//! per primitive, styled by [`PrimitiveClass`]: cell edges black over a
//! translucent white fill, global axes thin black, crystal axes red,
//! crystal vectors blue, lab-frame vectors green. Coordinates are printed
//! with fixed 4-decimal precision so output is reproducible byte-for-byte.

use std::fmt::Write;

use nalgebra::Point2;

use crate::scene::{Primitive2D, PrimitiveClass, Scene};

use super::ScriptEmitter;

/// Styling options for TikZ output.
#[derive(Debug, Clone, PartialEq)]
pub struct TikzOptions {
    /// Line width of cell edges (pt).
    pub line_width: f64,
    /// Stroke opacity of cell edges, clamped into [0, 1].
    pub opacity: f64,
    /// Wrap the picture in a standalone document so it compiles on its own.
    pub standalone: bool,
}

impl Default for TikzOptions {
    fn default() -> Self {
        Self { line_width: 0.8, opacity: 0.8, standalone: false }
    }
}

/// Emits TikZ drawing scripts for consumption by a LaTeX toolchain.
#[derive(Debug, Clone, Default)]
pub struct TikzEmitter {
    pub options: TikzOptions,
}

impl TikzEmitter {
    pub fn new(options: TikzOptions) -> Self {
        Self { options }
    }

    fn coord(p: &Point2<f64>) -> String {
        format!("({:.4},{:.4})", p.x, p.y)
    }

    fn draw_style(&self, class: PrimitiveClass) -> String {
        match class {
            PrimitiveClass::CellEdge => format!(
                "color=black,line width={:.2}pt,opacity={:.2}",
                self.options.line_width,
                self.options.opacity.clamp(0.0, 1.0)
            ),
            PrimitiveClass::GlobalAxis => "color=black,line width=0.50pt".to_string(),
            PrimitiveClass::CrystalAxis => "color=red,line width=1.50pt".to_string(),
            PrimitiveClass::CrystalVector => "color=blue,line width=3.00pt".to_string(),
            PrimitiveClass::LabVector => "color=green,line width=3.00pt".to_string(),
            PrimitiveClass::Annotation => "color=black".to_string(),
        }
    }
}

impl ScriptEmitter for TikzEmitter {
    fn emit(&self, scene: &Scene) -> String {
        let mut out = String::new();
        if self.options.standalone {
            out.push_str("\\documentclass[tikz,border=2pt]{standalone}\n");
            out.push_str("\\usetikzlibrary{arrows.meta}\n");
            out.push_str("\\begin{document}\n");
        }
        out.push_str("\\begin{tikzpicture}[x=1cm,y=1cm]\n");

        for primitive in scene.primitives() {
            match primitive {
                Primitive2D::Segment { a, b, class } => {
                    let _ = writeln!(
                        out,
                        "\\draw[{}] {} -- {};",
                        self.draw_style(*class),
                        Self::coord(a),
                        Self::coord(b)
                    );
                }
                Primitive2D::Arrow { a, b, class } => {
                    let _ = writeln!(
                        out,
                        "\\draw[{},-{{Stealth}}] {} -- {};",
                        self.draw_style(*class),
                        Self::coord(a),
                        Self::coord(b)
                    );
                }
                Primitive2D::Label { at, text, class } => {
                    let _ = writeln!(
                        out,
                        "\\node[{},font=\\footnotesize] at {} {{{}}};",
                        self.draw_style(*class),
                        Self::coord(at),
                        text
                    );
                }
            }
        }

        out.push_str("\\end{tikzpicture}\n");
        if self.options.standalone {
            out.push_str("\\end{document}\n");
        }
        out
    }
}
