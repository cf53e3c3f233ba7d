//! Composition of projected geometry into an ordered 2D primitive list.
//!
//! The assembler performs no geometric computation: every coordinate it
//! receives has already been rotated and projected. Its sole job is layer
//! order, which is fixed: cell edges first, then axis indicators, then
//! vector arrows, so that arrows always render on top of the cell outline.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from scene assembly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("scene contains no cell edges")]
    EmptyScene,
}

/// Styling class of a primitive, used by emitters to pick colour and line
/// width. Carries no geometric meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveClass {
    CellEdge,
    GlobalAxis,
    CrystalAxis,
    CrystalVector,
    LabVector,
    Annotation,
}

/// A single drawable element in drawing-plane coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive2D {
    Segment { a: Point2<f64>, b: Point2<f64>, class: PrimitiveClass },
    Arrow { a: Point2<f64>, b: Point2<f64>, class: PrimitiveClass },
    Label { at: Point2<f64>, text: String, class: PrimitiveClass },
}

impl Primitive2D {
    pub fn class(&self) -> PrimitiveClass {
        match self {
            Primitive2D::Segment { class, .. }
            | Primitive2D::Arrow { class, .. }
            | Primitive2D::Label { class, .. } => *class,
        }
    }

    /// The same primitive shifted in the drawing plane.
    pub fn translated(&self, offset: &Vector2<f64>) -> Self {
        match self {
            Primitive2D::Segment { a, b, class } => {
                Primitive2D::Segment { a: a + offset, b: b + offset, class: *class }
            }
            Primitive2D::Arrow { a, b, class } => {
                Primitive2D::Arrow { a: a + offset, b: b + offset, class: *class }
            }
            Primitive2D::Label { at, text, class } => {
                Primitive2D::Label { at: at + offset, text: text.clone(), class: *class }
            }
        }
    }
}

/// An ordered sequence of 2D primitives. Order is rendering layer order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    primitives: Vec<Primitive2D>,
}

impl Scene {
    pub fn primitives(&self) -> &[Primitive2D] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// The whole scene shifted in the drawing plane. Used for batch layouts
    /// that place one cell per measurement point.
    pub fn translated(&self, offset: &Vector2<f64>) -> Scene {
        Scene {
            primitives: self.primitives.iter().map(|p| p.translated(offset)).collect(),
        }
    }

    /// Append another scene's primitives after this scene's, preserving
    /// both orderings.
    pub fn extend(&mut self, other: Scene) {
        self.primitives.extend(other.primitives);
    }

    /// Append a single primitive at the top layer.
    pub fn push(&mut self, primitive: Primitive2D) {
        self.primitives.push(primitive);
    }
}

/// A set of three axis indicators from a common origin, with pre-positioned
/// labels (label anchors are computed upstream, alongside the projection).
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSet {
    /// The three axis segments, each (origin, tip).
    pub segments: [(Point2<f64>, Point2<f64>); 3],
    /// Label anchor and text for each axis.
    pub labels: [(Point2<f64>, String); 3],
    /// Styling class for the whole set.
    pub class: PrimitiveClass,
}

/// The projected layers handed to the assembler, lowest first.
#[derive(Debug, Clone, Default)]
pub struct SceneLayers {
    /// Projected cell edges. Must be non-empty.
    pub cell_edges: Vec<(Point2<f64>, Point2<f64>)>,
    /// Fixed laboratory frame indicators, if requested.
    pub global_axes: Option<AxisSet>,
    /// Rotated crystal frame indicators, if requested.
    pub crystal_axes: Option<AxisSet>,
    /// Lab-frame vector arrow (origin, tip), if requested.
    pub lab_vector: Option<(Point2<f64>, Point2<f64>)>,
    /// Crystal vector arrow (origin, tip), if requested. Always the top layer.
    pub crystal_vector: Option<(Point2<f64>, Point2<f64>)>,
}

/// Build the ordered scene from projected layers.
///
/// Layer order is fixed: cell edges, global axes, crystal axes, lab vector,
/// crystal vector. Within an axis set the three segments precede the three
/// labels. Fails with [`SceneError::EmptyScene`] when no cell edges were
/// supplied.
pub fn assemble(layers: SceneLayers) -> Result<Scene, SceneError> {
    if layers.cell_edges.is_empty() {
        return Err(SceneError::EmptyScene);
    }

    let mut scene = Scene::default();
    for (a, b) in layers.cell_edges {
        scene.push(Primitive2D::Segment { a, b, class: PrimitiveClass::CellEdge });
    }
    for axes in [layers.global_axes, layers.crystal_axes].into_iter().flatten() {
        for (a, b) in axes.segments {
            scene.push(Primitive2D::Segment { a, b, class: axes.class });
        }
        for (at, text) in axes.labels {
            scene.push(Primitive2D::Label { at, text, class: PrimitiveClass::Annotation });
        }
    }
    if let Some((a, b)) = layers.lab_vector {
        scene.push(Primitive2D::Arrow { a, b, class: PrimitiveClass::LabVector });
    }
    if let Some((a, b)) = layers.crystal_vector {
        scene.push(Primitive2D::Arrow { a, b, class: PrimitiveClass::CrystalVector });
    }
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    fn axis_set(class: PrimitiveClass) -> AxisSet {
        let o = p(0.0, 0.0);
        AxisSet {
            segments: [(o, p(1.0, 0.0)), (o, p(0.0, 1.0)), (o, p(-0.5, -0.5))],
            labels: [
                (p(1.25, 0.0), "$x$".to_string()),
                (p(0.0, 1.25), "$y$".to_string()),
                (p(-0.6, -0.6), "$z$".to_string()),
            ],
            class,
        }
    }

    #[test]
    fn test_empty_edges_rejected() {
        let layers = SceneLayers { crystal_vector: Some((p(0.0, 0.0), p(1.0, 1.0))), ..Default::default() };
        assert_eq!(assemble(layers).unwrap_err(), SceneError::EmptyScene);
    }

    #[test]
    fn test_layer_order_edges_axes_vector() {
        let layers = SceneLayers {
            cell_edges: vec![(p(0.0, 0.0), p(1.0, 0.0)), (p(1.0, 0.0), p(1.0, 1.0))],
            crystal_axes: Some(axis_set(PrimitiveClass::CrystalAxis)),
            crystal_vector: Some((p(0.0, 0.0), p(0.7, 0.7))),
            ..Default::default()
        };
        let scene = assemble(layers).unwrap();
        let classes: Vec<_> = scene.primitives().iter().map(|pr| pr.class()).collect();
        assert_eq!(
            classes,
            vec![
                PrimitiveClass::CellEdge,
                PrimitiveClass::CellEdge,
                PrimitiveClass::CrystalAxis,
                PrimitiveClass::CrystalAxis,
                PrimitiveClass::CrystalAxis,
                PrimitiveClass::Annotation,
                PrimitiveClass::Annotation,
                PrimitiveClass::Annotation,
                PrimitiveClass::CrystalVector,
            ]
        );
        // The vector arrow is the last primitive, so it renders on top.
        assert!(matches!(scene.primitives().last(), Some(Primitive2D::Arrow { .. })));
    }

    #[test]
    fn test_global_axes_precede_crystal_axes() {
        let layers = SceneLayers {
            cell_edges: vec![(p(0.0, 0.0), p(1.0, 0.0))],
            global_axes: Some(axis_set(PrimitiveClass::GlobalAxis)),
            crystal_axes: Some(axis_set(PrimitiveClass::CrystalAxis)),
            ..Default::default()
        };
        let scene = assemble(layers).unwrap();
        let first_global = scene
            .primitives()
            .iter()
            .position(|pr| pr.class() == PrimitiveClass::GlobalAxis)
            .unwrap();
        let first_crystal = scene
            .primitives()
            .iter()
            .position(|pr| pr.class() == PrimitiveClass::CrystalAxis)
            .unwrap();
        assert!(first_global < first_crystal);
    }

    #[test]
    fn test_translated_shifts_all_primitives() {
        let layers = SceneLayers {
            cell_edges: vec![(p(0.0, 0.0), p(1.0, 0.0))],
            crystal_vector: Some((p(0.0, 0.0), p(0.5, 0.5))),
            ..Default::default()
        };
        let scene = assemble(layers).unwrap().translated(&Vector2::new(2.0, -1.0));
        match &scene.primitives()[0] {
            Primitive2D::Segment { a, b, .. } => {
                assert_eq!(*a, p(2.0, -1.0));
                assert_eq!(*b, p(3.0, -1.0));
            }
            other => panic!("expected segment, got {other:?}"),
        }
    }
}
