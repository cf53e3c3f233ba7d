//! # Cellplot Core
//!
//! Geometry pipeline for rendering crystallographic unit cells as 2D
//! vector-drawing scripts. Given a lattice type, a set of Bunge Euler
//! angles, and a projection mode, the pipeline produces an ordered list of
//! 2D drawing primitives and serialises them into a TikZ script for an
//! external LaTeX toolchain to render.
//!
//! ## Pipeline
//!
//! The pipeline is a straight-line transform with no shared state, so
//! concurrent invocations need no coordination:
//!
//! 1. [`lattice`] — canonical unit-cell vertex/edge geometry per lattice type.
//! 2. [`rotation`] — Bunge 3-1-3 Euler rotation of all 3D points.
//! 3. [`projection`] — orthographic or perspective mapping to the drawing plane.
//! 4. [`scene`] — composition of the ordered 2D primitive list.
//! 5. [`emit`] — serialisation of the scene into renderer script text.
//!
//! [`pipeline`] ties the stages together behind a single
//! [`SceneSpec`](pipeline::SceneSpec) describing everything that determines
//! a scene.

pub mod emit;
pub mod lattice;
pub mod pipeline;
pub mod projection;
pub mod rotation;
pub mod scene;
