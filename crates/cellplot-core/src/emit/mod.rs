//! Serialisation of assembled scenes into renderer script text.
//!
//! Emitters are the only renderer-specific part of the pipeline. Swapping
//! the target renderer means providing another [`ScriptEmitter`]
//! implementation; the geometry stages never change.

pub mod tikz;

pub use tikz::{TikzEmitter, TikzOptions};

use crate::scene::Scene;

/// Serialises a scene into a textual drawing script, one statement per
/// primitive in scene order, with whatever header/footer boilerplate the
/// target renderer requires. Emission is infallible and deterministic:
/// identical scenes always produce byte-identical text.
pub trait ScriptEmitter {
    fn emit(&self, scene: &Scene) -> String;
}
