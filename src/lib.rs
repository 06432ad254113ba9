//! Measurement overlays for marker objects in a 3D viewport: distances and
//! axis-aligned dimension lines between two markers, interior angle wedges
//! between three.

pub mod editor;
pub mod engine;
pub mod measure;
pub mod render;
pub mod scene;

pub use engine::{Engine, EngineError};
