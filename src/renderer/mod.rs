//! Rendering
//!
//! The effects controller produces a retained scene; surfaces consume the
//! per-frame diffs. The WebGPU pipeline tessellates circles and rings.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Primitive, PrimitiveKey, RenderSurface, Scene, SceneDiff, TallySurface};
