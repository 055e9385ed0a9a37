//! wgpu render backend for the glyph formation scene.
//!
//! Draws one instanced extruded-text mesh per glyph position, lit by an
//! ambient term and one shadow-casting directional light. Glyph geometry
//! comes from a font file. The camera orbits the origin with damped rotation.
//!
//! # Invariants
//! - Renderer never mutates scene state.
//! - Camera motion is NOT part of the scene controller.
//! - Shape rotation runs on wall-clock time, independent of the render frame rate.

mod camera;
mod font;
mod glyph;
mod gpu;
mod shaders;

pub use camera::OrbitCamera;
pub use font::{FontFace, GlyphOutline};
pub use glyph::{GlyphError, GlyphMesh, GlyphVertex};
pub use gpu::WgpuRenderer;
