//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers only read the scene; the controller owns all positions.
//! - What a frame shows derives from the scene, the view and the style.

mod renderer;
mod style;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
pub use style::{GlyphMaterial, GlyphStyle, Lighting, SceneStyle, srgb_hex};

pub fn crate_info() -> &'static str {
    "blueblood-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
