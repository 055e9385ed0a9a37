use blueblood_kernel::Scene;
use glam::Vec3;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(25.0, 15.0, 25.0),
            target: Vec3::ZERO,
            fov_degrees: 60.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads scene state and a view configuration, then produces
/// output. It never moves a glyph; positions are controller-owned.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Human-readable dump of the scene. Used by the CLI, logs and tests.
#[derive(Debug)]
pub struct DebugTextRenderer {
    /// Print each glyph's position and target.
    pub per_glyph: bool,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self { per_glyph: true }
    }

    /// Header only, no per-glyph lines.
    pub fn compact() -> Self {
        Self { per_glyph: false }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let summary = scene.summary();
        let mut out = String::new();
        out.push_str(&format!(
            "=== Scene (frame={}, shape={} [{}], strategy={}) ===\n",
            summary.frame, summary.shape, summary.index, summary.strategy
        ));
        out.push_str(&format!(
            "Glyphs: {}  Targets: {}  Max distance: {:.3}\n",
            scene.elements().len(),
            summary.filled_slots,
            summary.max_distance
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));

        if self.per_glyph {
            for (slot, p) in scene.positions().enumerate() {
                let t = scene.target_for(slot);
                out.push_str(&format!(
                    "  [{slot:02}] pos=({:.2}, {:.2}, {:.2}) -> ({:.2}, {:.2}, {:.2})\n",
                    p.x, p.y, p.z, t.x, t.y, t.z
                ));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueblood_common::{NUM_POINTS, SceneConfig};
    use std::time::Duration;

    fn scene() -> Scene {
        Scene::new(&SceneConfig {
            seed: Some(1),
            ..SceneConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn debug_renderer_fresh_scene() {
        let output = DebugTextRenderer::new().render(&scene(), &RenderView::default());
        assert!(output.contains("frame=0"));
        assert!(output.contains("shape=cube [0]"));
        assert!(output.contains("strategy=lerp"));
        assert_eq!(output.matches("pos=").count(), NUM_POINTS);
    }

    #[test]
    fn debug_renderer_shows_fallback_slot() {
        let mut s = scene();
        s.advance_clock(Duration::from_millis(6000));
        let output = DebugTextRenderer::new().render(&s, &RenderView::default());
        assert!(output.contains("shape=pyramid [2]"));
        assert!(output.contains("Targets: 95"));
        assert!(output.contains("[95] pos=(0.00, 0.00, 0.00) -> (0.00, 0.00, 0.00)"));
    }

    #[test]
    fn compact_omits_glyphs() {
        let output = DebugTextRenderer::compact().render(&scene(), &RenderView::default());
        assert!(!output.contains("pos="));
        assert!(output.contains("Glyphs: 96"));
    }

    #[test]
    fn default_renderer_matches_new() {
        let output = DebugTextRenderer::default().render(&scene(), &RenderView::default());
        assert!(DebugTextRenderer::default().per_glyph);
        assert_eq!(output.matches("pos=").count(), NUM_POINTS);
    }

    #[test]
    fn render_view_default() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 60.0);
        assert_eq!(view.eye, Vec3::new(25.0, 15.0, 25.0));
        assert_eq!(view.target, Vec3::ZERO);
    }
}
