use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A target position produced by a shape generator.
///
/// Points carry no identity beyond their index in the generated sequence.
pub type Point = Vec3;

/// Number of glyphs in the scene. Constant for the lifetime of the process.
///
/// Must stay a multiple of 6 so the cube and torus tile evenly.
pub const NUM_POINTS: usize = 96;

/// Where an element heads when the active shape leaves its slot unfilled.
pub const FALLBACK_TARGET: Point = Vec3::ZERO;

/// One animated glyph, bound to slot `i` of whichever shape is active.
///
/// Elements never own shape data; they keep their in-flight position and
/// velocity across shape changes and only their target moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphElement {
    pub position: Vec3,
    /// Only the spring animator integrates velocity; the lerp animator leaves it at zero.
    pub velocity: Vec3,
}

impl Default for GlyphElement {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
        }
    }
}

impl GlyphElement {
    /// Distance left to travel towards `target`.
    pub fn distance_to(&self, target: Point) -> f32 {
        self.position.distance(target)
    }
}
