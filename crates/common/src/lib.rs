//! Shared types and configuration for the glyph formation scene.

pub mod config;
pub mod types;

pub use config::{AnimationStrategy, ConfigError, SceneConfig, SpringParams};
pub use types::{FALLBACK_TARGET, GlyphElement, NUM_POINTS, Point};
