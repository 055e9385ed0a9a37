use glam::{Mat4, Vec3};
use std::path::PathBuf;

/// One ambient term plus one directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient_intensity: f32,
    /// Position of the directional light; it shines towards the origin.
    pub directional_position: Vec3,
    pub directional_intensity: f32,
    /// Edge length of the square shadow depth texture, in texels.
    pub shadow_map_size: u32,
    /// Radius around the origin covered by the shadow map.
    pub shadow_radius: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.5,
            directional_position: Vec3::new(15.0, 20.0, 10.0),
            directional_intensity: 2.5,
            shadow_map_size: 2048,
            shadow_radius: 12.5,
        }
    }
}

impl Lighting {
    /// Unit vector pointing from the scene towards the light.
    pub fn direction_to_light(&self) -> Vec3 {
        self.directional_position.normalize_or(Vec3::Y)
    }

    /// Orthographic light-space transform for the shadow pass.
    ///
    /// Everything within `shadow_radius` of the origin lands inside the
    /// depth range [0, 1] and the x/y range [-1, 1].
    pub fn shadow_view_proj(&self) -> Mat4 {
        let dir = self.direction_to_light();
        let r = self.shadow_radius.max(f32::EPSILON);
        let up = if dir.y.abs() > 0.99 { Vec3::Z } else { Vec3::Y };
        let view = Mat4::look_at_rh(dir * 2.0 * r, Vec3::ZERO, up);
        let proj = Mat4::orthographic_rh(-r, r, -r, r, 0.5 * r, 3.5 * r);
        proj * view
    }
}

/// Metallic-roughness surface parameters for every glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMaterial {
    pub color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
}

impl Default for GlyphMaterial {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            metalness: 0.5,
            roughness: 0.3,
        }
    }
}

/// Extruded text drawn at each glyph position.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphStyle {
    pub text: String,
    /// Font file: a `.typeface.json` face or a TrueType/OpenType font.
    /// `None` selects the built-in block face.
    pub font: Option<PathBuf>,
    /// Em size in world units.
    pub size: f32,
    /// Extrusion depth along +z.
    pub depth: f32,
    /// Line segments per curved outline segment.
    pub curve_segments: u32,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            text: "BB".into(),
            font: None,
            size: 0.7,
            depth: 0.2,
            curve_segments: 12,
        }
    }
}

/// Everything about a frame's look that is not scene state.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStyle {
    /// Clear colour, linear RGB.
    pub background: [f32; 3],
    pub lighting: Lighting,
    pub material: GlyphMaterial,
    pub glyph: GlyphStyle,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            background: srgb_hex(0x0a0a0a),
            lighting: Lighting::default(),
            material: GlyphMaterial::default(),
            glyph: GlyphStyle::default(),
        }
    }
}

/// Decode `0xRRGGBB` into linear RGB.
pub fn srgb_hex(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_scene() {
        let style = SceneStyle::default();
        assert_eq!(style.glyph.text, "BB");
        assert_eq!(style.lighting.ambient_intensity, 0.5);
        assert_eq!(style.material.metalness, 0.5);
        assert_eq!(style.material.roughness, 0.3);
        assert_eq!(style.lighting.shadow_map_size, 2048);
        assert_eq!(style.glyph.curve_segments, 12);
        assert!(style.glyph.font.is_none());
    }

    #[test]
    fn shadow_volume_covers_formations() {
        let lighting = Lighting::default();
        let vp = lighting.shadow_view_proj();
        // Torus outer edge plus one glyph width is the widest formation.
        let reach = 11.5;
        let mut samples = Vec::new();
        for x in [-1.0, 0.0, 1.0] {
            for y in [-1.0, 0.0, 1.0] {
                for z in [-1.0, 0.0, 1.0] {
                    samples.push(Vec3::new(x, y, z).normalize_or_zero() * reach);
                }
            }
        }
        for p in samples {
            let clip = vp.project_point3(p);
            assert!(clip.x.abs() <= 1.0 && clip.y.abs() <= 1.0, "{p} -> {clip}");
            assert!((0.0..=1.0).contains(&clip.z), "{p} -> {clip}");
        }
    }

    #[test]
    fn shadow_depth_grows_away_from_light() {
        let lighting = Lighting::default();
        let vp = lighting.shadow_view_proj();
        let toward = vp.project_point3(lighting.direction_to_light() * 5.0);
        let away = vp.project_point3(-lighting.direction_to_light() * 5.0);
        assert!(toward.z < away.z);
    }

    #[test]
    fn light_direction_is_unit() {
        let d = Lighting::default().direction_to_light();
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert!(d.y > 0.0);
    }

    #[test]
    fn hex_decoding() {
        assert_eq!(srgb_hex(0xffffff), [1.0, 1.0, 1.0]);
        assert_eq!(srgb_hex(0x000000), [0.0, 0.0, 0.0]);
        let bg = srgb_hex(0x0a0a0a);
        assert!(bg[0] > 0.0 && bg[0] < 0.01);
    }
}
