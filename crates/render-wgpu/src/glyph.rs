//! Extruded text geometry built from font outlines.
//!
//! Each character's contours are filled with the non-zero rule for the front
//! and back caps, and every contour edge becomes a side wall facing away from
//! the filled area.

use crate::font::{FontFace, GlyphOutline};
use blueblood_render::GlyphStyle;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
};
use std::path::PathBuf;

/// Errors from loading a font or building glyph geometry.
#[derive(Debug, thiserror::Error)]
pub enum GlyphError {
    #[error("glyph text is empty")]
    EmptyText,
    #[error("font has no glyph for {0:?}")]
    UnsupportedChar(char),
    #[error("failed to read font {path}: {source}")]
    FontIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid font: {0}")]
    InvalidFont(String),
    #[error("tessellation failed: {0}")]
    Tessellation(String),
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GlyphVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Triangle mesh for one glyph instance. The text baseline starts at the
/// origin and runs along +x; the back cap sits on z = 0.
#[derive(Debug, Clone, Default)]
pub struct GlyphMesh {
    pub vertices: Vec<GlyphVertex>,
    pub indices: Vec<u32>,
    /// Largest x reached by the geometry.
    pub width: f32,
    /// Largest y reached by the geometry.
    pub height: f32,
}

impl GlyphMesh {
    /// Load the font named by `style` (or the built-in face) and extrude `style.text`.
    pub fn build(style: &GlyphStyle) -> Result<Self, GlyphError> {
        let face = match &style.font {
            Some(path) => FontFace::load(path)?,
            None => FontFace::bundled()?,
        };
        Self::from_face(&face, style)
    }

    /// Extrude `style.text` with an already loaded face.
    pub fn from_face(face: &FontFace, style: &GlyphStyle) -> Result<Self, GlyphError> {
        if style.text.is_empty() {
            return Err(GlyphError::EmptyText);
        }
        let mut mesh = Self::default();
        let mut pen = 0.0;
        for c in style.text.chars() {
            let outline = face.outline(c, style.curve_segments)?;
            mesh.extrude(&outline, pen, style.size, style.depth)?;
            pen += outline.advance * style.size;
        }
        for v in &mesh.vertices {
            mesh.width = mesh.width.max(v.position[0]);
            mesh.height = mesh.height.max(v.position[1]);
        }
        Ok(mesh)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn extrude(
        &mut self,
        outline: &GlyphOutline,
        pen: f32,
        size: f32,
        depth: f32,
    ) -> Result<(), GlyphError> {
        if outline.contours.is_empty() {
            return Ok(());
        }
        let place = |p: Vec2, z: f32| Vec3::new(pen + p.x * size, p.y * size, z);

        for [a, b, c] in fill(&outline.contours)? {
            self.triangle([place(a, depth), place(b, depth), place(c, depth)], Vec3::Z);
            self.triangle([place(a, 0.0), place(c, 0.0), place(b, 0.0)], -Vec3::Z);
        }

        for contour in &outline.contours {
            for (i, &a) in contour.iter().enumerate() {
                let b = contour[(i + 1) % contour.len()];
                let edge = b - a;
                if edge.length_squared() == 0.0 {
                    continue;
                }
                // The wall faces the edge's right-hand side unless that side is filled.
                let right = Vec2::new(edge.y, -edge.x).normalize();
                let side = (a + b) * 0.5 + right * 1e-4;
                let (from, to) = if winding(side, &outline.contours) == 0 {
                    (a, b)
                } else {
                    (b, a)
                };
                let base = place(from, 0.0);
                self.quad(base, place(to, 0.0) - base, Vec3::Z * depth);
            }
        }
        Ok(())
    }

    /// Append a triangle, flipping it if needed so it winds counter-clockwise
    /// when seen from `normal`.
    fn triangle(&mut self, mut corners: [Vec3; 3], normal: Vec3) {
        let facing = (corners[1] - corners[0]).cross(corners[2] - corners[0]).dot(normal);
        if facing == 0.0 {
            return;
        }
        if facing < 0.0 {
            corners.swap(1, 2);
        }
        let base = self.vertices.len() as u32;
        for corner in corners {
            self.vertices.push(GlyphVertex {
                position: corner.to_array(),
                normal: normal.to_array(),
            });
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Append a quad spanning `origin + s*u + t*v`; it faces along `u × v`.
    fn quad(&mut self, origin: Vec3, u: Vec3, v: Vec3) {
        let normal = u.cross(v).normalize().to_array();
        let base = self.vertices.len() as u32;
        for corner in [origin, origin + u, origin + u + v, origin + v] {
            self.vertices.push(GlyphVertex {
                position: corner.to_array(),
                normal,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
}

/// Triangulate closed contours with the non-zero fill rule.
fn fill(contours: &[Vec<Vec2>]) -> Result<Vec<[Vec2; 3]>, GlyphError> {
    let mut builder = Path::builder();
    for contour in contours {
        let Some((first, rest)) = contour.split_first() else {
            continue;
        };
        builder.begin(point(first.x, first.y));
        for p in rest {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(true);
    }
    let path = builder.build();

    let mut buffers: VertexBuffers<Vec2, u32> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate_path(
            &path,
            &FillOptions::default().with_fill_rule(FillRule::NonZero),
            &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| {
                Vec2::new(v.position().x, v.position().y)
            }),
        )
        .map_err(|e| GlyphError::Tessellation(e.to_string()))?;

    Ok(buffers
        .indices
        .chunks_exact(3)
        .map(|t| {
            [
                buffers.vertices[t[0] as usize],
                buffers.vertices[t[1] as usize],
                buffers.vertices[t[2] as usize],
            ]
        })
        .collect())
}

/// Winding number of `p` with respect to closed polygons.
fn winding(p: Vec2, contours: &[Vec<Vec2>]) -> i32 {
    let mut wn = 0;
    for contour in contours {
        for (i, &a) in contour.iter().enumerate() {
            let b = contour[(i + 1) % contour.len()];
            let side = (b - a).perp_dot(p - a);
            if a.y <= p.y {
                if b.y > p.y && side > 0.0 {
                    wn += 1;
                }
            } else if b.y <= p.y && side < 0.0 {
                wn -= 1;
            }
        }
    }
    wn
}
