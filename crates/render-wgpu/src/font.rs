//! Font faces and glyph outlines.
//!
//! Two sources are understood: three.js style `.typeface.json` faces and
//! TrueType/OpenType fonts. Both are flattened into closed polygons in em
//! units (1.0 = one em, y up).

use crate::glyph::GlyphError;
use glam::Vec2;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use ttf_parser::OutlineBuilder;

const BUNDLED_FACE: &str = include_str!("../fonts/blueblood-block.typeface.json");

#[derive(Debug, Deserialize)]
struct TypefaceFile {
    resolution: f32,
    glyphs: HashMap<String, TypefaceGlyph>,
    #[serde(rename = "familyName", default)]
    family_name: String,
}

#[derive(Debug, Deserialize)]
struct TypefaceGlyph {
    ha: f32,
    #[serde(default)]
    o: Option<String>,
}

/// A loaded font, ready to outline characters.
#[derive(Debug)]
pub enum FontFace {
    Typeface {
        family: String,
        resolution: f32,
        glyphs: HashMap<char, (f32, String)>,
    },
    /// Raw TrueType/OpenType data, validated on load.
    OpenType(Vec<u8>),
}

/// One character as closed polygons, in em units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphOutline {
    pub contours: Vec<Vec<Vec2>>,
    /// Horizontal advance to the next character.
    pub advance: f32,
}

impl FontFace {
    /// The built-in block face.
    pub fn bundled() -> Result<Self, GlyphError> {
        Self::from_typeface_json(BUNDLED_FACE)
    }

    /// Load by extension: `.json` is read as a typeface face, anything else
    /// as TrueType/OpenType.
    pub fn load(path: &Path) -> Result<Self, GlyphError> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let face = if is_json {
            let text = std::fs::read_to_string(path).map_err(|source| GlyphError::FontIo {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_typeface_json(&text)?
        } else {
            let data = std::fs::read(path).map_err(|source| GlyphError::FontIo {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_font_bytes(data)?
        };
        tracing::info!(path = %path.display(), family = %face.family(), "font loaded");
        Ok(face)
    }

    pub fn from_typeface_json(text: &str) -> Result<Self, GlyphError> {
        let file: TypefaceFile =
            serde_json::from_str(text).map_err(|e| GlyphError::InvalidFont(e.to_string()))?;
        if file.resolution <= 0.0 || file.resolution.is_nan() {
            return Err(GlyphError::InvalidFont(format!(
                "resolution must be positive, got {}",
                file.resolution
            )));
        }
        let glyphs = file
            .glyphs
            .into_iter()
            .filter_map(|(key, glyph)| {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some((c, (glyph.ha, glyph.o.unwrap_or_default()))),
                    _ => None,
                }
            })
            .collect();
        Ok(Self::Typeface {
            family: file.family_name,
            resolution: file.resolution,
            glyphs,
        })
    }

    pub fn from_font_bytes(data: Vec<u8>) -> Result<Self, GlyphError> {
        let face =
            ttf_parser::Face::parse(&data, 0).map_err(|e| GlyphError::InvalidFont(e.to_string()))?;
        if face.units_per_em() == 0 {
            return Err(GlyphError::InvalidFont("units per em is zero".into()));
        }
        Ok(Self::OpenType(data))
    }

    pub fn family(&self) -> String {
        match self {
            Self::Typeface { family, .. } => family.clone(),
            Self::OpenType(data) => ttf_parser::Face::parse(data, 0)
                .ok()
                .and_then(|face| {
                    face.names()
                        .into_iter()
                        .filter(|name| name.name_id == ttf_parser::name_id::FAMILY)
                        .find_map(|name| name.to_string())
                })
                .unwrap_or_default(),
        }
    }

    /// Outline `c`, splitting every curve into `segments` lines.
    pub fn outline(&self, c: char, segments: u32) -> Result<GlyphOutline, GlyphError> {
        match self {
            Self::Typeface {
                resolution, glyphs, ..
            } => {
                let (advance, commands) = glyphs.get(&c).ok_or(GlyphError::UnsupportedChar(c))?;
                let mut sink = ContourSink::new(*resolution, segments);
                replay_typeface(commands, &mut sink)
                    .map_err(|msg| GlyphError::InvalidFont(format!("glyph {c:?}: {msg}")))?;
                Ok(GlyphOutline {
                    contours: sink.finish(),
                    advance: advance / resolution,
                })
            }
            Self::OpenType(data) => {
                let face = ttf_parser::Face::parse(data, 0)
                    .map_err(|e| GlyphError::InvalidFont(e.to_string()))?;
                let id = face.glyph_index(c).ok_or(GlyphError::UnsupportedChar(c))?;
                let units = f32::from(face.units_per_em());
                let mut sink = ContourSink::new(units, segments);
                // Blank glyphs such as space have no outline.
                face.outline_glyph(id, &mut sink);
                Ok(GlyphOutline {
                    contours: sink.finish(),
                    advance: f32::from(face.glyph_hor_advance(id).unwrap_or(0)) / units,
                })
            }
        }
    }
}

/// Feed a typeface `o` string into `sink`.
///
/// Commands: `m x y`, `l x y`, `q x y cx cy` and `b x y c1x c1y c2x c2y`,
/// with the end point before the control points.
fn replay_typeface(commands: &str, sink: &mut ContourSink) -> Result<(), String> {
    let mut tokens = commands.split_whitespace();
    let num = |tokens: &mut std::str::SplitWhitespace<'_>| -> Result<f32, String> {
        let token = tokens.next().ok_or("truncated outline")?;
        token
            .parse::<f32>()
            .map_err(|_| format!("bad number {token:?}"))
    };
    while let Some(action) = tokens.next() {
        match action {
            "m" => {
                let (x, y) = (num(&mut tokens)?, num(&mut tokens)?);
                sink.move_to(x, y);
            }
            "l" => {
                let (x, y) = (num(&mut tokens)?, num(&mut tokens)?);
                sink.line_to(x, y);
            }
            "q" => {
                let (x, y) = (num(&mut tokens)?, num(&mut tokens)?);
                let (cx, cy) = (num(&mut tokens)?, num(&mut tokens)?);
                sink.quad_to(cx, cy, x, y);
            }
            "b" => {
                let (x, y) = (num(&mut tokens)?, num(&mut tokens)?);
                let (c1x, c1y) = (num(&mut tokens)?, num(&mut tokens)?);
                let (c2x, c2y) = (num(&mut tokens)?, num(&mut tokens)?);
                sink.curve_to(c1x, c1y, c2x, c2y, x, y);
            }
            "z" => sink.close(),
            other => return Err(format!("unknown command {other:?}")),
        }
    }
    Ok(())
}

/// Collects flattened contours from outline callbacks.
struct ContourSink {
    /// Font units per em.
    units: f32,
    segments: u32,
    contours: Vec<Vec<Vec2>>,
    current: Vec<Vec2>,
}

impl ContourSink {
    fn new(units: f32, segments: u32) -> Self {
        Self {
            units,
            segments: segments.max(1),
            contours: Vec::new(),
            current: Vec::new(),
        }
    }

    fn point(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y) / self.units
    }

    fn last(&self) -> Vec2 {
        self.current.last().copied().unwrap_or(Vec2::ZERO)
    }

    fn push(&mut self, p: Vec2) {
        if self.current.last() != Some(&p) {
            self.current.push(p);
        }
    }

    fn flush(&mut self) {
        let mut contour = std::mem::take(&mut self.current);
        if contour.len() > 1 && contour.first() == contour.last() {
            contour.pop();
        }
        if contour.len() >= 3 {
            self.contours.push(contour);
        }
    }

    fn finish(mut self) -> Vec<Vec<Vec2>> {
        self.flush();
        self.contours
    }
}

impl OutlineBuilder for ContourSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.flush();
        let p = self.point(x, y);
        self.current.push(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.push(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (p0, c, p1) = (self.last(), self.point(x1, y1), self.point(x, y));
        for i in 1..=self.segments {
            let t = i as f32 / self.segments as f32;
            let u = 1.0 - t;
            self.push(p0 * (u * u) + c * (2.0 * u * t) + p1 * (t * t));
        }
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (p0, c1, c2, p1) = (
            self.last(),
            self.point(x1, y1),
            self.point(x2, y2),
            self.point(x, y),
        );
        for i in 1..=self.segments {
            let t = i as f32 / self.segments as f32;
            let u = 1.0 - t;
            self.push(
                p0 * (u * u * u)
                    + c1 * (3.0 * u * u * t)
                    + c2 * (3.0 * u * t * t)
                    + p1 * (t * t * t),
            );
        }
    }

    fn close(&mut self) {
        self.flush();
    }
}
