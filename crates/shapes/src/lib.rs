//! Shape Generators: fixed-length target point sets for the glyph formations.
//!
//! # Invariants
//! - Cube, sphere and torus are deterministic and fill all `NUM_POINTS` slots.
//! - The pyramid re-samples on every call and fills `5 * floor(NUM_POINTS / 5)`
//!   slots; callers fall back to the origin for the rest.
//! - Generators are total: no input can make them fail.

pub mod cube;
pub mod pyramid;
pub mod sphere;
pub mod torus;
pub mod verify;

pub use cube::{CubeParams, cube_points};
pub use pyramid::{PyramidParams, pyramid_points};
pub use sphere::{SphereParams, sphere_points};
pub use torus::{TorusParams, torus_points};
pub use verify::{ShapeError, verify_points};

use blueblood_common::Point;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The formations the scene rotates through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Cube,
    Sphere,
    Pyramid,
    Torus,
}

impl ShapeKind {
    /// Rotation order.
    pub const ALL: [ShapeKind; 4] = [Self::Cube, Self::Sphere, Self::Pyramid, Self::Torus];

    pub fn name(self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Sphere => "sphere",
            Self::Pyramid => "pyramid",
            Self::Torus => "torus",
        }
    }

    /// Whether repeated calls to [`generate`](Self::generate) return identical points.
    pub fn is_deterministic(self) -> bool {
        !matches!(self, Self::Pyramid)
    }

    /// Number of points the default generator yields.
    pub fn expected_len(self) -> usize {
        match self {
            Self::Cube => CubeParams::default().point_count(),
            Self::Sphere => SphereParams::default().count,
            Self::Pyramid => PyramidParams::default().point_count(),
            Self::Torus => TorusParams::default().count,
        }
    }

    /// Compute this shape's target points with default parameters.
    ///
    /// Only the pyramid draws from `rng`.
    pub fn generate<R: Rng + ?Sized>(self, rng: &mut R) -> Vec<Point> {
        let points = match self {
            Self::Cube => cube_points(&CubeParams::default()),
            Self::Sphere => sphere_points(&SphereParams::default()),
            Self::Pyramid => pyramid_points(&PyramidParams::default(), rng),
            Self::Torus => torus_points(&TorusParams::default()),
        };
        tracing::trace!(shape = self.name(), points = points.len(), "generated targets");
        points
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised shape name.
#[derive(Debug, thiserror::Error)]
#[error("unknown shape: {0:?} (expected cube, sphere, pyramid or torus)")]
pub struct UnknownShape(pub String);

impl FromStr for ShapeKind {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| UnknownShape(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueblood_common::NUM_POINTS;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn rotation_order() {
        let names: Vec<_> = ShapeKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names, ["cube", "sphere", "pyramid", "torus"]);
    }

    #[test]
    fn full_shapes_fill_every_slot() {
        let mut rng = Pcg64::seed_from_u64(0);
        for kind in ShapeKind::ALL {
            let n = kind.generate(&mut rng).len();
            if kind == ShapeKind::Pyramid {
                assert_eq!(n, NUM_POINTS / 5 * 5);
            } else {
                assert_eq!(n, NUM_POINTS);
            }
            assert_eq!(n, kind.expected_len());
        }
    }

    #[test]
    fn determinism_matches_flag() {
        let mut rng = Pcg64::seed_from_u64(1);
        for kind in ShapeKind::ALL {
            let same = kind.generate(&mut rng) == kind.generate(&mut rng);
            assert_eq!(same, kind.is_deterministic(), "{kind}");
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!("Torus".parse::<ShapeKind>().unwrap(), ShapeKind::Torus);
        assert!("donut".parse::<ShapeKind>().is_err());
    }
}
