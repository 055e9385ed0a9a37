//! Geometric checks for generated point sets.

use crate::{CubeParams, PyramidParams, ShapeKind, SphereParams, TorusParams};
use blueblood_common::Point;

/// Absolute tolerance for surface residuals.
pub const TOLERANCE: f32 = 1e-3;

/// A generated point set that does not match its shape.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("{kind} produced {actual} points, expected {expected}")]
    WrongCount {
        kind: ShapeKind,
        expected: usize,
        actual: usize,
    },
    #[error("{kind} point {index} at ({x:.3}, {y:.3}, {z:.3}) is off the surface by {residual:.5}")]
    OffSurface {
        kind: ShapeKind,
        index: usize,
        x: f32,
        y: f32,
        z: f32,
        residual: f32,
    },
}

/// Check a point set against the default parameters of `kind`.
pub fn verify_points(kind: ShapeKind, points: &[Point]) -> Result<(), ShapeError> {
    let expected = kind.expected_len();
    if points.len() != expected {
        return Err(ShapeError::WrongCount {
            kind,
            expected,
            actual: points.len(),
        });
    }
    for (index, p) in points.iter().enumerate() {
        let residual = residual(kind, *p);
        if residual > TOLERANCE {
            return Err(ShapeError::OffSurface {
                kind,
                index,
                x: p.x,
                y: p.y,
                z: p.z,
                residual,
            });
        }
    }
    Ok(())
}

/// Distance-like error of `p` from the surface (or, for the pyramid, the
/// solid) of `kind`. Zero means on target.
pub fn residual(kind: ShapeKind, p: Point) -> f32 {
    match kind {
        ShapeKind::Cube => {
            let half = CubeParams::default().half_size();
            let a = p.abs();
            let outside = (a.max_element() - half).max(0.0);
            // Distance from the nearest face plane for points inside.
            outside + (half - a.max_element()).max(0.0)
        }
        ShapeKind::Sphere => (p.length() - SphereParams::default().radius).abs(),
        ShapeKind::Torus => {
            let t = TorusParams::default();
            let ring = p.truncate().length() - t.major_radius;
            ((ring * ring + p.z * p.z).sqrt() - t.minor_radius).abs()
        }
        ShapeKind::Pyramid => {
            let params = PyramidParams::default();
            let half_h = params.height / 2.0;
            let below = (-half_h - p.y).max(0.0);
            let above = (p.y - half_h).max(0.0);
            let half_width = params.base_size / 2.0 * (half_h - p.y) / params.height;
            let wide = (p.x.abs().max(p.z.abs()) - half_width.max(0.0)).max(0.0);
            below + above + wide
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn every_shape_passes() {
        let mut rng = Pcg64::seed_from_u64(11);
        for kind in ShapeKind::ALL {
            let points = kind.generate(&mut rng);
            verify_points(kind, &points).unwrap();
        }
    }

    #[test]
    fn short_set_is_rejected() {
        let err = verify_points(ShapeKind::Cube, &[Vec3::X * 6.0]).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::WrongCount {
                expected: 96,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn stray_point_is_reported() {
        let mut rng = Pcg64::seed_from_u64(12);
        let mut points = ShapeKind::Sphere.generate(&mut rng);
        points[7] = Vec3::ZERO;
        let err = verify_points(ShapeKind::Sphere, &points).unwrap_err();
        assert!(matches!(err, ShapeError::OffSurface { index: 7, .. }));
        assert!(err.to_string().contains("sphere point 7"));
    }

    #[test]
    fn cube_interior_is_off_surface() {
        assert!(residual(ShapeKind::Cube, Vec3::ZERO) > 5.0);
        assert_eq!(residual(ShapeKind::Cube, Vec3::new(6.0, 1.0, -3.0)), 0.0);
    }

    #[test]
    fn pyramid_apex_and_outside() {
        assert_eq!(residual(ShapeKind::Pyramid, Vec3::new(0.0, 5.0, 0.0)), 0.0);
        assert!(residual(ShapeKind::Pyramid, Vec3::new(4.0, 4.0, 0.0)) > 1.0);
        assert!(residual(ShapeKind::Pyramid, Vec3::new(0.0, -6.0, 0.0)) > 0.5);
    }
}
