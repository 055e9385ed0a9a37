use blueblood_common::Point;
use glam::Vec3;

/// Grid sampling of a cube's six faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeParams {
    /// Grid points per face edge. Each face gets `density²` points.
    pub density: usize,
    /// Side length. The cube is centred on the origin.
    pub size: f32,
}

impl Default for CubeParams {
    fn default() -> Self {
        Self {
            density: 4,
            size: 12.0,
        }
    }
}

impl CubeParams {
    pub fn half_size(&self) -> f32 {
        self.size / 2.0
    }

    pub fn point_count(&self) -> usize {
        6 * self.density * self.density
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
    Z,
}

/// Faces in emission order: x+, x-, y+, y-, z+, z-.
const FACES: [(Axis, f32); 6] = [
    (Axis::X, 1.0),
    (Axis::X, -1.0),
    (Axis::Y, 1.0),
    (Axis::Y, -1.0),
    (Axis::Z, 1.0),
    (Axis::Z, -1.0),
];

/// Sample each face on a regular `density × density` grid, row-major by (i, j).
pub fn cube_points(params: &CubeParams) -> Vec<Point> {
    let mut points = Vec::with_capacity(params.point_count());
    let half = params.half_size();
    // A single-point grid sits at the face centre.
    let steps = params.density.saturating_sub(1).max(1) as f32;
    let along = |k: usize| {
        if params.density == 1 {
            0.0
        } else {
            (k as f32 / steps - 0.5) * params.size
        }
    };

    for (axis, sign) in FACES {
        let offset = sign * half;
        for i in 0..params.density {
            for j in 0..params.density {
                let (u, v) = (along(i), along(j));
                points.push(match axis {
                    Axis::X => Vec3::new(offset, u, v),
                    Axis::Y => Vec3::new(u, offset, v),
                    Axis::Z => Vec3::new(u, v, offset),
                });
            }
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueblood_common::NUM_POINTS;

    #[test]
    fn default_cube_fills_every_slot() {
        let points = cube_points(&CubeParams::default());
        assert_eq!(points.len(), NUM_POINTS);
    }

    #[test]
    fn points_lie_on_surface() {
        for p in cube_points(&CubeParams::default()) {
            let a = p.abs();
            let on_face = [a.x, a.y, a.z]
                .iter()
                .filter(|c| (**c - 6.0).abs() < 1e-5)
                .count();
            assert!(on_face >= 1, "{p} is not on a face");
            assert!(a.max_element() <= 6.0 + 1e-5, "{p} escapes the cube");
        }
    }

    #[test]
    fn face_order_and_grid_layout() {
        let points = cube_points(&CubeParams::default());
        // First face is x+, first row starts at the (-6, -6) corner.
        assert_eq!(points[0], Vec3::new(6.0, -6.0, -6.0));
        assert_eq!(points[1], Vec3::new(6.0, -6.0, -2.0));
        assert_eq!(points[4], Vec3::new(6.0, -2.0, -6.0));
        // Second face is x-, then y+.
        assert_eq!(points[16].x, -6.0);
        assert_eq!(points[32].y, 6.0);
        assert_eq!(points[48].y, -6.0);
        assert_eq!(points[64].z, 6.0);
        assert_eq!(points[95], Vec3::new(6.0, 6.0, -6.0));
    }

    #[test]
    fn deterministic() {
        let params = CubeParams::default();
        assert_eq!(cube_points(&params), cube_points(&params));
    }

    #[test]
    fn single_point_grid_uses_face_centres() {
        let points = cube_points(&CubeParams {
            density: 1,
            size: 2.0,
        });
        assert_eq!(points.len(), 6);
        assert_eq!(points[0], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(points[5], Vec3::new(0.0, 0.0, -1.0));
    }
}
