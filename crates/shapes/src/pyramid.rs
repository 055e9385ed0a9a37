use blueblood_common::{NUM_POINTS, Point};
use glam::Vec3;
use rand::Rng;

/// Square pyramid centred on the origin: base at `-height / 2`, apex at `+height / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PyramidParams {
    pub count: usize,
    pub height: f32,
    pub base_size: f32,
}

impl Default for PyramidParams {
    fn default() -> Self {
        Self {
            count: NUM_POINTS,
            height: 10.0,
            base_size: 10.0,
        }
    }
}

impl PyramidParams {
    /// Base plus four sides share the budget evenly; the remainder is left unfilled.
    pub fn points_per_face(&self) -> usize {
        self.count / 5
    }

    pub fn point_count(&self) -> usize {
        self.points_per_face() * 5
    }

    pub fn apex(&self) -> Vec3 {
        Vec3::new(0.0, self.height / 2.0, 0.0)
    }

    /// Base corners, counter-clockwise seen from below.
    pub fn corners(&self) -> [Vec3; 4] {
        let h = self.base_size / 2.0;
        let y = -self.height / 2.0;
        [
            Vec3::new(-h, y, -h),
            Vec3::new(h, y, -h),
            Vec3::new(h, y, h),
            Vec3::new(-h, y, h),
        ]
    }
}

/// Uniform random samples over the base square and the four side triangles.
///
/// Fresh samples are drawn on every call. The output holds
/// `5 * floor(count / 5)` points: base first, then each side in corner order.
pub fn pyramid_points<R: Rng + ?Sized>(params: &PyramidParams, rng: &mut R) -> Vec<Point> {
    let per_face = params.points_per_face();
    let mut points = Vec::with_capacity(params.point_count());
    let base_y = -params.height / 2.0;

    for _ in 0..per_face {
        let x = (rng.random::<f32>() - 0.5) * params.base_size;
        let z = (rng.random::<f32>() - 0.5) * params.base_size;
        points.push(Vec3::new(x, base_y, z));
    }

    let apex = params.apex();
    let corners = params.corners();
    for i in 0..corners.len() {
        let a = corners[i];
        let b = corners[(i + 1) % corners.len()];
        for _ in 0..per_face {
            points.push(sample_triangle(a, b, apex, rng.random(), rng.random()));
        }
    }
    points
}

/// Map two uniforms in [0, 1) to a uniformly distributed point on triangle `abc`.
pub fn sample_triangle(a: Vec3, b: Vec3, c: Vec3, r1: f32, r2: f32) -> Vec3 {
    let s = r1.sqrt();
    a * (1.0 - s) + b * (s * (1.0 - r2)) + c * (s * r2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn inside(p: Vec3) -> bool {
        let eps = 1e-4;
        if p.y < -5.0 - eps || p.y > 5.0 + eps {
            return false;
        }
        // Half-width shrinks linearly from 5 at the base to 0 at the apex.
        let half = 5.0 * (5.0 - p.y) / 10.0;
        p.x.abs() <= half + eps && p.z.abs() <= half + eps
    }

    #[test]
    fn leaves_remainder_unfilled() {
        let mut rng = Pcg64::seed_from_u64(1);
        let points = pyramid_points(&PyramidParams::default(), &mut rng);
        assert_eq!(points.len(), 95);
    }

    #[test]
    fn all_points_inside_hull() {
        let mut rng = Pcg64::seed_from_u64(2);
        for _ in 0..20 {
            for p in pyramid_points(&PyramidParams::default(), &mut rng) {
                assert!(inside(p), "{p} escapes the pyramid");
            }
        }
    }

    #[test]
    fn base_points_come_first() {
        let mut rng = Pcg64::seed_from_u64(3);
        let points = pyramid_points(&PyramidParams::default(), &mut rng);
        assert!(points[..19].iter().all(|p| p.y == -5.0));
    }

    #[test]
    fn repeated_calls_differ() {
        let mut rng = Pcg64::seed_from_u64(4);
        let params = PyramidParams::default();
        let a = pyramid_points(&params, &mut rng);
        let b = pyramid_points(&params, &mut rng);
        assert_eq!(a.len(), b.len());
        assert_ne!(a, b);
    }

    #[test]
    fn repeated_calls_share_face_statistics() {
        let mut rng = Pcg64::seed_from_u64(6);
        let params = PyramidParams::default();
        let per_face = params.points_per_face();
        let rounds = 500;

        let mut sums = [Vec3::ZERO; 5];
        for _ in 0..rounds {
            let points = pyramid_points(&params, &mut rng);
            for (face, chunk) in points.chunks(per_face).enumerate() {
                sums[face] += chunk.iter().copied().sum::<Vec3>();
            }
        }
        let means = sums.map(|s| s / (rounds * per_face) as f32);

        assert_eq!(means[0].y, -5.0);
        assert!(means[0].x.abs() < 0.15 && means[0].z.abs() < 0.15, "base mean {}", means[0]);

        let corners = params.corners();
        for side in 0..4 {
            let centroid = (corners[side] + corners[(side + 1) % 4] + params.apex()) / 3.0;
            let mean = means[side + 1];
            assert!(
                (mean - centroid).length() < 0.15,
                "side {side}: mean {mean}, centroid {centroid}"
            );
        }
    }

    #[test]
    fn same_seed_reproduces() {
        let params = PyramidParams::default();
        let a = pyramid_points(&params, &mut Pcg64::seed_from_u64(9));
        let b = pyramid_points(&params, &mut Pcg64::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn triangle_weights_hit_vertices() {
        let (a, b, c) = (Vec3::X, Vec3::Y, Vec3::Z);
        assert_eq!(sample_triangle(a, b, c, 0.0, 0.5), a);
        assert_eq!(sample_triangle(a, b, c, 1.0, 0.0), b);
        assert_eq!(sample_triangle(a, b, c, 1.0, 1.0), c);
    }

    #[test]
    fn side_samples_spread_over_area() {
        // Mean of uniform samples over a triangle approaches its centroid.
        let mut rng = Pcg64::seed_from_u64(5);
        let (a, b, c) = (Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0));
        let n = 20_000;
        let sum: Vec3 = (0..n)
            .map(|_| sample_triangle(a, b, c, rng.random(), rng.random()))
            .sum();
        let mean = sum / n as f32;
        assert!((mean - Vec3::new(1.0, 1.0, 0.0)).length() < 0.05, "mean {mean}");
    }
}
