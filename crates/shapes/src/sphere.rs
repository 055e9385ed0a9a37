use blueblood_common::{NUM_POINTS, Point};
use glam::Vec3;
use std::f32::consts::PI;

/// Golden-angle spiral over a sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    pub count: usize,
    pub radius: f32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            count: NUM_POINTS,
            radius: 8.0,
        }
    }
}

/// Angle between successive spiral points, π(3 - √5).
pub fn golden_angle() -> f32 {
    PI * (3.0 - 5.0_f32.sqrt())
}

/// Fibonacci sphere: `y` walks from 1 to -1 while the azimuth advances by the
/// golden angle, giving even coverage without latitude banding.
pub fn sphere_points(params: &SphereParams) -> Vec<Point> {
    let phi = golden_angle();
    let last = params.count.saturating_sub(1).max(1) as f32;
    (0..params.count)
        .map(|i| {
            let y = 1.0 - (i as f32 / last) * 2.0;
            let radius_at_y = (1.0 - y * y).max(0.0).sqrt();
            let theta = phi * i as f32;
            Vec3::new(theta.cos() * radius_at_y, y, theta.sin() * radius_at_y) * params.radius
        })
        .collect()
}
