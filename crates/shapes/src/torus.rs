use blueblood_common::{NUM_POINTS, Point};
use glam::Vec3;
use std::f32::consts::TAU;

/// Torus lying in the xy-plane, sampled as evenly spaced rings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusParams {
    pub count: usize,
    pub rings: usize,
    pub major_radius: f32,
    pub minor_radius: f32,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            count: NUM_POINTS,
            rings: 6,
            major_radius: 7.0,
            minor_radius: 3.0,
        }
    }
}

impl TorusParams {
    pub fn points_per_ring(&self) -> usize {
        (self.count / self.rings.max(1)).max(1)
    }
}

/// Point `i` sits on ring `i / per_ring` (angle `v` around the tube) at
/// position `i % per_ring` around the main axis (angle `u`).
pub fn torus_points(params: &TorusParams) -> Vec<Point> {
    let per_ring = params.points_per_ring();
    let ring_step = TAU / params.rings.max(1) as f32;
    let step = TAU / per_ring as f32;
    let (big_r, small_r) = (params.major_radius, params.minor_radius);
    (0..params.count)
        .map(|i| {
            let u = (i % per_ring) as f32 * step;
            let v = (i / per_ring) as f32 * ring_step;
            let reach = big_r + small_r * v.cos();
            Vec3::new(reach * u.cos(), reach * u.sin(), small_r * v.sin())
        })
        .collect()
}
