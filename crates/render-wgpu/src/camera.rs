use blueblood_render::RenderView;
use glam::{Mat4, Vec3};

/// Orbit camera circling a target point, with damped rotation.
///
/// Drag input queues rotation; each `update` applies a `damping` share of
/// what is queued and decays the rest, so motion eases out after release.
/// Camera motion is NOT part of the scene controller's state.
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Azimuth around +Y, radians.
    pub yaw: f32,
    /// Elevation above the xz-plane, radians.
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub sensitivity: f32,
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pending_yaw: f32,
    pending_pitch: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_view(&RenderView::default())
    }
}

const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

impl OrbitCamera {
    /// Place the camera at `view.eye`, orbiting `view.target`.
    pub fn from_view(view: &RenderView) -> Self {
        let offset = view.eye - view.target;
        let distance = offset.length().max(1e-3);
        Self {
            target: view.target,
            distance,
            yaw: offset.z.atan2(offset.x),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            fov: view.fov_degrees.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            sensitivity: 0.005,
            damping: 0.1,
            min_distance: 5.0,
            max_distance: 200.0,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        let dir = Vec3::new(
            self.pitch.cos() * self.yaw.cos(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.sin(),
        );
        self.target + dir * self.distance
    }

    /// Queue a drag of `(dx, dy)` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.pending_yaw += dx * self.sensitivity;
        self.pending_pitch += dy * self.sensitivity;
    }

    /// Scroll towards (`delta > 0`) or away from the target.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * 0.95_f32.powf(delta))
            .clamp(self.min_distance, self.max_distance);
    }

    /// Apply one frame of queued rotation.
    pub fn update(&mut self) {
        let (dyaw, dpitch) = (self.pending_yaw * self.damping, self.pending_pitch * self.damping);
        self.yaw += dyaw;
        self.pitch = (self.pitch + dpitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.pending_yaw -= dyaw;
        self.pending_pitch -= dpitch;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
