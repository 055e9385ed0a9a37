//! Per-frame motion of glyphs towards their targets.

use blueblood_common::{AnimationStrategy, GlyphElement, Point, SceneConfig, SpringParams};
use glam::Vec3;

/// Moves one element a single frame closer to its target.
///
/// Animators are stateless; everything in flight lives on the element, so a
/// new target simply redirects from the current position and velocity.
pub trait Animator: std::fmt::Debug + Send + Sync {
    fn strategy(&self) -> AnimationStrategy;

    /// Advance `element` towards `target`. `dt` is the frame's wall-clock time in seconds.
    fn step(&self, element: &mut GlyphElement, target: Point, dt: f32);
}

/// Build the animator selected by `config.strategy`.
pub fn animator_for(config: &SceneConfig) -> Box<dyn Animator> {
    match config.strategy {
        AnimationStrategy::Lerp => Box::new(LerpAnimator::new(config.lerp_factor)),
        AnimationStrategy::Spring => Box::new(SpringAnimator::new(config.spring)),
    }
}

/// Exponential approach: each frame covers a fixed fraction of the remaining distance.
///
/// Frame-rate coupled. `dt` is ignored, so convergence in wall-clock time
/// scales with the host's frame rate.
#[derive(Debug, Clone, Copy)]
pub struct LerpAnimator {
    pub factor: f32,
}

impl LerpAnimator {
    pub fn new(factor: f32) -> Self {
        Self { factor }
    }
}

impl Default for LerpAnimator {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl Animator for LerpAnimator {
    fn strategy(&self) -> AnimationStrategy {
        AnimationStrategy::Lerp
    }

    fn step(&self, element: &mut GlyphElement, target: Point, _dt: f32) {
        element.position += (target - element.position) * self.factor;
    }
}

/// Damped spring, integrated with semi-implicit Euler in fixed sub-steps.
#[derive(Debug, Clone, Copy)]
pub struct SpringAnimator {
    pub params: SpringParams,
    /// Once both displacement and speed drop below these, the element snaps to rest.
    pub rest_delta: f32,
    pub rest_speed: f32,
}

/// Rest displacement, in world units. Matches the fine-scale threshold of
/// browser spring animations; their coarse 0.5 unit threshold is not used.
pub const REST_DELTA: f32 = 0.005;
/// Rest speed, in world units per second.
pub const REST_SPEED: f32 = 0.01;

/// Longest integration step, in seconds.
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

impl SpringAnimator {
    pub fn new(params: SpringParams) -> Self {
        Self {
            params,
            rest_delta: REST_DELTA,
            rest_speed: REST_SPEED,
        }
    }

    fn acceleration(&self, position: Vec3, velocity: Vec3, target: Vec3) -> Vec3 {
        let spring = (target - position) * self.params.stiffness;
        let damper = velocity * self.params.damping;
        (spring - damper) / self.params.mass
    }
}

impl Default for SpringAnimator {
    fn default() -> Self {
        Self::new(SpringParams::default())
    }
}

impl Animator for SpringAnimator {
    fn strategy(&self) -> AnimationStrategy {
        AnimationStrategy::Spring
    }

    fn step(&self, element: &mut GlyphElement, target: Point, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let substeps = (dt / MAX_SUBSTEP).ceil().max(1.0);
        let h = dt / substeps;
        for _ in 0..substeps as u32 {
            let accel = self.acceleration(element.position, element.velocity, target);
            element.velocity += accel * h;
            element.position += element.velocity * h;
        }
        if element.position.distance(target) < self.rest_delta
            && element.velocity.length() < self.rest_speed
        {
            element.position = target;
            element.velocity = Vec3::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn lerp_matches_closed_form() {
        let lerp = LerpAnimator::default();
        let target = Vec3::new(4.0, -2.0, 8.0);
        let mut e = GlyphElement::default();
        for n in 1..=120 {
            lerp.step(&mut e, target, FRAME);
            let expected = target * (1.0 - 0.95_f32.powi(n));
            assert!(
                (e.position - expected).length() < 1e-4,
                "frame {n}: {} vs {expected}",
                e.position
            );
        }
    }

    #[test]
    fn lerp_ignores_frame_time() {
        let lerp = LerpAnimator::default();
        let mut slow = GlyphElement::default();
        let mut fast = GlyphElement::default();
        lerp.step(&mut slow, Vec3::X, 0.5);
        lerp.step(&mut fast, Vec3::X, 0.001);
        assert_eq!(slow.position, fast.position);
    }

    #[test]
    fn lerp_never_overshoots() {
        let lerp = LerpAnimator::default();
        let mut e = GlyphElement::default();
        for _ in 0..1000 {
            lerp.step(&mut e, Vec3::splat(10.0), FRAME);
            assert!(e.position.x <= 10.0);
        }
        assert!(e.distance_to(Vec3::splat(10.0)) < 1e-3);
    }

    #[test]
    fn spring_settles_without_overshoot() {
        // stiffness 50, damping 15 is just past critical damping.
        let spring = SpringAnimator::default();
        let target = Vec3::new(0.0, 8.0, 0.0);
        let mut e = GlyphElement::default();
        for _ in 0..90 {
            spring.step(&mut e, target, FRAME);
            assert!(e.position.y <= 8.0 + 1e-4);
        }
        assert!(e.distance_to(target) < 0.05, "{}", e.position);
        for _ in 0..240 {
            spring.step(&mut e, target, FRAME);
        }
        assert_eq!(e.position, target);
        assert_eq!(e.velocity, Vec3::ZERO);
    }

    #[test]
    fn spring_redirect_is_continuous() {
        let spring = SpringAnimator::default();
        let mut e = GlyphElement::default();
        for _ in 0..20 {
            spring.step(&mut e, Vec3::X * 10.0, FRAME);
        }
        let before = e;
        spring.step(&mut e, -Vec3::X * 10.0, FRAME);
        // Momentum carries it forward briefly; no teleport.
        assert!((e.position - before.position).length() < 1.0);
        assert!(e.velocity.x < before.velocity.x);
    }

    #[test]
    fn spring_rest_thresholds() {
        let spring = SpringAnimator::default();
        assert_eq!(spring.rest_delta, 0.005);
        assert_eq!(spring.rest_speed, 0.01);

        let mut near = GlyphElement {
            position: Vec3::new(0.004, 0.0, 0.0),
            velocity: Vec3::ZERO,
        };
        spring.step(&mut near, Vec3::ZERO, FRAME);
        assert_eq!(near.position, Vec3::ZERO);
        assert_eq!(near.velocity, Vec3::ZERO);

        // Half a unit away is still visibly moving, so no snap.
        let mut far = GlyphElement {
            position: Vec3::new(0.5, 0.0, 0.0),
            velocity: Vec3::ZERO,
        };
        spring.step(&mut far, Vec3::ZERO, FRAME);
        assert!(far.position.x > 0.4 && far.position.x < 0.5);
        assert!(far.velocity.x < 0.0);
    }

    #[test]
    fn spring_zero_dt_is_noop() {
        let spring = SpringAnimator::default();
        let mut e = GlyphElement::default();
        spring.step(&mut e, Vec3::ONE, 0.0);
        assert_eq!(e, GlyphElement::default());
    }

    #[test]
    fn factory_follows_config() {
        let lerp = animator_for(&SceneConfig::default());
        assert_eq!(lerp.strategy(), AnimationStrategy::Lerp);
        let spring = animator_for(&SceneConfig {
            strategy: AnimationStrategy::Spring,
            ..SceneConfig::default()
        });
        assert_eq!(spring.strategy(), AnimationStrategy::Spring);
    }
}
