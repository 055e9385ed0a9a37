use crate::animate::{Animator, animator_for};
use crate::cycle::ShapeCycle;
use crate::timer::IntervalTimer;
use blueblood_common::{
    AnimationStrategy, ConfigError, FALLBACK_TARGET, GlyphElement, NUM_POINTS, Point, SceneConfig,
};
use blueblood_shapes::ShapeKind;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A record of every change to the active formation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// A shape became the animation target. `firing` is 0 for the initial shape.
    ShapeActivated {
        firing: u64,
        index: usize,
        shape: ShapeKind,
        targets: usize,
    },
    /// The rotation timer was cancelled; the scene no longer changes.
    TornDown { frame: u64 },
}

/// Inspector view of the scene at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub shape: ShapeKind,
    pub index: usize,
    pub frame: u64,
    pub firings: u64,
    pub strategy: AnimationStrategy,
    pub filled_slots: usize,
    /// Largest distance between any element and its target.
    pub max_distance: f32,
    pub until_next: Duration,
}

/// The scene controller.
///
/// Owns the glyph elements, the active target set and the rotation state.
/// Only the host's timer callback (`advance_clock`) and frame callback
/// (`step_frame`) mutate it.
#[derive(Debug)]
pub struct Scene {
    elements: Vec<GlyphElement>,
    targets: Vec<Point>,
    cycle: ShapeCycle,
    timer: IntervalTimer,
    animator: Box<dyn Animator>,
    rng: Pcg64,
    frame: u64,
    event_log: Vec<SceneEvent>,
}

impl Scene {
    /// Create a scene at index 0 with every element on the origin.
    pub fn new(config: &SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut scene = Self {
            elements: vec![GlyphElement::default(); NUM_POINTS],
            targets: Vec::new(),
            cycle: ShapeCycle::default(),
            timer: IntervalTimer::new(config.shape_interval()),
            animator: animator_for(config),
            rng: Pcg64::seed_from_u64(seed),
            frame: 0,
            event_log: Vec::new(),
        };
        scene.retarget(0);
        tracing::info!(
            strategy = %config.strategy,
            interval_ms = config.shape_interval_ms,
            seed,
            "scene created with {} glyphs",
            NUM_POINTS
        );
        Ok(scene)
    }

    /// Advance the rotation clock. Each completed interval activates the next shape.
    ///
    /// Element positions are untouched; only targets change.
    pub fn advance_clock(&mut self, dt: Duration) -> u32 {
        if self.is_torn_down() {
            return 0;
        }
        let fired = self.timer.advance(dt);
        for _ in 0..fired {
            self.cycle.advance();
            self.retarget(self.timer.fired());
        }
        fired
    }

    /// Move every element one frame towards its target.
    pub fn step_frame(&mut self, dt: f32) {
        if self.is_torn_down() {
            return;
        }
        let _span = tracing::trace_span!("step_frame", frame = self.frame).entered();
        for (slot, element) in self.elements.iter_mut().enumerate() {
            let target = self.targets.get(slot).copied().unwrap_or(FALLBACK_TARGET);
            self.animator.step(element, target, dt);
        }
        self.frame += 1;
    }

    /// One host frame: clock first so a new shape takes effect this frame.
    pub fn update(&mut self, dt: Duration) {
        self.advance_clock(dt);
        self.step_frame(dt.as_secs_f32());
    }

    /// Cancel the rotation timer. Further clock and frame updates do nothing.
    pub fn teardown(&mut self) {
        if self.is_torn_down() {
            return;
        }
        self.timer.cancel();
        self.event_log.push(SceneEvent::TornDown { frame: self.frame });
        tracing::info!(frame = self.frame, "scene torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.timer.is_cancelled()
    }

    /// Target for `slot`, or the origin if the active shape leaves it unfilled.
    pub fn target_for(&self, slot: usize) -> Point {
        self.targets.get(slot).copied().unwrap_or(FALLBACK_TARGET)
    }

    /// Raw targets of the active shape. May be shorter than [`NUM_POINTS`].
    pub fn targets(&self) -> &[Point] {
        &self.targets
    }

    pub fn elements(&self) -> &[GlyphElement] {
        &self.elements
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.elements.iter().map(|e| e.position)
    }

    pub fn active_shape(&self) -> ShapeKind {
        self.cycle.current()
    }

    pub fn active_index(&self) -> usize {
        self.cycle.index()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn strategy(&self) -> AnimationStrategy {
        self.animator.strategy()
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }

    pub fn summary(&self) -> SceneSummary {
        let max_distance = self
            .elements
            .iter()
            .enumerate()
            .map(|(slot, e)| e.distance_to(self.target_for(slot)))
            .fold(0.0_f32, f32::max);
        SceneSummary {
            shape: self.active_shape(),
            index: self.active_index(),
            frame: self.frame,
            firings: self.timer.fired(),
            strategy: self.strategy(),
            filled_slots: self.targets.len().min(NUM_POINTS),
            max_distance,
            until_next: self.timer.remaining(),
        }
    }

    fn retarget(&mut self, firing: u64) {
        let shape = self.cycle.current();
        self.targets = shape.generate(&mut self.rng);
        tracing::debug!(
            firing,
            index = self.cycle.index(),
            shape = shape.name(),
            targets = self.targets.len(),
            "shape activated"
        );
        self.event_log.push(SceneEvent::ShapeActivated {
            firing,
            index: self.cycle.index(),
            shape,
            targets: self.targets.len(),
        });
    }
}
