//! Scene Driver: rotates through the shape generators on a wall-clock timer and
//! animates every glyph towards the active target set.
//!
//! # Invariants
//! - Exactly one shape is the animation target at any instant; shapes are never blended.
//! - Elements keep identity and in-flight position across shape changes.
//! - After `k` timer firings the active index is `k mod 4`.
//! - Slots the active shape leaves unfilled target the origin.
//! - All mutation happens on the host's thread through `advance_clock` and `step_frame`.

pub mod animate;
pub mod cycle;
pub mod scene;
pub mod timer;

pub use animate::{Animator, LerpAnimator, SpringAnimator, animator_for};
pub use cycle::ShapeCycle;
pub use scene::{Scene, SceneEvent, SceneSummary};
pub use timer::IntervalTimer;
