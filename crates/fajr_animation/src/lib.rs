//! Per-frame procedural animation.
//!
//! Every updater is a pure function of elapsed time plus constants fixed
//! at scene construction:
//!
//! - [`CameraRig`]: elliptical orbit around the figure
//! - [`FigureSway`]: body bob and cloth sway
//! - [`HandSway`]: raised hands with a shared lift
//! - [`FloatDrift`]: idle hover of the figure's wrapper group
//! - [`ParticleField`]: vertical drift of the dust motes
//!
//! [`FrameAnimator`] binds them to scene handles through the
//! [`AnimationTargets`] trait and runs them once per frame.

pub mod animator;
pub mod camera_rig;
pub mod particles;
pub mod sway;

pub use animator::{AnimationRig, AnimationTargets, FrameAnimator, FrameStats};
pub use camera_rig::{CameraPose, CameraRig, LOOK_TARGET};
pub use particles::{DRIFT_AMPLITUDE, PARTICLE_COUNT, ParticleField};
pub use sway::{FigurePose, FigureSway, FloatDrift, FloatPose, HandPose, HandSide, HandSway};
