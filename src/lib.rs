//! Fajr Serenity: a looping desert-dawn scene.
//!
//! The crate is split into layers, re-exported here:
//!
//! - [`foundation`]: transforms, colors, clocks, errors
//! - [`resources`]: procedural primitives and materials
//! - [`animation`]: the per-frame animator and its motion models
//! - [`scene`]: the scene graph the animator writes into
//! - [`app`]: configuration, scene assembly, overlay and frame host

pub use fajr_animation as animation;
pub use fajr_app as app;
pub use fajr_core as foundation;
pub use fajr_resources as resources;
pub use fajr_scene as scene;

pub use fajr_animation::{
    AnimationRig, AnimationTargets, CameraRig, FigureSway, FloatDrift, FrameAnimator, FrameStats, HandSide,
    HandSway, PARTICLE_COUNT, ParticleField,
};
pub use fajr_app::{App, AppConfig, FrameSnapshot, Overlay, RendererSettings};
pub use fajr_core::{FajrError, Result, Transform};
pub use fajr_resources::primitives::*;
pub use fajr_resources::{Geometry, Material};
pub use fajr_scene::{Camera, Light, Node, NodeHandle, Scene};

/// Commonly used items for hosts embedding the scene.
pub mod prelude {
    pub use crate::{App, AppConfig, FajrError, FrameAnimator, NodeHandle, Result, Scene};
    pub use glam::{Quat, Vec3};
}
