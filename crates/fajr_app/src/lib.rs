//! Host layer: configuration, scene assembly and the frame loop.
//!
//! - [`AppConfig`]: JSON-loadable run configuration
//! - [`desert`]: builds the desert dawn scene and its animation rig
//! - [`Overlay`]: page text and gradient layers
//! - [`App`]: owns the scene and drives the animator per frame

pub mod app;
pub mod config;
pub mod desert;
pub mod overlay;
pub mod settings;

pub use app::{App, FrameSnapshot};
pub use config::AppConfig;
pub use desert::Desert;
pub use overlay::{BlendMode, ColorStop, Gradient, Overlay, OverlayLayer};
pub use settings::RendererSettings;
