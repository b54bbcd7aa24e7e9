//! Foundational types shared by every Fajr Serenity crate.
//!
//! - [`Transform`]: TRS component with cached matrices and dirty checking
//! - [`ChangeTracker`]: version counter for CPU buffers awaiting upload
//! - [`color`]: hex color parsing and CSS formatting
//! - [`time`]: wall-clock and fixed-step frame clocks
//! - [`FajrError`]: the error type for scene assembly and configuration

pub mod color;
pub mod errors;
pub mod time;
pub mod tracker;
pub mod transform;

pub use errors::{FajrError, Result};
pub use time::{FixedStepClock, FpsCounter, Timer};
pub use tracker::ChangeTracker;
pub use transform::Transform;
