//! Procedural primitive generators.
//!
//! All primitives are Y-up, centered on the origin, with counter-clockwise
//! front faces and `u32` indices.

mod box_shape;
mod circle;
mod cylinder;
mod plane;
mod sphere;

pub use box_shape::{BoxOptions, create_box};
pub use circle::{CircleOptions, create_circle};
pub use cylinder::{CylinderOptions, create_cylinder};
pub use plane::{PlaneOptions, create_plane};
pub use sphere::{SphereOptions, create_sphere};
