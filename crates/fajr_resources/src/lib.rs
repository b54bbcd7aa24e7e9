//! CPU-side resource definitions: procedural geometry and materials.
//!
//! Nothing here talks to a GPU. Geometry attributes are tagged with
//! `wgpu` vertex formats so a renderer can bind them as-is.

pub mod geometry;
pub mod material;
pub mod primitives;

pub use geometry::{Attribute, BoundingBox, Geometry};
pub use material::{
    Material, MaterialData, MaterialFlags, MeshBasicMaterial, MeshStandardMaterial, PointsMaterial,
};
pub use primitives::*;
