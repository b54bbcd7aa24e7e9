use fajr_animation::ParticleField;
use fajr_resources::Geometry;

use crate::{GeometryKey, MaterialKey};

/// Triangle mesh component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mesh {
    pub geometry: GeometryKey,
    pub material: MaterialKey,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: GeometryKey, material: MaterialKey) -> Self {
        Self {
            geometry,
            material,
            cast_shadow: false,
            receive_shadow: false,
        }
    }
}

/// Point-sprite component backed by an animated particle field.
#[derive(Debug, Clone)]
pub struct Points {
    pub field: ParticleField,
    pub material: MaterialKey,
}

impl Points {
    #[must_use]
    pub fn new(field: ParticleField, material: MaterialKey) -> Self {
        Self { field, material }
    }

    /// Point-list geometry snapshot of the current particle buffer.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        Geometry::new_points(self.field.positions())
    }
}
