//! Scene graph.
//!
//! - [`Node`]: hierarchy links plus a [`Transform`](fajr_core::Transform)
//! - [`Scene`]: node storage, component maps and scene-wide settings
//! - [`Camera`], [`Light`]: node components
//! - [`Mesh`], [`Points`]: drawable components referencing pooled resources
//! - [`Fog`], [`Sky`], [`Environment`]: atmosphere settings
//! - [`transform_system`]: world-matrix propagation

pub mod camera;
pub mod environment;
pub mod light;
pub mod mesh;
pub mod node;
pub mod scene;
pub mod transform_system;

pub use camera::Camera;
pub use environment::{Environment, EnvironmentPreset, Fog, Sky};
pub use light::{DirectionalLight, Light, LightKind, ShadowConfig};
pub use mesh::{Mesh, Points};
pub use node::Node;
pub use scene::{NodeBuilder, Scene};

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to a scene node.
    pub struct NodeHandle;
    pub struct GeometryKey;
    pub struct MaterialKey;
}
