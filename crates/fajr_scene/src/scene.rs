use fajr_animation::{AnimationTargets, ParticleField};
use fajr_core::Transform;
use fajr_resources::{Geometry, Material};
use glam::{Vec3, Vec4};
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, SparseSecondaryMap};

use crate::camera::Camera;
use crate::environment::{Environment, Fog, Sky};
use crate::light::Light;
use crate::mesh::{Mesh, Points};
use crate::node::Node;
use crate::transform_system;
use crate::{GeometryKey, MaterialKey, NodeHandle};

/// The scene graph.
///
/// Owns every node and component. Handles stay valid until the node is
/// removed; stale handles simply resolve to `None`.
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    names: SparseSecondaryMap<NodeHandle, String>,
    name_index: FxHashMap<String, NodeHandle>,

    // === Resource pools ===
    pub geometries: SlotMap<GeometryKey, Geometry>,
    pub materials: SlotMap<MaterialKey, Material>,

    // === Components ===
    pub meshes: SparseSecondaryMap<NodeHandle, Mesh>,
    pub points: SparseSecondaryMap<NodeHandle, Points>,
    pub cameras: SparseSecondaryMap<NodeHandle, Camera>,
    pub lights: SparseSecondaryMap<NodeHandle, Light>,

    // === Scene-wide settings ===
    pub active_camera: Option<NodeHandle>,
    /// sRGB clear color.
    pub background: Vec3,
    pub fog: Option<Fog>,
    pub environment: Environment,
    pub sky: Option<Sky>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            names: SparseSecondaryMap::new(),
            name_index: FxHashMap::default(),
            geometries: SlotMap::with_key(),
            materials: SlotMap::with_key(),
            meshes: SparseSecondaryMap::new(),
            points: SparseSecondaryMap::new(),
            cameras: SparseSecondaryMap::new(),
            lights: SparseSecondaryMap::new(),
            active_camera: None,
            background: Vec3::ZERO,
            fog: None,
            environment: Environment::default(),
            sky: None,
        }
    }

    // ========================================================================
    // Node lifecycle
    // ========================================================================

    /// Inserts a node at the root level.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Inserts an empty root node.
    pub fn create_node(&mut self) -> NodeHandle {
        self.add_node(Node::new())
    }

    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        let handle = self.create_node();
        self.set_name(handle, name);
        handle
    }

    /// Starts a fluent node definition.
    pub fn build_node(&mut self, name: &str) -> NodeBuilder<'_> {
        NodeBuilder::new(self, name)
    }

    /// Removes `handle` and its whole subtree, including components.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let Some(node) = self.nodes.get(handle) else {
            return;
        };

        match node.parent {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(parent) {
                    p.children.retain(|c| *c != handle);
                }
            }
            None => self.root_nodes.retain(|r| *r != handle),
        }

        let mut pending = vec![handle];
        while let Some(current) = pending.pop() {
            let Some(node) = self.nodes.remove(current) else {
                continue;
            };
            pending.extend(node.children.iter().copied());

            self.meshes.remove(current);
            self.points.remove(current);
            self.cameras.remove(current);
            self.lights.remove(current);
            if let Some(name) = self.names.remove(current) {
                self.name_index.remove(&name);
            }
            if self.active_camera == Some(current) {
                self.active_camera = None;
            }
        }
    }

    /// Makes `child` a child of `parent`, detaching it from its previous
    /// parent. Attaching a node to itself or to one of its descendants is
    /// refused.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself");
            return;
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            log::warn!("attach: unknown node ({child:?} -> {parent:?})");
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("attach: {child:?} is an ancestor of {parent:?}, refusing to create a cycle");
            return;
        }

        let old_parent = self.nodes[child].parent;
        match old_parent {
            Some(p) => {
                if let Some(old) = self.nodes.get_mut(p) {
                    old.children.retain(|c| *c != child);
                }
            }
            None => self.root_nodes.retain(|r| *r != child),
        }

        self.nodes[parent].children.push(child);
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.transform.mark_dirty();
    }

    /// Whether `ancestor` lies on the parent chain of `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.nodes.get(node).and_then(Node::parent);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(Node::parent);
        }
        false
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    // ========================================================================
    // Names
    // ========================================================================

    pub fn set_name(&mut self, handle: NodeHandle, name: &str) {
        if !self.nodes.contains_key(handle) {
            return;
        }
        if let Some(old) = self.names.insert(handle, name.to_string()) {
            self.name_index.remove(&old);
        }
        if let Some(previous) = self.name_index.insert(name.to_string(), handle)
            && previous != handle
        {
            log::warn!("Node name {name:?} reassigned from {previous:?} to {handle:?}");
        }
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.names.get(handle).map(String::as_str)
    }

    #[must_use]
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.name_index.get(name).copied()
    }

    // ========================================================================
    // Resources & components
    // ========================================================================

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryKey {
        self.geometries.insert(geometry)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialKey {
        self.materials.insert(material)
    }

    pub fn set_mesh(&mut self, handle: NodeHandle, mesh: Mesh) {
        if self.nodes.contains_key(handle) {
            self.meshes.insert(handle, mesh);
        }
    }

    pub fn set_points(&mut self, handle: NodeHandle, points: Points) {
        if self.nodes.contains_key(handle) {
            self.points.insert(handle, points);
        }
    }

    pub fn set_camera(&mut self, handle: NodeHandle, camera: Camera) {
        if self.nodes.contains_key(handle) {
            self.cameras.insert(handle, camera);
        }
    }

    pub fn set_light(&mut self, handle: NodeHandle, light: Light) {
        if self.nodes.contains_key(handle) {
            self.lights.insert(handle, light);
        }
    }

    /// Active camera together with its node transform.
    pub fn query_main_camera(&mut self) -> Option<(&mut Transform, &mut Camera)> {
        let handle = self.active_camera?;
        let camera = self.cameras.get_mut(handle)?;
        let transform = &mut self.nodes.get_mut(handle)?.transform;
        Some((transform, camera))
    }

    /// Clear color with alpha, as handed to the render pass.
    #[must_use]
    pub fn clear_color(&self) -> Vec4 {
        self.background.extend(1.0)
    }

    // ========================================================================
    // Matrix propagation
    // ========================================================================

    /// Refreshes world matrices. Run once per frame after animation.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy(&mut self.nodes, &mut self.cameras, &self.root_nodes);
    }

    pub fn update_subtree(&mut self, root: NodeHandle) {
        transform_system::update_subtree(&mut self.nodes, &mut self.cameras, root);
    }
}

impl AnimationTargets for Scene {
    type Handle = NodeHandle;

    fn transform_mut(&mut self, handle: NodeHandle) -> Option<&mut Transform> {
        self.nodes.get_mut(handle).map(|node| &mut node.transform)
    }

    fn particles_mut(&mut self, handle: NodeHandle) -> Option<&mut ParticleField> {
        self.points.get_mut(handle).map(|points| &mut points.field)
    }
}

// ============================================================================
// NodeBuilder
// ============================================================================

/// Fluent node construction.
///
/// ```rust,ignore
/// let head = scene
///     .build_node("Head")
///     .with_position(Vec3::new(0.0, 0.95, 0.0))
///     .with_mesh(sphere, skin)
///     .cast_shadow()
///     .with_parent(figure)
///     .build();
/// ```
pub struct NodeBuilder<'a> {
    scene: &'a mut Scene,
    name: String,
    node: Node,
    parent: Option<NodeHandle>,
    mesh: Option<Mesh>,
}

impl<'a> NodeBuilder<'a> {
    fn new(scene: &'a mut Scene, name: &str) -> Self {
        Self {
            scene,
            name: name.to_string(),
            node: Node::new(),
            parent: None,
            mesh: None,
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.node.transform.position = position;
        self
    }

    /// XYZ Euler angles, radians.
    #[must_use]
    pub fn with_rotation(mut self, euler: Vec3) -> Self {
        self.node.transform.set_rotation_euler(euler.x, euler.y, euler.z);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.node.transform.scale = scale;
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: NodeHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn with_mesh(mut self, geometry: GeometryKey, material: MaterialKey) -> Self {
        self.mesh = Some(Mesh::new(geometry, material));
        self
    }

    #[must_use]
    pub fn cast_shadow(mut self) -> Self {
        if let Some(mesh) = &mut self.mesh {
            mesh.cast_shadow = true;
        }
        self
    }

    #[must_use]
    pub fn receive_shadow(mut self) -> Self {
        if let Some(mesh) = &mut self.mesh {
            mesh.receive_shadow = true;
        }
        self
    }

    pub fn build(self) -> NodeHandle {
        let Self { scene, name, node, parent, mesh } = self;

        let handle = scene.add_node(node);
        scene.set_name(handle, &name);
        if let Some(mesh) = mesh {
            scene.set_mesh(handle, mesh);
        }
        if let Some(parent) = parent {
            scene.attach(handle, parent);
        }
        handle
    }
}
