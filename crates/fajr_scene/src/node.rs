use fajr_core::Transform;
use glam::Affine3A;
use smallvec::SmallVec;

use crate::NodeHandle;

/// A scene node: hierarchy links, transform and visibility.
///
/// Components (mesh, points, camera, light) live in the [`Scene`]'s
/// component maps keyed by the node's handle.
///
/// [`Scene`]: crate::Scene
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: SmallVec<[NodeHandle; 4]>,

    pub transform: Transform,
    pub visible: bool,
}

impl Node {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: None,
            children: SmallVec::new(),
            transform: Transform::new(),
            visible: true,
        }
    }

    #[must_use]
    pub fn with_transform(transform: Transform) -> Self {
        Self { transform, ..Self::new() }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        self.transform.world_matrix()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
