//! World-matrix propagation.
//!
//! Walks the hierarchy depth-first with an explicit stack, recomputing a
//! node's world matrix only when its own TRS or an ancestor's changed.
//! Camera components follow their node's new world matrix.
//!
//! Only the node and camera maps are borrowed, so callers can hold other
//! parts of the scene at the same time.

use glam::Affine3A;
use slotmap::{SlotMap, SparseSecondaryMap};

use crate::NodeHandle;
use crate::camera::Camera;
use crate::node::Node;

/// Updates world matrices for every tree reachable from `roots`.
pub fn update_hierarchy(
    nodes: &mut SlotMap<NodeHandle, Node>,
    cameras: &mut SparseSecondaryMap<NodeHandle, Camera>,
    roots: &[NodeHandle],
) {
    let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(64);
    for &root in roots.iter().rev() {
        stack.push((root, Affine3A::IDENTITY, false));
    }
    propagate(nodes, cameras, &mut stack);
}

/// Updates the subtree rooted at `root`, starting from its parent's
/// current world matrix. The root is always recomputed.
pub fn update_subtree(
    nodes: &mut SlotMap<NodeHandle, Node>,
    cameras: &mut SparseSecondaryMap<NodeHandle, Camera>,
    root: NodeHandle,
) {
    let Some(node) = nodes.get(root) else {
        return;
    };
    let parent_world = node
        .parent
        .and_then(|p| nodes.get(p))
        .map_or(Affine3A::IDENTITY, |p| *p.transform.world_matrix());

    let mut stack = vec![(root, parent_world, true)];
    propagate(nodes, cameras, &mut stack);
}

fn propagate(
    nodes: &mut SlotMap<NodeHandle, Node>,
    cameras: &mut SparseSecondaryMap<NodeHandle, Camera>,
    stack: &mut Vec<(NodeHandle, Affine3A, bool)>,
) {
    while let Some((handle, parent_world, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let world_changed = local_changed || parent_changed;

        if world_changed {
            let world = parent_world * *node.transform.local_matrix();
            node.transform.set_world_matrix(world);

            if let Some(camera) = cameras.get_mut(handle) {
                camera.update_view_projection(&world);
            }
        }

        let world = *node.transform.world_matrix();
        for &child in node.children.iter().rev() {
            stack.push((child, world, world_changed));
        }
    }
}
