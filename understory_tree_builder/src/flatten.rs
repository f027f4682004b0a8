// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collapsing a subtree into a single level of closed children.

use alloc::vec::Vec;
use understory_scene::{NodeFlags, NodeId, Scene};

use crate::error::TreeBuilderError;

/// Collapse the subtree below `root` so that all closed subtrees become direct children of
/// `root`, and destroy every other node below it.
///
/// Closed subtrees (closed groups and geometry leaves) are moved verbatim and keep their world
/// transforms; their interior is never visited. Inactive groups are moved the same way, so
/// hidden content stays hidden. Returns the number of children `root` has afterwards.
///
/// The whole subtree is validated before anything is changed: if a node below the root that is
/// not closed carries rendering states, [`TreeBuilderError::StatesBelowRoot`] is returned and
/// the scene is left untouched.
pub fn flatten(scene: &mut Scene, root: NodeId) -> Result<usize, TreeBuilderError> {
    if !scene.is_alive(root) {
        return Err(TreeBuilderError::StaleNode(root));
    }

    let mut closed = Vec::new();
    let mut open = Vec::new();
    let mut stack: Vec<NodeId> = scene.children_of(root).iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        if scene.is_closed(id) || !is_active(scene, id) {
            closed.push(id);
            continue;
        }
        if scene.has_states(id) {
            return Err(TreeBuilderError::StatesBelowRoot { node: id });
        }
        open.push(id);
        stack.extend(scene.children_of(id).iter().rev().copied());
    }

    for &id in &closed {
        if scene.parent_of(id) != Some(root) {
            scene.reparent_keep_world(id, Some(root));
        }
    }
    // Nested open groups are already gone once their ancestor is removed.
    for id in open {
        scene.remove(id);
    }
    debug_assert_eq!(scene.child_count(root), closed.len());
    Ok(closed.len())
}

fn is_active(scene: &Scene, id: NodeId) -> bool {
    scene.flags(id).is_some_and(|f| f.contains(NodeFlags::ACTIVE))
}
