// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_bounds::Aabb3D;
use understory_scene::NodeId;

/// One partition of the spatial tree while it is being built.
///
/// Pairs the partition's group node with its tight box (the region it stands for) and its
/// loose box (the tight box scaled by the loose factor). A wrapper only lives for one level
/// of the build; its group is either attached to the tree or removed from the scene when the
/// level is finalized.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeWrapper {
    /// Group node collecting the partition's content.
    pub group: NodeId,
    /// Exact region of the partition.
    pub tight: Aabb3D,
    /// Region content may extend into; always contains `tight`.
    pub loose: Aabb3D,
    /// Recursion depth; the root partition has depth 0.
    pub depth: u32,
}

impl NodeWrapper {
    /// Root partition: tight and loose box are both `target`.
    pub fn root(group: NodeId, target: Aabb3D) -> Self {
        Self {
            group,
            tight: target,
            loose: target,
            depth: 0,
        }
    }

    /// Partition at `depth` whose loose box is `tight` scaled by `loose_factor`.
    pub fn partition(group: NodeId, tight: Aabb3D, loose_factor: f64, depth: u32) -> Self {
        Self {
            group,
            tight,
            loose: tight.resized_rel(loose_factor),
            depth,
        }
    }

    /// Whether a child with world bounds `bounds` belongs into this partition: its centre lies
    /// in the tight box and the whole bounds fit in the loose box.
    #[inline]
    pub fn accepts(&self, bounds: &Aabb3D) -> bool {
        self.tight.contains_point(bounds.center()) && self.loose.contains_box(bounds)
    }
}
