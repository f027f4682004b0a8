// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strategy trait for splitting a partition into sub-regions.

use alloc::vec::Vec;
use glam::DVec3;
use smallvec::SmallVec;
use understory_bounds::Aabb3D;
use understory_scene::Scene;

use crate::options::TreeBuilderOptions;
use crate::wrapper::NodeWrapper;

/// Partitions produced by one split. Strategies produce at most eight.
pub type Partitions = SmallVec<[NodeWrapper; 8]>;

/// Splitting strategy used by [`TreeBuilder`][crate::TreeBuilder].
///
/// A strategy only does box math: [`split_boxes`][SplitStrategy::split_boxes] sees the scene
/// immutably, so it cannot attach or detach nodes. Distribution of children and attachment
/// of the new partitions are left to the builder.
pub trait SplitStrategy {
    /// Compute the tight boxes of the sub-partitions of `source`.
    fn split_boxes(
        &self,
        scene: &Scene,
        source: &NodeWrapper,
        options: &TreeBuilderOptions,
    ) -> SmallVec<[Aabb3D; 8]>;

    /// Create one fresh, unattached group per box from
    /// [`split_boxes`][SplitStrategy::split_boxes] and wrap it at `source.depth + 1`.
    fn split(
        &self,
        scene: &mut Scene,
        source: &NodeWrapper,
        options: &TreeBuilderOptions,
    ) -> Partitions {
        let boxes = self.split_boxes(scene, source, options);
        boxes
            .into_iter()
            .map(|tight| {
                let group = scene.insert_group(None);
                NodeWrapper::partition(group, tight, options.loose_factor, source.depth + 1)
            })
            .collect()
    }
}

/// The region a strategy subdivides: the world bounds of the partition's content with
/// `use_geometry_bbs`, its nominal tight box otherwise (or when it has no geometry).
pub fn split_region(scene: &Scene, source: &NodeWrapper, options: &TreeBuilderOptions) -> Aabb3D {
    if options.use_geometry_bbs {
        scene.world_bounds(source.group).unwrap_or(source.tight)
    } else {
        source.tight
    }
}

/// World-bound centres of the direct children of the partition that have any geometry.
pub(crate) fn child_centers(scene: &Scene, source: &NodeWrapper) -> Vec<DVec3> {
    scene
        .children_of(source.group)
        .iter()
        .filter_map(|&c| scene.world_bounds(c))
        .map(|b| b.center())
        .collect()
}
