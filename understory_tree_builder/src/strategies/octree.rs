// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::SmallVec;
use understory_bounds::Aabb3D;
use understory_scene::Scene;

use crate::options::TreeBuilderOptions;
use crate::strategy::{SplitStrategy, split_region};
use crate::wrapper::NodeWrapper;

/// Octree splits into up to eight sub-boxes.
///
/// Regular 2×2×2 octants by default; [`Aabb3D::split_cube_like`] with `prefer_cubes`. With
/// `exact_cubes`, the root region is first grown into a cube.
#[derive(Copy, Clone, Debug, Default)]
pub struct Octree;

impl SplitStrategy for Octree {
    fn split_boxes(
        &self,
        scene: &Scene,
        source: &NodeWrapper,
        options: &TreeBuilderOptions,
    ) -> SmallVec<[Aabb3D; 8]> {
        let mut region = split_region(scene, source, options);
        if source.depth == 0 && options.exact_cubes {
            region = region.with_cubic_extent();
        }
        let boxes = if options.prefer_cubes {
            region.split_cube_like()
        } else {
            region.split_up(2, 2, 2)
        };
        boxes.into_iter().collect()
    }
}
