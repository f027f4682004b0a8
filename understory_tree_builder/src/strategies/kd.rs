// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use smallvec::{SmallVec, smallvec};
use understory_bounds::{Aabb3D, Axis};
use understory_scene::Scene;

use crate::options::TreeBuilderOptions;
use crate::strategy::{SplitStrategy, child_centers, split_region};
use crate::wrapper::NodeWrapper;

/// K-d splits: two boxes divided at the median of the children's centres.
///
/// The axis cycles X, Y, Z with depth, or is the region's longest axis with `prefer_cubes`.
/// The median is found with a selection (`len / 2`-th element), not a full sort.
#[derive(Copy, Clone, Debug, Default)]
pub struct Kd;

impl SplitStrategy for Kd {
    fn split_boxes(
        &self,
        scene: &Scene,
        source: &NodeWrapper,
        options: &TreeBuilderOptions,
    ) -> SmallVec<[Aabb3D; 8]> {
        let region = split_region(scene, source, options);
        let axis = if options.prefer_cubes {
            region.longest_axis()
        } else {
            Axis::cycle(source.depth)
        };
        let mut values: Vec<f64> = child_centers(scene, source)
            .into_iter()
            .map(|c| c[axis.index()])
            .collect();
        let split = if values.is_empty() {
            region.center()[axis.index()]
        } else {
            let mid = values.len() / 2;
            *values.select_nth_unstable_by(mid, f64::total_cmp).1
        };
        let (lower, upper) = region.split_at(axis, split);
        smallvec![lower, upper]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use understory_scene::LocalNode;

    fn scene_with_x_centers(xs: &[f64]) -> (Scene, NodeWrapper) {
        let mut scene = Scene::new();
        let root = scene.insert_group(None);
        for &x in xs {
            let c = DVec3::new(x, 0.5, 0.5);
            scene.insert(
                Some(root),
                LocalNode::geometry(Aabb3D::from_center_extents(c, DVec3::splat(0.5))),
            );
        }
        let target = Aabb3D::new(DVec3::ZERO, DVec3::new(101.0, 1.0, 1.0));
        (scene, NodeWrapper::root(root, target))
    }

    #[test]
    fn splits_at_median_centre() {
        let (scene, source) = scene_with_x_centers(&[100.0, 2.0, 4.0, 1.0, 3.0]);
        let boxes = Kd.split_boxes(&scene, &source, &TreeBuilderOptions::default());
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].max.x, 3.0);
        assert_eq!(boxes[1].min.x, 3.0);
        assert_eq!(boxes[0].min, source.tight.min);
        assert_eq!(boxes[1].max, source.tight.max);
    }

    #[test]
    fn axis_cycles_with_depth() {
        let (scene, mut source) = scene_with_x_centers(&[1.0, 2.0, 3.0]);
        source.depth = 1;
        let boxes = Kd.split_boxes(&scene, &source, &TreeBuilderOptions::default());
        assert_eq!(boxes[0].max.y, 0.5, "depth 1 splits along Y");
        assert_eq!(boxes[0].max.x, 101.0);

        let boxes = Kd.split_boxes(
            &scene,
            &source,
            &TreeBuilderOptions::default().with_prefer_cubes(true),
        );
        assert_eq!(boxes[0].max.x, 2.0, "cube preference picks the longest axis");
    }
}
