// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::{SmallVec, smallvec};
use understory_bounds::Aabb3D;
use understory_scene::Scene;

use crate::options::TreeBuilderOptions;
use crate::strategy::{SplitStrategy, split_region};
use crate::wrapper::NodeWrapper;

/// Binary splits: two halves across the longest axis of the region.
///
/// On equal extents X is preferred, then Z over Y.
#[derive(Copy, Clone, Debug, Default)]
pub struct Binary;

impl SplitStrategy for Binary {
    fn split_boxes(
        &self,
        scene: &Scene,
        source: &NodeWrapper,
        options: &TreeBuilderOptions,
    ) -> SmallVec<[Aabb3D; 8]> {
        let region = split_region(scene, source, options);
        let axis = region.longest_axis();
        let (lower, upper) = region.split_at(axis, region.center()[axis.index()]);
        smallvec![lower, upper]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use understory_bounds::Axis;

    #[test]
    fn splits_across_dominant_axis() {
        let mut scene = Scene::new();
        let root = scene.insert_group(None);
        let target = Aabb3D::new(DVec3::ZERO, DVec3::new(10.0, 1.0, 1.0));
        let boxes = Binary.split_boxes(
            &scene,
            &NodeWrapper::root(root, target),
            &TreeBuilderOptions::default(),
        );
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0], Aabb3D::new(DVec3::ZERO, DVec3::new(5.0, 1.0, 1.0)));
        assert_eq!(
            boxes[1],
            Aabb3D::new(DVec3::new(5.0, 0.0, 0.0), DVec3::new(10.0, 1.0, 1.0))
        );
        assert_eq!(boxes[1].extents(), DVec3::new(5.0, 1.0, 1.0));

        let parts = Binary.split(
            &mut scene,
            &NodeWrapper::root(root, target),
            &TreeBuilderOptions::default(),
        );
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].loose.extents(), DVec3::new(10.0, 2.0, 2.0));
    }

    #[test]
    fn ties_prefer_x_then_z() {
        let mut scene = Scene::new();
        let group = scene.insert_group(None);
        let opts = TreeBuilderOptions::default();
        let cube = NodeWrapper::root(group, Aabb3D::new(DVec3::ZERO, DVec3::splat(2.0)));
        let boxes = Binary.split_boxes(&scene, &cube, &opts);
        assert_eq!(boxes[0].extent(Axis::X), 1.0);

        let yz = NodeWrapper::root(group, Aabb3D::new(DVec3::ZERO, DVec3::new(1.0, 2.0, 2.0)));
        let boxes = Binary.split_boxes(&scene, &yz, &opts);
        assert_eq!(boxes[0].extent(Axis::Z), 1.0);
        assert_eq!(boxes[0].extent(Axis::Y), 2.0);
    }
}
