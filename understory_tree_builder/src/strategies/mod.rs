// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splitting strategies.
//!
//! - `binary`: halves the region across its longest axis (2 partitions).
//! - `kd`: splits at the median of the children's centres (2 partitions).
//! - `quad`: splits in the horizontal X-Z plane only (1, 2, or 4 partitions).
//! - `octree`: splits into octants, optionally cube-biased (up to 8 partitions).
//!
//! Cube preference
//! ---------------
//! With `prefer_cubes`, quad and octree splits leave an axis whole when it is shorter than the
//! longest one by more than a factor of √2, so partitions tend towards cubes instead of
//! becoming ever thinner slabs. The k-d strategy picks the longest axis instead of cycling.

mod binary;
mod kd;
mod octree;
mod quad;

pub use binary::Binary;
pub use kd::Kd;
pub use octree::Octree;
pub use quad::Quad;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeWrapper, SplitStrategy, TreeBuilderOptions};
    use glam::DVec3;
    use understory_bounds::Aabb3D;
    use understory_scene::{LocalNode, Scene};

    fn check_loose_contains_tight<S: SplitStrategy>(strategy: S, options: &TreeBuilderOptions) {
        let mut scene = Scene::new();
        let root = scene.insert_group(None);
        for i in 0..12 {
            let p = DVec3::new(f64::from(i), f64::from(i % 3), f64::from(11 - i));
            scene.insert(
                Some(root),
                LocalNode::geometry(Aabb3D::new(p, p + DVec3::splat(0.5))),
            );
        }
        let target = Aabb3D::new(DVec3::new(0.0, 0.0, 0.0), DVec3::new(12.0, 3.0, 12.0));
        let source = NodeWrapper::root(root, target);
        let parts = strategy.split(&mut scene, &source, options);
        assert!(!parts.is_empty());
        for part in &parts {
            assert_eq!(part.depth, 1);
            for corner in part.tight.corners() {
                assert!(part.loose.contains_point(corner));
            }
            assert!(scene.is_alive(part.group));
            assert_eq!(scene.parent_of(part.group), None, "partitions start unattached");
            assert_eq!(scene.child_count(part.group), 0);
        }
        // Splitting does not touch the existing hierarchy.
        assert_eq!(scene.child_count(root), 12);
    }

    #[test]
    fn every_strategy_keeps_loose_around_tight() {
        for options in [
            TreeBuilderOptions::default(),
            TreeBuilderOptions::default()
                .with_prefer_cubes(true)
                .with_exact_cubes(true),
            TreeBuilderOptions::default()
                .with_loose_factor(1.0)
                .with_geometry_bbs(true),
            TreeBuilderOptions::default().with_loose_factor(1.37),
        ] {
            check_loose_contains_tight(Binary, &options);
            check_loose_contains_tight(Kd, &options);
            check_loose_contains_tight(Quad, &options);
            check_loose_contains_tight(Octree, &options);
        }
    }
}
