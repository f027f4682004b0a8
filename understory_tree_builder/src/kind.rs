// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime selection of a splitting strategy.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use understory_bounds::Aabb3D;
use understory_scene::{NodeId, Scene};

use crate::builder::{
    BinaryTreeBuilder, BuildReport, KdTreeBuilder, OctreeBuilder, QuadTreeBuilder,
};
use crate::error::TreeBuilderError;
use crate::options::TreeBuilderOptions;

/// The closed set of splitting strategies, for choosing a builder from configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// [`Binary`][crate::strategies::Binary]
    Binary,
    /// [`Kd`][crate::strategies::Kd]
    Kd,
    /// [`Quad`][crate::strategies::Quad]
    Quad,
    /// [`Octree`][crate::strategies::Octree]
    Octree,
}

impl StrategyKind {
    /// Run the matching builder.
    ///
    /// With `target = None`, the current world bounds of `root` are used (see
    /// [`TreeBuilder::build_tree_auto`][crate::TreeBuilder::build_tree_auto]).
    pub fn build_tree(
        self,
        options: TreeBuilderOptions,
        scene: &mut Scene,
        root: NodeId,
        target: Option<Aabb3D>,
    ) -> Result<BuildReport, TreeBuilderError> {
        macro_rules! run {
            ($builder:ty) => {{
                let builder = <$builder>::new(options);
                match target {
                    Some(t) => builder.build_tree(scene, root, t),
                    None => builder.build_tree_auto(scene, root),
                }
            }};
        }
        match self {
            Self::Binary => run!(BinaryTreeBuilder),
            Self::Kd => run!(KdTreeBuilder),
            Self::Quad => run!(QuadTreeBuilder),
            Self::Octree => run!(OctreeBuilder),
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Kd => "kd",
            Self::Quad => "quad",
            Self::Octree => "octree",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = TreeBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" => Ok(Self::Binary),
            "kd" | "k-d" | "kdtree" => Ok(Self::Kd),
            "quad" | "quadtree" => Ok(Self::Quad),
            "octree" | "oct" => Ok(Self::Octree),
            _ => Err(TreeBuilderError::UnknownStrategy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use understory_scene::LocalNode;

    #[test]
    fn parses_names() {
        for kind in [
            StrategyKind::Binary,
            StrategyKind::Kd,
            StrategyKind::Quad,
            StrategyKind::Octree,
        ] {
            assert_eq!(kind.name().parse::<StrategyKind>(), Ok(kind));
        }
        assert_eq!(" QuadTree ".parse::<StrategyKind>(), Ok(StrategyKind::Quad));
        assert!(matches!(
            "bsp".parse::<StrategyKind>(),
            Err(TreeBuilderError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn dispatches_to_the_named_builder() {
        let mut scene = Scene::new();
        let root = scene.insert_group(None);
        for i in 0..16 {
            let p = DVec3::new(f64::from(i), 0.0, 0.0);
            scene.insert(Some(root), LocalNode::geometry(Aabb3D::new(p, p + DVec3::splat(0.5))));
        }
        let report = StrategyKind::Binary
            .build_tree(
                TreeBuilderOptions::new().with_max_child_count(4),
                &mut scene,
                root,
                None,
            )
            .unwrap();
        assert_eq!(report.flattened_children, 16);
        assert!(report.partitions_created >= 2);
        assert_eq!(scene.child_count(root), 2);
    }
}
