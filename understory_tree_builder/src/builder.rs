// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive partition building: split, distribute, finalize, recurse.

use alloc::vec::Vec;
use understory_bounds::Aabb3D;
use understory_scene::{NodeId, Scene};

use crate::error::TreeBuilderError;
use crate::flatten::flatten;
use crate::options::TreeBuilderOptions;
use crate::strategies::{Binary, Kd, Octree, Quad};
use crate::strategy::{Partitions, SplitStrategy};
use crate::wrapper::NodeWrapper;

/// Tree builder splitting into two halves across the longest axis.
pub type BinaryTreeBuilder = TreeBuilder<Binary>;
/// Tree builder splitting at median child centres.
pub type KdTreeBuilder = TreeBuilder<Kd>;
/// Tree builder splitting in the X-Z plane.
pub type QuadTreeBuilder = TreeBuilder<Quad>;
/// Tree builder splitting into octants.
pub type OctreeBuilder = TreeBuilder<Octree>;

/// Summary of one [`TreeBuilder::build_tree`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Children directly below the root after flattening.
    pub flattened_children: usize,
    /// Partition groups that were attached to the tree.
    pub partitions_created: usize,
    /// Partition groups discarded because nothing was distributed into them.
    pub partitions_pruned: usize,
    /// Deepest partition attached to the tree (0 if the root was not split).
    pub max_depth: u32,
    /// Partitions left unsplit because all their children share one centre.
    pub degenerate_leaves: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SplitDecision {
    Split,
    Leaf,
    Degenerate,
}

/// Restructures a flat scene subtree into a loose spatial hierarchy.
///
/// The type parameter `S` is the splitting strategy; the builder itself owns the recursion
/// and is the only part that moves nodes. For each partition it
///
/// 1. checks whether the partition should be split at all (depth and child-count limits,
///    degenerate content),
/// 2. asks the strategy for sub-regions, each wrapped in a fresh unattached group,
/// 3. moves every child into the first sub-region whose tight box contains the child's centre
///    and whose loose box contains the child's bounds; children that fit nowhere stay put,
/// 4. discards empty sub-regions and attaches the others below the partition,
/// 5. recurses into the attached sub-regions.
///
/// All moves keep world transforms, so the rendered scene does not change.
///
/// ## Example
///
/// ```rust
/// use glam::DVec3;
/// use understory_bounds::Aabb3D;
/// use understory_scene::{LocalNode, Scene};
/// use understory_tree_builder::{OctreeBuilder, TreeBuilderOptions};
///
/// let mut scene = Scene::new();
/// let root = scene.insert_group(None);
/// for x in 0..4 {
///     for z in 0..4 {
///         let p = DVec3::new(f64::from(x) * 2.0, 0.0, f64::from(z) * 2.0);
///         scene.insert(Some(root), LocalNode::geometry(Aabb3D::new(p, p + DVec3::ONE)));
///     }
/// }
///
/// let builder = OctreeBuilder::new(TreeBuilderOptions::new().with_max_child_count(4));
/// let report = builder.build_tree_auto(&mut scene, root).unwrap();
/// assert!(report.partitions_created > 0);
/// assert!(scene.child_count(root) <= 8);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TreeBuilder<S: SplitStrategy> {
    strategy: S,
    options: TreeBuilderOptions,
}

impl<S: SplitStrategy + Default> TreeBuilder<S> {
    /// Create a builder using the strategy's default constructor.
    pub fn new(options: TreeBuilderOptions) -> Self {
        Self::with_strategy(S::default(), options)
    }
}

impl<S: SplitStrategy> TreeBuilder<S> {
    /// Create a builder with an explicit strategy instance.
    pub fn with_strategy(strategy: S, options: TreeBuilderOptions) -> Self {
        Self { strategy, options }
    }

    /// The options this builder was created with.
    pub fn options(&self) -> &TreeBuilderOptions {
        &self.options
    }

    /// Flatten the subtree below `root` and rebuild it as a spatial hierarchy over `target`.
    ///
    /// Fails without touching the scene if the options are out of range, `root` is stale, or a
    /// non-closed node below the root carries states.
    pub fn build_tree(
        &self,
        scene: &mut Scene,
        root: NodeId,
        target: Aabb3D,
    ) -> Result<BuildReport, TreeBuilderError> {
        self.options.validate()?;
        let flattened_children = flatten(scene, root)?;
        let mut report = BuildReport {
            flattened_children,
            ..BuildReport::default()
        };
        log::debug!(
            "building spatial tree below {root:?}: {flattened_children} children in {target:?}"
        );
        self.build_partition(scene, NodeWrapper::root(root, target), &mut report);
        log::debug!(
            "spatial tree done: {} partitions ({} pruned), depth {}",
            report.partitions_created,
            report.partitions_pruned,
            report.max_depth
        );
        Ok(report)
    }

    /// Like [`TreeBuilder::build_tree`], with the current world bounds of `root` as target.
    ///
    /// A root without any active geometry is only flattened.
    pub fn build_tree_auto(
        &self,
        scene: &mut Scene,
        root: NodeId,
    ) -> Result<BuildReport, TreeBuilderError> {
        if !scene.is_alive(root) {
            return Err(TreeBuilderError::StaleNode(root));
        }
        match scene.world_bounds(root) {
            Some(target) => self.build_tree(scene, root, target),
            None => {
                self.options.validate()?;
                let flattened_children = flatten(scene, root)?;
                Ok(BuildReport {
                    flattened_children,
                    ..BuildReport::default()
                })
            }
        }
    }

    /// Whether `source` would be split further.
    pub fn can_split(&self, scene: &Scene, source: &NodeWrapper) -> bool {
        self.split_decision(scene, source) == SplitDecision::Split
    }

    fn split_decision(&self, scene: &Scene, source: &NodeWrapper) -> SplitDecision {
        if source.depth >= self.options.max_tree_depth
            || scene.child_count(source.group) <= self.options.max_child_count
        {
            return SplitDecision::Leaf;
        }
        // Every centre is compared with the first one only.
        let mut centers = scene
            .children_of(source.group)
            .iter()
            .filter_map(|&c| scene.world_bounds(c))
            .map(|b| b.center());
        let degenerate = match centers.next() {
            Some(first) => centers.all(|c| c == first),
            None => true,
        };
        if degenerate {
            log::warn!(
                "all {} children of {:?} share the same centre; not splitting at depth {}",
                scene.child_count(source.group),
                source.group,
                source.depth
            );
            return SplitDecision::Degenerate;
        }
        SplitDecision::Split
    }

    fn build_partition(&self, scene: &mut Scene, source: NodeWrapper, report: &mut BuildReport) {
        match self.split_decision(scene, &source) {
            SplitDecision::Split => {}
            SplitDecision::Leaf => return,
            SplitDecision::Degenerate => {
                report.degenerate_leaves += 1;
                return;
            }
        }
        let dests = self.strategy.split(scene, &source, &self.options);
        debug_assert!(dests.iter().all(|d| d.depth == source.depth + 1));
        distribute(scene, &source, &dests);
        let survivors = finalize(scene, &source, dests, report);
        log::trace!(
            "split {:?} at depth {} into {} partitions",
            source.group,
            source.depth,
            survivors.len()
        );
        for dest in survivors {
            report.max_depth = report.max_depth.max(dest.depth);
            self.build_partition(scene, dest, report);
        }
    }
}

/// Move every child of `source` into the first destination that accepts it.
///
/// Children that no destination accepts stay below `source`.
fn distribute(scene: &mut Scene, source: &NodeWrapper, dests: &[NodeWrapper]) {
    let children: Vec<NodeId> = scene.children_of(source.group).to_vec();
    for child in children {
        let Some(bounds) = scene.world_bounds(child) else {
            continue;
        };
        if let Some(dest) = dests.iter().find(|d| d.accepts(&bounds)) {
            scene.reparent_keep_world(child, Some(dest.group));
        }
    }
}

/// Remove empty destinations from the scene and attach the rest below `source`.
fn finalize(
    scene: &mut Scene,
    source: &NodeWrapper,
    dests: Partitions,
    report: &mut BuildReport,
) -> Partitions {
    let mut survivors = Partitions::new();
    for dest in dests {
        if scene.child_count(dest.group) == 0 {
            scene.remove(dest.group);
            report.partitions_pruned += 1;
        } else {
            scene.reparent_keep_world(dest.group, Some(source.group));
            report.partitions_created += 1;
            survivors.push(dest);
        }
    }
    survivors
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DAffine3, DVec3};
    use understory_scene::LocalNode;

    fn point(scene: &mut Scene, parent: NodeId, p: DVec3) -> NodeId {
        scene.insert(
            Some(parent),
            LocalNode::geometry(Aabb3D::from_center_extents(p, DVec3::splat(0.5))),
        )
    }

    fn octant_scene() -> (Scene, NodeId, Vec<NodeId>) {
        let mut scene = Scene::new();
        let root = scene.insert_group(None);
        let mut leaves = Vec::new();
        for z in [2.0, 6.0] {
            for y in [2.0, 6.0] {
                for x in [2.0, 6.0] {
                    leaves.push(point(&mut scene, root, DVec3::new(x, y, z)));
                }
            }
        }
        (scene, root, leaves)
    }

    #[test]
    fn octree_splits_octant_centres_into_eight_leaves() {
        let (mut scene, root, leaves) = octant_scene();
        let target = Aabb3D::new(DVec3::ZERO, DVec3::splat(8.0));
        let builder = OctreeBuilder::new(TreeBuilderOptions::new().with_max_child_count(1));
        let report = builder.build_tree(&mut scene, root, target).unwrap();

        assert_eq!(report.partitions_created, 8);
        assert_eq!(report.partitions_pruned, 0);
        assert_eq!(report.max_depth, 1);
        assert_eq!(scene.child_count(root), 8);
        let expected = target.split_up(2, 2, 2);
        for (&part, &leaf) in scene.children_of(root).iter().zip(&leaves) {
            assert!(scene.is_group(part));
            assert_eq!(scene.children_of(part), &[leaf]);
            let bounds = scene.world_bounds(leaf).unwrap();
            assert!(expected.iter().any(|b| b.contains_box(&bounds)));
        }
    }

    #[test]
    fn octree_partition_tight_boxes_are_the_octants() {
        let (mut scene, root, _) = octant_scene();
        let target = Aabb3D::new(DVec3::ZERO, DVec3::splat(8.0));
        let builder = OctreeBuilder::new(TreeBuilderOptions::new().with_max_child_count(1));
        let source = NodeWrapper::root(root, target);
        let dests = builder.strategy.split(&mut scene, &source, builder.options());
        assert_eq!(dests.len(), 8);
        for (dest, octant) in dests.iter().zip(target.split_up(2, 2, 2)) {
            assert_eq!(dest.tight, octant);
            assert_eq!(dest.tight.extents(), DVec3::splat(4.0));
        }
        distribute(&mut scene, &source, &dests);
        for dest in &dests {
            assert_eq!(scene.child_count(dest.group), 1);
        }
        assert_eq!(scene.child_count(root), 0);
    }

    #[test]
    fn empty_octants_are_removed_from_the_scene() {
        let mut scene = Scene::new();
        let root = scene.insert_group(None);
        for p in [
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(2.0, 1.0, 1.0),
            DVec3::new(1.0, 2.0, 1.0),
            DVec3::new(1.0, 1.0, 2.0),
        ] {
            point(&mut scene, root, p);
        }
        let target = Aabb3D::new(DVec3::ZERO, DVec3::splat(8.0));
        let builder = OctreeBuilder::new(
            TreeBuilderOptions::new()
                .with_max_child_count(1)
                .with_max_tree_depth(1),
        );
        let report = builder.build_tree(&mut scene, root, target).unwrap();

        assert_eq!(report.partitions_created, 1);
        assert_eq!(report.partitions_pruned, 7);
        assert_eq!(scene.child_count(root), 1);
        assert_eq!(scene.child_count(scene.children_of(root)[0]), 4);
        // Nothing is left dangling outside the tree.
        assert_eq!(scene.len(), 6);
        assert_eq!(scene.len(), scene.descendants(root).count());
    }

    #[test]
    fn small_groups_are_left_alone() {
        let (mut scene, root, leaves) = octant_scene();
        let before = scene.len();
        let report = OctreeBuilder::new(TreeBuilderOptions::default())
            .build_tree_auto(&mut scene, root)
            .unwrap();
        assert_eq!(report.partitions_created, 0);
        assert_eq!(report.partitions_pruned, 0);
        assert_eq!(scene.len(), before);
        assert_eq!(scene.children_of(root), leaves.as_slice());
    }

    #[test]
    fn identical_centres_stop_the_recursion() {
        let mut scene = Scene::new();
        let root = scene.insert_group(None);
        for _ in 0..5 {
            point(&mut scene, root, DVec3::splat(1.0));
        }
        let builder = BinaryTreeBuilder::new(TreeBuilderOptions::new().with_max_child_count(1));
        let source = NodeWrapper::root(root, scene.world_bounds(root).unwrap());
        assert!(!builder.can_split(&scene, &source));

        let report = builder.build_tree_auto(&mut scene, root).unwrap();
        assert_eq!(report.degenerate_leaves, 1);
        assert_eq!(report.partitions_created, 0);
        assert_eq!(scene.child_count(root), 5);
    }

    #[test]
    fn only_first_centre_is_compared() {
        let mut scene = Scene::new();
        let root = scene.insert_group(None);
        point(&mut scene, root, DVec3::splat(1.0));
        point(&mut scene, root, DVec3::splat(1.0));
        point(&mut scene, root, DVec3::splat(3.0));
        let builder = BinaryTreeBuilder::new(TreeBuilderOptions::new().with_max_child_count(1));
        let source = NodeWrapper::root(root, scene.world_bounds(root).unwrap());
        assert!(builder.can_split(&scene, &source));
    }

    #[test]
    fn depth_limit_stops_splitting() {
        let (mut scene, root, _) = octant_scene();
        let builder = OctreeBuilder::new(
            TreeBuilderOptions::new()
                .with_max_child_count(1)
                .with_max_tree_depth(0),
        );
        let report = builder.build_tree_auto(&mut scene, root).unwrap();
        assert_eq!(report.partitions_created, 0);
        assert_eq!(scene.child_count(root), 8);
    }

    #[test]
    fn unmatched_children_stay_at_their_level() {
        let mut scene = Scene::new();
        let root = scene.insert_group(None);
        let small: Vec<_> = (0..3)
            .map(|i| point(&mut scene, root, DVec3::new(1.0 + f64::from(i), 1.0, 1.0)))
            .collect();
        // Wide enough that no loose half can contain it.
        let wide = scene.insert(
            Some(root),
            LocalNode::geometry(Aabb3D::new(DVec3::ZERO, DVec3::new(8.0, 1.0, 1.0))),
        );
        let builder = BinaryTreeBuilder::new(
            TreeBuilderOptions::new()
                .with_max_child_count(2)
                .with_loose_factor(1.0),
        );
        let target = Aabb3D::new(DVec3::ZERO, DVec3::new(8.0, 2.0, 2.0));
        builder.build_tree(&mut scene, root, target).unwrap();

        assert_eq!(scene.parent_of(wide), Some(root));
        for leaf in small {
            assert_ne!(scene.parent_of(leaf), Some(root));
            assert!(scene.is_in_subtree(leaf, root));
        }
    }

    #[test]
    fn moves_keep_world_transforms_under_transformed_root() {
        let mut scene = Scene::new();
        let root = scene.insert(
            None,
            LocalNode::group().with_transform(DAffine3::from_scale_rotation_translation(
                DVec3::splat(1.5),
                glam::DQuat::from_rotation_y(0.4),
                DVec3::new(-3.0, 2.0, 8.0),
            )),
        );
        let leaves: Vec<_> = (0..20)
            .map(|i| {
                let f = f64::from(i);
                point(&mut scene, root, DVec3::new(f, (f * 0.7) % 3.0, 20.0 - f))
            })
            .collect();
        let before: Vec<_> = leaves
            .iter()
            .map(|&l| scene.world_transform(l).unwrap())
            .collect();

        let builder = KdTreeBuilder::new(TreeBuilderOptions::new().with_max_child_count(2));
        let report = builder.build_tree_auto(&mut scene, root).unwrap();
        assert!(report.partitions_created > 0);

        for (&leaf, tf) in leaves.iter().zip(before) {
            assert!(scene.world_transform(leaf).unwrap().abs_diff_eq(tf, 1e-9));
        }
    }

    #[test]
    fn rejects_loose_factor_below_one() {
        let (mut scene, root, _) = octant_scene();
        let before = scene.len();
        let err = OctreeBuilder::new(TreeBuilderOptions::new().with_loose_factor(0.5))
            .build_tree_auto(&mut scene, root)
            .unwrap_err();
        assert!(matches!(err, TreeBuilderError::InvalidOption { .. }));
        assert_eq!(scene.len(), before);
    }
}
