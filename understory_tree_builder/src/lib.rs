// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tree_builder --heading-base-level=0

//! Understory Tree Builder: loose spatial hierarchies for Understory scenes.
//!
//! Understory Tree Builder takes a (usually flat) subtree of an [`understory_scene::Scene`] and
//! reorganizes it into a hierarchy of spatial partitions, ready for culling and visibility
//! queries.
//!
//! - Flattens the subtree first, keeping closed subtrees as atomic children ([`flatten`]).
//! - Recursively splits partitions with a pluggable [`SplitStrategy`]: [`Binary`], [`Kd`],
//!   [`Quad`], or [`Octree`].
//! - Uses *loose* partitions: a child belongs to the first partition whose tight box contains
//!   its centre and whose loose box (tight box scaled by the loose factor) contains all of it.
//!   Children straddling every boundary stay at the level where they are.
//! - Moves nodes without changing their world transforms.
//!
//! ## Preconditions
//!
//! Partition groups carry no rendering states, so restructuring is only transparent if no
//! state lives between the root and the closed subtrees. [`flatten`] (and with it every build)
//! checks this up front and fails with [`TreeBuilderError::StatesBelowRoot`] before changing
//! anything.
//!
//! ## Configuration
//!
//! [`TreeBuilderOptions`] can be built in code or parsed from a key-value [`OptionMap`] with the
//! keys in [`options`] (`MAX_TREE_DEPTH`, `MAX_CHILD_COUNT`, `LOOSE_FACTOR`,
//! `USE_GEOMETRY_BB`, `PREFERE_CUBES`, `EXACT_CUBES`). [`StrategyKind`] selects a strategy by
//! name at runtime.
//!
//! # Example
//!
//! ```rust
//! use glam::DVec3;
//! use understory_bounds::Aabb3D;
//! use understory_scene::{LocalNode, Scene};
//! use understory_tree_builder::{BinaryTreeBuilder, TreeBuilderOptions};
//!
//! let mut scene = Scene::new();
//! let root = scene.insert_group(None);
//! for i in 0..10 {
//!     let p = DVec3::new(f64::from(i), 0.0, 0.0);
//!     scene.insert(Some(root), LocalNode::geometry(Aabb3D::new(p, p + DVec3::splat(0.5))));
//! }
//!
//! let builder = BinaryTreeBuilder::new(TreeBuilderOptions::new().with_max_child_count(2));
//! let report = builder.build_tree_auto(&mut scene, root).unwrap();
//! assert_eq!(scene.child_count(root), 2);
//! assert!(report.max_depth >= 2);
//! ```
//!
//! ## Logging
//!
//! Progress is reported through the [`log`] facade at `debug` and `trace` level. Partitions
//! whose children all share one centre cannot be split; they are reported with `warn!` and
//! left as leaves.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod builder;
mod error;
mod flatten;
mod kind;
pub mod options;
pub mod strategies;
mod strategy;
mod wrapper;

pub use builder::{
    BinaryTreeBuilder, BuildReport, KdTreeBuilder, OctreeBuilder, QuadTreeBuilder, TreeBuilder,
};
pub use error::TreeBuilderError;
pub use flatten::flatten;
pub use kind::StrategyKind;
pub use options::{OptionMap, OptionValue, TreeBuilderOptions};
pub use strategies::{Binary, Kd, Octree, Quad};
pub use strategy::{Partitions, SplitStrategy, split_region};
pub use wrapper::NodeWrapper;
