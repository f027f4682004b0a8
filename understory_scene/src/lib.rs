// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scene --heading-base-level=0

//! Understory Scene: an arena-backed 3D scene graph.
//!
//! Understory Scene is the hierarchy that the Understory spatial tree builders restructure.
//!
//! - Represents a hierarchy of group and geometry nodes with local transforms and flags.
//! - Answers world-space queries (transform, bounds) directly from the current hierarchy.
//! - Moves nodes between parents either verbatim or keeping their world transform.
//!
//! ## Not a renderer
//!
//! This crate does not draw, shade, or manage GPU resources. Rendering states are tracked only
//! as opaque [`StateId`] handles so that restructuring code can check where states live.
//!
//! ## API overview
//!
//! - [`Scene`]: container owning all nodes.
//! - [`LocalNode`]: per-node local data (kind, transform, flags).
//! - [`NodeKind`]: group or geometry leaf with local bounds.
//! - [`NodeFlags`]: activity and closed-subtree markers.
//! - [`NodeId`]: generational handle of a node.
//!
//! Key operations:
//! - [`Scene::insert`](Scene::insert) → [`NodeId`]
//! - [`Scene::remove`](Scene::remove) destroys a subtree.
//! - [`Scene::reparent`] / [`Scene::reparent_keep_world`]
//! - [`Scene::world_transform`] / [`Scene::world_bounds`]
//! - [`Scene::children_of`](Scene::children_of), [`Scene::descendants`](Scene::descendants), and
//!   [`Scene::next_depth_first`](Scene::next_depth_first) for traversal.
//!
//! Geometry leaves are always considered closed: they are atomic units for restructuring.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod scene;
mod types;

pub use scene::{Descendants, Scene};
pub use types::{LocalNode, NodeFlags, NodeId, NodeKind, StateId};
