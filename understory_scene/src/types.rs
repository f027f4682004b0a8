// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, render-state handles, and local data.

use glam::DAffine3;
use understory_bounds::Aabb3D;

/// Identifier for a node in the scene (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Opaque handle of a rendering state attached to a node.
///
/// The scene only records which nodes carry states; what a state does is up to the renderer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct StateId(pub u32);

bitflags::bitflags! {
    /// Node flags controlling participation in bounds and restructuring.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is active (contributes to world bounds and is rendered).
        const ACTIVE = 0b0000_0001;
        /// Node is closed: its subtree is an atomic unit that restructuring never enters.
        const CLOSED = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::ACTIVE
    }
}

/// What a node is: a container for children, or a leaf carrying geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeKind {
    /// Group node; owns an ordered list of children.
    Group,
    /// Geometry leaf with its bounds in local space. Cannot have children.
    Geometry {
        /// Local (untransformed) bounds of the geometry.
        local_bounds: Aabb3D,
    },
}

/// Local data for a node.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Group or geometry.
    pub kind: NodeKind,
    /// Local transform relative to parent space.
    pub local_transform: DAffine3,
    /// Activity and closed flags.
    pub flags: NodeFlags,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self::group()
    }
}

impl LocalNode {
    /// An empty, active group with the identity transform.
    pub fn group() -> Self {
        Self {
            kind: NodeKind::Group,
            local_transform: DAffine3::IDENTITY,
            flags: NodeFlags::default(),
        }
    }

    /// A geometry leaf with the given local bounds.
    pub fn geometry(local_bounds: Aabb3D) -> Self {
        Self {
            kind: NodeKind::Geometry { local_bounds },
            ..Self::group()
        }
    }

    /// Replace the local transform.
    pub fn with_transform(mut self, local_transform: DAffine3) -> Self {
        self.local_transform = local_transform;
        self
    }

    /// Add [`NodeFlags::CLOSED`].
    pub fn closed(mut self) -> Self {
        self.flags |= NodeFlags::CLOSED;
        self
    }
}
