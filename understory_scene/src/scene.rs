// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, reparenting, world-space queries.

use alloc::{vec, vec::Vec};
use glam::DAffine3;
use smallvec::SmallVec;
use understory_bounds::Aabb3D;

use crate::types::{LocalNode, NodeFlags, NodeId, NodeKind, StateId};

/// Arena-backed scene graph.
///
/// Nodes are addressed by generational [`NodeId`]s; removing a node makes every id that
/// pointed at it (or into its subtree) stale, and stale ids are ignored by all public
/// accessors.
///
/// World-space data is derived on demand from the current hierarchy, so it is always
/// consistent with the latest structural change. There is no commit step.
///
/// ## Example
///
/// ```rust
/// use glam::{DAffine3, DVec3};
/// use understory_bounds::Aabb3D;
/// use understory_scene::{LocalNode, Scene};
///
/// let mut scene = Scene::new();
/// let root = scene.insert_group(None);
/// let mesh = scene.insert(
///     Some(root),
///     LocalNode::geometry(Aabb3D::new(DVec3::ZERO, DVec3::ONE))
///         .with_transform(DAffine3::from_translation(DVec3::new(5.0, 0.0, 0.0))),
/// );
///
/// let world = scene.world_bounds(root).unwrap();
/// assert_eq!(world.min, DVec3::new(5.0, 0.0, 0.0));
/// assert_eq!(scene.parent_of(mesh), Some(root));
/// ```
pub struct Scene {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.len();
        let free = self.free_list.len();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
    states: SmallVec<[StateId; 2]>,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            states: SmallVec::new(),
        }
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new node as the last child of `parent` (or as a root if `None`).
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale or is a geometry node.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        id
    }

    /// Insert an empty group node. See [`Scene::insert`].
    pub fn insert_group(&mut self, parent: Option<NodeId>) -> NodeId {
        self.insert(parent, LocalNode::group())
    }

    /// Remove a node and its whole subtree. Stale ids are ignored.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.node_mut(child).parent = None;
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` under `new_parent` (or make it a root), keeping its local transform.
    ///
    /// The node's world transform changes with its new ancestry. See
    /// [`Scene::reparent_keep_world`] for the variant that keeps it in place.
    ///
    /// # Panics
    ///
    /// Panics if `new_parent` is stale or is a geometry node.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        debug_assert!(
            new_parent.is_none_or(|p| !self.is_in_subtree(p, id)),
            "cannot reparent a node below itself"
        );
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Move `id` under `new_parent` (or make it a root) without moving it in world space.
    ///
    /// The local transform is replaced by `inverse(new_parent_world) * old_world`, so the
    /// world transform, and with it the world bounds, of the whole subtree is unchanged up to
    /// rounding. Stale ids are ignored.
    ///
    /// # Panics
    ///
    /// Panics if `new_parent` is stale or is a geometry node.
    pub fn reparent_keep_world(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        let Some(world) = self.world_transform(id) else {
            return;
        };
        let parent_world = match new_parent {
            Some(p) => self.world_transform(p).expect("dangling NodeId"),
            None => DAffine3::IDENTITY,
        };
        self.reparent(id, new_parent);
        self.node_mut(id).local.local_transform = parent_world.inverse() * world;
    }

    /// Update the local transform.
    pub fn set_local_transform(&mut self, id: NodeId, tf: DAffine3) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.local_transform = tf;
        }
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Attach a rendering state to a node.
    pub fn add_state(&mut self, id: NodeId, state: StateId) {
        if let Some(n) = self.node_opt_mut(id) {
            n.states.push(state);
        }
    }

    /// Detach all rendering states from a node.
    pub fn clear_states(&mut self, id: NodeId) {
        if let Some(n) = self.node_opt_mut(id) {
            n.states.clear();
        }
    }

    /// Return the local transform of a live node.
    pub fn local_transform(&self, id: NodeId) -> Option<DAffine3> {
        self.node_opt(id).map(|n| n.local.local_transform)
    }

    /// Return the local→world transform of a live node.
    ///
    /// Composed from the local transforms of the node and all its ancestors.
    pub fn world_transform(&self, id: NodeId) -> Option<DAffine3> {
        let node = self.node_opt(id)?;
        let mut tf = node.local.local_transform;
        let mut current = node.parent;
        while let Some(p) = current {
            let parent = self.node(p);
            tf = parent.local.local_transform * tf;
            current = parent.parent;
        }
        Some(tf)
    }

    /// Return the world-space bounds of all active geometry in the subtree of `id`.
    ///
    /// Inactive nodes hide their whole subtree. Returns `None` for stale identifiers and for
    /// subtrees without any active geometry. Bounds of rotated content are conservative.
    pub fn world_bounds(&self, id: NodeId) -> Option<Aabb3D> {
        let node = self.node_opt(id)?;
        let parent_tf = match node.parent {
            Some(p) => self.world_transform(p)?,
            None => DAffine3::IDENTITY,
        };
        let mut bounds = Aabb3D::EMPTY;
        let mut stack = vec![(id, parent_tf)];
        while let Some((id, parent_tf)) = stack.pop() {
            let node = self.node(id);
            if !node.local.flags.contains(NodeFlags::ACTIVE) {
                continue;
            }
            let tf = parent_tf * node.local.local_transform;
            if let NodeKind::Geometry { local_bounds } = node.local.kind {
                bounds = bounds.union(&local_bounds.transformed(&tf));
            }
            stack.extend(node.children.iter().map(|&c| (c, tf)));
        }
        (!bounds.is_empty()).then_some(bounds)
    }
}

impl Scene {
    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Whether the scene has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(Option::is_none)
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|node| node.parent)
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of direct children, zero for stale ids.
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children_of(id).len()
    }

    /// Returns the local data of a node if the identifier is live.
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        self.node_opt(id).map(|n| &n.local)
    }

    /// Returns the flags of a node if the identifier is live.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.local.flags)
    }

    /// Whether `id` is a live group node.
    pub fn is_group(&self, id: NodeId) -> bool {
        self.node_opt(id)
            .is_some_and(|n| matches!(n.local.kind, NodeKind::Group))
    }

    /// Whether `id` is a live, closed node.
    ///
    /// Geometry leaves are always closed; groups are closed when flagged with
    /// [`NodeFlags::CLOSED`].
    pub fn is_closed(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| match n.local.kind {
            NodeKind::Group => n.local.flags.contains(NodeFlags::CLOSED),
            NodeKind::Geometry { .. } => true,
        })
    }

    /// Whether a live node carries rendering states.
    pub fn has_states(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| !n.states.is_empty())
    }

    /// Rendering states attached to a node, or empty slice if node is stale.
    pub fn states_of(&self, id: NodeId) -> &[StateId] {
        self.node_opt(id)
            .map(|n| n.states.as_slice())
            .unwrap_or(&[])
    }

    /// Get the next node in depth-first traversal order.
    ///
    /// Returns `None` if no next node exists or if the current node is stale.
    /// This is a standard tree traversal that does not wrap around.
    pub fn next_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        if let Some(&first_child) = self.node(current).children.first() {
            return Some(first_child);
        }
        let mut node = current;
        while let Some(parent) = self.parent_of(node) {
            if let Some(next_sibling) = self.next_sibling(node) {
                return Some(next_sibling);
            }
            node = parent;
        }
        None
    }

    /// Iterate the subtree of `id` depth-first, `id` included. Empty for stale ids.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let stack = if self.is_alive(id) { vec![id] } else { Vec::new() };
        Descendants { scene: self, stack }
    }

    /// Whether `id` is `root` or lies below it.
    pub fn is_in_subtree(&self, id: NodeId, root: NodeId) -> bool {
        let mut current = Some(id).filter(|&i| self.is_alive(i));
        while let Some(c) = current {
            if c == root {
                return true;
            }
            current = self.node(c).parent;
        }
        false
    }
}

/// Depth-first iterator over a subtree. See [`Scene::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    scene: &'a Scene,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.scene.node(id).children.iter().rev().copied());
        Some(id)
    }
}

impl Scene {
    // --- internals ---

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos + 1).copied()
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        let parent_node = self.node_mut(parent);
        assert!(
            matches!(parent_node.local.kind, NodeKind::Group),
            "geometry nodes cannot have children"
        );
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}
