// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for tree building.

use alloc::string::String;
use thiserror::Error;
use understory_scene::NodeId;

/// Errors that can occur while configuring or running a tree builder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeBuilderError {
    /// A node below the root that is not closed carries rendering states.
    ///
    /// Intermediate spatial nodes must be state-free; move the states to the root or mark
    /// the subtree closed before building.
    #[error("node {node:?} below the root carries states but is not closed")]
    StatesBelowRoot {
        /// The offending node.
        node: NodeId,
    },

    /// The root passed to the builder is not a live node.
    #[error("stale node id: {0:?}")]
    StaleNode(NodeId),

    /// An option in the configuration map has an unusable value.
    #[error("invalid option {key}: {reason}")]
    InvalidOption {
        /// The option key.
        key: String,
        /// What is wrong with the value.
        reason: &'static str,
    },

    /// A strategy name did not match any known splitting strategy.
    #[error("unknown tree builder strategy: {0}")]
    UnknownStrategy(String),
}
