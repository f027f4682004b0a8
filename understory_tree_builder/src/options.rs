// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Builder configuration and parsing from a generic key-value map.

use alloc::string::{String, ToString};
use hashbrown::HashMap;

use crate::error::TreeBuilderError;

/// Key for [`TreeBuilderOptions::max_tree_depth`].
pub const MAX_TREE_DEPTH: &str = "MAX_TREE_DEPTH";
/// Key for [`TreeBuilderOptions::max_child_count`].
pub const MAX_CHILD_COUNT: &str = "MAX_CHILD_COUNT";
/// Key for [`TreeBuilderOptions::loose_factor`].
pub const LOOSE_FACTOR: &str = "LOOSE_FACTOR";
/// Key for [`TreeBuilderOptions::use_geometry_bbs`].
pub const USE_GEOMETRY_BB: &str = "USE_GEOMETRY_BB";
/// Key for [`TreeBuilderOptions::prefer_cubes`].
pub const PREFERE_CUBES: &str = "PREFERE_CUBES";
/// Key for [`TreeBuilderOptions::exact_cubes`].
pub const EXACT_CUBES: &str = "EXACT_CUBES";

/// A loosely typed option value, as produced by scene-setup scripts or config files.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Textual value, parsed on demand.
    Text(String),
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl OptionValue {
    fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Int(0) => Some(false),
            Self::Int(1) => Some(true),
            Self::Text(s) => match s.trim() {
                "true" | "TRUE" | "True" | "1" => Some(true),
                "false" | "FALSE" | "False" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Int(i) => u64::try_from(*i).ok(),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(
                clippy::cast_precision_loss,
                reason = "Option integers are small; exactness above 2^53 is irrelevant."
            )]
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }
}

/// Generic key-value configuration map.
pub type OptionMap = HashMap<String, OptionValue>;

/// Configuration of a tree builder, consumed once at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeBuilderOptions {
    /// Partitions at this depth are never split. Default 10.
    pub max_tree_depth: u32,
    /// Partitions with at most this many children are not split. Default 8.
    pub max_child_count: usize,
    /// Loose boxes are the tight boxes scaled by this factor around their centre. Must be at
    /// least 1. Default 2.
    pub loose_factor: f64,
    /// Split the world bounds of the partition's current content instead of its nominal
    /// tight box. Default off.
    pub use_geometry_bbs: bool,
    /// Bias axis and shape choice towards cube-like partitions. Default off.
    pub prefer_cubes: bool,
    /// Quad/octree only: make the first region an exact square/cube before splitting.
    /// Default off.
    pub exact_cubes: bool,
}

impl Default for TreeBuilderOptions {
    fn default() -> Self {
        Self {
            max_tree_depth: 10,
            max_child_count: 8,
            loose_factor: 2.0,
            use_geometry_bbs: false,
            prefer_cubes: false,
            exact_cubes: false,
        }
    }
}

impl TreeBuilderOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a key-value map.
    ///
    /// Missing keys keep their defaults and unknown keys are ignored. Integers and floats may
    /// also be given as text, booleans as `0`/`1` or `"true"`/`"false"`.
    pub fn from_map(map: &OptionMap) -> Result<Self, TreeBuilderError> {
        let mut opts = Self::default();
        for (key, value) in map {
            match key.as_str() {
                MAX_TREE_DEPTH => {
                    opts.max_tree_depth = value
                        .as_u64()
                        .and_then(|v| u32::try_from(v).ok())
                        .ok_or_else(|| invalid(key, "expected a non-negative integer"))?;
                }
                MAX_CHILD_COUNT => {
                    opts.max_child_count = value
                        .as_u64()
                        .and_then(|v| usize::try_from(v).ok())
                        .ok_or_else(|| invalid(key, "expected a non-negative integer"))?;
                }
                LOOSE_FACTOR => {
                    opts.loose_factor = value
                        .as_f64()
                        .ok_or_else(|| invalid(key, "expected a number"))?;
                }
                USE_GEOMETRY_BB => {
                    opts.use_geometry_bbs = value
                        .as_bool()
                        .ok_or_else(|| invalid(key, "expected a boolean"))?;
                }
                PREFERE_CUBES => {
                    opts.prefer_cubes = value
                        .as_bool()
                        .ok_or_else(|| invalid(key, "expected a boolean"))?;
                }
                EXACT_CUBES => {
                    opts.exact_cubes = value
                        .as_bool()
                        .ok_or_else(|| invalid(key, "expected a boolean"))?;
                }
                other => log::debug!("ignoring unknown tree builder option {other}"),
            }
        }
        opts.validate()?;
        Ok(opts)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), TreeBuilderError> {
        if self.loose_factor.is_finite() && self.loose_factor >= 1.0 {
            Ok(())
        } else {
            Err(invalid(LOOSE_FACTOR, "must be a finite number of at least 1"))
        }
    }

    /// Set [`Self::max_tree_depth`].
    pub fn with_max_tree_depth(mut self, depth: u32) -> Self {
        self.max_tree_depth = depth;
        self
    }

    /// Set [`Self::max_child_count`].
    pub fn with_max_child_count(mut self, count: usize) -> Self {
        self.max_child_count = count;
        self
    }

    /// Set [`Self::loose_factor`].
    pub fn with_loose_factor(mut self, factor: f64) -> Self {
        self.loose_factor = factor;
        self
    }

    /// Set [`Self::use_geometry_bbs`].
    pub fn with_geometry_bbs(mut self, on: bool) -> Self {
        self.use_geometry_bbs = on;
        self
    }

    /// Set [`Self::prefer_cubes`].
    pub fn with_prefer_cubes(mut self, on: bool) -> Self {
        self.prefer_cubes = on;
        self
    }

    /// Set [`Self::exact_cubes`].
    pub fn with_exact_cubes(mut self, on: bool) -> Self {
        self.exact_cubes = on;
        self
    }
}

fn invalid(key: &str, reason: &'static str) -> TreeBuilderError {
    TreeBuilderError::InvalidOption {
        key: key.to_string(),
        reason,
    }
}
