// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_bounds --heading-base-level=0

//! Understory Bounds: double-precision 3D axis-aligned boxes.
//!
//! Understory Bounds is the geometry layer underneath the Understory scene graph and its
//! spatial tree builders.
//!
//! - [`Aabb3D`]: min/max box with union, containment, and overlap tests.
//! - Loose boxes via [`Aabb3D::resized_rel`], which scales the extents around the centre.
//! - Spatial subdivision: split at a plane ([`Aabb3D::split_at`]), into a regular grid
//!   ([`Aabb3D::split_up`]), or into cube-like octants ([`Aabb3D::split_cube_like`]).
//! - World-space bounds of a transformed box ([`Aabb3D::transformed`]).
//!
//! All coordinates are `f64` on top of [`glam::DVec3`] so that repeated re-parenting
//! of scene content does not visibly drift. Inputs are assumed to be finite (no NaNs).
//!
//! # Example
//!
//! ```rust
//! use glam::DVec3;
//! use understory_bounds::{Aabb3D, Axis};
//!
//! let b = Aabb3D::new(DVec3::ZERO, DVec3::new(10.0, 1.0, 1.0));
//! assert_eq!(b.longest_axis(), Axis::X);
//!
//! let (lo, hi) = b.split_at(Axis::X, 5.0);
//! assert_eq!(lo.extents(), DVec3::new(5.0, 1.0, 1.0));
//! assert_eq!(hi.extents(), DVec3::new(5.0, 1.0, 1.0));
//!
//! // A loose box doubles the extents around the same centre.
//! let loose = lo.resized_rel(2.0);
//! assert!(loose.contains_box(&lo));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod split;
mod types;

pub use types::{Aabb3D, Axis};
