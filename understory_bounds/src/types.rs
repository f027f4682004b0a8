// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types: axes and axis-aligned boxes.

use glam::{DAffine3, DVec3};

/// One of the three coordinate axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis (up).
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Component index of this axis in a [`DVec3`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Axis for `i % 3`, so that depths can be cycled through directly.
    #[inline]
    pub const fn cycle(i: u32) -> Self {
        match i % 3 {
            0 => Self::X,
            1 => Self::Y,
            _ => Self::Z,
        }
    }
}

/// Axis-aligned bounding box in 3D.
///
/// A box whose `max` is below its `min` on any axis is *empty*; [`Aabb3D::EMPTY`] is the
/// identity for [`Aabb3D::union`]. A box with zero extent (a single point) is not empty.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3D {
    /// Minimum corner (inclusive).
    pub min: DVec3,
    /// Maximum corner (inclusive).
    pub max: DVec3,
}

impl Default for Aabb3D {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb3D {
    /// The empty (inverted) box.
    pub const EMPTY: Self = Self {
        min: DVec3::INFINITY,
        max: DVec3::NEG_INFINITY,
    };

    /// Create a new AABB from min/max corners.
    #[inline]
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from its centre and full extents.
    #[inline]
    pub fn from_center_extents(center: DVec3, extents: DVec3) -> Self {
        let half = extents * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// The smallest AABB enclosing all `points`, or [`Aabb3D::EMPTY`] for none.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Self {
        let mut b = Self::EMPTY;
        for p in points {
            b.include_point(p);
        }
        b
    }

    /// Return true if the box is inverted on any axis. Assumes no NaN.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.cmplt(self.min).any()
    }

    /// Return true if both corners are finite and the box is not empty.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && !self.is_empty()
    }

    /// Grow the box to include `p`.
    #[inline]
    pub fn include_point(&mut self, p: DVec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// The smallest AABB enclosing two AABBs.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Whether this AABB contains the point. The boundary is part of the box.
    #[inline]
    pub fn contains_point(&self, p: DVec3) -> bool {
        self.min.cmple(p).all() && p.cmple(self.max).all()
    }

    /// Whether `other` lies completely inside this AABB (boundaries included).
    #[inline]
    pub fn contains_box(&self, other: &Self) -> bool {
        self.min.cmple(other.min).all() && other.max.cmple(self.max).all()
    }

    /// Whether the two boxes share at least one point.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    /// Centre of the box.
    #[inline]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Size of the box on every axis (`max - min`).
    #[inline]
    pub fn extents(&self) -> DVec3 {
        self.max - self.min
    }

    /// Size of the box along `axis`.
    #[inline]
    pub fn extent(&self, axis: Axis) -> f64 {
        self.max[axis.index()] - self.min[axis.index()]
    }

    /// Minimum coordinate along `axis`.
    #[inline]
    pub fn min_on(&self, axis: Axis) -> f64 {
        self.min[axis.index()]
    }

    /// Maximum coordinate along `axis`.
    #[inline]
    pub fn max_on(&self, axis: Axis) -> f64 {
        self.max[axis.index()]
    }

    /// The largest extent of the box.
    #[inline]
    pub fn diameter(&self) -> f64 {
        self.extents().max_element()
    }

    /// The axis with the largest extent.
    ///
    /// Ties go to X first; between Y and Z, Z wins.
    pub fn longest_axis(&self) -> Axis {
        let e = self.extents();
        if e.x >= e.y && e.x >= e.z {
            Axis::X
        } else if e.z >= e.y {
            Axis::Z
        } else {
            Axis::Y
        }
    }

    /// The eight corners, X varying fastest, then Y, then Z.
    pub fn corners(&self) -> [DVec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            DVec3::new(a.x, a.y, a.z),
            DVec3::new(b.x, a.y, a.z),
            DVec3::new(a.x, b.y, a.z),
            DVec3::new(b.x, b.y, a.z),
            DVec3::new(a.x, a.y, b.z),
            DVec3::new(b.x, a.y, b.z),
            DVec3::new(a.x, b.y, b.z),
            DVec3::new(b.x, b.y, b.z),
        ]
    }

    /// Scale the extents by `factor` around the centre.
    ///
    /// For `factor >= 1` the result contains `self`, even where rounding of the centre would
    /// otherwise shave an ulp off a face.
    #[inline]
    pub fn resized_rel(&self, factor: f64) -> Self {
        let out = Self::from_center_extents(self.center(), self.extents() * factor);
        if factor >= 1.0 { out.union(self) } else { out }
    }

    /// Transform the box by `tf` and return a conservative axis-aligned box in the
    /// destination space.
    ///
    /// Each column of the linear part contributes its smaller and larger product with the
    /// box range to the new minimum and maximum.
    pub fn transformed(&self, tf: &DAffine3) -> Self {
        if self.is_empty() {
            return Self::EMPTY;
        }
        let mut min = tf.translation;
        let mut max = tf.translation;
        let columns = [tf.matrix3.x_axis, tf.matrix3.y_axis, tf.matrix3.z_axis];
        for (i, col) in columns.into_iter().enumerate() {
            let a = col * self.min[i];
            let b = col * self.max[i];
            min += a.min(b);
            max += a.max(b);
        }
        Self { min, max }
    }
}
