// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial subdivision of boxes.

use alloc::vec::Vec;
use core::f64::consts::SQRT_2;

use glam::DVec3;

use crate::types::{Aabb3D, Axis};

/// Coordinate of cut `i` out of `n` between `lo` and `hi`. The last cut is `hi` exactly.
#[inline]
fn cut(lo: f64, hi: f64, i: u32, n: u32) -> f64 {
    if i == n {
        hi
    } else {
        lo + (hi - lo) * f64::from(i) / f64::from(n)
    }
}

impl Aabb3D {
    /// Clip the box at the plane `axis = value`, returning the lower and upper part.
    ///
    /// `value` is clamped into the box, so one part may be flat.
    pub fn split_at(&self, axis: Axis, value: f64) -> (Self, Self) {
        let i = axis.index();
        let value = value.max(self.min_on(axis)).min(self.max_on(axis));
        let mut lower = *self;
        let mut upper = *self;
        lower.max[i] = value;
        upper.min[i] = value;
        (lower, upper)
    }

    /// Split the box into `nx * ny * nz` equally sized sub-boxes.
    ///
    /// Boxes are returned with X varying fastest, then Y, then Z. Neighbouring boxes share
    /// their faces exactly. A count of zero on any axis yields no boxes.
    pub fn split_up(&self, nx: u32, ny: u32, nz: u32) -> Vec<Self> {
        let mut out = Vec::with_capacity((nx * ny * nz) as usize);
        for iz in 0..nz {
            let z0 = cut(self.min.z, self.max.z, iz, nz);
            let z1 = cut(self.min.z, self.max.z, iz + 1, nz);
            for iy in 0..ny {
                let y0 = cut(self.min.y, self.max.y, iy, ny);
                let y1 = cut(self.min.y, self.max.y, iy + 1, ny);
                for ix in 0..nx {
                    let x0 = cut(self.min.x, self.max.x, ix, nx);
                    let x1 = cut(self.min.x, self.max.x, ix + 1, nx);
                    out.push(Self::new(DVec3::new(x0, y0, z0), DVec3::new(x1, y1, z1)));
                }
            }
        }
        out
    }

    /// Split into up to eight sub-boxes that are as cube-like as possible.
    ///
    /// An axis is halved only if its extent is at least `diameter / √2`; shorter axes are
    /// left whole. A cube gives the regular eight octants, a flat slab gives four quadrants.
    pub fn split_cube_like(&self) -> Vec<Self> {
        let d = self.diameter();
        let e = self.extents();
        let parts = |extent: f64| if extent * SQRT_2 >= d { 2 } else { 1 };
        self.split_up(parts(e.x), parts(e.y), parts(e.z))
    }

    /// Grow the box from its min corner into a cube whose side is the largest extent.
    pub fn with_cubic_extent(&self) -> Self {
        Self::new(self.min, self.min + DVec3::splat(self.diameter()))
    }

    /// Grow the box from its min corner so X and Z share the larger of the two extents.
    ///
    /// The Y range is left unchanged.
    pub fn with_square_extent_xz(&self) -> Self {
        let side = self.extent(Axis::X).max(self.extent(Axis::Z));
        let mut out = *self;
        out.max.x = self.min.x + side;
        out.max.z = self.min.z + side;
        out
    }
}
