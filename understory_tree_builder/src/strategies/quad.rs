// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::SQRT_2;
use smallvec::SmallVec;
use understory_bounds::{Aabb3D, Axis};
use understory_scene::Scene;

use crate::options::TreeBuilderOptions;
use crate::strategy::{SplitStrategy, split_region};
use crate::wrapper::NodeWrapper;

/// Quadtree splits in the X-Z plane; Y is never divided.
///
/// With `exact_cubes`, the root region is first squared in X-Z. With `prefer_cubes`, only the
/// longer of X and Z is halved when it exceeds the other by more than √2.
#[derive(Copy, Clone, Debug, Default)]
pub struct Quad;

impl SplitStrategy for Quad {
    fn split_boxes(
        &self,
        scene: &Scene,
        source: &NodeWrapper,
        options: &TreeBuilderOptions,
    ) -> SmallVec<[Aabb3D; 8]> {
        let mut region = split_region(scene, source, options);
        if source.depth == 0 && options.exact_cubes {
            region = region.with_square_extent_xz();
        }
        let (ex, ez) = (region.extent(Axis::X), region.extent(Axis::Z));
        let (nx, nz) = if !options.prefer_cubes {
            (2, 2)
        } else if ex == 0.0 && ez == 0.0 {
            (1, 1)
        } else if ex > ez * SQRT_2 {
            (2, 1)
        } else if ez > ex * SQRT_2 {
            (1, 2)
        } else {
            (2, 2)
        };
        region.split_up(nx, 1, nz).into_iter().collect()
    }
}
