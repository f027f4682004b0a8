// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Restructure a flat "city" scene into a loose spatial tree.
//!
//! This example shows how to:
//! - build a flat scene with `understory_scene`, including closed subtrees with render states,
//! - configure a builder from a key-value option map,
//! - pick the splitting strategy by name and inspect the resulting hierarchy.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example city_octree -- octree`

use glam::{DAffine3, DQuat, DVec3};
use understory_bounds::Aabb3D;
use understory_scene::{LocalNode, NodeId, Scene, StateId};
use understory_tree_builder::options::{LOOSE_FACTOR, MAX_CHILD_COUNT, PREFERE_CUBES};
use understory_tree_builder::{OptionMap, StrategyKind, TreeBuilderOptions};

/// A building: a closed group with a material state and a few storeys of geometry.
fn building(scene: &mut Scene, parent: NodeId, at: DVec3, storeys: u32) -> NodeId {
    let group = scene.insert(
        Some(parent),
        LocalNode::group()
            .closed()
            .with_transform(DAffine3::from_rotation_translation(
                DQuat::from_rotation_y(at.x * 0.1),
                at,
            )),
    );
    scene.add_state(group, StateId(storeys % 4));
    for s in 0..storeys {
        let y = f64::from(s) * 3.0;
        scene.insert(
            Some(group),
            LocalNode::geometry(Aabb3D::new(
                DVec3::new(-4.0, y, -4.0),
                DVec3::new(4.0, y + 3.0, 4.0),
            )),
        );
    }
    group
}

fn print_tree(scene: &Scene, id: NodeId, depth: usize) {
    if !scene.is_group(id) || scene.is_closed(id) {
        return;
    }
    let groups = scene
        .children_of(id)
        .iter()
        .filter(|&&c| scene.is_group(c) && !scene.is_closed(c))
        .count();
    let leaves = scene.child_count(id) - groups;
    let bounds = scene.world_bounds(id).unwrap_or_default();
    println!(
        "{:indent$}{id:?}: {leaves} objects, {groups} partitions, extents {:.1?}",
        "",
        bounds.extents(),
        indent = depth * 2
    );
    for &c in scene.children_of(id) {
        print_tree(scene, c, depth + 1);
    }
}

fn main() {
    env_logger::init();

    let kind: StrategyKind = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("octree")
        .parse()
        .unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(2);
        });

    let mut scene = Scene::new();
    let root = scene.insert_group(None);
    scene.add_state(root, StateId(100));

    // Blocks are plain groups; the builder dissolves them.
    for bx in 0..6 {
        let block = scene.insert_group(Some(root));
        for i in 0..10 {
            let at = DVec3::new(
                f64::from(bx) * 120.0 + f64::from(i % 5) * 20.0,
                0.0,
                f64::from(i / 5) * 20.0,
            );
            building(&mut scene, block, at, 1 + (i * 7 + bx) % 9);
        }
    }
    // A park of small props scattered between blocks.
    for i in 0..40 {
        let p = DVec3::new(
            f64::from(i) * 17.0 % 700.0,
            0.0,
            60.0 + f64::from(i % 7) * 9.0,
        );
        scene.insert(
            Some(root),
            LocalNode::geometry(Aabb3D::from_center_extents(p, DVec3::ONE)),
        );
    }

    let mut map = OptionMap::new();
    map.insert(MAX_CHILD_COUNT.to_string(), 6_i64.into());
    map.insert(LOOSE_FACTOR.to_string(), "1.5".into());
    map.insert(PREFERE_CUBES.to_string(), true.into());
    let options = match TreeBuilderOptions::from_map(&map) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    println!("{} nodes before, strategy {kind}", scene.len());
    match kind.build_tree(options, &mut scene, root, None) {
        Ok(report) => println!("{report:#?}"),
        Err(e) => {
            eprintln!("tree building failed: {e}");
            std::process::exit(1);
        }
    }
    log::info!("{} nodes after restructuring", scene.len());
    print_tree(&scene, root, 0);
}
