//! # Grid Store Property Tests
//!
//! Canonicalization, idempotent insert/remove and range-query completeness.

use std::collections::BTreeSet;

use cubeworld_core::{to_grid_coord, GridCoord, VoxelGrid};
use cubeworld_shared::Vec3;

/// Test: every value in [n, n+1) floors to n (away from the epsilon band).
#[test]
fn test_grid_coord_covers_unit_interval() {
    for n in -20..20 {
        for k in 0..10 {
            let v = n as f32 + k as f32 * 0.099;
            assert_eq!(to_grid_coord(v), n, "v = {v}");
        }
    }
}

/// Test: canonicalizing an already canonical value changes nothing.
#[test]
fn test_grid_coord_idempotent() {
    for v in [-7.3f32, -1.0, -0.000_1, 0.0, 0.5, 3.999, 12.0, 255.75] {
        let once = to_grid_coord(v);
        assert_eq!(to_grid_coord(once as f32), once, "v = {v}");
    }
}

/// Test: add twice leaves one block; remove twice is safe.
#[test]
fn test_idempotent_insert_and_remove() {
    let mut grid = VoxelGrid::new();
    let (x, y, z) = (4.25, -2.5, 0.75);

    assert!(grid.add(x, y, z).unwrap());
    assert!(!grid.add(x, y, z).unwrap());
    assert_eq!(grid.len(), 1);

    assert!(grid.remove(x, y, z).unwrap());
    assert!(!grid.remove(x, y, z).unwrap());
    assert!(grid.is_empty());
}

/// Test: add then has, remove then has.
#[test]
fn test_round_trip_membership() {
    let mut grid = VoxelGrid::new();
    for c in [(0.0, 0.0, 0.0), (-3.5, 10.0, 7.9), (100.1, -40.0, -0.2)] {
        grid.add(c.0, c.1, c.2).unwrap();
        assert!(grid.has(c.0, c.1, c.2).unwrap());
        grid.remove(c.0, c.1, c.2).unwrap();
        assert!(!grid.has(c.0, c.1, c.2).unwrap());
    }
}

fn query_set(grid: &VoxelGrid, min: Vec3, max: Vec3) -> BTreeSet<GridCoord> {
    grid.query_aabb(min, max).unwrap().into_iter().collect()
}

/// Test: a box containing exactly a set of blocks returns exactly that set.
#[test]
fn test_range_query_completeness() {
    let mut grid = VoxelGrid::new();
    let inside = [
        GridCoord::new(0, 0, 0),
        GridCoord::new(1, 2, 3),
        GridCoord::new(2, 1, 0),
    ];
    let outside = [
        GridCoord::new(-1, 0, 0),
        GridCoord::new(0, 4, 0),
        GridCoord::new(3, 0, 0),
        GridCoord::new(1, 1, -5),
    ];
    for c in inside.iter().chain(outside.iter()) {
        grid.insert(*c);
    }

    // Zero blocks: a region with nothing in it.
    let empty = query_set(&grid, Vec3::new(10.0, 10.0, 10.0), Vec3::new(12.5, 12.5, 12.5));
    assert!(empty.is_empty());

    // One block.
    let one = query_set(&grid, Vec3::new(1.2, 2.1, 3.4), Vec3::new(1.8, 2.9, 3.9));
    assert_eq!(one, BTreeSet::from([GridCoord::new(1, 2, 3)]));

    // Many blocks: cells [0,2] x [0,3] x [0,3].
    let many = query_set(&grid, Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.5, 3.5, 3.5));
    assert_eq!(many, inside.into_iter().collect());
}
