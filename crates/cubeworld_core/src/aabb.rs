//! Axis-aligned bounding boxes for blocks and the player.

use cubeworld_shared::{Axis, Vec3};

use crate::error::CoreResult;
use crate::grid::GridCoord;

/// Axis-Aligned Bounding Box for collision detection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the box.
    pub min: Vec3,
    /// Maximum corner of the box.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a new AABB.
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of a player whose reference point is the **top** center.
    ///
    /// Horizontal half-extent is `radius`, and the box hangs `height`
    /// below `top_center.y`.
    #[must_use]
    pub fn from_player(top_center: Vec3, radius: f32, height: f32) -> Self {
        Self {
            min: Vec3::new(
                top_center.x - radius,
                top_center.y - height,
                top_center.z - radius,
            ),
            max: Vec3::new(top_center.x + radius, top_center.y, top_center.z + radius),
        }
    }

    /// The unit cube occupied by a block (its coordinate is the min corner).
    #[must_use]
    pub fn unit_block(coord: GridCoord) -> Self {
        let min = coord.min_corner();
        Self {
            min,
            max: min + Vec3::splat(1.0),
        }
    }

    /// Strict overlap along a single axis. Touching faces do not overlap.
    #[inline]
    #[must_use]
    pub fn overlaps_on(&self, other: &Aabb, axis: Axis) -> bool {
        self.max.get(axis) > other.min.get(axis) && self.min.get(axis) < other.max.get(axis)
    }

    /// Strict overlap on all three axes.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        Axis::ALL.into_iter().all(|axis| self.overlaps_on(other, axis))
    }

    /// Inclusive range of grid cells this box touches, canonicalized per axis.
    ///
    /// # Errors
    ///
    /// Fails if either corner has a non-finite component.
    pub fn grid_range(&self) -> CoreResult<(GridCoord, GridCoord)> {
        Ok((GridCoord::from_world(self.min)?, GridCoord::from_world(self.max)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_intersection() {
        let a = Aabb::new(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb::new(Vec3::splat(0.5), Vec3::splat(1.5));
        let c = Aabb::new(Vec3::splat(2.0), Vec3::splat(3.0));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_faces_do_not_overlap() {
        let a = Aabb::unit_block(GridCoord::new(0, 0, 0));
        let b = Aabb::unit_block(GridCoord::new(1, 0, 0));
        assert!(!a.overlaps_on(&b, Axis::X));
        assert!(a.overlaps_on(&b, Axis::Y));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_player_box_hangs_below_top() {
        let b = Aabb::from_player(Vec3::new(0.0, 3.0, 0.0), 0.45, 1.9);
        assert_eq!(b.max.y, 3.0);
        assert!((b.min.y - 1.1).abs() < 1e-6);
        assert_eq!(b.min.x, -0.45);
        assert_eq!(b.max.z, 0.45);
    }

    #[test]
    fn test_grid_range_is_inclusive() {
        let b = Aabb::new(Vec3::new(-0.45, 1.1, -0.45), Vec3::new(0.45, 3.0, 0.45));
        let (lo, hi) = b.grid_range().unwrap();
        assert_eq!(lo, GridCoord::new(-1, 1, -1));
        assert_eq!(hi, GridCoord::new(0, 3, 0));
    }

    #[test]
    fn test_grid_range_rejects_nan() {
        let b = Aabb::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::splat(1.0));
        assert!(b.grid_range().is_err());
    }
}
