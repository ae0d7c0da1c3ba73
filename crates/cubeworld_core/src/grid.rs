//! # Voxel Grid Store
//!
//! Sparse occupancy map for unit cubes.
//!
//! ## Canonicalization
//!
//! Every world-space coordinate goes through [`to_grid_coord`] before it
//! touches the map: `floor(v + GRID_EPSILON)`. A value that float error
//! left a hair under an integer boundary still lands in the cell above,
//! so `add(2.9999999, ...)` and `add(3.0, ...)` address the same block.
//!
//! ## Query Order
//!
//! Range queries enumerate cells **x outer, y middle, z inner**. The
//! character controller resolves collisions against the first overlapping
//! block it sees, so this order is the tie-break for multi-block contacts
//! and must not change.

use std::collections::HashMap;

use cubeworld_shared::constants::GRID_EPSILON;
use cubeworld_shared::Vec3;

use crate::error::{ensure_finite, CoreResult};
use crate::events::{GridEvent, GridEventBus, GridEventReceiver, GridEventSender, SendStatus};

/// Floors a world coordinate into its grid cell.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_grid_coord(v: f32) -> i32 {
    (v + GRID_EPSILON).floor() as i32
}

/// [`to_grid_coord`] with NaN/infinity rejected.
///
/// # Errors
///
/// Returns [`crate::CoreError::NonFinite`] for NaN or infinite input.
#[inline]
pub fn try_grid_coord(v: f32) -> CoreResult<i32> {
    ensure_finite("grid coordinate", v).map(to_grid_coord)
}

/// Integer coordinate of a block (its min corner).
///
/// Ordering is lexicographic `(x, y, z)`, the same order range queries use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate (0 is bedrock for generated terrain).
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Canonicalizes a world-space point, one axis at a time.
    ///
    /// # Errors
    ///
    /// Fails if any component is NaN or infinite.
    pub fn from_world(p: Vec3) -> CoreResult<Self> {
        Ok(Self::new(
            try_grid_coord(p.x)?,
            try_grid_coord(p.y)?,
            try_grid_coord(p.z)?,
        ))
    }

    /// World-space min corner of the block's unit cube.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn min_corner(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// Coordinate shifted by an integer offset (e.g. a face normal).
    #[inline]
    #[must_use]
    ///
    /// Saturates at the `i32` range instead of wrapping.
    pub const fn offset(self, d: [i32; 3]) -> Self {
        Self::new(
            self.x.saturating_add(d[0]),
            self.y.saturating_add(d[1]),
            self.z.saturating_add(d[2]),
        )
    }

    /// Converts to array.
    #[must_use]
    pub const fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[i32; 3]> for GridCoord {
    fn from(a: [i32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

/// Opaque identity of a present block.
///
/// Handed to the renderer with every notification so it can pair a visual
/// with the block. Ids increase monotonically and are never reused by the
/// same grid, so sorting by id gives insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct BlockId(u64);

impl BlockId {
    /// Wraps a raw id.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Sparse map of occupied block coordinates.
///
/// Not internally synchronized. Mutating the grid while a query on it is in
/// flight from another thread is undefined; wrap it in
/// [`crate::SharedGrid`] if more than one thread needs it.
#[derive(Debug, Default)]
pub struct VoxelGrid {
    /// Present blocks.
    blocks: HashMap<GridCoord, BlockId>,
    /// Next id to hand out.
    next_id: u64,
    /// Change feed subscribers.
    subscribers: Vec<GridEventSender>,
    /// Notifications lost to full channels.
    dropped_events: u64,
}

impl VoxelGrid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // World-space API (float input, canonicalized)
    // =========================================================================

    /// Adds a block at the cell containing `(x, y, z)`.
    ///
    /// Returns `true` if the cell was empty. An occupied cell is left alone.
    ///
    /// # Errors
    ///
    /// Fails on non-finite input without touching the grid.
    pub fn add(&mut self, x: f32, y: f32, z: f32) -> CoreResult<bool> {
        let coord = GridCoord::from_world(Vec3::new(x, y, z))?;
        Ok(self.insert(coord))
    }

    /// Removes the block at the cell containing `(x, y, z)`.
    ///
    /// Returns `true` if a block was there.
    ///
    /// # Errors
    ///
    /// Fails on non-finite input without touching the grid.
    pub fn remove(&mut self, x: f32, y: f32, z: f32) -> CoreResult<bool> {
        let coord = GridCoord::from_world(Vec3::new(x, y, z))?;
        Ok(self.erase(coord))
    }

    /// Tests whether the cell containing `(x, y, z)` is occupied.
    ///
    /// # Errors
    ///
    /// Fails on non-finite input.
    pub fn has(&self, x: f32, y: f32, z: f32) -> CoreResult<bool> {
        let coord = GridCoord::from_world(Vec3::new(x, y, z))?;
        Ok(self.contains(coord))
    }

    /// All present blocks in the inclusive cell range spanned by `min..=max`.
    ///
    /// Each corner is canonicalized independently per axis. Results are in
    /// axis-major order (x outer, y middle, z inner).
    ///
    /// # Errors
    ///
    /// Fails if either corner has a non-finite component.
    pub fn query_aabb(&self, min: Vec3, max: Vec3) -> CoreResult<Vec<GridCoord>> {
        let lo = GridCoord::from_world(min)?;
        let hi = GridCoord::from_world(max)?;
        Ok(self.blocks_in_range(lo, hi))
    }

    // =========================================================================
    // Grid-space API (integer input, infallible)
    // =========================================================================

    /// Inserts a block. Returns `false` if the cell was already occupied.
    pub fn insert(&mut self, coord: GridCoord) -> bool {
        if self.blocks.contains_key(&coord) {
            return false;
        }
        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.insert(coord, id);
        self.notify(GridEvent::BlockAdded { coord, id });
        true
    }

    /// Erases a block. Returns `false` if the cell was empty.
    pub fn erase(&mut self, coord: GridCoord) -> bool {
        match self.blocks.remove(&coord) {
            Some(id) => {
                self.notify(GridEvent::BlockRemoved { coord, id });
                true
            }
            None => false,
        }
    }

    /// Membership test.
    #[inline]
    #[must_use]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.blocks.contains_key(&coord)
    }

    /// Identity of the block at `coord`, if present.
    #[must_use]
    pub fn block_id(&self, coord: GridCoord) -> Option<BlockId> {
        self.blocks.get(&coord).copied()
    }

    /// Present blocks in the inclusive range `lo..=hi`, axis-major order.
    ///
    /// Cost is the number of cells in the range.
    #[must_use]
    pub fn blocks_in_range(&self, lo: GridCoord, hi: GridCoord) -> Vec<GridCoord> {
        let mut found = Vec::new();
        for x in lo.x..=hi.x {
            for y in lo.y..=hi.y {
                for z in lo.z..=hi.z {
                    let coord = GridCoord::new(x, y, z);
                    if self.blocks.contains_key(&coord) {
                        found.push(coord);
                    }
                }
            }
        }
        found
    }

    /// True if any block is present in the inclusive range `lo..=hi`.
    ///
    /// Same enumeration as [`Self::blocks_in_range`], stopping at the first hit.
    #[must_use]
    pub fn any_in_range(&self, lo: GridCoord, hi: GridCoord) -> bool {
        (lo.x..=hi.x).any(|x| {
            (lo.y..=hi.y).any(|y| {
                (lo.z..=hi.z).any(|z| self.blocks.contains_key(&GridCoord::new(x, y, z)))
            })
        })
    }

    /// Every present block with its identity, in insertion order.
    ///
    /// This is what a renderer walks to build its initial scene.
    #[must_use]
    pub fn blocks(&self) -> Vec<(GridCoord, BlockId)> {
        let mut all: Vec<_> = self.blocks.iter().map(|(&c, &id)| (c, id)).collect();
        all.sort_unstable_by_key(|&(_, id)| id);
        all
    }

    /// Number of present blocks.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True if no block is present.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Removes every block, notifying subscribers of each removal.
    pub fn clear(&mut self) {
        for (coord, id) in self.blocks() {
            self.blocks.remove(&coord);
            self.notify(GridEvent::BlockRemoved { coord, id });
        }
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Opens a change feed holding up to `capacity` undelivered events.
    ///
    /// Only changes made after this call are reported; use [`Self::blocks`]
    /// for the current contents.
    pub fn subscribe(&mut self, capacity: usize) -> GridEventReceiver {
        let (sender, receiver) = GridEventBus::create_pair(capacity);
        self.subscribers.push(sender);
        receiver
    }

    /// Notifications lost because a live subscriber's channel was full.
    #[must_use]
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events
    }

    /// Open change feeds. Closed ones are pruned on the next change.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&mut self, event: GridEvent) {
        let mut dropped = 0;
        self.subscribers.retain(|sender| match sender.try_deliver(event) {
            SendStatus::Sent => true,
            SendStatus::Full => {
                dropped += 1;
                true
            }
            SendStatus::Disconnected => false,
        });

        if dropped > 0 {
            self.dropped_events += dropped;
            tracing::warn!(
                "grid event dropped at {:?} ({} total)",
                event.coord(),
                self.dropped_events
            );
        }
    }
}
