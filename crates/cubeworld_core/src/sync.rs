//! # Shared Grid Access
//!
//! The simulation is single-threaded: terrain generation, the controller
//! step and block edits all run one after another inside a frame, and
//! none of them needs a lock.
//!
//! A host that hands the grid to more than one thread (a render thread
//! reading blocks while the logic thread edits them) wraps it here. The
//! lock is coarse: one reader/writer lock around the whole grid.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::grid::VoxelGrid;

/// Reference-counted, lock-guarded [`VoxelGrid`].
#[derive(Clone, Debug, Default)]
pub struct SharedGrid {
    inner: Arc<RwLock<VoxelGrid>>,
}

impl SharedGrid {
    /// Wraps an existing grid.
    #[must_use]
    pub fn new(grid: VoxelGrid) -> Self {
        Self {
            inner: Arc::new(RwLock::new(grid)),
        }
    }

    /// Shared read access. Blocks while a writer holds the lock.
    pub fn read(&self) -> RwLockReadGuard<'_, VoxelGrid> {
        self.inner.read()
    }

    /// Exclusive write access. Blocks while any reader or writer holds the lock.
    pub fn write(&self) -> RwLockWriteGuard<'_, VoxelGrid> {
        self.inner.write()
    }
}
