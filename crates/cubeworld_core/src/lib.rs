//! # Cubeworld Core
//!
//! The Voxel Grid Store: a sparse map from integer grid coordinates to
//! block presence.
//!
//! ## Rules
//!
//! 1. **Integer keys only** - world coordinates are floored (with a small
//!    epsilon bias) before any lookup or insert
//! 2. **No duplicates** - inserting an occupied cell or erasing an empty one
//!    is a no-op, never an error
//! 3. **Bounded queries** - range queries cost the volume of the queried box,
//!    never the size of the world
//!
//! ## Example
//!
//! ```rust
//! use cubeworld_core::{GridCoord, VoxelGrid};
//! use cubeworld_shared::Vec3;
//!
//! let mut grid = VoxelGrid::new();
//! grid.insert(GridCoord::new(0, 0, 0));
//!
//! let hits = grid.query_aabb(Vec3::splat(-0.5), Vec3::splat(0.5)).unwrap();
//! assert_eq!(hits, vec![GridCoord::new(0, 0, 0)]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod aabb;
pub mod error;
pub mod events;
pub mod grid;
pub mod sync;

pub use aabb::Aabb;
pub use error::{ensure_finite, ensure_finite_vec3, CoreError, CoreResult};
pub use events::{GridEvent, GridEventBus, GridEventReceiver, GridEventSender, SendStatus};
pub use grid::{to_grid_coord, try_grid_coord, BlockId, GridCoord, VoxelGrid};
pub use sync::SharedGrid;
