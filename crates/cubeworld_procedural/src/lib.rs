//! # Cubeworld Procedural Generation
//!
//! Deterministic terrain for a bounded voxel world.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same parameters always produce the same block set
//! 2. **Closed form**: Heights come from a sum of sine waves, no noise tables
//! 3. **One-shot**: Terrain is generated once, to completion, before the
//!    first simulation step
//!
//! ## Example
//!
//! ```rust
//! use cubeworld_core::VoxelGrid;
//! use cubeworld_procedural::{TerrainGenerator, TerrainParams};
//!
//! let params = TerrainParams { width: 16, depth: 16, max_height: 16, scale: 16.0 };
//! let mut grid = VoxelGrid::new();
//! let stats = TerrainGenerator::new(params).generate(&mut grid);
//!
//! assert_eq!(stats.blocks_added, grid.len());
//! assert!(grid.has(0.0, 11.0, 0.0).unwrap());
//! assert!(!grid.has(0.0, 12.0, 0.0).unwrap());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod terrain;

pub use terrain::{TerrainError, TerrainGenerator, TerrainParams, TerrainShape, TerrainStats};
