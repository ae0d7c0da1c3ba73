//! # Cubeworld
//!
//! A voxel sandbox simulation: a sparse block grid, a procedural height
//! field and a first-person character controller that walks on it.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Simulation                            │
//! │                                                              │
//! │  ┌──────────────┐   generate   ┌──────────────┐              │
//! │  │  Terrain     │─────────────>│  VoxelGrid   │──> events    │
//! │  │  (procedural)│              │  (core)      │              │
//! │  └──────────────┘              └──────┬───────┘              │
//! │                                       │ query_aabb / probe   │
//! │  InputState ──┐                ┌──────┴───────┐              │
//! │  view dir ────┼───────────────>│  Character   │──> position  │
//! │  jump ────────┘                │  Controller  │              │
//! │                                └──────────────┘              │
//! │  TargetResolver ──> BlockInteraction ──> insert / erase      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `physics`: character controller and collision resolution
//! - `input`: held-key snapshot
//! - `interaction`: break/place against a host-supplied target
//! - `config`: TOML-loadable settings
//! - `game_loop`: frame orchestration and timing
//!
//! ## Example
//!
//! ```rust
//! use cubeworld::{InputState, SimConfig, Simulation};
//! use cubeworld::shared::Vec3;
//!
//! let mut sim = Simulation::new(SimConfig::default()).unwrap();
//! let input = InputState::captured();
//! for _ in 0..240 {
//!     sim.frame(1.0 / 60.0, &input, Vec3::new(0.0, 0.0, -1.0)).unwrap();
//! }
//! assert!(sim.player().is_grounded());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod game_loop;
pub mod input;
pub mod interaction;
pub mod physics;

pub use cubeworld_core as store;
pub use cubeworld_procedural as procedural;
pub use cubeworld_shared as shared;

pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use game_loop::{FrameStats, FrameStatsAccumulator, Simulation};
pub use input::{InputState, MoveKey};
pub use interaction::{BlockAction, BlockInteraction, BlockTarget, TargetResolver};
pub use physics::{CharacterController, PlayerParams, Regime, StepReport};
