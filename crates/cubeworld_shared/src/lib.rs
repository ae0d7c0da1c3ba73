//! # Cubeworld Shared
//!
//! Common types used by the grid store, the terrain generator and the
//! character controller.
//!
//! Nothing in this crate owns simulation state. It only carries plain data
//! (`Vec3`, `Axis`) and the tuning constants every other crate agrees on.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod math;

pub use math::{Axis, Vec3};
