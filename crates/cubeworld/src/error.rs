//! # Simulation Error Types
//!
//! Every core operation succeeds on finite input. What can fail is input
//! that is not finite, and configuration that cannot be read or makes no
//! sense.

use std::path::PathBuf;

use cubeworld_core::CoreError;
use cubeworld_procedural::TerrainError;
use thiserror::Error;

/// Errors surfaced by the simulation crate.
#[derive(Error, Debug)]
pub enum SimError {
    /// A grid or controller input was NaN or infinite.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Terrain parameters were rejected.
    #[error(transparent)]
    Terrain(#[from] TerrainError),

    /// Config file is not valid TOML for [`crate::SimConfig`].
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Config parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
