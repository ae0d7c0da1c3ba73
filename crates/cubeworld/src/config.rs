//! # Simulation Configuration
//!
//! Everything a host can tune, loadable from TOML. Omitted keys fall back
//! to the defaults, which reproduce the stock world: a 16 x 16 wave field,
//! 16 blocks tall, with the player dropped in two blocks above the peak.
//!
//! ```toml
//! event_capacity = 1024
//!
//! [terrain]
//! width = 32
//! depth = 32
//!
//! [shape]
//! kind = "flat"
//! size = 16
//!
//! [player]
//! speed = 0.2
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use cubeworld_procedural::{TerrainParams, TerrainShape};
use cubeworld_shared::constants::SPAWN_HEIGHT_MARGIN;
use cubeworld_shared::Vec3;

use crate::error::{SimError, SimResult};
use crate::physics::PlayerParams;

/// Default grid event channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 2048;

/// Configuration for a [`crate::Simulation`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Height-field parameters. Keys omitted from a `[terrain]` table keep
    /// the stock world's values.
    #[serde(deserialize_with = "deserialize_terrain")]
    pub terrain: TerrainParams,
    /// Which terrain to build.
    pub shape: TerrainShape,
    /// Player shape and tuning.
    pub player: PlayerParams,
    /// Explicit spawn point (top-center). `None` spawns above the origin.
    pub spawn: Option<Vec3>,
    /// Capacity of channels handed out by `subscribe`.
    pub event_capacity: usize,
}

/// The stock world: a 16 x 16 wave field.
#[must_use]
pub const fn stock_terrain() -> TerrainParams {
    TerrainParams {
        width: 16,
        depth: 16,
        max_height: 16,
        scale: 16.0,
    }
}

/// A `[terrain]` table where every key is optional.
#[derive(Deserialize)]
struct TerrainOverrides {
    width: Option<i32>,
    depth: Option<i32>,
    max_height: Option<i32>,
    scale: Option<f64>,
}

fn deserialize_terrain<'de, D>(deserializer: D) -> Result<TerrainParams, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let table = TerrainOverrides::deserialize(deserializer)?;
    let stock = stock_terrain();
    Ok(TerrainParams {
        width: table.width.unwrap_or(stock.width),
        depth: table.depth.unwrap_or(stock.depth),
        max_height: table.max_height.unwrap_or(stock.max_height),
        scale: table.scale.unwrap_or(stock.scale),
    })
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            terrain: stock_terrain(),
            shape: TerrainShape::Waves,
            player: PlayerParams::default(),
            spawn: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl SimConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] on malformed TOML or mistyped keys.
    pub fn from_toml_str(source: &str) -> SimResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("loaded config from {}", path.display());
        Self::from_toml_str(&source)
    }

    /// Where the player starts.
    #[must_use]
    pub fn spawn_point(&self) -> Vec3 {
        self.spawn.unwrap_or_else(|| {
            #[allow(clippy::cast_precision_loss)]
            let top = self.terrain.max_height as f32;
            Vec3::new(0.0, top + SPAWN_HEIGHT_MARGIN, 0.0)
        })
    }

    /// Rejects values the simulation cannot run with.
    ///
    /// # Errors
    ///
    /// [`SimError::Terrain`] for bad terrain parameters, or
    /// [`SimError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> SimResult<()> {
        self.terrain.validate()?;

        if let TerrainShape::Flat { size } = self.shape {
            if size <= 0 {
                return Err(invalid(format!("shape.size must be positive, got {size}")));
            }
        }

        let p = &self.player;
        for (name, value) in [
            ("height", p.height),
            ("radius", p.radius),
            ("speed", p.speed),
            ("gravity", p.gravity),
            ("jump_impulse", p.jump_impulse),
            ("ground_grace_time", p.ground_grace_time),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "player.{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if p.height <= 0.0 || p.radius <= 0.0 {
            return Err(invalid(format!(
                "player box must have positive size, got height {} radius {}",
                p.height, p.radius
            )));
        }

        if let Some(spawn) = self.spawn {
            if !spawn.is_finite() {
                return Err(invalid(format!("spawn must be finite, got {spawn:?}")));
            }
        }
        if self.event_capacity == 0 {
            return Err(invalid("event_capacity must be positive".to_string()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> SimError {
    SimError::InvalidConfig(message)
}
