//! # Terrain Generator
//!
//! Fills the grid with solid columns whose heights come from a closed-form
//! wave field:
//!
//! ```text
//! sx = ix / scale,  sz = iz / scale
//! h  = floor( ((sin sx + cos sz + 0.5 sin(0.5 sx) + 2) / 4) * max_height )
//! ```
//!
//! The `+2` and `/4` map the wave sum (roughly [-2.5, 2.5]) into [0, 1]
//! before scaling. The bound is not exact: constructive interference can
//! push a column slightly below 0 (empty column) or above `max_height`.
//! That overshoot is kept as-is.
//!
//! Each column is solid from bedrock (`y = 0`) up to `h - 1`; `y >= h` is air.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cubeworld_core::{GridCoord, VoxelGrid};
use cubeworld_shared::constants::{
    FLAT_WORLD_SIZE, TERRAIN_DEPTH, TERRAIN_MAX_HEIGHT, TERRAIN_SCALE, TERRAIN_WIDTH,
};

/// Rejected terrain parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerrainError {
    /// Width or depth is zero or negative.
    #[error("terrain extent must be positive: width {width}, depth {depth}")]
    NonPositiveExtent {
        /// Requested width.
        width: i32,
        /// Requested depth.
        depth: i32,
    },

    /// `max_height` is negative.
    #[error("terrain max_height must not be negative: {0}")]
    NegativeHeight(i32),

    /// `scale` is zero, NaN or infinite.
    #[error("terrain scale must be finite and non-zero: {0}")]
    InvalidScale(f64),
}

/// Height-field parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Columns along X, centered on 0.
    pub width: i32,
    /// Columns along Z, centered on 0.
    pub depth: i32,
    /// Height-field ceiling before overshoot.
    pub max_height: i32,
    /// Horizontal wavelength divisor. Larger is smoother.
    pub scale: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            width: TERRAIN_WIDTH,
            depth: TERRAIN_DEPTH,
            max_height: TERRAIN_MAX_HEIGHT,
            scale: TERRAIN_SCALE,
        }
    }
}

impl TerrainParams {
    /// Checks that the parameters describe a real terrain.
    ///
    /// # Errors
    ///
    /// See [`TerrainError`].
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.width <= 0 || self.depth <= 0 {
            return Err(TerrainError::NonPositiveExtent {
                width: self.width,
                depth: self.depth,
            });
        }
        if self.max_height < 0 {
            return Err(TerrainError::NegativeHeight(self.max_height));
        }
        if !self.scale.is_finite() || self.scale == 0.0 {
            return Err(TerrainError::InvalidScale(self.scale));
        }
        Ok(())
    }

    /// Half-open column ranges `[-w/2, w/2)` and `[-d/2, d/2)` (floor division).
    #[must_use]
    pub fn column_range(&self) -> (std::ops::Range<i32>, std::ops::Range<i32>) {
        let half_w = self.width.div_euclid(2);
        let half_d = self.depth.div_euclid(2);
        (-half_w..half_w, -half_d..half_d)
    }
}

/// Which terrain to build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerrainShape {
    /// The wave height field.
    #[default]
    Waves,
    /// A single layer at `y = 0`, `size` blocks on a side.
    Flat {
        /// Edge length in blocks.
        size: i32,
    },
}

impl TerrainShape {
    /// Flat world with the default edge length.
    #[must_use]
    pub const fn flat() -> Self {
        Self::Flat {
            size: FLAT_WORLD_SIZE,
        }
    }
}

/// Outcome of one generation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerrainStats {
    /// Columns visited.
    pub columns: usize,
    /// Blocks that were newly inserted.
    pub blocks_added: usize,
    /// Tallest column height produced (0 if none).
    pub tallest: i32,
}

/// Deterministic terrain generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerrainGenerator {
    params: TerrainParams,
}

impl TerrainGenerator {
    /// Creates a generator for `params`.
    #[must_use]
    pub const fn new(params: TerrainParams) -> Self {
        Self { params }
    }

    /// The parameters this generator was built with.
    #[must_use]
    pub const fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Column height at `(ix, iz)`. May be negative or exceed `max_height`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn height_at(&self, ix: i32, iz: i32) -> i32 {
        let sx = f64::from(ix) / self.params.scale;
        let sz = f64::from(iz) / self.params.scale;
        let wave = sx.sin() + sz.cos() + (sx * 0.5).sin() * 0.5;
        ((wave + 2.0) / 4.0 * f64::from(self.params.max_height)).floor() as i32
    }

    /// Populates `grid` with the wave terrain.
    ///
    /// Cells that are already occupied are left alone and not counted.
    pub fn generate(&self, grid: &mut VoxelGrid) -> TerrainStats {
        let (xs, zs) = self.params.column_range();
        let mut stats = TerrainStats::default();

        for ix in xs {
            for iz in zs.clone() {
                let h = self.height_at(ix, iz);
                stats.columns += 1;
                stats.tallest = stats.tallest.max(h);
                for y in 0..h {
                    if grid.insert(GridCoord::new(ix, y, iz)) {
                        stats.blocks_added += 1;
                    }
                }
            }
        }

        tracing::debug!(
            "terrain generated: {} columns, {} blocks, tallest {}",
            stats.columns,
            stats.blocks_added,
            stats.tallest
        );
        stats
    }

    /// Populates `grid` with a single layer at `y = 0` over `[-s/2, s/2)²`.
    pub fn generate_flat(grid: &mut VoxelGrid, size: i32) -> TerrainStats {
        let half = size.div_euclid(2);
        let mut stats = TerrainStats::default();

        for x in -half..half {
            for z in -half..half {
                stats.columns += 1;
                stats.tallest = 1;
                if grid.insert(GridCoord::new(x, 0, z)) {
                    stats.blocks_added += 1;
                }
            }
        }

        tracing::debug!("flat world generated: {} blocks", stats.blocks_added);
        stats
    }

    /// Builds the requested `shape` into `grid`.
    pub fn build(&self, grid: &mut VoxelGrid, shape: TerrainShape) -> TerrainStats {
        match shape {
            TerrainShape::Waves => self.generate(grid),
            TerrainShape::Flat { size } => Self::generate_flat(grid, size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> TerrainParams {
        TerrainParams {
            width: 16,
            depth: 16,
            max_height: 16,
            scale: 16.0,
        }
    }

    #[test]
    fn test_height_at_origin() {
        // sin 0 + cos 0 + 0.5 sin 0 + 2 = 3; 3/4 * 16 = 12
        let gen = TerrainGenerator::new(small());
        assert_eq!(gen.height_at(0, 0), 12);
    }

    #[test]
    fn test_column_range_floor_division() {
        let mut p = small();
        p.width = 17;
        p.depth = 1;
        let (xs, zs) = p.column_range();
        assert_eq!(xs, -8..8);
        assert_eq!(zs, 0..0);
    }

    #[test]
    fn test_block_count_matches_heights() {
        let gen = TerrainGenerator::new(small());
        let mut grid = VoxelGrid::new();
        let stats = gen.generate(&mut grid);

        let (xs, zs) = small().column_range();
        let expected: usize = xs
            .flat_map(|x| zs.clone().map(move |z| (x, z)))
            .map(|(x, z)| usize::try_from(gen.height_at(x, z).max(0)).unwrap())
            .sum();

        assert_eq!(stats.columns, 256);
        assert_eq!(stats.blocks_added, expected);
        assert_eq!(grid.len(), expected);
    }

    #[test]
    fn test_flat_world() {
        let mut grid = VoxelGrid::new();
        let stats = TerrainGenerator::generate_flat(&mut grid, 4);
        assert_eq!(stats.blocks_added, 16);
        assert!(grid.contains(GridCoord::new(-2, 0, -2)));
        assert!(grid.contains(GridCoord::new(1, 0, 1)));
        assert!(!grid.contains(GridCoord::new(2, 0, 0)));
        assert!(!grid.contains(GridCoord::new(0, 1, 0)));
    }

    #[test]
    fn test_validate() {
        assert!(small().validate().is_ok());

        let mut p = small();
        p.width = 0;
        assert!(matches!(p.validate(), Err(TerrainError::NonPositiveExtent { .. })));

        let mut p = small();
        p.max_height = -1;
        assert_eq!(p.validate(), Err(TerrainError::NegativeHeight(-1)));

        let mut p = small();
        p.scale = 0.0;
        assert!(matches!(p.validate(), Err(TerrainError::InvalidScale(_))));
    }
}
