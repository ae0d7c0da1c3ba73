//! # Simulation Constants
//!
//! Tuning values for the voxel simulation.
//!
//! Movement values are in **per-step** units: the controller applies them
//! once per frame, not scaled by the frame's delta time. Only the
//! ground-grace timer is measured in seconds.

// =============================================================================
// GRID
// =============================================================================

/// Bias added before flooring a world coordinate into a grid cell.
///
/// Keeps a coordinate that lands a hair under an integer boundary (float
/// error) in the cell above it.
pub const GRID_EPSILON: f32 = 1e-6;

/// Gap left between the player and a block face after a clamp.
pub const CONTACT_EPSILON: f32 = 0.001;

// =============================================================================
// PLAYER
// =============================================================================

/// Horizontal distance covered per step at full input.
pub const PLAYER_SPEED: f32 = 0.1;

/// Downward change in vertical velocity per step.
pub const PLAYER_GRAVITY: f32 = 0.004;

/// Vertical velocity set by a successful jump.
pub const PLAYER_JUMP_IMPULSE: f32 = 0.102;

/// Player box height, measured down from the top-center point.
pub const PLAYER_HEIGHT: f32 = 1.9;

/// Horizontal half-extent of the player box.
pub const PLAYER_RADIUS: f32 = 0.45;

/// Seconds a jump is still accepted after losing floor contact.
pub const GROUND_GRACE_TIME: f32 = 0.15;

/// Jumps are refused while |vertical velocity| is at or above this.
pub const JUMP_VELOCITY_THRESHOLD: f32 = 0.01;

/// How far below the feet the ground probe is centered.
pub const GROUND_PROBE_DEPTH: f32 = 0.05;

/// Half the height of the ground probe slab (probe height is 0.02).
pub const GROUND_PROBE_HALF_HEIGHT: f32 = 0.01;

// =============================================================================
// TERRAIN
// =============================================================================

/// Default terrain width in columns.
pub const TERRAIN_WIDTH: i32 = 64;

/// Default terrain depth in columns.
pub const TERRAIN_DEPTH: i32 = 64;

/// Default height-field ceiling.
pub const TERRAIN_MAX_HEIGHT: i32 = 16;

/// Default horizontal wavelength divisor of the height field.
pub const TERRAIN_SCALE: f64 = 16.0;

/// Default edge length of the flat test world.
pub const FLAT_WORLD_SIZE: i32 = 16;

/// Blocks between the terrain ceiling and the default spawn point.
pub const SPAWN_HEIGHT_MARGIN: f32 = 2.0;
