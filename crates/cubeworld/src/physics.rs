//! # Cubeworld Physics System
//!
//! Kinematic character controller against the voxel grid.
//!
//! Features:
//! - Per-step gravity (discrete Euler, not scaled by delta time)
//! - Axis-sequential collision resolution in X, Z, Y order
//! - Ground probe and a ground-grace timer for forgiving jumps
//!
//! ## Resolution Policy
//!
//! Each axis is resolved on its own: move the full delta, query the grid
//! for blocks under the player box, then clamp against the **first**
//! candidate (grid query order, x/y/z major) that overlaps on the two other
//! axes. One clamp per axis per step. This is not a simultaneous sweep;
//! diagonal moves into corners resolve by axis priority, and very large
//! deltas can clamp against a nearer block than the one actually struck.

use serde::{Deserialize, Serialize};

use cubeworld_core::{ensure_finite, ensure_finite_vec3, Aabb, GridCoord, VoxelGrid};
use cubeworld_shared::constants::{
    CONTACT_EPSILON, GROUND_GRACE_TIME, GROUND_PROBE_DEPTH, GROUND_PROBE_HALF_HEIGHT,
    JUMP_VELOCITY_THRESHOLD, PLAYER_GRAVITY, PLAYER_HEIGHT, PLAYER_JUMP_IMPULSE, PLAYER_RADIUS,
    PLAYER_SPEED,
};
use cubeworld_shared::{Axis, Vec3};

use crate::error::SimResult;
use crate::input::InputState;

/// Fixed shape and tuning of the player.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerParams {
    /// Box height below the top-center point.
    pub height: f32,
    /// Horizontal half-extent.
    pub radius: f32,
    /// Horizontal distance per step at full input.
    pub speed: f32,
    /// Vertical velocity lost per step.
    pub gravity: f32,
    /// Vertical velocity set by a jump.
    pub jump_impulse: f32,
    /// Seconds a jump stays available after leaving the ground.
    pub ground_grace_time: f32,
}

impl Default for PlayerParams {
    fn default() -> Self {
        Self {
            height: PLAYER_HEIGHT,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            gravity: PLAYER_GRAVITY,
            jump_impulse: PLAYER_JUMP_IMPULSE,
            ground_grace_time: GROUND_GRACE_TIME,
        }
    }
}

/// Movement regime, derived from the ground-grace timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
    /// Grace timer is positive; a jump is accepted.
    Grounded,
    /// Grace timer has run out.
    Airborne,
}

/// What happened during one controller step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// False when the step was skipped because input was not captured.
    pub moved: bool,
    /// Block the X pass clamped against.
    pub hit_x: Option<GridCoord>,
    /// Block the Z pass clamped against.
    pub hit_z: Option<GridCoord>,
    /// Block the Y pass clamped against (floor or ceiling).
    pub hit_y: Option<GridCoord>,
    /// Ground probe found a block under the feet.
    pub on_ground: bool,
}

/// Kinematic character controller.
///
/// The position is the **top** center of the player box (where the camera
/// sits). Only vertical velocity persists between steps; horizontal motion
/// is rebuilt from input every step.
#[derive(Clone, Debug)]
pub struct CharacterController {
    position: Vec3,
    vertical_velocity: f32,
    ground_grace: f32,
    params: PlayerParams,
}

impl CharacterController {
    /// Creates a controller at rest at `spawn`.
    #[must_use]
    pub fn new(spawn: Vec3, params: PlayerParams) -> Self {
        Self {
            position: spawn,
            vertical_velocity: 0.0,
            ground_grace: 0.0,
            params,
        }
    }

    /// Top-center position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Teleports the player. Velocity and grace timer are kept.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Camera position. The camera sits at the top-center point.
    #[must_use]
    pub fn eye_position(&self) -> Vec3 {
        self.position
    }

    /// Current vertical velocity (per step).
    #[must_use]
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Seconds of ground grace left.
    #[must_use]
    pub fn ground_grace(&self) -> f32 {
        self.ground_grace
    }

    /// Shape and tuning.
    #[must_use]
    pub fn params(&self) -> &PlayerParams {
        &self.params
    }

    /// True while the grace timer is positive.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.ground_grace > 0.0
    }

    /// Grounded/airborne view of the grace timer.
    #[must_use]
    pub fn regime(&self) -> Regime {
        if self.is_grounded() {
            Regime::Grounded
        } else {
            Regime::Airborne
        }
    }

    /// The player's world box.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_player(self.position, self.params.radius, self.params.height)
    }

    /// World-space `(dx, dz)` for this step.
    ///
    /// `forward` is flattened onto the ground plane and renormalized; right
    /// is `forward x up`. A vertical view direction yields no movement.
    #[must_use]
    pub fn horizontal_delta(&self, input: &InputState, forward: Vec3) -> (f32, f32) {
        let (f, r) = input.movement_axes();
        let forward = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();

        let dx = (forward.x * f + right.x * r) * self.params.speed;
        let dz = (forward.z * f + right.z * r) * self.params.speed;
        (dx, dz)
    }

    /// Advances the controller one step.
    ///
    /// Order: X, then Z, then gravity and Y, then the ground probe. When
    /// input is not captured nothing changes and the report has
    /// `moved == false`.
    ///
    /// # Errors
    ///
    /// Non-finite `dt`, `forward` or current position. State is untouched.
    pub fn step(
        &mut self,
        grid: &VoxelGrid,
        dt: f32,
        input: &InputState,
        forward: Vec3,
    ) -> SimResult<StepReport> {
        ensure_finite("delta time", dt)?;
        ensure_finite_vec3("view direction", forward)?;
        ensure_finite_vec3("player position", self.position)?;

        if !input.captured {
            return Ok(StepReport::default());
        }

        let (dx, dz) = self.horizontal_delta(input, forward);
        let hit_x = self.move_axis(grid, Axis::X, dx)?;
        let hit_z = self.move_axis(grid, Axis::Z, dz)?;

        self.vertical_velocity -= self.params.gravity;
        let hit_y = self.move_axis(grid, Axis::Y, self.vertical_velocity)?;

        let on_ground = self.on_ground(grid)?;
        if on_ground {
            self.ground_grace = self.params.ground_grace_time;
        } else {
            self.ground_grace = (self.ground_grace - dt).max(0.0);
        }

        Ok(StepReport {
            moved: true,
            hit_x,
            hit_z,
            hit_y,
            on_ground,
        })
    }

    /// Moves `delta` along `axis` and resolves at most one collision.
    ///
    /// Returns the block clamped against, if any. A zero delta does nothing.
    ///
    /// Moving up into a block zeroes vertical velocity and the grace timer.
    /// Landing on one zeroes vertical velocity and refills the grace timer.
    ///
    /// # Errors
    ///
    /// Fails if the moved box has a non-finite corner.
    #[allow(clippy::float_cmp)]
    pub fn move_axis(
        &mut self,
        grid: &VoxelGrid,
        axis: Axis,
        delta: f32,
    ) -> SimResult<Option<GridCoord>> {
        if delta == 0.0 {
            return Ok(None);
        }
        self.position.set(axis, self.position.get(axis) + delta);

        let body = self.aabb();
        let [a, b] = axis.others();
        let hit = grid
            .query_aabb(body.min, body.max)?
            .into_iter()
            .find(|&coord| {
                let cube = Aabb::unit_block(coord);
                body.overlaps_on(&cube, a) && body.overlaps_on(&cube, b)
            });

        let Some(block) = hit else {
            return Ok(None);
        };

        let cube = Aabb::unit_block(block);
        let PlayerParams { height, radius, .. } = self.params;
        match (axis, delta > 0.0) {
            (Axis::Y, true) => {
                self.position.y = cube.min.y - CONTACT_EPSILON;
                self.vertical_velocity = 0.0;
                self.ground_grace = 0.0;
            }
            (Axis::Y, false) => {
                self.position.y = cube.max.y + height + CONTACT_EPSILON;
                self.vertical_velocity = 0.0;
                self.ground_grace = self.params.ground_grace_time;
            }
            (_, true) => self
                .position
                .set(axis, cube.min.get(axis) - radius - CONTACT_EPSILON),
            (_, false) => self
                .position
                .set(axis, cube.max.get(axis) + radius + CONTACT_EPSILON),
        }

        tracing::trace!("{:?} clamp against {:?} -> {:?}", axis, block, self.position);
        Ok(Some(block))
    }

    /// Probes a thin slab just under the feet for any block.
    ///
    /// The slab is 0.02 tall, centered 0.05 below the bottom of the box.
    ///
    /// # Errors
    ///
    /// Fails if the probe box has a non-finite corner.
    pub fn on_ground(&self, grid: &VoxelGrid) -> SimResult<bool> {
        let PlayerParams { height, radius, .. } = self.params;
        let foot_y = self.position.y - height - GROUND_PROBE_DEPTH;
        let probe = Aabb::new(
            Vec3::new(
                self.position.x - radius,
                foot_y - GROUND_PROBE_HALF_HEIGHT,
                self.position.z - radius,
            ),
            Vec3::new(
                self.position.x + radius,
                foot_y + GROUND_PROBE_HALF_HEIGHT,
                self.position.z + radius,
            ),
        );
        let (lo, hi) = probe.grid_range()?;
        Ok(grid.any_in_range(lo, hi))
    }

    /// Jumps if grounded and not already moving vertically.
    ///
    /// A jump consumes the grace window: the next one needs a landing.
    /// Returns whether the jump happened.
    pub fn try_jump(&mut self) -> bool {
        if self.ground_grace > 0.0 && self.vertical_velocity.abs() < JUMP_VELOCITY_THRESHOLD {
            self.vertical_velocity = self.params.jump_impulse;
            self.ground_grace = 0.0;
            true
        } else {
            false
        }
    }
}
