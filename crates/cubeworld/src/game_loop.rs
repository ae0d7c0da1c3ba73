//! # Cubeworld Frame Loop
//!
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────┐
//! │ 1. INPUT        host samples keys, capture state, view dir  │
//! │ 2. JUMP         forwarded only while captured               │
//! │ 3. STEP         X → Z → gravity + Y → ground probe          │
//! │ 4. INTERACT     break/place between steps                   │
//! │ 5. RENDER       host reads position, highlight, grid events │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single threaded. Terrain is generated to completion in [`Simulation::new`]
//! before the first step runs.

use std::time::{Duration, Instant};

use cubeworld_core::{GridCoord, GridEventReceiver, VoxelGrid};
use cubeworld_procedural::{TerrainGenerator, TerrainStats};
use cubeworld_shared::Vec3;

use crate::config::SimConfig;
use crate::error::SimResult;
use crate::input::InputState;
use crate::interaction::{BlockAction, BlockInteraction, TargetResolver};
use crate::physics::{CharacterController, StepReport};

/// Target frame time for 60 FPS.
pub const TARGET_FRAME_TIME: Duration = Duration::from_micros(16_666);

/// Per-frame statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Frame number, starting at 0.
    pub frame: u64,
    /// Delta time passed in by the host.
    pub dt: f32,
    /// Player top-center after the step.
    pub position: Vec3,
    /// Ground-grace timer positive after the step.
    pub grounded: bool,
    /// Wall time of the controller step in microseconds.
    pub step_us: u64,
    /// Collisions resolved this frame.
    pub report: StepReport,
}

/// Running totals over recorded frames.
#[derive(Clone, Debug)]
pub struct FrameStatsAccumulator {
    /// Frames recorded.
    pub frames_recorded: u64,
    /// Sum of step times.
    pub step_us_sum: u64,
    /// Fastest step.
    pub min_step_us: u64,
    /// Slowest step.
    pub max_step_us: u64,
    /// Frames that ended grounded.
    pub grounded_frames: u64,
}

impl Default for FrameStatsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStatsAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames_recorded: 0,
            step_us_sum: 0,
            min_step_us: u64::MAX,
            max_step_us: 0,
            grounded_frames: 0,
        }
    }

    /// Records one frame.
    pub fn record(&mut self, stats: &FrameStats) {
        self.frames_recorded += 1;
        self.step_us_sum += stats.step_us;
        self.min_step_us = self.min_step_us.min(stats.step_us);
        self.max_step_us = self.max_step_us.max(stats.step_us);
        if stats.grounded {
            self.grounded_frames += 1;
        }
    }

    /// Average step time in microseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_step_us(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.step_us_sum as f64 / self.frames_recorded as f64
    }
}

/// The world, the player and the interaction state, advanced frame by frame.
pub struct Simulation {
    grid: VoxelGrid,
    player: CharacterController,
    interaction: BlockInteraction,
    config: SimConfig,
    frame_count: u64,
    terrain_stats: TerrainStats,
    stats: FrameStatsAccumulator,
}

impl Simulation {
    /// Validates `config`, builds the terrain and spawns the player.
    ///
    /// # Errors
    ///
    /// Whatever [`SimConfig::validate`] rejects.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;

        let mut grid = VoxelGrid::new();
        let terrain_stats = TerrainGenerator::new(config.terrain).build(&mut grid, config.shape);
        let spawn = config.spawn_point();
        let player = CharacterController::new(spawn, config.player);

        tracing::info!(
            "world ready: {} blocks in {} columns, player at ({:.2}, {:.2}, {:.2})",
            grid.len(),
            terrain_stats.columns,
            spawn.x,
            spawn.y,
            spawn.z
        );

        Ok(Self {
            grid,
            player,
            interaction: BlockInteraction::new(),
            config,
            frame_count: 0,
            terrain_stats,
            stats: FrameStatsAccumulator::new(),
        })
    }

    /// Runs one controller step.
    ///
    /// # Errors
    ///
    /// Non-finite `dt` or `forward`. The frame counter does not advance.
    pub fn frame(&mut self, dt: f32, input: &InputState, forward: Vec3) -> SimResult<FrameStats> {
        let start = Instant::now();
        let report = self.player.step(&self.grid, dt, input, forward)?;
        let step_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

        let stats = FrameStats {
            frame: self.frame_count,
            dt,
            position: self.player.position(),
            grounded: self.player.is_grounded(),
            step_us,
            report,
        };
        self.frame_count += 1;
        self.stats.record(&stats);

        if step_us > TARGET_FRAME_TIME.as_micros() as u64 {
            tracing::warn!("frame {} step took {}us", stats.frame, step_us);
        }
        Ok(stats)
    }

    /// Jump request. Ignored unless input is captured.
    pub fn jump(&mut self, input: &InputState) -> bool {
        input.captured && self.player.try_jump()
    }

    /// Breaks or places a block at the resolved target.
    pub fn interact<R: TargetResolver + ?Sized>(
        &mut self,
        action: BlockAction,
        captured: bool,
        resolver: &R,
    ) -> Option<GridCoord> {
        self.interaction
            .apply(&mut self.grid, action, captured, resolver)
    }

    /// Refreshes the highlighted block.
    pub fn update_highlight<R: TargetResolver + ?Sized>(&mut self, resolver: &R) -> Option<GridCoord> {
        self.interaction.highlight(resolver)
    }

    /// Opens a grid event feed with the configured capacity.
    pub fn subscribe(&mut self) -> GridEventReceiver {
        self.grid.subscribe(self.config.event_capacity)
    }

    /// The voxel grid.
    #[must_use]
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Mutable grid, for hosts that edit the world directly.
    pub fn grid_mut(&mut self) -> &mut VoxelGrid {
        &mut self.grid
    }

    /// The player controller.
    #[must_use]
    pub fn player(&self) -> &CharacterController {
        &self.player
    }

    /// Mutable player controller.
    pub fn player_mut(&mut self) -> &mut CharacterController {
        &mut self.player
    }

    /// Block interaction state.
    #[must_use]
    pub fn interaction(&self) -> &BlockInteraction {
        &self.interaction
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Frames stepped so far.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// What terrain generation produced.
    #[must_use]
    pub fn terrain_stats(&self) -> TerrainStats {
        self.terrain_stats
    }

    /// Accumulated frame statistics.
    #[must_use]
    pub fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats
    }
}
