//! # Headless Walk
//!
//! Builds a world, drops the player in, walks forward with one scripted
//! jump and prints the X/Y/Z readout as it goes.
//!
//! ```text
//! cubeworld_headless [config.toml]
//! ```

use std::process::ExitCode;

use cubeworld::shared::Vec3;
use cubeworld::{InputState, MoveKey, SimConfig, SimResult, Simulation};

/// Frames to simulate.
const FRAMES: u64 = 600;
/// Frame at which the walker jumps.
const JUMP_FRAME: u64 = 300;
/// Print the readout every this many frames.
const REPORT_EVERY: u64 = 60;
/// Fixed delta time.
const DT: f32 = 1.0 / 60.0;

fn run() -> SimResult<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    let mut sim = Simulation::new(config)?;

    println!(
        "Terrain: {} blocks, tallest column {}",
        sim.grid().len(),
        sim.terrain_stats().tallest
    );

    let settle = InputState::captured();
    let walk = settle.with(MoveKey::Forward);
    let forward = Vec3::new(0.0, 0.0, -1.0);

    for frame in 0..FRAMES {
        // First second: let the player drop onto the terrain.
        let input = if frame < 60 { settle } else { walk };
        if frame == JUMP_FRAME && sim.jump(&input) {
            println!("frame {frame}: jump");
        }

        let stats = sim.frame(DT, &input, forward)?;
        if frame % REPORT_EVERY == 0 || stats.report.hit_x.is_some() || stats.report.hit_z.is_some() {
            let p = stats.position;
            println!(
                "frame {:>4}  X: {:>7.2}  Y: {:>7.2}  Z: {:>7.2}  {}",
                stats.frame,
                p.x,
                p.y,
                p.z,
                if stats.grounded { "grounded" } else { "airborne" }
            );
        }
    }

    let totals = sim.stats();
    println!(
        "{} frames, avg step {:.1}us, max {}us, grounded {} frames",
        totals.frames_recorded,
        totals.avg_step_us(),
        totals.max_step_us,
        totals.grounded_frames
    );
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("cubeworld_headless: {e}");
            ExitCode::FAILURE
        }
    }
}
