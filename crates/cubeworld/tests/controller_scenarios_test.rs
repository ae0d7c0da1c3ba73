//! # Controller Scenarios
//!
//! End-to-end walks against small hand-built worlds: axis ordering,
//! corners, ledges and terrain landings.

use cubeworld::store::{GridCoord, VoxelGrid};
use cubeworld::shared::constants::{CONTACT_EPSILON, PLAYER_HEIGHT, PLAYER_RADIUS};
use cubeworld::shared::Vec3;
use cubeworld::{
    CharacterController, InputState, MoveKey, PlayerParams, Regime, SimConfig, Simulation,
};

const DT: f32 = 1.0 / 60.0;

/// Top-center height for a player standing on the `y = 0` layer.
const STANDING_Y: f32 = 1.0 + PLAYER_HEIGHT + CONTACT_EPSILON;

fn floor(lo: i32, hi: i32) -> VoxelGrid {
    let mut grid = VoxelGrid::new();
    for x in lo..=hi {
        for z in lo..=hi {
            grid.insert(GridCoord::new(x, 0, z));
        }
    }
    grid
}

fn walker() -> InputState {
    InputState::captured().with(MoveKey::Forward)
}

/// Test: X resolves before Z, so a diagonal into a single corner block
/// slides along X and stops on Z.
#[test]
fn test_diagonal_resolves_x_then_z() {
    let mut grid = floor(-2, 2);
    grid.insert(GridCoord::new(1, 1, 1));
    let mut player = CharacterController::new(Vec3::new(0.5, STANDING_Y, 0.5), PlayerParams::default());

    let report = player
        .step(&grid, DT, &walker(), Vec3::new(1.0, 0.0, 1.0))
        .unwrap();

    let step = 0.1 / 2.0_f32.sqrt();
    assert_eq!(report.hit_x, None);
    assert!((player.position().x - (0.5 + step)).abs() < 1e-5);

    assert_eq!(report.hit_z, Some(GridCoord::new(1, 1, 1)));
    assert!((player.position().z - (1.0 - PLAYER_RADIUS - CONTACT_EPSILON)).abs() < 1e-5);

    assert_eq!(report.hit_y, Some(GridCoord::new(0, 0, 0)));
    assert!((player.position().y - STANDING_Y).abs() < 1e-4);
}

/// Test: walls on both sides of a corner clamp both axes.
#[test]
fn test_inside_corner_clamps_both_axes() {
    let mut grid = floor(-2, 2);
    grid.insert(GridCoord::new(1, 1, 0));
    grid.insert(GridCoord::new(0, 1, 1));
    let mut player = CharacterController::new(Vec3::new(0.5, STANDING_Y, 0.5), PlayerParams::default());

    let report = player
        .step(&grid, DT, &walker(), Vec3::new(1.0, 0.0, 1.0))
        .unwrap();

    let wall = 1.0 - PLAYER_RADIUS - CONTACT_EPSILON;
    assert_eq!(report.hit_x, Some(GridCoord::new(1, 1, 0)));
    assert_eq!(report.hit_z, Some(GridCoord::new(0, 1, 1)));
    assert!((player.position().x - wall).abs() < 1e-5);
    assert!((player.position().z - wall).abs() < 1e-5);

    // Pressing on keeps the player pinned in the corner.
    for _ in 0..20 {
        player
            .step(&grid, DT, &walker(), Vec3::new(1.0, 0.0, 1.0))
            .unwrap();
    }
    assert!((player.position().x - wall).abs() < 1e-5);
    assert!((player.position().z - wall).abs() < 1e-5);
}

/// Test: the controller never ends a step overlapping a block it pushed against.
#[test]
fn test_walking_into_wall_never_penetrates() {
    let mut grid = floor(-3, 3);
    for z in -3..=3 {
        grid.insert(GridCoord::new(2, 1, z));
        grid.insert(GridCoord::new(2, 2, z));
    }
    let mut player = CharacterController::new(Vec3::new(0.5, STANDING_Y, 0.5), PlayerParams::default());

    for _ in 0..60 {
        player.step(&grid, DT, &walker(), Vec3::X).unwrap();
        let body = player.aabb();
        assert!(body.max.x < 2.0, "penetrated wall: {:?}", body);
    }
    assert!((player.position().x - (2.0 - PLAYER_RADIUS - CONTACT_EPSILON)).abs() < 1e-5);
    assert_eq!(player.regime(), Regime::Grounded);
}

/// Test: walking off a ledge drops the player and the grace window runs out.
#[test]
fn test_walk_off_ledge() {
    let grid = floor(-3, 3);
    let mut player = CharacterController::new(Vec3::new(2.5, STANDING_Y, 0.5), PlayerParams::default());

    for _ in 0..40 {
        player.step(&grid, DT, &walker(), Vec3::X).unwrap();
    }

    assert!(player.position().x > 4.0);
    assert!(player.position().y < STANDING_Y - 0.1);
    assert!(player.vertical_velocity() < 0.0);
    assert_eq!(player.regime(), Regime::Airborne);
    assert!(!player.try_jump());
}

/// Test: a jump from flat ground rises, peaks and lands back at the same height.
#[test]
fn test_jump_arc_returns_to_ground() {
    let grid = floor(-2, 2);
    let mut player = CharacterController::new(Vec3::new(0.5, STANDING_Y, 0.5), PlayerParams::default());
    let idle = InputState::captured();
    player.step(&grid, DT, &idle, Vec3::Z).unwrap();
    assert!(player.try_jump());

    let mut peak = player.position().y;
    let mut landed = false;
    for _ in 0..120 {
        let report = player.step(&grid, DT, &idle, Vec3::Z).unwrap();
        peak = peak.max(player.position().y);
        if report.hit_y.is_some() {
            landed = true;
            break;
        }
    }

    assert!(landed);
    // 0.102 impulse minus 0.004 per step peaks about 1.25 above the start.
    assert!(peak > STANDING_Y + 1.0, "peak {peak}");
    assert!((player.position().y - STANDING_Y).abs() < 1e-4);
    assert_eq!(player.regime(), Regime::Grounded);
}

/// Test: the stock world spawns the player above the origin column and it
/// comes to rest on top of it.
#[test]
fn test_lands_on_generated_terrain() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    assert_eq!(sim.player().position(), Vec3::new(0.0, 18.0, 0.0));

    let idle = InputState::captured();
    for _ in 0..240 {
        sim.frame(DT, &idle, Vec3::new(0.0, 0.0, -1.0)).unwrap();
    }

    // Origin column is 12 tall; its top block is y = 11.
    let expected = 12.0 + PLAYER_HEIGHT + CONTACT_EPSILON;
    assert!((sim.player().position().y - expected).abs() < 1e-3);
    assert!(sim.player().is_grounded());
}

/// Test: nothing moves until input is captured.
#[test]
fn test_uncaptured_world_is_frozen() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    let input = InputState {
        forward: true,
        ..InputState::default()
    };
    for _ in 0..30 {
        let stats = sim.frame(DT, &input, Vec3::Z).unwrap();
        assert!(!stats.report.moved);
    }
    assert_eq!(sim.player().position(), Vec3::new(0.0, 18.0, 0.0));
}
