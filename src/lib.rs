//! Curve Racer - a car riding a closed parametric track
//!
//! Core modules:
//! - `sim`: Track curves, car progression, checkpoints, cameras, culling, editing
//! - `renderer`: Per-frame geometry and viewport draw lists over a `DrawSurface`
//! - `settings`: Display mode flags and camera preferences (JSON)

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, ShadingMode};

use glam::Vec3;

/// Track and camera configuration constants
pub mod consts {
    /// Window size in pixels (chase view on the left half, minimap on the right)
    pub const WINDOW_WIDTH: f32 = 1000.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Largest simulated step accepted by a single tick (ms)
    pub const MAX_TICK_MS: f32 = 100.0;

    /// Car speed in parameter units per millisecond
    pub const CAR_SPEED_START: f32 = 0.000_15;
    pub const CAR_SPEED_MIN: f32 = 0.0;
    pub const CAR_SPEED_MAX: f32 = 0.000_5;
    pub const CAR_SPEED_STEP: f32 = 0.000_03;
    /// Backward jump in t that counts as a lap (filters jitter around 0)
    pub const LAP_WRAP_EPSILON: f32 = 1e-6;
    /// Fraction of the heading error closed each tick
    pub const YAW_SMOOTHING: f32 = 0.18;

    /// Checkpoint parameters along the lap
    pub const CHECKPOINTS: [f32; 4] = [0.0, 0.25, 0.5, 0.75];

    /// Road geometry
    pub const ROAD_HALF_WIDTH: f32 = 15.0;
    pub const TRACK_STEPS: usize = 150;
    /// Finite-difference step for tangents
    pub const TANGENT_EPSILON: f32 = 0.001;

    /// Terrain undulation: AMPLITUDE * sin(FREQ * x) * cos(FREQ * z)
    pub const TERRAIN_AMPLITUDE: f32 = 15.0;
    pub const TERRAIN_FREQUENCY: f32 = 0.02;

    /// Chase camera
    pub const CHASE_DISTANCE: f32 = 120.0;
    pub const CHASE_DISTANCE_MIN: f32 = 40.0;
    pub const CHASE_DISTANCE_MAX: f32 = 250.0;
    pub const CHASE_HEIGHT: f32 = 60.0;
    pub const CHASE_SIDE_STEP: f32 = 5.0;
    /// Scroll delta to distance factor
    pub const CHASE_ZOOM_FACTOR: f32 = 0.3;
    pub const CHASE_FOV_Y: f32 = std::f32::consts::FRAC_PI_3;
    pub const CHASE_NEAR: f32 = 1.0;
    pub const CHASE_FAR: f32 = 5000.0;

    /// Minimap camera (top-down orthographic)
    pub const MINIMAP_EXTENT: f32 = 260.0;
    pub const MINIMAP_EYE_HEIGHT: f32 = 400.0;
    pub const MINIMAP_NEAR: f32 = 0.1;
    pub const MINIMAP_FAR: f32 = 1000.0;

    /// Control point pick radius (screen pixels)
    pub const PICK_RADIUS_PX: f32 = 18.0;

    /// Decoration posts
    pub const DECOR_COUNT: usize = 16;
    pub const CULL_RADIUS: f32 = 300.0;
}

/// Default forward direction when a tangent degenerates
pub const DEFAULT_FORWARD: Vec3 = Vec3::Z;

/// Wrap a curve parameter onto [0, 1)
#[inline]
pub fn wrap01(t: f32) -> f32 {
    let r = t.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if r >= 1.0 { 0.0 } else { r }
}

/// Shortest signed angle from `from` to `to`, normalized to (-π, π]
#[inline]
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut delta = (to - from).rem_euclid(TAU);
    if delta > PI {
        delta -= TAU;
    }
    delta
}

/// Horizontal heading (radians) of a direction, measured from +Z toward +X
#[inline]
pub fn heading_of(dir: Vec3) -> f32 {
    dir.x.atan2(dir.z)
}

/// Unit direction in the XZ plane for a heading
#[inline]
pub fn heading_to_dir(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}
