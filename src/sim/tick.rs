//! Per-frame simulation step
//!
//! One tick advances the car, updates checkpoints, samples the track once and
//! derives both cameras from that sample. The resulting `FrameSnapshot` is
//! what both viewports render from.

use glam::Vec3;

use super::camera::{Camera, minimap_camera};
use super::state::SimState;
use crate::consts::MAX_TICK_MS;

/// Immutable view of one frame, shared by the chase view and the minimap
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub car_t: f32,
    pub car_position: Vec3,
    /// Unit track tangent at the car
    pub car_tangent: Vec3,
    /// Smoothed ground-plane heading vector
    pub car_forward: Vec3,
    pub car_yaw: f32,
    pub lap_count: u32,
    /// True when this tick crossed the start/finish line
    pub lapped: bool,
    pub next_checkpoint: Option<usize>,
    pub chase: Camera,
    pub minimap: Camera,
    /// Posts that survived culling against the chase camera (index, world position)
    pub visible_decor: Vec<(usize, Vec3)>,
}

/// Advance the simulation by `dt_ms` milliseconds and snapshot the result
///
/// The step is clamped to [0, MAX_TICK_MS] so a stalled frame cannot jump the
/// car far enough to confuse lap detection.
pub fn tick(state: &mut SimState, dt_ms: f32) -> FrameSnapshot {
    let dt_ms = if dt_ms.is_finite() {
        dt_ms.clamp(0.0, MAX_TICK_MS)
    } else {
        0.0
    };
    state.time_ticks += 1;

    let prev_t = state.car.t;
    let lapped = state.car.advance(dt_ms);
    state.checkpoints.update(prev_t, state.car.t);
    if lapped {
        // A new lap starts with every flag cleared, the start line included
        state.checkpoints.reset(state.car.t);
    }

    let tangent = state.track.sample_tangent(state.car.t);
    state.car.steer_toward(tangent);

    let mut frame = snapshot(state);
    frame.lapped = lapped;
    frame
}

/// Snapshot the current state without advancing it
pub fn snapshot(state: &SimState) -> FrameSnapshot {
    let car_t = state.car.t;
    let car_position = state.track.sample_position(car_t);
    let car_tangent = state.track.sample_tangent(car_t);
    let car_forward = state.car.forward();

    let chase = state
        .rig
        .camera(car_position, car_forward, state.layout.chase.aspect());
    let visible_decor = state
        .culler()
        .filter(&state.track, &state.decor, chase.pose.eye);

    FrameSnapshot {
        car_t,
        car_position,
        car_tangent,
        car_forward,
        car_yaw: state.car.yaw,
        lap_count: state.car.lap_count,
        lapped: false,
        next_checkpoint: state.checkpoints.next(),
        chase,
        minimap: minimap_camera(),
        visible_decor,
    }
}
