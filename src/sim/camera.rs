//! Camera rig: chase camera and top-down minimap camera
//!
//! Neither camera keeps state between ticks. The chase camera is rebuilt from
//! the car pose using the adjustable distance/side offset; the minimap camera
//! is fixed above the origin.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::track::left_of;
use crate::consts::*;

/// Eye, target and up vector of a camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraPose {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Projection used by a viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    /// Symmetric orthographic box of half-size `extent`
    Orthographic { extent: f32, near: f32, far: f32 },
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Projection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh(fov_y, aspect, near, far),
            Projection::Orthographic { extent, near, far } => {
                Mat4::orthographic_rh(-extent, extent, -extent, extent, near, far)
            }
        }
    }
}

/// A fully derived camera for one viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pose: CameraPose,
    pub projection: Projection,
}

impl Camera {
    pub fn view_projection(&self) -> Mat4 {
        self.projection.matrix() * self.pose.view_matrix()
    }
}

/// User-adjustable chase camera parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChaseRig {
    /// Distance behind the car, within [CHASE_DISTANCE_MIN, CHASE_DISTANCE_MAX]
    pub distance: f32,
    pub height: f32,
    /// Sideways offset (positive = car's left), unbounded
    pub side_offset: f32,
}

impl Default for ChaseRig {
    fn default() -> Self {
        Self {
            distance: CHASE_DISTANCE,
            height: CHASE_HEIGHT,
            side_offset: 0.0,
        }
    }
}

impl ChaseRig {
    /// Scroll zoom: distance grows with positive deltas
    pub fn zoom(&mut self, scroll_delta: f32) {
        self.distance = (self.distance + scroll_delta * CHASE_ZOOM_FACTOR)
            .clamp(CHASE_DISTANCE_MIN, CHASE_DISTANCE_MAX);
    }

    pub fn shift_side(&mut self, delta: f32) {
        self.side_offset += delta;
    }

    /// Camera trailing the car and looking at it
    pub fn pose(&self, car_pos: Vec3, forward: Vec3) -> CameraPose {
        let up = Vec3::Y;
        let left = left_of(forward);
        let eye = car_pos + forward * -self.distance + up * self.height + left * self.side_offset;
        CameraPose {
            eye,
            target: car_pos,
            up,
        }
    }

    pub fn camera(&self, car_pos: Vec3, forward: Vec3, aspect: f32) -> Camera {
        Camera {
            pose: self.pose(car_pos, forward),
            projection: Projection::Perspective {
                fov_y: CHASE_FOV_Y,
                aspect,
                near: CHASE_NEAR,
                far: CHASE_FAR,
            },
        }
    }
}

/// Fixed top-down orthographic camera covering the whole track
pub fn minimap_camera() -> Camera {
    Camera {
        pose: CameraPose {
            // Tiny Z offset keeps look-at well defined against the -Z up vector
            eye: Vec3::new(0.0, MINIMAP_EYE_HEIGHT, 0.001),
            target: Vec3::ZERO,
            up: Vec3::NEG_Z,
        },
        projection: Projection::Orthographic {
            extent: MINIMAP_EXTENT,
            near: MINIMAP_NEAR,
            far: MINIMAP_FAR,
        },
    }
}
