//! Decoration posts and distance culling
//!
//! Culling here is a radius test around the chase camera, not a frustum test:
//! a post behind the camera but inside the radius still counts as visible.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::track::Track;
use crate::consts::{CULL_RADIUS, DECOR_COUNT, ROAD_HALF_WIDTH};

/// A static roadside post anchored to a track parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecorObject {
    pub t: f32,
    /// Signed distance along the track's left vector
    pub lateral_offset: f32,
    pub height: f32,
}

impl DecorObject {
    /// Ground anchor on the current track shape
    pub fn world_position(&self, track: &Track) -> Vec3 {
        track.sample_position(self.t) + track.sample_left(self.t) * self.lateral_offset
    }
}

/// Evenly spaced posts on one side of the road, heights cycling in four steps
pub fn decor_ring(count: usize) -> Vec<DecorObject> {
    (0..count)
        .map(|i| DecorObject {
            t: i as f32 / count as f32,
            lateral_offset: ROAD_HALF_WIDTH * 3.0,
            height: 30.0 + (i % 4) as f32 * 5.0,
        })
        .collect()
}

pub fn default_decor() -> Vec<DecorObject> {
    decor_ring(DECOR_COUNT)
}

/// Radius-based visibility filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneCuller {
    pub enabled: bool,
    pub radius: f32,
}

impl Default for SceneCuller {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: CULL_RADIUS,
        }
    }
}

impl SceneCuller {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Default::default()
        }
    }

    /// Inside (or exactly on) the radius, or culling switched off
    pub fn visible(&self, position: Vec3, camera_pos: Vec3) -> bool {
        !self.enabled || position.distance_squared(camera_pos) <= self.radius * self.radius
    }

    /// Indices and world positions of the posts that survive culling
    pub fn filter(
        &self,
        track: &Track,
        objects: &[DecorObject],
        camera_pos: Vec3,
    ) -> Vec<(usize, Vec3)> {
        objects
            .iter()
            .enumerate()
            .map(|(i, obj)| (i, obj.world_position(track)))
            .filter(|&(_, pos)| self.visible(pos, camera_pos))
            .collect()
    }
}
