//! Live control-point editing on the minimap
//!
//! The minimap shows the ground plane through a fixed orthographic mapping, so
//! picking and dragging happen in its screen space and map straight back to
//! world X/Z. Only the polygon of the family active at press time is edited.

use glam::Vec2;

use super::track::{CurveFamily, Track};
use crate::consts::{MINIMAP_EXTENT, PICK_RADIUS_PX};

/// Axis-aligned screen rectangle (window pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Inclusive on all edges
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.origin + self.size;
        p.x >= self.origin.x && p.x <= max.x && p.y >= self.origin.y && p.y <= max.y
    }

    /// Window coordinates to viewport-local coordinates
    pub fn to_local(&self, p: Vec2) -> Vec2 {
        p - self.origin
    }

    pub fn aspect(&self) -> f32 {
        if self.size.y > 0.0 {
            self.size.x / self.size.y
        } else {
            1.0
        }
    }
}

/// World X/Z <-> minimap-local pixels
///
/// X in [-extent, extent] spans the viewport width, Z in [-extent, extent]
/// spans its height (screen y grows with world Z).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapProjection {
    pub extent: f32,
    pub size: Vec2,
}

impl MinimapProjection {
    pub fn new(size: Vec2) -> Self {
        Self {
            extent: MINIMAP_EXTENT,
            size,
        }
    }

    pub fn world_to_screen(&self, xz: Vec2) -> Vec2 {
        (xz + Vec2::splat(self.extent)) / (2.0 * self.extent) * self.size
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen / self.size * (2.0 * self.extent) - Vec2::splat(self.extent)
    }
}

/// The control point currently held by the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub family: CurveFamily,
    pub index: usize,
}

/// Pick/drag state machine over the active control polygon
#[derive(Debug, Clone, Default)]
pub struct ControlPolygonEditor {
    selection: Option<Selection>,
}

impl ControlPolygonEditor {
    pub fn new() -> Self {
        Self { selection: None }
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn is_dragging(&self) -> bool {
        self.selection.is_some()
    }

    /// Nearest control point of the active polygon within the pick radius
    ///
    /// Ties go to the lowest index (strictly-less comparison).
    pub fn pick(track: &Track, projection: &MinimapProjection, screen: Vec2) -> Option<usize> {
        let mut closest: Option<(usize, f32)> = None;
        for (i, p) in track.active_polygon().points().iter().enumerate() {
            let d2 = projection
                .world_to_screen(Vec2::new(p.x, p.z))
                .distance_squared(screen);
            if closest.is_none_or(|(_, best)| d2 < best) {
                closest = Some((i, d2));
            }
        }

        closest
            .filter(|&(_, d2)| d2 <= PICK_RADIUS_PX * PICK_RADIUS_PX)
            .map(|(i, _)| i)
    }

    /// Pointer press (minimap-local): grab the nearest point, if any
    pub fn press(&mut self, track: &Track, projection: &MinimapProjection, screen: Vec2) {
        if let Some(index) = Self::pick(track, projection, screen) {
            log::debug!("Picked {} control point {}", track.family.as_str(), index);
            self.selection = Some(Selection {
                family: track.family,
                index,
            });
        }
    }

    /// Pointer drag (minimap-local): move the held point, no-op when nothing is held
    pub fn drag(&self, track: &mut Track, projection: &MinimapProjection, screen: Vec2) {
        let Some(selection) = self.selection else {
            return;
        };
        let world = projection.screen_to_world(screen);
        track
            .polygon_mut(selection.family)
            .set_xz(selection.index, world);
    }

    /// Pointer release; safe to call repeatedly
    pub fn release(&mut self) {
        if self.selection.take().is_some() {
            log::debug!("Released control point");
        }
    }
}
