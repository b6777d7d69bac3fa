//! Closed track curve
//!
//! The track centerline lives in the XZ plane and is defined by one of two
//! four-point control polygons, one per curve family. Elevation is layered on
//! top from a smooth terrain field and never feeds back into the polygons.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::curve::{central_difference, evaluate_bezier, evaluate_bspline};
use crate::consts::*;
use crate::{DEFAULT_FORWARD, wrap01};

/// Number of points in every control polygon
pub const CONTROL_POINT_COUNT: usize = 4;
/// Index of the closing point (coincides with index 0)
pub const LAST_CONTROL_POINT: usize = CONTROL_POINT_COUNT - 1;

/// Probe separations below this (squared) count as coincident
const DEGENERATE_TANGENT_SQ: f32 = 1e-8;

/// Which curve formula (and polygon) the track uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CurveFamily {
    #[default]
    Bezier,
    BSpline,
}

impl CurveFamily {
    pub fn toggled(self) -> Self {
        match self {
            CurveFamily::Bezier => CurveFamily::BSpline,
            CurveFamily::BSpline => CurveFamily::Bezier,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CurveFamily::Bezier => "Bézier",
            CurveFamily::BSpline => "B-spline",
        }
    }

    /// Human-readable description of how the curve relates to its polygon
    pub fn description(&self) -> &'static str {
        match self {
            CurveFamily::Bezier => "Bézier (passes through the endpoints)",
            CurveFamily::BSpline => {
                "Cubic B-spline (smoother, does not pass through the endpoints)"
            }
        }
    }
}

/// Four control points on the ground plane with first == last
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPolygon {
    points: [Vec3; CONTROL_POINT_COUNT],
}

impl Default for ControlPolygon {
    fn default() -> Self {
        Self::new(
            Vec2::new(-140.0, 0.0),
            Vec2::new(-60.0, 160.0),
            Vec2::new(120.0, 160.0),
        )
    }
}

impl ControlPolygon {
    /// Build a closed polygon from the shared start/end point and two interior points (X/Z)
    pub fn new(start: Vec2, p1: Vec2, p2: Vec2) -> Self {
        let ground = |p: Vec2| Vec3::new(p.x, 0.0, p.y);
        Self {
            points: [ground(start), ground(p1), ground(p2), ground(start)],
        }
    }

    pub fn points(&self) -> &[Vec3; CONTROL_POINT_COUNT] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    /// Move a point on the ground plane, keeping the loop closed
    ///
    /// Moving either end of the loop moves the other end with it. Out-of-range
    /// indices are ignored.
    pub fn set_xz(&mut self, index: usize, xz: Vec2) {
        let Some(point) = self.points.get_mut(index) else {
            return;
        };
        *point = Vec3::new(xz.x, 0.0, xz.y);

        match index {
            0 => self.points[LAST_CONTROL_POINT] = self.points[0],
            LAST_CONTROL_POINT => self.points[0] = self.points[LAST_CONTROL_POINT],
            _ => {}
        }
    }

    /// True when the loop is closed (first and last points coincide)
    pub fn is_closed(&self) -> bool {
        self.points[0] == self.points[LAST_CONTROL_POINT]
    }

    /// Evaluate the centerline (no elevation) with the given family's formula
    pub fn evaluate(&self, family: CurveFamily, t: f32) -> Vec3 {
        let [p0, p1, p2, p3] = self.points;
        match family {
            CurveFamily::Bezier => evaluate_bezier(p0, p1, p2, p3, t),
            CurveFamily::BSpline => evaluate_bspline(p0, p1, p2, p3, t),
        }
    }
}

/// Cosmetic terrain undulation over the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub amplitude: f32,
    pub frequency: f32,
}

impl Default for Terrain {
    fn default() -> Self {
        Self {
            amplitude: TERRAIN_AMPLITUDE,
            frequency: TERRAIN_FREQUENCY,
        }
    }
}

impl Terrain {
    /// Flat ground (useful for tests)
    pub fn flat() -> Self {
        Self {
            amplitude: 0.0,
            frequency: 0.0,
        }
    }

    #[inline]
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.amplitude * (self.frequency * x).sin() * (self.frequency * z).cos()
    }
}

/// The sampled track: both polygons plus the active family and terrain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub family: CurveFamily,
    pub bezier: ControlPolygon,
    pub bspline: ControlPolygon,
    pub terrain: Terrain,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            family: CurveFamily::Bezier,
            bezier: ControlPolygon::default(),
            bspline: ControlPolygon::default(),
            terrain: Terrain::default(),
        }
    }
}

impl Track {
    pub fn polygon(&self, family: CurveFamily) -> &ControlPolygon {
        match family {
            CurveFamily::Bezier => &self.bezier,
            CurveFamily::BSpline => &self.bspline,
        }
    }

    pub fn polygon_mut(&mut self, family: CurveFamily) -> &mut ControlPolygon {
        match family {
            CurveFamily::Bezier => &mut self.bezier,
            CurveFamily::BSpline => &mut self.bspline,
        }
    }

    /// Polygon of the currently selected family
    pub fn active_polygon(&self) -> &ControlPolygon {
        self.polygon(self.family)
    }

    /// World position on the track, terrain height included
    pub fn sample_position(&self, t: f32) -> Vec3 {
        let p = self.active_polygon().evaluate(self.family, wrap01(t));
        Vec3::new(p.x, self.terrain.height_at(p.x, p.z), p.z)
    }

    /// Unit travel direction at t (falls back to +Z on degenerate curves)
    pub fn sample_tangent(&self, t: f32) -> Vec3 {
        let delta = central_difference(|s| self.sample_position(s), t, TANGENT_EPSILON);
        if delta.length_squared() <= DEGENERATE_TANGENT_SQ {
            return DEFAULT_FORWARD;
        }
        delta.normalize()
    }

    /// Unit vector pointing to the driver's left on the ground plane
    pub fn sample_left(&self, t: f32) -> Vec3 {
        left_of(self.sample_tangent(t))
    }
}

/// Ground-plane left of a travel direction: normalize(up × forward)
#[inline]
pub fn left_of(forward: Vec3) -> Vec3 {
    Vec3::Y.cross(forward).try_normalize().unwrap_or(Vec3::X)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn degenerate_track() -> Track {
        let p = Vec2::new(10.0, 10.0);
        let polygon = ControlPolygon::new(p, p, p);
        Track {
            bezier: polygon.clone(),
            bspline: polygon,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_polygon_is_closed() {
        let track = Track::default();
        assert!(track.bezier.is_closed());
        assert!(track.bspline.is_closed());
        assert!(track.bezier.points().iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn test_sample_position_adds_elevation() {
        let track = Track::default();
        let flat = track.active_polygon().evaluate(CurveFamily::Bezier, 0.3);
        let p = track.sample_position(0.3);
        assert_eq!(p.x, flat.x);
        assert_eq!(p.z, flat.z);
        assert!((p.y - track.terrain.height_at(p.x, p.z)).abs() < 1e-6);
    }

    #[test]
    fn test_sample_position_wraps_parameter() {
        let track = Track::default();
        assert!(track.sample_position(1.3).distance(track.sample_position(0.3)) < 1e-3);
        assert!(track.sample_position(-0.7).distance(track.sample_position(0.3)) < 1e-3);
    }

    #[test]
    fn test_bezier_track_starts_at_control_point() {
        let track = Track::default();
        let start = track.sample_position(0.0);
        assert_eq!(start.x, -140.0);
        assert_eq!(start.z, 0.0);
    }

    #[test]
    fn test_family_switch_changes_curve() {
        let mut track = Track::default();
        let bezier = track.sample_position(0.0);
        track.family = CurveFamily::BSpline;
        let bspline = track.sample_position(0.0);
        assert!(bezier.distance(bspline) > 1.0);
    }

    #[test]
    fn test_tangent_is_unit_length() {
        let track = Track::default();
        for i in 0..10 {
            let tangent = track.sample_tangent(i as f32 / 10.0);
            assert!((tangent.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_degenerate_tangent_falls_back() {
        let track = degenerate_track();
        assert_eq!(track.sample_tangent(0.5), DEFAULT_FORWARD);
        assert_eq!(track.sample_left(0.5), Vec3::X);
    }

    #[test]
    fn test_set_xz_keeps_loop_closed() {
        let mut polygon = ControlPolygon::default();
        polygon.set_xz(0, Vec2::new(5.0, 6.0));
        assert_eq!(polygon.point(3), Some(Vec3::new(5.0, 0.0, 6.0)));
        polygon.set_xz(LAST_CONTROL_POINT, Vec2::new(-7.0, 8.0));
        assert_eq!(polygon.point(0), Some(Vec3::new(-7.0, 0.0, 8.0)));
        polygon.set_xz(1, Vec2::new(1.0, 1.0));
        assert!(polygon.is_closed());
        // Out of range is a no-op
        let before = polygon.clone();
        polygon.set_xz(9, Vec2::ZERO);
        assert_eq!(polygon, before);
    }

    #[test]
    fn test_left_of_forward() {
        // Facing +Z, left is +X (up × forward)
        assert!(left_of(Vec3::Z).distance(Vec3::X) < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_closure_survives_edits(
            edits in proptest::collection::vec((0usize..4, -250.0f32..250.0, -250.0f32..250.0), 1..20)
        ) {
            let mut polygon = ControlPolygon::default();
            for (index, x, z) in edits {
                polygon.set_xz(index, Vec2::new(x, z));
                prop_assert!(polygon.is_closed());
                prop_assert_eq!(polygon.points()[index].y, 0.0);
            }
        }
    }
}
