//! Viewport draw lists
//!
//! `TrackMesh` samples the track once per frame; the chase view and the
//! minimap both draw from it and from the same `FrameSnapshot`, so the two
//! views can never disagree about the car or the track.

use glam::Vec3;

use super::surface::{Assets, DrawSurface, Lighting, Paint};
use super::vertex::{Vertex, colors};
use crate::consts::{ROAD_HALF_WIDTH, TRACK_STEPS};
use crate::settings::{Settings, ShadingMode};
use crate::sim::{CheckpointSet, CurveFamily, DecorObject, FrameSnapshot, SimState, Track};

/// Length of the reference axes
const AXIS_LENGTH: f32 = 200.0;

/// Track geometry sampled for one frame
#[derive(Debug, Clone)]
pub struct TrackMesh {
    /// Centerline points, slightly lifted off the road
    pub centerline: Vec<Vec3>,
    /// Left/right road edge pairs as a triangle strip
    pub road: Vec<Vertex>,
    /// Start/finish line endpoints
    pub start_line: (Vec3, Vec3),
    /// Checkpoint anchors on the track
    pub checkpoints: Vec<Vec3>,
    /// Every decoration post anchor (unculled)
    pub decor: Vec<Vec3>,
}

impl TrackMesh {
    pub fn build(track: &Track, checkpoints: &CheckpointSet, decor: &[DecorObject]) -> Self {
        let mut centerline = Vec::with_capacity(TRACK_STEPS + 1);
        let mut road = Vec::with_capacity((TRACK_STEPS + 1) * 2);

        for i in 0..=TRACK_STEPS {
            let t = i as f32 / TRACK_STEPS as f32;
            let center = track.sample_position(t);
            let left = track.sample_left(t) * ROAD_HALF_WIDTH;
            centerline.push(center + Vec3::Y * 0.1);

            let l = center + left;
            let r = center - left;
            road.push(Vertex::new(l.x, l.y, l.z, t, 0.0));
            road.push(Vertex::new(r.x, r.y, r.z, t, 1.0));
        }

        let start = track.sample_position(0.0) + Vec3::Y * 0.3;
        let half = track.sample_left(0.0) * (ROAD_HALF_WIDTH * 1.1);

        Self {
            centerline,
            road,
            start_line: (start + half, start - half),
            checkpoints: checkpoints
                .positions()
                .iter()
                .map(|&t| track.sample_position(t))
                .collect(),
            decor: decor.iter().map(|d| d.world_position(track)).collect(),
        }
    }
}

fn scene_lighting(shading: ShadingMode) -> Lighting {
    match shading {
        ShadingMode::Phong => Lighting::Directional {
            ambient: 60.0,
            direction: Vec3::new(-0.3, -1.0, -0.2),
        },
        ShadingMode::Flat => Lighting::Ambient(120.0),
    }
}

/// Solid or outline paint depending on the wireframe flag
fn paint(settings: &Settings, color: [f32; 4], wire: [f32; 4]) -> Paint {
    if settings.wireframe {
        Paint::Wire(wire)
    } else {
        Paint::Solid(color)
    }
}

fn road_paint(settings: &Settings, assets: &Assets) -> Paint {
    match assets.asphalt {
        Some(texture) if settings.textures => Paint::Texture(texture),
        _ if settings.wireframe => Paint::Wire(colors::ROAD_WIRE),
        _ => match settings.shading {
            ShadingMode::Phong => Paint::Solid(colors::ROAD_PHONG),
            ShadingMode::Flat => Paint::Solid(colors::ROAD_FLAT),
        },
    }
}

fn draw_axes(surface: &mut dyn DrawSurface) {
    surface.line(Vec3::ZERO, Vec3::X * AXIS_LENGTH, colors::AXIS_X, 2.0);
    surface.line(Vec3::ZERO, Vec3::Y * AXIS_LENGTH, colors::AXIS_Y, 2.0);
    surface.line(Vec3::ZERO, Vec3::Z * AXIS_LENGTH, colors::AXIS_Z, 2.0);
}

fn draw_track(surface: &mut dyn DrawSurface, mesh: &TrackMesh, settings: &Settings, assets: &Assets) {
    surface.line_strip(&mesh.centerline, colors::CENTERLINE, 1.0);
    surface.triangle_strip(&mesh.road, road_paint(settings, assets));
    let (a, b) = mesh.start_line;
    surface.line(a, b, colors::START_LINE, 4.0);
}

fn draw_checkpoints(
    surface: &mut dyn DrawSurface,
    mesh: &TrackMesh,
    checkpoints: &CheckpointSet,
    next: Option<usize>,
    settings: &Settings,
) {
    for (i, &p) in mesh.checkpoints.iter().enumerate() {
        let color = if checkpoints.is_passed(i) {
            colors::CHECKPOINT_PASSED
        } else if Some(i) == next {
            colors::CHECKPOINT_NEXT
        } else {
            colors::CHECKPOINT_PENDING
        };
        surface.cuboid(
            p + Vec3::Y * 12.0,
            Vec3::new(8.0, 24.0, 8.0),
            0.0,
            paint(settings, color, colors::WIRE),
        );
    }
}

fn draw_post(surface: &mut dyn DrawSurface, anchor: Vec3, height: f32, settings: &Settings) {
    surface.cuboid(
        anchor + Vec3::Y * (height / 2.0),
        Vec3::new(6.0, height, 6.0),
        0.0,
        paint(settings, colors::DECOR, colors::DECOR_WIRE),
    );
}

fn draw_car(surface: &mut dyn DrawSurface, frame: &FrameSnapshot, settings: &Settings) {
    surface.cuboid(
        frame.car_position + Vec3::Y * 6.0,
        Vec3::new(14.0, 6.0, 22.0),
        frame.car_yaw,
        paint(settings, colors::CAR, colors::CAR),
    );
}

fn draw_control_polygon(surface: &mut dyn DrawSurface, track: &Track, settings: &Settings) {
    let points = track.active_polygon().points();
    let outline: Vec<Vec3> = points.iter().map(|p| *p + Vec3::Y * 0.5).collect();
    surface.line_strip(&outline, colors::CONTROL_POLYGON, 4.0);

    let color = match track.family {
        CurveFamily::Bezier => colors::CONTROL_POINT_BEZIER,
        CurveFamily::BSpline => colors::CONTROL_POINT_BSPLINE,
    };
    for p in points {
        surface.sphere(*p + Vec3::Y * 10.0, 10.0, paint(settings, color, colors::WIRE));
    }
}

/// Chase view: perspective camera behind the car, posts culled by distance
pub fn render_chase_view(
    surface: &mut dyn DrawSurface,
    state: &SimState,
    frame: &FrameSnapshot,
    mesh: &TrackMesh,
    assets: &Assets,
) {
    let settings = &state.settings;
    surface.begin_view(
        state.layout.chase,
        &frame.chase,
        colors::CHASE_BACKGROUND,
        scene_lighting(settings.shading),
    );

    if settings.show_axes {
        draw_axes(surface);
    }
    draw_track(surface, mesh, settings, assets);
    draw_checkpoints(surface, mesh, &state.checkpoints, frame.next_checkpoint, settings);
    for &(i, anchor) in &frame.visible_decor {
        draw_post(surface, anchor, state.decor[i].height, settings);
    }
    draw_car(surface, frame, settings);

    surface.end_view();
}

/// Minimap: fixed top-down orthographic camera, control polygon overlay, no culling
pub fn render_minimap_view(
    surface: &mut dyn DrawSurface,
    state: &SimState,
    frame: &FrameSnapshot,
    mesh: &TrackMesh,
    assets: &Assets,
) {
    let settings = &state.settings;
    surface.begin_view(
        state.layout.minimap,
        &frame.minimap,
        colors::MINIMAP_BACKGROUND,
        Lighting::Directional {
            ambient: 100.0,
            direction: Vec3::NEG_Y,
        },
    );

    if settings.show_axes {
        draw_axes(surface);
    }
    draw_track(surface, mesh, settings, assets);
    draw_checkpoints(surface, mesh, &state.checkpoints, frame.next_checkpoint, settings);
    if settings.show_control_points {
        draw_control_polygon(surface, &state.track, settings);
    }
    for (obj, &anchor) in state.decor.iter().zip(&mesh.decor) {
        draw_post(surface, anchor, obj.height, settings);
    }
    draw_car(surface, frame, settings);

    surface.end_view();
}

/// Draw both viewports from one snapshot
pub fn render_frame(
    surface: &mut dyn DrawSurface,
    state: &SimState,
    frame: &FrameSnapshot,
    assets: &Assets,
) {
    let mesh = TrackMesh::build(&state.track, &state.checkpoints, &state.decor);
    render_chase_view(surface, state, frame, &mesh, assets);
    render_minimap_view(surface, state, frame, &mesh, assets);
}
