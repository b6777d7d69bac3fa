//! Simulation state aggregate and its command entry points
//!
//! Everything mutable lives in `SimState`: the track polygons, the car, the
//! checkpoint flags, the chase rig and the display settings. Keyboard toggles
//! arrive as `Command`s and pointer edits as `PointerEvent`s; both are applied
//! immediately and show up from the next frame on.

use glam::Vec2;

use super::camera::ChaseRig;
use super::car::CarState;
use super::checkpoint::CheckpointSet;
use super::cull::{DecorObject, SceneCuller, default_decor};
use super::editor::{ControlPolygonEditor, MinimapProjection, Viewport};
use super::track::Track;
use crate::consts::*;
use crate::settings::Settings;

/// A discrete user action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    ToggleWireframe,
    ToggleShading,
    ToggleCurveFamily,
    ToggleControlPoints,
    ToggleAxes,
    ToggleTextures,
    ToggleCulling,
    ToggleHud,
    SpeedUp,
    SpeedDown,
    CameraLeft,
    CameraRight,
    /// Mouse wheel delta (positive pulls the camera back)
    Zoom(f32),
}

impl Command {
    /// Map a key name (`KeyboardEvent.key` style) to a command
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => return Some(Command::SpeedUp),
            "ArrowDown" => return Some(Command::SpeedDown),
            "ArrowLeft" => return Some(Command::CameraLeft),
            "ArrowRight" => return Some(Command::CameraRight),
            _ => {}
        }
        match key.to_lowercase().as_str() {
            "q" => Some(Command::ToggleWireframe),
            "z" => Some(Command::ToggleShading),
            "c" => Some(Command::ToggleCurveFamily),
            "p" => Some(Command::ToggleControlPoints),
            "x" => Some(Command::ToggleAxes),
            "t" => Some(Command::ToggleTextures),
            "f" => Some(Command::ToggleCulling),
            "h" => Some(Command::ToggleHud),
            _ => None,
        }
    }
}

/// Pointer input in window coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(Vec2),
    Drag(Vec2),
    Release,
}

/// Window split: chase view on the left half, minimap on the right
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub chase: Viewport,
    pub minimap: Viewport,
}

impl Default for Layout {
    fn default() -> Self {
        Self::split(WINDOW_WIDTH, WINDOW_HEIGHT)
    }
}

impl Layout {
    pub fn split(width: f32, height: f32) -> Self {
        let half = width / 2.0;
        Self {
            chase: Viewport::new(0.0, 0.0, half, height),
            minimap: Viewport::new(half, 0.0, half, height),
        }
    }

    pub fn minimap_projection(&self) -> MinimapProjection {
        MinimapProjection::new(self.minimap.size)
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct SimState {
    pub track: Track,
    pub car: CarState,
    pub checkpoints: CheckpointSet,
    pub decor: Vec<DecorObject>,
    pub rig: ChaseRig,
    pub settings: Settings,
    pub editor: ControlPolygonEditor,
    pub layout: Layout,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl SimState {
    pub fn new(settings: Settings) -> Self {
        let rig = ChaseRig {
            distance: settings
                .camera_distance
                .clamp(CHASE_DISTANCE_MIN, CHASE_DISTANCE_MAX),
            side_offset: settings.camera_side_offset,
            ..Default::default()
        };
        Self {
            track: Track::default(),
            car: CarState::new(),
            checkpoints: CheckpointSet::default(),
            decor: default_decor(),
            rig,
            settings,
            editor: ControlPolygonEditor::new(),
            layout: Layout::default(),
            time_ticks: 0,
        }
    }

    /// Settings with the current camera preferences folded in (for saving)
    pub fn settings_snapshot(&self) -> Settings {
        Settings {
            camera_distance: self.rig.distance,
            camera_side_offset: self.rig.side_offset,
            ..self.settings.clone()
        }
    }

    pub fn culler(&self) -> SceneCuller {
        SceneCuller::new(self.settings.culling)
    }

    /// Single entry point for keyboard/wheel commands
    pub fn apply(&mut self, command: Command) {
        let s = &mut self.settings;
        match command {
            Command::ToggleWireframe => s.wireframe = !s.wireframe,
            Command::ToggleShading => s.shading = s.shading.toggled(),
            Command::ToggleCurveFamily => {
                // Car progress, laps and checkpoints carry over unchanged
                self.track.family = self.track.family.toggled();
                log::info!("Track curve: {}", self.track.family.as_str());
            }
            Command::ToggleControlPoints => s.show_control_points = !s.show_control_points,
            Command::ToggleAxes => s.show_axes = !s.show_axes,
            Command::ToggleTextures => s.textures = !s.textures,
            Command::ToggleCulling => s.culling = !s.culling,
            Command::ToggleHud => s.show_hud = !s.show_hud,
            Command::SpeedUp => self.car.adjust_speed(CAR_SPEED_STEP),
            Command::SpeedDown => self.car.adjust_speed(-CAR_SPEED_STEP),
            Command::CameraLeft => self.rig.shift_side(-CHASE_SIDE_STEP),
            Command::CameraRight => self.rig.shift_side(CHASE_SIDE_STEP),
            Command::Zoom(delta) => self.rig.zoom(delta),
        }
    }

    /// Pointer edits, restricted to the minimap region
    pub fn pointer(&mut self, event: PointerEvent) {
        let minimap = self.layout.minimap;
        let projection = self.layout.minimap_projection();
        match event {
            PointerEvent::Press(pos) => {
                if minimap.contains(pos) {
                    self.editor
                        .press(&self.track, &projection, minimap.to_local(pos));
                }
            }
            PointerEvent::Drag(pos) => {
                if minimap.contains(pos) {
                    self.editor
                        .drag(&mut self.track, &projection, minimap.to_local(pos));
                }
            }
            PointerEvent::Release => self.editor.release(),
        }
    }
}
