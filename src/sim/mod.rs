//! Track simulation module
//!
//! Everything that decides where the car is and what the cameras see lives
//! here. This module is synchronous and renderer-agnostic:
//! - Curve math is pure
//! - All mutation goes through `SimState` (commands, pointer edits, ticks)
//! - Each tick produces one `FrameSnapshot` shared by both viewports

pub mod camera;
pub mod car;
pub mod checkpoint;
pub mod cull;
pub mod curve;
pub mod editor;
pub mod state;
pub mod tick;
pub mod track;

pub use camera::{Camera, CameraPose, ChaseRig, Projection, minimap_camera};
pub use car::CarState;
pub use checkpoint::{CheckpointSet, crossed};
pub use cull::{DecorObject, SceneCuller};
pub use curve::{evaluate_bezier, evaluate_bspline};
pub use editor::{ControlPolygonEditor, MinimapProjection, Viewport};
pub use state::{Command, Layout, PointerEvent, SimState};
pub use tick::{FrameSnapshot, snapshot, tick};
pub use track::{ControlPolygon, CurveFamily, Terrain, Track};
