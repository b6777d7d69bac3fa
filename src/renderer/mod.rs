//! Rendering module
//!
//! Builds per-frame geometry and draw lists for the chase view, the minimap
//! and the HUD. The actual rasterizer sits behind `DrawSurface`.

pub mod hud;
pub mod scene;
pub mod surface;
pub mod vertex;

pub use hud::{FpsCounter, hud_lines};
pub use scene::{TrackMesh, render_chase_view, render_frame, render_minimap_view};
pub use surface::{
    Assets, DrawCall, DrawSurface, Lighting, Paint, RecordingSurface, TextureHandle,
    TextureLoader,
};
pub use vertex::{Vertex, colors, vertex_bytes};
