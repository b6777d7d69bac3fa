//! Draw surface and asset loading seams
//!
//! The rasterizer and the image decoder are external. The scene code talks
//! to them only through `DrawSurface` and `TextureLoader`.

use std::path::Path;

use anyhow::Result;
use glam::Vec3;

use super::vertex::{Vertex, vertex_bytes};
use crate::sim::{Camera, Viewport};

pub type Color = [f32; 4];

/// Opaque handle to a texture owned by the surface backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// How a primitive is filled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Outline only
    Wire(Color),
    Texture(TextureHandle),
}

/// Scene lighting for a view
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lighting {
    /// Uniform ambient light (0-255 scale)
    Ambient(f32),
    /// Ambient plus one white directional light
    Directional { ambient: f32, direction: Vec3 },
}

/// A 3D draw target for one viewport at a time
pub trait DrawSurface {
    fn begin_view(&mut self, viewport: Viewport, camera: &Camera, clear: Color, lighting: Lighting);
    fn line(&mut self, from: Vec3, to: Vec3, color: Color, weight: f32);
    fn line_strip(&mut self, points: &[Vec3], color: Color, weight: f32);
    fn triangle_strip(&mut self, vertices: &[Vertex], paint: Paint);
    /// Axis-aligned box rotated about Y by `yaw`
    fn cuboid(&mut self, center: Vec3, size: Vec3, yaw: f32, paint: Paint);
    fn sphere(&mut self, center: Vec3, radius: f32, paint: Paint);
    fn end_view(&mut self);
}

/// Image loading backend
pub trait TextureLoader {
    fn load(&mut self, path: &Path) -> Result<TextureHandle>;
}

/// Path of the road texture, relative to the working directory
pub const ASPHALT_TEXTURE: &str = "assets/asphalt.jpg";

/// Textures used by the scene; missing ones fall back to solid colors
#[derive(Debug, Clone, Default)]
pub struct Assets {
    pub asphalt: Option<TextureHandle>,
}

impl Assets {
    pub fn load(loader: &mut dyn TextureLoader) -> Self {
        let path = Path::new(ASPHALT_TEXTURE);
        let asphalt = match loader.load(path) {
            Ok(handle) => {
                log::info!("Loaded road texture {}", path.display());
                Some(handle)
            }
            Err(e) => {
                log::warn!("Could not load {} ({:#}); using solid color", path.display(), e);
                None
            }
        };
        Self { asphalt }
    }
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    BeginView { viewport: Viewport, lighting: Lighting },
    Line { from: Vec3, to: Vec3, color: Color },
    LineStrip { points: usize, color: Color },
    TriangleStrip {
        vertices: usize,
        bytes: usize,
        paint: Paint,
    },
    Cuboid { center: Vec3, size: Vec3, yaw: f32, paint: Paint },
    Sphere { center: Vec3, radius: f32, paint: Paint },
    EndView,
}

/// Surface that only records what it was asked to draw
///
/// Used by the headless binary and by tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    pub cameras: Vec<Camera>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.cameras.clear();
    }

    /// Calls issued for the `view`-th viewport (in begin order)
    pub fn view_calls(&self, view: usize) -> &[DrawCall] {
        let starts: Vec<usize> = self
            .calls
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, DrawCall::BeginView { .. }))
            .map(|(i, _)| i)
            .collect();
        let Some(&start) = starts.get(view) else {
            return &[];
        };
        let end = starts.get(view + 1).copied().unwrap_or(self.calls.len());
        &self.calls[start..end]
    }

    pub fn count_cuboids(&self, view: usize) -> usize {
        self.view_calls(view)
            .iter()
            .filter(|c| matches!(c, DrawCall::Cuboid { .. }))
            .count()
    }

    pub fn count_spheres(&self, view: usize) -> usize {
        self.view_calls(view)
            .iter()
            .filter(|c| matches!(c, DrawCall::Sphere { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn begin_view(&mut self, viewport: Viewport, camera: &Camera, _clear: Color, lighting: Lighting) {
        self.cameras.push(*camera);
        self.calls.push(DrawCall::BeginView { viewport, lighting });
    }

    fn line(&mut self, from: Vec3, to: Vec3, color: Color, _weight: f32) {
        self.calls.push(DrawCall::Line { from, to, color });
    }

    fn line_strip(&mut self, points: &[Vec3], color: Color, _weight: f32) {
        self.calls.push(DrawCall::LineStrip {
            points: points.len(),
            color,
        });
    }

    fn triangle_strip(&mut self, vertices: &[Vertex], paint: Paint) {
        self.calls.push(DrawCall::TriangleStrip {
            vertices: vertices.len(),
            bytes: vertex_bytes(vertices).len(),
            paint,
        });
    }

    fn cuboid(&mut self, center: Vec3, size: Vec3, yaw: f32, paint: Paint) {
        self.calls.push(DrawCall::Cuboid {
            center,
            size,
            yaw,
            paint,
        });
    }

    fn sphere(&mut self, center: Vec3, radius: f32, paint: Paint) {
        self.calls.push(DrawCall::Sphere {
            center,
            radius,
            paint,
        });
    }

    fn end_view(&mut self) {
        self.calls.push(DrawCall::EndView);
    }
}
