//! Vertex types for the 3D track mesh

use bytemuck::{Pod, Zeroable};

/// Road vertex with position and texture coordinate
///
/// `uv.x` runs along the lap (the curve parameter), `uv.y` across the road.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y, z],
            uv: [u, v],
        }
    }
}

/// Raw bytes of a vertex list, as uploaded to a vertex buffer
pub fn vertex_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for scene elements
pub mod colors {
    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const CHASE_BACKGROUND: [f32; 4] = rgb(20, 20, 20);
    pub const MINIMAP_BACKGROUND: [f32; 4] = rgb(40, 0, 80);

    pub const CENTERLINE: [f32; 4] = [1.0, 1.0, 1.0, 150.0 / 255.0];
    pub const START_LINE: [f32; 4] = rgb(255, 255, 255);
    pub const ROAD_PHONG: [f32; 4] = rgb(60, 60, 60);
    pub const ROAD_FLAT: [f32; 4] = rgb(120, 120, 120);
    pub const ROAD_WIRE: [f32; 4] = rgb(200, 200, 200);

    pub const CHECKPOINT_PASSED: [f32; 4] = rgb(0, 220, 0);
    pub const CHECKPOINT_NEXT: [f32; 4] = rgb(255, 220, 0);
    pub const CHECKPOINT_PENDING: [f32; 4] = rgb(220, 0, 0);

    pub const DECOR: [f32; 4] = rgb(20, 120, 40);
    pub const DECOR_WIRE: [f32; 4] = rgb(0, 200, 0);
    pub const CAR: [f32; 4] = rgb(255, 200, 0);
    pub const WIRE: [f32; 4] = rgb(255, 255, 255);

    pub const CONTROL_POLYGON: [f32; 4] = rgb(0, 255, 255);
    pub const CONTROL_POINT_BEZIER: [f32; 4] = rgb(0, 255, 255);
    pub const CONTROL_POINT_BSPLINE: [f32; 4] = rgb(0, 255, 200);

    pub const AXIS_X: [f32; 4] = rgb(255, 0, 0);
    pub const AXIS_Y: [f32; 4] = rgb(0, 255, 0);
    pub const AXIS_Z: [f32; 4] = rgb(0, 150, 255);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 20);
        let v = Vertex::new(1.0, 2.0, 3.0, 0.5, 1.0);
        let bytes = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 20);
        // uv follows position directly
        assert_eq!(&bytes[12..16], &0.5f32.to_ne_bytes());
    }

    #[test]
    fn test_vertex_bytes_covers_whole_list() {
        let strip = [Vertex::new(0.0, 0.0, 0.0, 0.0, 0.0), Vertex::new(1.0, 0.0, 1.0, 0.1, 1.0)];
        let bytes = vertex_bytes(&strip);
        assert_eq!(bytes.len(), 40);
        assert_eq!(&bytes[20..24], &1.0f32.to_ne_bytes());
    }
}
