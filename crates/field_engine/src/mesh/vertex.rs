//! Vertex record shared by every procedural mesh

use bytemuck::{Pod, Zeroable};

/// Vertex data structure for 3D rendering
///
/// Position, normal, texture coordinate and RGBA colour. The `#[repr(C)]`
/// layout is 48 bytes with no padding, so a vertex slice can be handed to
/// a GPU buffer as raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in object space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],

    /// Vertex colour (RGBA)
    pub color: [f32; 4],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2], color: [f32; 4]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
            color,
        }
    }

    /// Opaque colour from an RGB triple
    pub fn rgb(color: [f32; 3]) -> [f32; 4] {
        [color[0], color[1], color[2], 1.0]
    }
}
