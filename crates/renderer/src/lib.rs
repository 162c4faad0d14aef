//! Drawable object model over an opaque rendering backend.
//!
//! [`DrawObject`] owns GPU resource handles for one mesh and knows how to
//! issue an indexed draw through the [`RenderContext`]/[`Shader`] trait pair;
//! [`ShadedDrawObject`] layers material uniforms on top. Nothing in this
//! crate touches a real GPU.

pub mod context;
pub mod object;

pub use context::{BufferId, DrawMode, RenderContext, Shader, VertexArrayId};
pub use object::{DrawObject, ShadedDrawObject};

use bytemuck::{Pod, Zeroable};

/// Vertex attribute consumed as `a_position`.
pub const POSITION_ATTRIBUTE: &str = "a_position";
/// Vertex attribute consumed as `a_normal`.
pub const NORMAL_ATTRIBUTE: &str = "a_normal";

/// One interleaved vertex as laid out in the vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Typed view over an interleaved float buffer. Panics if the length is not
/// a multiple of 6 floats.
pub fn cast_vertices(data: &[f32]) -> &[Vertex] {
    bytemuck::cast_slice(data)
}

/// Memory layout of the vertex buffer, chosen explicitly at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexLayout {
    /// Interleaved `[position, normal]` blocks, the loader's output format.
    PositionNormal,
    /// Raw position triples with no normal stream. Kept for primitive
    /// geometry that ships positions only, like the built-in cube.
    PositionOnly,
}

impl VertexLayout {
    pub const COMPONENTS: u32 = 3;

    /// Byte offset of the normal attribute within an interleaved vertex.
    pub const NORMAL_OFFSET: u32 = std::mem::offset_of!(Vertex, normal) as u32;

    pub fn floats_per_vertex(self) -> usize {
        match self {
            VertexLayout::PositionNormal => 6,
            VertexLayout::PositionOnly => 3,
        }
    }

    /// Distance in bytes between consecutive vertices.
    pub fn stride(self) -> u32 {
        match self {
            VertexLayout::PositionNormal => std::mem::size_of::<Vertex>() as u32,
            VertexLayout::PositionOnly => (Self::COMPONENTS as usize * std::mem::size_of::<f32>()) as u32,
        }
    }

    /// Bind the shader's vertex attributes to `buffer` according to this
    /// layout. Must run while the target vertex array is bound.
    pub fn configure(self, shader: &dyn Shader, buffer: BufferId) {
        match self {
            VertexLayout::PositionNormal => {
                shader.set_array_buffer(POSITION_ATTRIBUTE, buffer, Self::COMPONENTS, self.stride(), 0);
                shader.set_array_buffer(
                    NORMAL_ATTRIBUTE,
                    buffer,
                    Self::COMPONENTS,
                    self.stride(),
                    Self::NORMAL_OFFSET,
                );
            }
            VertexLayout::PositionOnly => {
                shader.set_array_buffer(POSITION_ATTRIBUTE, buffer, Self::COMPONENTS, self.stride(), 0);
            }
        }
    }
}
