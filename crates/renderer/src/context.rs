//! Trait seams to the GPU. The drawable object model talks to the rendering
//! backend exclusively through these, so it never needs a real device.

use glam::Mat4;

/// Handle to a GPU-side data buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// Handle to a GPU-side vertex array (attribute binding descriptor).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexArrayId(pub u32);

/// Primitive topology for the indexed draw call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawMode {
    Triangles,
    Points,
}

/// Resource and draw operations of the rendering backend.
///
/// Handles returned by the `create_*` methods stay valid until the matching
/// `delete_*` call. Binding methods take `None` to unbind. All calls must
/// happen on the thread that owns the backend.
pub trait RenderContext {
    fn create_vertex_buffer(&mut self, data: &[u8]) -> BufferId;
    fn create_index_buffer(&mut self, data: &[u8]) -> BufferId;
    fn delete_buffer(&mut self, buffer: BufferId);

    fn create_vertex_array(&mut self) -> VertexArrayId;
    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId);

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>);
    fn bind_array_buffer(&mut self, buffer: Option<BufferId>);
    fn bind_index_buffer(&mut self, buffer: Option<BufferId>);

    fn draw_indexed(&mut self, mode: DrawMode, index_count: u32);
}

/// Compiled shader program, opaque to the object model.
///
/// Unknown attribute or uniform names are silently ignored; that is the one
/// tolerated soft failure in the render path.
pub trait Shader {
    fn activate(&self);
    fn deactivate(&self);

    /// Point a vertex attribute at a region of `buffer`. `stride` and
    /// `offset` are in bytes; the attribute binding is captured by whichever
    /// vertex array is currently bound.
    fn set_array_buffer(
        &self,
        attribute: &str,
        buffer: BufferId,
        components: u32,
        stride: u32,
        offset: u32,
    );

    fn set_uniform_mat4(&self, name: &str, value: Mat4);
    fn set_uniform_vec3(&self, name: &str, value: [f32; 3]);
    fn set_uniform_f32(&self, name: &str, value: f32);
}
