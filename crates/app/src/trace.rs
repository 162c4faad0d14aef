//! Headless rendering backend: every GPU-facing call becomes a log line.
//! Lets the full load-construct-render path run without a device.

use corelib::Mat4;
use renderer::{BufferId, DrawMode, RenderContext, Shader, VertexArrayId};

#[derive(Default)]
pub struct TraceContext {
    next_buffer: u32,
    next_vertex_array: u32,
}

impl TraceContext {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderContext for TraceContext {
    fn create_vertex_buffer(&mut self, data: &[u8]) -> BufferId {
        self.next_buffer += 1;
        log::debug!("create vertex buffer {} ({} bytes)", self.next_buffer, data.len());
        BufferId(self.next_buffer)
    }

    fn create_index_buffer(&mut self, data: &[u8]) -> BufferId {
        self.next_buffer += 1;
        log::debug!("create index buffer {} ({} bytes)", self.next_buffer, data.len());
        BufferId(self.next_buffer)
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        log::debug!("delete buffer {}", buffer.0);
    }

    fn create_vertex_array(&mut self) -> VertexArrayId {
        self.next_vertex_array += 1;
        log::debug!("create vertex array {}", self.next_vertex_array);
        VertexArrayId(self.next_vertex_array)
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId) {
        log::debug!("delete vertex array {}", vertex_array.0);
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>) {
        match vertex_array {
            Some(v) => log::debug!("bind vertex array {}", v.0),
            None => log::debug!("unbind vertex array"),
        }
    }

    fn bind_array_buffer(&mut self, buffer: Option<BufferId>) {
        match buffer {
            Some(b) => log::debug!("bind array buffer {}", b.0),
            None => log::debug!("unbind array buffer"),
        }
    }

    fn bind_index_buffer(&mut self, buffer: Option<BufferId>) {
        match buffer {
            Some(b) => log::debug!("bind index buffer {}", b.0),
            None => log::debug!("unbind index buffer"),
        }
    }

    fn draw_indexed(&mut self, mode: DrawMode, index_count: u32) {
        log::debug!("draw {:?}, {} indices", mode, index_count);
    }
}

pub struct TraceShader {
    name: &'static str,
}

impl TraceShader {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Shader for TraceShader {
    fn activate(&self) {
        log::trace!("[{}] activate", self.name);
    }

    fn deactivate(&self) {
        log::trace!("[{}] deactivate", self.name);
    }

    fn set_array_buffer(
        &self,
        attribute: &str,
        buffer: BufferId,
        components: u32,
        stride: u32,
        offset: u32,
    ) {
        log::debug!(
            "[{}] attribute {} <- buffer {} ({} components, stride {}, offset {})",
            self.name,
            attribute,
            buffer.0,
            components,
            stride,
            offset
        );
    }

    fn set_uniform_mat4(&self, name: &str, value: Mat4) {
        log::trace!("[{}] uniform {} = {:?}", self.name, name, value.to_cols_array());
    }

    fn set_uniform_vec3(&self, name: &str, value: [f32; 3]) {
        log::trace!("[{}] uniform {} = {:?}", self.name, name, value);
    }

    fn set_uniform_f32(&self, name: &str, value: f32) {
        log::trace!("[{}] uniform {} = {}", self.name, name, value);
    }
}
