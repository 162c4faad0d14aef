//! CPU-side mesh container produced by the loader.

use crate::material::Material;

/// Floats per interleaved vertex: 3 position + 3 normal.
pub const FLOATS_PER_VERTEX: usize = 6;

/// Indexed triangle mesh with interleaved `[px,py,pz,nx,ny,nz]` vertex data.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    pub vertex_data: Vec<f32>,
    pub indices: Vec<u32>,
    pub material: Material,
}

impl MeshData {
    pub fn new(vertex_data: Vec<f32>, indices: Vec<u32>, material: Material) -> Self {
        Self {
            vertex_data,
            indices,
            material,
        }
    }

    /// Number of interleaved vertices in `vertex_data`.
    pub fn vertex_count(&self) -> usize {
        self.vertex_data.len() / FLOATS_PER_VERTEX
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns `true` if both buffers are non-empty and every index refers
    /// to an existing vertex.
    pub fn is_valid(&self) -> bool {
        let count = self.vertex_count();
        !self.vertex_data.is_empty()
            && !self.indices.is_empty()
            && self.vertex_data.len() % FLOATS_PER_VERTEX == 0
            && self.indices.iter().all(|&i| (i as usize) < count)
    }
}
