//! Flat 32-bit buffers for upload to a rendering or physics pipeline.

use crate::mesh_data::MeshData;

/// Width of the index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    U16,
    U32,
}

impl IndexFormat {
    /// Narrowest format that can address `vertex_count` vertices.
    pub fn for_vertex_count(vertex_count: usize) -> Self {
        if vertex_count <= u16::MAX as usize + 1 {
            IndexFormat::U16
        } else {
            IndexFormat::U32
        }
    }
}

/// Triangle-list indices in the narrowest sufficient width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexBuffer {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexBuffer {
    pub fn format(&self) -> IndexFormat {
        match self {
            IndexBuffer::U16(_) => IndexFormat::U16,
            IndexBuffer::U32(_) => IndexFormat::U32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            IndexBuffer::U16(v) => v.len(),
            IndexBuffer::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index `i` widened to `u32`.
    pub fn get(&self, i: usize) -> Option<u32> {
        match self {
            IndexBuffer::U16(v) => v.get(i).map(|&x| u32::from(x)),
            IndexBuffer::U32(v) => v.get(i).copied(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexBuffer::U16(v) => bytemuck::cast_slice(v),
            IndexBuffer::U32(v) => bytemuck::cast_slice(v),
        }
    }
}

/// Mesh data as flat `f32` arrays: 3 floats per position and normal, 2 per UV.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: IndexBuffer,
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }
}

impl MeshData {
    pub fn index_format(&self) -> IndexFormat {
        IndexFormat::for_vertex_count(self.vertex_count())
    }

    /// Convert to flat `f32` buffers with the narrowest index width.
    pub fn to_buffers(&self) -> MeshBuffers {
        let positions = self
            .positions
            .iter()
            .flat_map(|p| p.as_vec3().to_array())
            .collect();
        let normals = self
            .normals
            .iter()
            .flat_map(|n| n.as_vec3().to_array())
            .collect();
        let uvs = self
            .uvs
            .iter()
            .flat_map(|uv| uv.as_vec2().to_array())
            .collect();
        // Every index is below vertex_count, so U16 narrowing is lossless.
        let indices = match self.index_format() {
            IndexFormat::U16 => IndexBuffer::U16(self.indices.iter().map(|&i| i as u16).collect()),
            IndexFormat::U32 => IndexBuffer::U32(self.indices.clone()),
        };

        MeshBuffers {
            positions,
            normals,
            uvs,
            indices,
        }
    }
}
