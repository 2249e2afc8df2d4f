use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::resources::bounds::BoundingBox;

/// Index type of the shared index buffer.
pub type Index = u16;

/// GPU vertex layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    /// Two half floats.
    pub uv: u32,
    /// 10-10-10-2 unorm.
    pub normal: u32,
    /// 10-10-10-2 unorm, `w` is handedness.
    pub tangent: u32,
}

/// Full-precision vertex, kept alongside [`Vertex`] for CPU-side consumers.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct UnpackedVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
    pub tangent: [f32; 4],
}

/// Per-triangle data.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Primitive {
    pub world_to_uv_units: f32,
    pub curvature: f32,
}

/// A contiguous range into the scene's shared vertex and index buffers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Mesh {
    /// Object-space bounds. Instance scale must be applied by the consumer.
    pub aabb: BoundingBox,
    pub vertex_offset: u32,
    pub index_offset: u32,
    pub index_num: u32,
    pub vertex_num: u32,
    /// Slot in a user-managed array of dynamic acceleration structures.
    pub blas_index: Option<u32>,
}

impl Mesh {
    #[must_use]
    pub fn vertex_range(&self) -> Range<usize> {
        let start = self.vertex_offset as usize;
        start..start + self.vertex_num as usize
    }

    #[must_use]
    pub fn index_range(&self) -> Range<usize> {
        let start = self.index_offset as usize;
        start..start + self.index_num as usize
    }

    #[inline]
    #[must_use]
    pub fn triangle_num(&self) -> u32 {
        self.index_num / 3
    }
}
