//! Upload of the text mesh and its face attributes to a GPU vertex buffer

use crate::error::RenderError;
use crate::pipeline::ShatterVertex;
use shatter_text::{FaceAttributes, TextMesh};
use wgpu::util::DeviceExt;

/// The text mesh resident on the GPU, drawn non-indexed
pub struct GpuTextMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl GpuTextMesh {
    pub fn upload(
        device: &wgpu::Device,
        mesh: &TextMesh,
        attributes: &FaceAttributes,
    ) -> Result<Self, RenderError> {
        let vertices = interleave(mesh, attributes)?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Text Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        tracing::debug!(vertices = vertices.len(), "uploaded text mesh");

        Ok(Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        })
    }
}

/// Merge mesh geometry and flat attribute arrays into interleaved vertices
pub(crate) fn interleave(
    mesh: &TextMesh,
    attributes: &FaceAttributes,
) -> Result<Vec<ShatterVertex>, RenderError> {
    let expected = mesh.vertex_count() * 3;
    if mesh.normals.len() != mesh.vertex_count()
        || attributes.colors.len() != expected
        || attributes.displacement.len() != expected
    {
        return Err(RenderError::MeshUpload(format!(
            "{} vertices need {} attribute floats, got {} colors and {} displacements",
            mesh.vertex_count(),
            expected,
            attributes.colors.len(),
            attributes.displacement.len()
        )));
    }

    Ok(mesh
        .positions
        .iter()
        .zip(&mesh.normals)
        .zip(attributes.colors.chunks_exact(3))
        .zip(attributes.displacement.chunks_exact(3))
        .map(|(((position, normal), color), displacement)| ShatterVertex {
            position: *position,
            normal: *normal,
            color: [color[0], color[1], color[2]],
            displacement: [displacement[0], displacement[1], displacement[2]],
        })
        .collect())
}
