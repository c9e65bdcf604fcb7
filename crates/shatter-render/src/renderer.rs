//! Draws the shattering text mesh into a color + depth target

use crate::error::RenderError;
use crate::gpu_mesh::GpuTextMesh;
use crate::pipeline::{FrameUniforms, ShatterPipeline};
use shatter_text::{FaceAttributes, TextMesh};
use wgpu::util::DeviceExt;

/// Owns the GPU resources for the demo; per-frame state arrives through `render`
pub struct ShatterRenderer {
    pipeline: ShatterPipeline,
    mesh: GpuTextMesh,
    uniform_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    clear_color: wgpu::Color,
}

impl ShatterRenderer {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        mesh: &TextMesh,
        attributes: &FaceAttributes,
    ) -> Result<Self, RenderError> {
        let pipeline = ShatterPipeline::new(device, format);
        let mesh = GpuTextMesh::upload(device, mesh, attributes)?;

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniform Buffer"),
            contents: bytemuck::bytes_of(&<FrameUniforms as bytemuck::Zeroable>::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &pipeline.frame_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            pipeline,
            mesh,
            uniform_buffer,
            frame_bind_group,
            clear_color: wgpu::Color::BLACK,
        })
    }

    pub fn set_clear_color(&mut self, rgb: [f32; 3]) {
        self.clear_color = wgpu::Color {
            r: rgb[0] as f64,
            g: rgb[1] as f64,
            b: rgb[2] as f64,
            a: 1.0,
        };
    }

    /// Number of vertices drawn per frame
    pub fn vertex_count(&self) -> u32 {
        self.mesh.vertex_count
    }

    /// Write this frame's uniforms and draw the mesh
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        frame: &FrameUniforms,
    ) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(frame));

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Shatter Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shatter Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline.pipeline);
            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
            render_pass.draw(0..self.mesh.vertex_count, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}
