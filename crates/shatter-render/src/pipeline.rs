//! Shatter render pipeline, vertex layout and per-frame uniforms

use crate::camera::Camera;
use crate::gpu::DEPTH_FORMAT;
use bytemuck::{Pod, Zeroable};
use shatter_animation::ShatterState;

/// A vertex with position, normal, face color and displacement
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ShatterVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    pub displacement: [f32; 3],
}

impl ShatterVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,   // position
        1 => Float32x3,   // normal
        2 => Float32x3,   // color
        3 => Float32x3,   // displacement
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShatterVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Scene constants the shader reads alongside the animation state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderSettings {
    /// Direction and scale of the push-out fall
    pub push_vector: [f32; 3],
    /// Direction towards the single directional light
    pub light_direction: [f32; 3],
    /// Ambient term added to the diffuse factor
    pub ambient: f32,
}

impl Default for ShaderSettings {
    fn default() -> Self {
        Self {
            push_vector: [0.0, -15.0, 0.0],
            light_direction: [1.0, 1.0, 1.0],
            ambient: 0.4,
        }
    }
}

/// Uniform buffer data (bind group 0), rebuilt every frame.
/// 112 bytes, matches `FrameUniforms` in shatter_shader.wgsl.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub push_vector: [f32; 3],
    pub amplitude: f32,
    pub light_direction: [f32; 3],
    pub ambient: f32,
    pub push_out: u32,
    pub _pad: [u32; 3],
}

impl FrameUniforms {
    /// Uniforms for one frame: camera matrices plus the animation state
    pub fn new(camera: &Camera, state: &ShatterState, settings: &ShaderSettings) -> Self {
        Self {
            view_proj: camera.view_projection_matrix(),
            push_vector: settings.push_vector,
            amplitude: state.amplitude,
            light_direction: settings.light_direction,
            ambient: settings.ambient,
            push_out: u32::from(state.push_out),
            _pad: [0; 3],
        }
    }
}

/// The shatter render pipeline
pub struct ShatterPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub frame_bind_group_layout: wgpu::BindGroupLayout,
}

impl ShatterPipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shatter Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shatter_shader.wgsl").into()),
        });

        // Bind group 0: FrameUniforms (vertex + fragment)
        let frame_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<FrameUniforms>() as u64,
                        ),
                    },
                    count: None,
                }],
                label: Some("Frame Bind Group Layout"),
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shatter Pipeline Layout"),
            bind_group_layouts: &[&frame_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shatter Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[ShatterVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            frame_bind_group_layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_uniforms_match_wgsl_layout() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 112);
        assert_eq!(std::mem::size_of::<FrameUniforms>() % 16, 0);
    }

    #[test]
    fn vertex_stride_is_twelve_floats() {
        assert_eq!(std::mem::size_of::<ShatterVertex>(), 48);
        assert_eq!(ShatterVertex::desc().array_stride, 48);
    }

    #[test]
    fn frame_uniforms_carry_animation_state() {
        let camera = Camera::new();
        let state = ShatterState {
            amplitude: 0.25,
            push_out: false,
            ..ShatterState::default()
        };
        let u = FrameUniforms::new(&camera, &state, &ShaderSettings::default());
        assert_eq!(u.amplitude, 0.25);
        assert_eq!(u.push_out, 0);
        assert_eq!(u.push_vector, [0.0, -15.0, 0.0]);
        assert_eq!(u.ambient, 0.4);
        assert_eq!(u.view_proj, camera.view_projection_matrix());

        let pushing = FrameUniforms::new(&camera, &ShatterState::default(), &ShaderSettings::default());
        assert_eq!(pushing.push_out, 1);
    }
}
