//! Window surface context

use crate::error::RenderError;
use crate::gpu::{self, Gpu};
use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Device, queue and the window surface the demo presents to
pub struct RenderContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub depth_texture: wgpu::Texture,
    pub depth_view: wgpu::TextureView,
}

impl RenderContext {
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let instance = gpu::new_instance();

        let surface = instance
            .create_surface(window)
            .map_err(|e| RenderError::SurfaceCreation(e.to_string()))?;
        let Gpu {
            adapter,
            device,
            queue,
        } = Gpu::open(&instance, Some(&surface), "Shatter Device").await?;

        let caps = surface.get_capabilities(&adapter);
        let format = gpu::choose_surface_format(&caps.formats).ok_or_else(|| {
            RenderError::SurfaceCreation("surface reports no supported formats".to_string())
        })?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let (depth_texture, depth_view) =
            gpu::create_depth_target(&device, (config.width, config.height));

        tracing::info!(
            adapter = %adapter.get_info().name,
            ?format,
            width = config.width,
            height = config.height,
            "render context ready"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            depth_texture,
            depth_view,
        })
    }

    /// Follow a window resize; zero-sized (minimized) windows are ignored
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.reconfigure();
    }

    /// Reapply the surface configuration, e.g. after `Lost` or `Outdated`
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        (self.depth_texture, self.depth_view) =
            gpu::create_depth_target(&self.device, (self.config.width, self.config.height));
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }
}
