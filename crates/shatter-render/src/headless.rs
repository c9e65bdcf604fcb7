//! Offscreen rendering for single-frame captures

use crate::error::RenderError;
use crate::gpu::{self, Gpu};
use std::path::Path;

/// A device rendering into an owned RGBA texture instead of a window
pub struct HeadlessContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub format: wgpu::TextureFormat,
    pub width: u32,
    pub height: u32,
    pub color_texture: wgpu::Texture,
    pub color_view: wgpu::TextureView,
    pub depth_texture: wgpu::Texture,
    pub depth_view: wgpu::TextureView,
}

impl HeadlessContext {
    pub async fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let instance = gpu::new_instance();
        let Gpu { device, queue, .. } = Gpu::open(&instance, None, "Shatter Headless Device").await?;

        let format = gpu::CAPTURE_FORMAT;
        let size = (width.max(1), height.max(1));

        let (color_texture, color_view) = gpu::create_target(
            &device,
            "Headless Color Texture",
            size,
            format,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        );
        let (depth_texture, depth_view) = gpu::create_depth_target(&device, size);

        Ok(Self {
            device,
            queue,
            format,
            width: size.0,
            height: size.1,
            color_texture,
            color_view,
            depth_texture,
            depth_view,
        })
    }

    /// Copy the color texture back to the CPU as tightly packed RGBA8 rows
    pub fn read_pixels(&self) -> Result<Vec<u8>, RenderError> {
        let padded_row = gpu::padded_row_bytes(self.width);

        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Pixel Readback Buffer"),
            size: u64::from(padded_row) * u64::from(self.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Readback Encoder"),
            });
        encoder.copy_texture_to_buffer(
            self.color_texture.as_image_copy(),
            wgpu::ImageCopyBuffer {
                buffer: &staging,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(self.height),
                },
            },
            self.color_texture.size(),
        );
        self.queue.submit([encoder.finish()]);

        let slice = staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);

        rx.recv()
            .map_err(|e| RenderError::BufferReadFailed(e.to_string()))?
            .map_err(|e| RenderError::BufferReadFailed(e.to_string()))?;

        let pixels = {
            let mapped = slice.get_mapped_range();
            gpu::unpad_rows(&mapped, self.width, self.height, padded_row)
        };
        staging.unmap();

        Ok(pixels)
    }

    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        let pixels = self.read_pixels()?;
        let image = image::RgbaImage::from_raw(self.width, self.height, pixels).ok_or_else(|| {
            RenderError::BufferReadFailed("pixel buffer does not match image size".to_string())
        })?;
        image
            .save(path)
            .map_err(|e| RenderError::BufferReadFailed(format!("{}: {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), width = self.width, height = self.height, "saved frame");
        Ok(())
    }
}
