//! Windowed application implementing winit ApplicationHandler
//!
//! Owns the window, the GPU state and the frame clock. Each redraw samples the
//! clock, advances the phase machine and draws one frame.

use crate::config::WindowConfig;
use crate::scene::ShatterScene;
use anyhow::Context;
use shatter_animation::{tick, PhaseSchedule};
use shatter_render::{Camera, FrameUniforms, RenderContext, ShaderSettings, ShatterRenderer};
use shatter_runtime::FrameClock;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

/// Frames between FPS log lines
const FPS_LOG_INTERVAL: u64 = 600;

pub struct ShatterApp {
    scene: ShatterScene,
    schedule: PhaseSchedule,
    settings: ShaderSettings,
    background: [f32; 3],
    window_config: WindowConfig,

    pub clock: FrameClock,
    start_at: f64,

    // Rendering
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    renderer: Option<ShatterRenderer>,
    camera: Camera,

    /// Set when setup fails; the event loop exits and the caller reports it
    pub error: Option<anyhow::Error>,
}

impl ShatterApp {
    pub fn new(
        scene: ShatterScene,
        schedule: PhaseSchedule,
        settings: ShaderSettings,
        background: [f32; 3],
        window_config: WindowConfig,
    ) -> Self {
        Self {
            scene,
            schedule,
            settings,
            background,
            window_config,
            clock: FrameClock::new(),
            start_at: 0.0,
            window: None,
            render_context: None,
            renderer: None,
            camera: Camera::new(),
            error: None,
        }
    }

    /// Start the animation `seconds` into the cycle
    pub fn with_start_time(mut self, seconds: f64) -> Self {
        self.start_at = seconds;
        self
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title(self.window_config.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.window_config.width,
                self.window_config.height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );

        if self.window_config.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        self.window = Some(window.clone());

        let render_context = pollster::block_on(RenderContext::new(window.clone()))
            .context("Failed to initialize rendering")?;

        self.camera
            .set_viewport(render_context.size.width, render_context.size.height);

        let mut renderer = ShatterRenderer::new(
            &render_context.device,
            render_context.format(),
            &self.scene.mesh,
            &self.scene.attributes,
        )
        .context("Failed to upload text mesh")?;
        renderer.set_clear_color(self.background);

        tracing::info!(
            faces = self.scene.face_count(),
            vertices = renderer.vertex_count(),
            format = ?render_context.format(),
            "renderer ready"
        );

        self.render_context = Some(render_context);
        self.renderer = Some(renderer);

        // The animation starts once everything is on the GPU
        self.clock = FrameClock::new().with_offset(self.start_at);
        Ok(())
    }

    fn tick(&mut self) {
        self.clock.tick();

        if self.clock.frame_count % FPS_LOG_INTERVAL == 0 {
            tracing::debug!(
                fps = self.clock.average_fps(),
                elapsed = self.clock.elapsed(),
                "frame stats"
            );
        }
    }

    fn render(&mut self) {
        let Some(context) = &self.render_context else {
            return;
        };
        let Some(renderer) = &self.renderer else {
            return;
        };

        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost, reconfiguring");
                if let Some(context) = &mut self.render_context {
                    context.reconfigure();
                }
                return;
            }
            Err(e) => {
                tracing::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let state = tick(&self.schedule, self.clock.elapsed());
        let uniforms = FrameUniforms::new(&self.camera, &state, &self.settings);
        renderer.render(
            &context.device,
            &context.queue,
            &view,
            &context.depth_view,
            &uniforms,
        );

        output.present();
    }

    fn toggle_fullscreen(&self) {
        if let Some(window) = &self.window {
            if window.fullscreen().is_some() {
                window.set_fullscreen(None);
            } else {
                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
            }
        }
    }
}

impl ApplicationHandler for ShatterApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.error.is_some() {
            return;
        }
        if let Err(e) = self.initialize(event_loop) {
            tracing::error!("{:#}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                    self.camera
                        .set_viewport(context.size.width, context.size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
                    PhysicalKey::Code(KeyCode::F11) => self.toggle_fullscreen(),
                    _ => {}
                }
            }

            WindowEvent::RedrawRequested => {
                self.tick();
                self.render();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
