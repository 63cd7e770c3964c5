// Rendering system using wgpu

mod camera;
mod sprite;
pub mod texture;
mod vertex;

pub use camera::{Camera, CameraUniform};
pub use sprite::{Sprite, SpriteRenderer};
pub use texture::{GpuTextureLoader, TextureManager};
pub use vertex::Vertex;

use anyhow::Result;
use log::{debug, info, warn};
use std::sync::Arc;
use winit::window::Window;

use crate::config::DisplayConfig;
use crate::core::math::Rect;
use crate::engine::assets::{AssetLoader, TextureHandle};

/// Background colour behind the letterboxed play area (20, 10, 30)
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 20.0 / 255.0,
    g: 10.0 / 255.0,
    b: 30.0 / 255.0,
    a: 1.0,
};

/// Horizontal mirroring applied to a textured quad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
}

/// Drawing surface targeted by the game's draw pass
pub trait Canvas {
    /// Draw the `src` region of `texture` into `dst` (both in pixels)
    fn draw_texture(&mut self, texture: TextureHandle, src: Rect, dst: Rect, flip: Flip);
}

/// Main renderer responsible for initializing wgpu and presenting frames
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sprite_renderer: SpriteRenderer,
    texture_manager: TextureManager,
    camera: Camera,
}

impl Renderer {
    /// Create a new renderer for the given window
    pub async fn new(window: Arc<Window>, display: &DisplayConfig) -> Result<Self> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface
        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        // Request device and queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let sprite_renderer = SpriteRenderer::new(&device, surface_format);
        let camera = Camera::new(display.logical_width as f32, display.logical_height as f32);

        info!(
            "Renderer initialized with {}x{} surface, {}x{} logical presentation",
            config.width, config.height, display.logical_width, display.logical_height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            sprite_renderer,
            texture_manager: TextureManager::new(),
            camera,
        })
    }

    /// Resize the surface to the window's new size
    pub fn resize(&mut self, display: &DisplayConfig) {
        if display.window_width > 0 && display.window_height > 0 {
            self.config.width = display.window_width;
            self.config.height = display.window_height;
            self.surface.configure(&self.device, &self.config);
            debug!(
                "Surface reconfigured to {}x{}",
                display.window_width, display.window_height
            );
        }
    }

    /// Start a new frame, dropping anything queued for the previous one
    pub fn begin_frame(&mut self) {
        self.sprite_renderer.clear();
    }

    /// Clear the screen, draw every queued sprite and present the frame
    pub fn present(&mut self, display: &DisplayConfig) -> Result<()> {
        let Some(viewport) = display.letterbox() else {
            // Minimized: nothing to draw into
            return Ok(());
        };

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated, reconfiguring and skipping frame");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Surface timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.sprite_renderer.prepare(
            &self.device,
            &self.queue,
            &self.camera,
            &self.texture_manager,
        )?;

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_viewport(viewport.x, viewport.y, viewport.w, viewport.h, 0.0, 1.0);
            self.sprite_renderer
                .render(&mut render_pass, &self.texture_manager)?;
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Texture loader that uploads into this renderer's texture manager
    pub fn texture_loader<'a>(&'a mut self, assets: &'a AssetLoader) -> GpuTextureLoader<'a> {
        GpuTextureLoader {
            device: &self.device,
            queue: &self.queue,
            layout: self.sprite_renderer.texture_bind_group_layout(),
            textures: &mut self.texture_manager,
            assets,
        }
    }

    /// Get a mutable reference to the texture manager
    pub fn texture_manager_mut(&mut self) -> &mut TextureManager {
        &mut self.texture_manager
    }
}

impl Canvas for Renderer {
    fn draw_texture(&mut self, texture: TextureHandle, src: Rect, dst: Rect, flip: Flip) {
        self.sprite_renderer.add_sprite(Sprite {
            texture,
            src,
            dst,
            flip,
        });
    }
}
