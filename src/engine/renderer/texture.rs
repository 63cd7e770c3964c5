// Texture loading and management system

use anyhow::{Context, Result};
use image::GenericImageView;
use log::info;
use std::collections::HashMap;

use crate::engine::assets::{AssetError, AssetHandle, AssetId, AssetLoader, TextureHandle, TextureLoader};

/// A loaded texture with GPU resources
///
/// The bind group keeps the underlying texture, view and sampler alive.
pub struct Texture {
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Create a texture from image bytes
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadError(format!("Failed to decode {}: {}", label, e)))?;
        Ok(Self::from_image(device, queue, layout, &img, Some(label)))
    }

    /// Create a texture from an image
    ///
    /// Pixel art is sampled with nearest filtering so scaled sprites stay crisp.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        img: &image::DynamicImage,
        label: Option<&str>,
    ) -> Self {
        let rgba = img.to_rgba8();
        let dimensions = img.dimensions();

        let size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * dimensions.0),
                rows_per_image: Some(dimensions.1),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label,
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            bind_group,
            width: dimensions.0,
            height: dimensions.1,
        }
    }
}

/// Owns every texture loaded on the GPU
///
/// Game objects only hold [`TextureHandle`]s into this manager, so it must
/// outlive them; [`TextureManager::unload_all`] is the teardown step.
#[derive(Default)]
pub struct TextureManager {
    textures: HashMap<AssetId, Texture>,
}

impl TextureManager {
    /// Create a new texture manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a texture under `name`, returning its handle
    pub fn insert(&mut self, name: &str, texture: Texture) -> TextureHandle {
        let id = AssetId::from_path(name);
        self.textures.insert(id, texture);
        AssetHandle::new(id)
    }

    /// Handle of an already loaded texture
    pub fn handle_for(&self, name: &str) -> Option<TextureHandle> {
        let id = AssetId::from_path(name);
        self.textures.contains_key(&id).then(|| AssetHandle::new(id))
    }

    /// Get a texture by handle
    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(&handle.id())
    }

    /// Pixel dimensions of a loaded texture
    pub fn size(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        self.get(handle).map(|texture| (texture.width, texture.height))
    }

    /// Release every texture
    pub fn unload_all(&mut self) {
        let count = self.textures.len();
        self.textures.clear();
        info!("Unloaded {} textures", count);
    }
}

/// Loads textures from disk straight onto the GPU
pub struct GpuTextureLoader<'a> {
    pub(super) device: &'a wgpu::Device,
    pub(super) queue: &'a wgpu::Queue,
    pub(super) layout: &'a wgpu::BindGroupLayout,
    pub(super) textures: &'a mut TextureManager,
    pub(super) assets: &'a AssetLoader,
}

impl TextureLoader for GpuTextureLoader<'_> {
    fn load_texture(&mut self, path: &str) -> Result<TextureHandle> {
        // Check if already loaded
        if let Some(handle) = self.textures.handle_for(path) {
            return Ok(handle);
        }

        let bytes = self
            .assets
            .load_texture_bytes(path)
            .with_context(|| format!("Failed to load texture {}", path))?;
        let texture = Texture::from_bytes(self.device, self.queue, self.layout, &bytes, path)?;
        info!(
            "Loaded texture {} ({}x{})",
            path, texture.width, texture.height
        );

        Ok(self.textures.insert(path, texture))
    }
}
