// Sprite rendering system

use super::{Camera, CameraUniform, Flip, TextureManager, Vertex};
use crate::core::math::Rect;
use crate::engine::assets::{AssetError, TextureHandle};
use glam::{Mat4, Vec2};
use std::ops::Range;
use wgpu::util::DeviceExt;

/// Two triangles forming a quad, relative to the quad's first vertex
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// One textured quad queued for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub texture: TextureHandle,
    /// Source rectangle in texture pixels
    pub src: Rect,
    /// Destination rectangle in logical pixels
    pub dst: Rect,
    pub flip: Flip,
}

/// A run of consecutive quads sharing one texture
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    pub texture: TextureHandle,
    pub indices: Range<u32>,
}

/// CPU-side geometry for one frame of sprites
#[derive(Debug, Default)]
pub struct SpriteGeometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub batches: Vec<DrawBatch>,
}

impl SpriteGeometry {
    /// Build quads for `sprites` in submission order
    ///
    /// Order is preserved so later sprites draw over earlier ones; only
    /// adjacent sprites with the same texture are merged into a batch.
    pub fn build(
        sprites: &[Sprite],
        texture_size: impl Fn(TextureHandle) -> Option<(u32, u32)>,
    ) -> Result<Self, AssetError> {
        let mut geometry = Self::default();

        for sprite in sprites {
            let (width, height) =
                texture_size(sprite.texture).ok_or(AssetError::Unloaded(sprite.texture.id()))?;
            let (width, height) = (width as f32, height as f32);

            let mut u0 = sprite.src.x / width;
            let mut u1 = sprite.src.right() / width;
            let v0 = sprite.src.y / height;
            let v1 = sprite.src.bottom() / height;
            if sprite.flip == Flip::Horizontal {
                std::mem::swap(&mut u0, &mut u1);
            }

            let dst = sprite.dst;
            let base = geometry.vertices.len() as u32;
            geometry.vertices.extend_from_slice(&[
                Vertex::new(Vec2::new(dst.x, dst.y), Vec2::new(u0, v0)),
                Vertex::new(Vec2::new(dst.right(), dst.y), Vec2::new(u1, v0)),
                Vertex::new(Vec2::new(dst.right(), dst.bottom()), Vec2::new(u1, v1)),
                Vertex::new(Vec2::new(dst.x, dst.bottom()), Vec2::new(u0, v1)),
            ]);

            let start = geometry.indices.len() as u32;
            geometry
                .indices
                .extend(QUAD_INDICES.iter().map(|index| base + index));
            let end = geometry.indices.len() as u32;

            match geometry.batches.last_mut() {
                Some(batch) if batch.texture == sprite.texture => batch.indices.end = end,
                _ => geometry.batches.push(DrawBatch {
                    texture: sprite.texture,
                    indices: start..end,
                }),
            }
        }

        Ok(geometry)
    }
}

/// GPU buffers uploaded for the current frame
struct FrameBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    batches: Vec<DrawBatch>,
}

/// Sprite renderer: collects quads during the draw pass and submits them batched by texture
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    sprites: Vec<Sprite>,
    frame: Option<FrameBuffers>,
}

impl SpriteRenderer {
    /// Create a new sprite renderer
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        // Create shader module
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        // Create camera bind group layout
        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        // Create texture bind group layout
        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Flipped sprites keep their winding, so nothing is culled
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let camera_uniform = CameraUniform {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        };

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Self {
            render_pipeline,
            camera_buffer,
            camera_bind_group,
            texture_bind_group_layout,
            sprites: Vec::new(),
            frame: None,
        }
    }

    /// Queue a sprite for this frame
    pub fn add_sprite(&mut self, sprite: Sprite) {
        self.sprites.push(sprite);
    }

    /// Clear all queued sprites
    pub fn clear(&mut self) {
        self.sprites.clear();
        self.frame = None;
    }

    /// Upload camera and quad geometry for the queued sprites
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        camera: &Camera,
        textures: &TextureManager,
    ) -> Result<(), AssetError> {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::new(camera)]),
        );

        if self.sprites.is_empty() {
            self.frame = None;
            return Ok(());
        }

        let geometry = SpriteGeometry::build(&self.sprites, |handle| textures.size(handle))?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Vertex Buffer"),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Index Buffer"),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        self.frame = Some(FrameBuffers {
            vertex_buffer,
            index_buffer,
            batches: geometry.batches,
        });

        Ok(())
    }

    /// Record draw calls for the prepared frame
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        textures: &'a TextureManager,
    ) -> Result<(), AssetError> {
        let Some(frame) = &self.frame else {
            return Ok(());
        };

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, frame.vertex_buffer.slice(..));
        render_pass.set_index_buffer(frame.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        for batch in &frame.batches {
            let texture = textures
                .get(batch.texture)
                .ok_or(AssetError::Unloaded(batch.texture.id()))?;
            render_pass.set_bind_group(1, &texture.bind_group, &[]);
            render_pass.draw_indexed(batch.indices.clone(), 0, 0..1);
        }

        Ok(())
    }

    /// Layout every texture bind group must follow
    pub fn texture_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_bind_group_layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::{AssetHandle, AssetId};

    fn handle(name: &str) -> TextureHandle {
        AssetHandle::new(AssetId::from_path(name))
    }

    fn sheet_size(_: TextureHandle) -> Option<(u32, u32)> {
        Some((256, 32))
    }

    #[test]
    fn test_quad_geometry() {
        let sprite = Sprite {
            texture: handle("run"),
            src: Rect::new(64.0, 0.0, 32.0, 32.0),
            dst: Rect::new(10.0, 20.0, 32.0, 32.0),
            flip: Flip::None,
        };

        let geometry = SpriteGeometry::build(&[sprite], sheet_size).unwrap();
        assert_eq!(geometry.vertices.len(), 4);
        assert_eq!(geometry.indices, vec![0, 1, 2, 0, 2, 3]);

        assert_eq!(geometry.vertices[0].position, [10.0, 20.0]);
        assert_eq!(geometry.vertices[2].position, [42.0, 52.0]);
        assert_eq!(geometry.vertices[0].tex_coords, [0.25, 0.0]);
        assert_eq!(geometry.vertices[2].tex_coords, [0.375, 1.0]);
    }

    #[test]
    fn test_horizontal_flip_swaps_u() {
        let sprite = Sprite {
            texture: handle("run"),
            src: Rect::new(0.0, 0.0, 32.0, 32.0),
            dst: Rect::new(0.0, 0.0, 32.0, 32.0),
            flip: Flip::Horizontal,
        };

        let geometry = SpriteGeometry::build(&[sprite], sheet_size).unwrap();
        assert_eq!(geometry.vertices[0].tex_coords, [0.125, 0.0]);
        assert_eq!(geometry.vertices[1].tex_coords, [0.0, 0.0]);
        // Positions are untouched by the flip
        assert_eq!(geometry.vertices[0].position, [0.0, 0.0]);
    }

    #[test]
    fn test_batches_follow_submission_order() {
        let ground = handle("ground");
        let player = handle("player");
        let cell = Rect::new(0.0, 0.0, 32.0, 32.0);
        let sprite = |texture| Sprite {
            texture,
            src: cell,
            dst: cell,
            flip: Flip::None,
        };

        let sprites = [sprite(ground), sprite(ground), sprite(player), sprite(ground)];
        let geometry = SpriteGeometry::build(&sprites, sheet_size).unwrap();

        assert_eq!(
            geometry.batches,
            vec![
                DrawBatch { texture: ground, indices: 0..12 },
                DrawBatch { texture: player, indices: 12..18 },
                DrawBatch { texture: ground, indices: 18..24 },
            ]
        );
        assert_eq!(geometry.indices[12], 8);
    }

    #[test]
    fn test_unloaded_texture_is_an_error() {
        let sprite = Sprite {
            texture: handle("missing"),
            src: Rect::default(),
            dst: Rect::default(),
            flip: Flip::None,
        };

        let result = SpriteGeometry::build(&[sprite], |_| None);
        assert!(matches!(result, Err(AssetError::Unloaded(_))));
    }
}
