//! GPU renderer implementation
//!
//! Owns the wgpu device, the two pipelines (rounded quads, text), their
//! instance buffers and one atlas texture per font. A frame is a single
//! render pass: all quads first, then glyph runs on top.

use std::borrow::Cow;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use roundel_core::Color;
use roundel_text::{FontId, GlyphAtlas};

use crate::primitives::{FrameBatch, GpuGlyph, GpuQuad, Uniforms};
use crate::shaders::{QUAD_SHADER, TEXT_SHADER};

/// Error type for renderer operations
#[derive(Debug)]
pub enum RendererError {
    /// Failed to request GPU adapter
    AdapterNotFound,
    /// Failed to request GPU device
    DeviceError(wgpu::RequestDeviceError),
    /// Failed to create surface
    SurfaceError(wgpu::CreateSurfaceError),
    /// Shader compilation error
    ShaderError(String),
}

impl std::fmt::Display for RendererError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RendererError::AdapterNotFound => write!(f, "No suitable GPU adapter found"),
            RendererError::DeviceError(e) => write!(f, "Failed to request GPU device: {}", e),
            RendererError::SurfaceError(e) => write!(f, "Failed to create surface: {}", e),
            RendererError::ShaderError(e) => write!(f, "Shader compilation error: {}", e),
        }
    }
}

impl std::error::Error for RendererError {}

/// Which wgpu backends to try
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendPreference {
    /// The platform's primary backend (Metal, DX12, Vulkan)
    #[default]
    Primary,
    /// OpenGL / GLES
    Gl,
    /// Anything wgpu supports
    All,
}

/// WGSL sources for both pipelines
#[derive(Clone, Debug)]
pub struct ShaderSources {
    pub quad: Cow<'static, str>,
    pub text: Cow<'static, str>,
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self {
            quad: Cow::Borrowed(QUAD_SHADER),
            text: Cow::Borrowed(TEXT_SHADER),
        }
    }
}

/// Configuration for creating a renderer
#[derive(Clone, Debug)]
pub struct RendererConfig {
    /// Maximum number of quads per frame
    pub max_quads: usize,
    /// Maximum number of glyphs per frame
    pub max_glyphs: usize,
    /// MSAA sample count (1 = off)
    pub sample_count: u32,
    pub backend: BackendPreference,
    /// Color the frame is cleared to
    pub clear_color: Color,
    /// Present with vsync
    pub vsync: bool,
    /// Preferred texture format (None = use surface preferred)
    pub texture_format: Option<wgpu::TextureFormat>,
    pub shaders: ShaderSources,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            max_quads: 1_000,
            max_glyphs: 10_000,
            sample_count: 1,
            backend: BackendPreference::Primary,
            clear_color: Color::rgb(0.1, 0.1, 0.12),
            vsync: true,
            texture_format: None,
            shaders: ShaderSources::default(),
        }
    }
}

struct Pipelines {
    quad: wgpu::RenderPipeline,
    text: wgpu::RenderPipeline,
}

struct Buffers {
    uniforms: wgpu::Buffer,
    quads: wgpu::Buffer,
    glyphs: wgpu::Buffer,
}

struct BindGroupLayouts {
    /// Uniforms + instance storage buffer (shared shape for quads and glyphs)
    frame: wgpu::BindGroupLayout,
    /// Glyph atlas texture + sampler
    atlas: wgpu::BindGroupLayout,
}

struct BindGroups {
    quad: wgpu::BindGroup,
    text: wgpu::BindGroup,
}

/// GPU copy of one font's glyph atlas
struct AtlasTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// Multisampled color target, recreated on resize
struct MsaaTarget {
    view: wgpu::TextureView,
    size: (u32, u32),
}

/// The GPU renderer using wgpu
pub struct GpuRenderer {
    #[allow(dead_code)]
    instance: wgpu::Instance,
    #[allow(dead_code)]
    adapter: wgpu::Adapter,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    pipelines: Pipelines,
    buffers: Buffers,
    layouts: BindGroupLayouts,
    bind_groups: BindGroups,
    atlases: FxHashMap<FontId, AtlasTexture>,
    glyph_sampler: wgpu::Sampler,
    msaa: Option<MsaaTarget>,
    viewport_size: (u32, u32),
    config: RendererConfig,
    texture_format: wgpu::TextureFormat,
}

impl GpuRenderer {
    fn backends(preference: BackendPreference) -> wgpu::Backends {
        match preference {
            BackendPreference::Primary => wgpu::Backends::PRIMARY,
            BackendPreference::Gl => wgpu::Backends::GL,
            BackendPreference::All => wgpu::Backends::all(),
        }
    }

    /// Create a renderer drawing into a window surface
    pub async fn with_surface<W>(
        window: Arc<W>,
        size: (u32, u32),
        config: RendererConfig,
    ) -> Result<(Self, wgpu::Surface<'static>), RendererError>
    where
        W: raw_window_handle::HasWindowHandle
            + raw_window_handle::HasDisplayHandle
            + Send
            + Sync
            + 'static,
    {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: Self::backends(config.backend),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(RendererError::SurfaceError)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RendererError::AdapterNotFound)?;

        tracing::info!("Using GPU adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Roundel GPU Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                },
                None,
            )
            .await
            .map_err(RendererError::DeviceError)?;

        #[cfg(debug_assertions)]
        device.on_uncaptured_error(Box::new(|error| {
            tracing::error!("wgpu error: {}", error);
        }));

        let device = Arc::new(device);
        let queue = Arc::new(queue);

        let surface_caps = surface.get_capabilities(&adapter);
        tracing::debug!("Surface capabilities - formats: {:?}", surface_caps.formats);

        let texture_format = match config.texture_format {
            Some(format) => format,
            None => surface_caps
                .formats
                .iter()
                .find(|f| f.is_srgb())
                .or_else(|| surface_caps.formats.first())
                .copied()
                .ok_or(RendererError::AdapterNotFound)?,
        };
        tracing::debug!("Selected texture format: {:?}", texture_format);

        let renderer = Self::create_renderer(
            instance,
            adapter,
            device,
            queue,
            texture_format,
            config,
            size,
        )?;

        Ok((renderer, surface))
    }

    fn create_renderer(
        instance: wgpu::Instance,
        adapter: wgpu::Adapter,
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
        texture_format: wgpu::TextureFormat,
        config: RendererConfig,
        viewport_size: (u32, u32),
    ) -> Result<Self, RendererError> {
        let layouts = Self::create_bind_group_layouts(&device);

        let quad_shader = Self::compile_shader(&device, "Quad Shader", &config.shaders.quad)?;
        let text_shader = Self::compile_shader(&device, "Text Shader", &config.shaders.text)?;

        let pipelines = Self::create_pipelines(
            &device,
            &layouts,
            &quad_shader,
            &text_shader,
            texture_format,
            config.sample_count,
        );

        let buffers = Self::create_buffers(&device, &config);
        let bind_groups = Self::create_bind_groups(&device, &layouts, &buffers);

        let glyph_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Glyph Atlas Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        tracing::info!(
            "Renderer ready: {:?}, {}x MSAA, {} quads / {} glyphs per frame",
            texture_format,
            config.sample_count,
            config.max_quads,
            config.max_glyphs
        );

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
            pipelines,
            buffers,
            layouts,
            bind_groups,
            atlases: FxHashMap::default(),
            glyph_sampler,
            msaa: None,
            viewport_size,
            config,
            texture_format,
        })
    }

    /// Compile WGSL, turning validation failures into errors instead of panics
    fn compile_shader(
        device: &wgpu::Device,
        label: &str,
        source: &str,
    ) -> Result<wgpu::ShaderModule, RendererError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(Cow::Owned(source.to_owned())),
        });
        match pollster::block_on(device.pop_error_scope()) {
            Some(error) => Err(RendererError::ShaderError(format!("{}: {}", label, error))),
            None => Ok(module),
        }
    }

    fn create_bind_group_layouts(device: &wgpu::Device) -> BindGroupLayouts {
        let frame = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[
                // Uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Instances storage buffer
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let atlas = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Glyph Atlas Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
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

        BindGroupLayouts { frame, atlas }
    }

    fn create_pipelines(
        device: &wgpu::Device,
        layouts: &BindGroupLayouts,
        quad_shader: &wgpu::ShaderModule,
        text_shader: &wgpu::ShaderModule,
        texture_format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Pipelines {
        let blend_state = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let color_targets = &[Some(wgpu::ColorTargetState {
            format: texture_format,
            blend: Some(blend_state),
            write_mask: wgpu::ColorWrites::ALL,
        })];

        let primitive_state = wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        };

        let multisample_state = wgpu::MultisampleState {
            count: sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        };

        let quad_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Quad Pipeline Layout"),
            bind_group_layouts: &[&layouts.frame],
            push_constant_ranges: &[],
        });

        let quad = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Quad Pipeline"),
            layout: Some(&quad_layout),
            vertex: wgpu::VertexState {
                module: quad_shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: quad_shader,
                entry_point: Some("fs_main"),
                targets: color_targets,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: primitive_state,
            depth_stencil: None,
            multisample: multisample_state,
            multiview: None,
            cache: None,
        });

        let text_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Text Pipeline Layout"),
            bind_group_layouts: &[&layouts.frame, &layouts.atlas],
            push_constant_ranges: &[],
        });

        let text = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Text Pipeline"),
            layout: Some(&text_layout),
            vertex: wgpu::VertexState {
                module: text_shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: text_shader,
                entry_point: Some("fs_main"),
                targets: color_targets,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: primitive_state,
            depth_stencil: None,
            multisample: multisample_state,
            multiview: None,
            cache: None,
        });

        Pipelines { quad, text }
    }

    fn create_buffers(device: &wgpu::Device, config: &RendererConfig) -> Buffers {
        let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Uniforms Buffer"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let quads = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Quads Buffer"),
            size: (std::mem::size_of::<GpuQuad>() * config.max_quads.max(1)) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let glyphs = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Glyphs Buffer"),
            size: (std::mem::size_of::<GpuGlyph>() * config.max_glyphs.max(1)) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Buffers {
            uniforms,
            quads,
            glyphs,
        }
    }

    fn create_bind_groups(
        device: &wgpu::Device,
        layouts: &BindGroupLayouts,
        buffers: &Buffers,
    ) -> BindGroups {
        let frame_group = |label: &str, instances: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &layouts.frame,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffers.uniforms.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: instances.as_entire_binding(),
                    },
                ],
            })
        };

        BindGroups {
            quad: frame_group("Quad Bind Group", &buffers.quads),
            text: frame_group("Text Bind Group", &buffers.glyphs),
        }
    }

    /// Update the viewport size (call when the surface is resized)
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport_size = (width, height);
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        self.viewport_size
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn texture_format(&self) -> wgpu::TextureFormat {
        self.texture_format
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Present mode matching the vsync setting
    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.config.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }

    /// Upload a font's atlas if it changed since the last upload
    pub fn upload_atlas(&mut self, font: FontId, atlas: &mut GlyphAtlas) {
        let (width, height) = atlas.dimensions();

        let needs_create = match self.atlases.get(&font) {
            Some(existing) => {
                existing.texture.width() != width || existing.texture.height() != height
            }
            None => true,
        };

        if needs_create {
            let texture = self.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Glyph Atlas Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::R8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Glyph Atlas Bind Group"),
                layout: &self.layouts.atlas,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&self.glyph_sampler),
                    },
                ],
            });
            tracing::debug!("Created {}x{} atlas texture for {:?}", width, height, font);
            self.atlases.insert(font, AtlasTexture { texture, bind_group });
        } else if !atlas.is_dirty() {
            return;
        }

        if let Some(target) = self.atlases.get(&font) {
            self.queue.write_texture(
                wgpu::ImageCopyTexture {
                    texture: &target.texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                atlas.pixels(),
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }
        atlas.mark_clean();
    }

    pub fn has_atlas(&self, font: FontId) -> bool {
        self.atlases.contains_key(&font)
    }

    /// Release the textures of fonts for which `keep` returns false
    pub fn retain_atlases(&mut self, mut keep: impl FnMut(FontId) -> bool) {
        self.atlases.retain(|font, _| {
            let kept = keep(*font);
            if !kept {
                tracing::debug!("Released atlas texture for {:?}", font);
            }
            kept
        });
    }

    /// Release every atlas texture
    pub fn clear_atlases(&mut self) {
        self.atlases.clear();
    }

    /// Make sure the multisampled target matches the viewport
    fn prepare_msaa(&mut self) {
        if self.config.sample_count <= 1 {
            self.msaa = None;
            return;
        }

        let size = self.viewport_size;
        let stale = self.msaa.as_ref().map_or(true, |m| m.size != size);
        if stale {
            let texture = self.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("MSAA Color Target"),
                size: wgpu::Extent3d {
                    width: size.0.max(1),
                    height: size.1.max(1),
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: self.config.sample_count,
                dimension: wgpu::TextureDimension::D2,
                format: self.texture_format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            self.msaa = Some(MsaaTarget { view, size });
        }
    }

    /// Draw a frame into `target`
    ///
    /// Instances beyond the configured maximums are dropped with a warning.
    /// Glyph runs whose font has no uploaded atlas are skipped.
    pub fn render(&mut self, target: &wgpu::TextureView, batch: &FrameBatch) {
        let uniforms =
            Uniforms::for_viewport(self.viewport_size.0 as f32, self.viewport_size.1 as f32);
        self.queue
            .write_buffer(&self.buffers.uniforms, 0, bytemuck::bytes_of(&uniforms));

        let quad_count = batch.quads.len().min(self.config.max_quads);
        if quad_count < batch.quads.len() {
            tracing::warn!(
                "Dropping {} quads over the per-frame limit of {}",
                batch.quads.len() - quad_count,
                self.config.max_quads
            );
        }
        if quad_count > 0 {
            self.queue.write_buffer(
                &self.buffers.quads,
                0,
                bytemuck::cast_slice(&batch.quads[..quad_count]),
            );
        }

        let glyph_limit = self.config.max_glyphs as u32;
        let glyph_count = batch.glyphs.len().min(self.config.max_glyphs);
        if glyph_count < batch.glyphs.len() {
            tracing::warn!(
                "Dropping {} glyphs over the per-frame limit of {}",
                batch.glyphs.len() - glyph_count,
                self.config.max_glyphs
            );
        }
        if glyph_count > 0 {
            self.queue.write_buffer(
                &self.buffers.glyphs,
                0,
                bytemuck::cast_slice(&batch.glyphs[..glyph_count]),
            );
        }

        let clear = self.config.clear_color;
        let clear_color = wgpu::Color {
            r: clear.r as f64,
            g: clear.g as f64,
            b: clear.b as f64,
            a: clear.a as f64,
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Roundel Render Encoder"),
            });

        self.prepare_msaa();
        let (view, resolve_target) = match &self.msaa {
            Some(msaa) => (&msaa.view, Some(target)),
            None => (target, None),
        };

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Roundel Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if quad_count > 0 {
                render_pass.set_pipeline(&self.pipelines.quad);
                render_pass.set_bind_group(0, &self.bind_groups.quad, &[]);
                // 6 vertices per quad (2 triangles), one instance per quad
                render_pass.draw(0..6, 0..quad_count as u32);
            }

            if glyph_count > 0 {
                render_pass.set_pipeline(&self.pipelines.text);
                render_pass.set_bind_group(0, &self.bind_groups.text, &[]);

                for run in &batch.runs {
                    let Some(atlas) = self.atlases.get(&run.font) else {
                        tracing::warn!("No atlas uploaded for {:?}, skipping run", run.font);
                        continue;
                    };
                    let end = run.instances.end.min(glyph_limit);
                    if run.instances.start >= end {
                        continue;
                    }
                    render_pass.set_bind_group(1, &atlas.bind_group, &[]);
                    render_pass.draw(0..6, run.instances.start..end);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }
}
