//! GPU resources for the prism background and the marquee strip.
//!
//! `GpuState` owns everything with a device lifetime:
//!
//! ```text
//!   Window ─▶ Surface ─▶ Device ─▶ Queue
//!                           ├─▶ prism pipeline + uniform buffer
//!                           └─▶ strip pipeline + vertex buffer + item textures
//! ```
//!
//! The caller drives it with per-frame [`FrameInputs`] computed by the
//! `motion` crate; nothing in here advances time or decides whether to keep
//! animating.

use std::borrow::Cow;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use bytemuck::Zeroable;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use wgpu::naga::ShaderStage;
use wgpu::util::{DeviceExt, TextureDataOrder};
use winit::dpi::PhysicalSize;

use motion::{pixel_scale, Mat3, PrismParams};
use scenecfg::{parse_color, MarqueeItem, MarqueeSettings};

use crate::shaders::{
    FULLSCREEN_VERTEX_GLSL, PRISM_FRAGMENT_GLSL, STRIP_FRAGMENT_GLSL, STRIP_VERTEX_GLSL,
};
use crate::strip::{StripGeometry, StripVertex};
use crate::uniforms::{PrismUniforms, StripUniforms};

/// Visual emphasis applied to a hovered strip item (no layout shift).
const HOVER_SCALE: f32 = 1.06;
/// Resting opacity of strip items, matching the original's 90% styling.
const ITEM_OPACITY: f32 = 0.9;

/// Everything the renderer needs from the motion layer for one frame.
pub struct FrameInputs {
    /// Seconds since the render loop started.
    pub time: f32,
    pub rotation: Mat3,
    pub use_base_wobble: bool,
    /// Strip translation in device pixels and the hovered quad, when a
    /// marquee is present.
    pub strip: Option<StripFrame>,
}

#[derive(Debug, Clone, Copy)]
pub struct StripFrame {
    pub translation_px: f32,
    pub hovered_quad: Option<usize>,
}

pub(crate) struct GpuState {
    _instance: wgpu::Instance,
    limits: wgpu::Limits,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    params: PrismParams,
    prism_pipeline: wgpu::RenderPipeline,
    prism_uniform_buffer: wgpu::Buffer,
    prism_bind_group: wgpu::BindGroup,
    prism_uniforms: PrismUniforms,
    strip: Option<StripState>,
}

struct StripState {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniforms: StripUniforms,
    items: Vec<ItemTexture>,
    vertex_buffer: Option<wgpu::Buffer>,
    quad_items: Vec<usize>,
}

/// Texture + bind group for one strip item, kept alive for the bind group.
struct ItemTexture {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    /// Native width/height ratio; `None` for placeholders and glyphs.
    aspect: Option<f32>,
}

impl GpuState {
    /// Creates the surface, device, and the prism pipeline; when marquee
    /// settings are supplied the strip pipeline and its item textures are
    /// created as well.
    pub fn new<T>(
        target: &T,
        initial_size: PhysicalSize<u32>,
        params: &PrismParams,
        marquee: Option<&MarqueeSettings>,
    ) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let instance = wgpu::Instance::default();
        let window_handle = target
            .window_handle()
            .map_err(|err| anyhow!("failed to acquire window handle: {err}"))?;
        let display_handle = target
            .display_handle()
            .map_err(|err| anyhow!("failed to acquire display handle: {err}"))?;
        let surface = unsafe {
            instance.create_surface_unsafe(wgpu::SurfaceTargetUnsafe::RawHandle {
                raw_display_handle: display_handle.as_raw(),
                raw_window_handle: window_handle.as_raw(),
            })
        }
        .context("failed to create rendering surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("failed to find a suitable GPU adapter")?;

        let limits = adapter.limits();
        let max_dimension = limits.max_texture_dimension_2d;
        let width = initial_size.width.max(1);
        let height = initial_size.height.max(1);
        if width > max_dimension || height > max_dimension {
            anyhow::bail!(
                "GPU max texture dimension is {max_dimension}, requested surface is {width}x{height}"
            );
        }

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| format.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let device_descriptor = wgpu::DeviceDescriptor {
            label: Some("prismloop device"),
            required_features: wgpu::Features::empty(),
            required_limits: limits.clone(),
            memory_hints: wgpu::MemoryHints::default(),
            trace: wgpu::Trace::default(),
        };
        let (device, queue) = pollster::block_on(adapter.request_device(&device_descriptor))
            .context("failed to create GPU device")?;

        let size = PhysicalSize::new(width, height);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 1,
        };
        surface.configure(&device, &config);

        let vertex_module = compile_glsl(
            &device,
            "fullscreen triangle vertex",
            FULLSCREEN_VERTEX_GLSL,
            ShaderStage::Vertex,
        );
        let prism_fragment = compile_glsl(
            &device,
            "prism fragment",
            PRISM_FRAGMENT_GLSL,
            ShaderStage::Fragment,
        );

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism uniform layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism pipeline layout"),
            bind_group_layouts: &[&uniform_layout],
            push_constant_ranges: &[],
        });

        let prism_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("prism pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some("main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &prism_fragment,
                entry_point: Some("main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });

        let prism_uniforms = PrismUniforms::new(params, size.width, size.height);
        let prism_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism uniform buffer"),
            contents: bytemuck::bytes_of(&prism_uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let prism_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("prism bind group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: prism_uniform_buffer.as_entire_binding(),
            }],
        });

        let strip = marquee
            .map(|settings| StripState::new(&device, &queue, surface_format, settings))
            .transpose()?;

        let mut state = Self {
            _instance: instance,
            limits,
            surface,
            device,
            queue,
            config,
            size,
            params: *params,
            prism_pipeline,
            prism_uniform_buffer,
            prism_bind_group,
            prism_uniforms,
            strip,
        };
        state.apply_surface_metrics(1.0);
        Ok(state)
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Device pixel ratio cap from the resolved prism parameters.
    pub fn dpr_cap(&self) -> f32 {
        self.params.dpr_cap
    }

    /// Native aspect ratios of the strip item textures, in item order.
    pub fn strip_aspects(&self) -> Option<Vec<Option<f32>>> {
        self.strip
            .as_ref()
            .map(|strip| strip.items.iter().map(|item| item.aspect).collect())
    }

    /// Reconfigures the swapchain and refreshes size-derived uniforms.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>, dpr: f32) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        let max_dimension = self.limits.max_texture_dimension_2d;
        if new_size.width > max_dimension || new_size.height > max_dimension {
            tracing::warn!(
                width = new_size.width,
                height = new_size.height,
                max_dimension,
                "resize exceeds GPU max texture dimension; keeping previous size"
            );
            return;
        }

        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.apply_surface_metrics(dpr);
    }

    fn apply_surface_metrics(&mut self, dpr: f32) {
        self.prism_uniforms
            .set_resolution(self.size.width as f32, self.size.height as f32);
        self.prism_uniforms
            .set_px_scale(pixel_scale(self.size.height, self.params.scale));
        self.prism_uniforms
            .set_offset_px(self.params.offset_x * dpr, self.params.offset_y * dpr);
        if let Some(strip) = self.strip.as_mut() {
            strip.uniforms.viewport[0] = self.size.width as f32;
            strip.uniforms.viewport[1] = self.size.height as f32;
        }
    }

    /// Uploads new strip geometry after a measure pass. `strip_top` is the
    /// strip's top edge in device pixels.
    pub fn set_strip_geometry(&mut self, geometry: &StripGeometry, strip_top: f32) {
        let Some(strip) = self.strip.as_mut() else {
            return;
        };
        strip.quad_items = geometry.quads.iter().map(|quad| quad.item).collect();
        strip.uniforms.viewport[3] = strip_top;
        let contents = bytemuck::cast_slice(&geometry.vertices);
        match strip.vertex_buffer.as_ref() {
            Some(buffer) if buffer.size() == contents.len() as u64 => {
                self.queue.write_buffer(buffer, 0, contents);
            }
            _ => {
                strip.vertex_buffer = Some(self.device.create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some("strip vertex buffer"),
                        contents,
                        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    },
                ));
            }
        }
    }

    /// Records and submits one frame.
    pub fn render_frame(&mut self, inputs: &FrameInputs) -> Result<(), wgpu::SurfaceError> {
        self.prism_uniforms.set_time(inputs.time);
        self.prism_uniforms.set_rotation(&inputs.rotation);
        self.prism_uniforms
            .set_use_base_wobble(inputs.use_base_wobble);
        self.queue.write_buffer(
            &self.prism_uniform_buffer,
            0,
            bytemuck::bytes_of(&self.prism_uniforms),
        );

        if let (Some(strip), Some(frame)) = (self.strip.as_mut(), inputs.strip.as_ref()) {
            strip.uniforms.set_translation(frame.translation_px);
            strip.uniforms.set_hovered_quad(frame.hovered_quad);
            self.queue.write_buffer(
                &strip.uniform_buffer,
                0,
                bytemuck::bytes_of(&strip.uniforms),
            );
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("prismloop encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("prismloop pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.prism_pipeline);
            render_pass.set_bind_group(0, &self.prism_bind_group, &[]);
            render_pass.draw(0..3, 0..1);

            if let (Some(strip), Some(_)) = (self.strip.as_ref(), inputs.strip.as_ref()) {
                if let Some(vertex_buffer) = strip.vertex_buffer.as_ref() {
                    render_pass.set_pipeline(&strip.pipeline);
                    render_pass.set_bind_group(0, &strip.uniform_bind_group, &[]);
                    render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                    for (quad, item) in strip.quad_items.iter().enumerate() {
                        let start = (quad * 6) as u32;
                        render_pass.set_bind_group(1, &strip.items[*item].bind_group, &[]);
                        render_pass.draw(start..start + 6, 0..1);
                    }
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        tracing::trace!(
            "presented frame size={}x{}",
            self.size.width,
            self.size.height
        );
        Ok(())
    }
}

impl StripState {
    fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        settings: &MarqueeSettings,
    ) -> Result<Self> {
        let vertex_module = compile_glsl(
            device,
            "strip vertex",
            STRIP_VERTEX_GLSL,
            ShaderStage::Vertex,
        );
        let fragment_module = compile_glsl(
            device,
            "strip fragment",
            STRIP_FRAGMENT_GLSL,
            ShaderStage::Fragment,
        );

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("strip uniform layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("strip texture layout"),
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

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("strip pipeline layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("strip pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some("main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<StripVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: 0,
                            shader_location: 0,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: 8,
                            shader_location: 1,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: 16,
                            shader_location: 2,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32,
                            offset: 24,
                            shader_location: 3,
                        },
                    ],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some("main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });

        let fade_rgb = settings
            .fade_out_color
            .as_deref()
            .map(|raw| parse_color(raw))
            .transpose()
            .map_err(|err| anyhow!("invalid marquee fade color: {err}"))?;

        let mut uniforms = StripUniforms::zeroed();
        uniforms.hover = [
            -1.0,
            if settings.scale_on_hover {
                HOVER_SCALE
            } else {
                1.0
            },
            if settings.fade_out { 1.0 } else { 0.0 },
            if fade_rgb.is_some() { 1.0 } else { 0.0 },
        ];
        let rgb = fade_rgb.unwrap_or([0.0, 0.0, 0.0]);
        uniforms.fade_color = [rgb[0], rgb[1], rgb[2], ITEM_OPACITY];

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("strip uniform buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("strip uniform bind group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let items = settings
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| load_item_texture(device, queue, &texture_layout, index, item))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            uniforms,
            items,
            vertex_buffer: None,
            quad_items: Vec::new(),
        })
    }
}

fn compile_glsl(
    device: &wgpu::Device,
    label: &str,
    source: &'static str,
    stage: ShaderStage,
) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(source),
            stage,
            defines: &[],
        },
    })
}

/// Loads the texture for one strip item. Glyph entries and unreadable image
/// files fall back to a flat placeholder tile so a bad path degrades the
/// strip instead of aborting startup.
fn load_item_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    index: usize,
    item: &MarqueeItem,
) -> Result<ItemTexture> {
    match item {
        MarqueeItem::Image { src, alt, .. } => match load_image_texture(device, queue, index, src) {
            Ok(texture) => Ok(texture_bind_group(device, layout, texture)),
            Err(err) => {
                tracing::warn!(
                    item = index,
                    name = %alt,
                    path = %src.display(),
                    error = %err,
                    "failed to load strip image; using placeholder"
                );
                Ok(placeholder_texture(device, queue, layout, index))
            }
        },
        MarqueeItem::Glyph { glyph, title, .. } => {
            tracing::debug!(item = index, %glyph, name = %title, "glyph item rendered as placeholder tile");
            Ok(placeholder_texture(device, queue, layout, index))
        }
    }
}

struct LoadedTexture {
    texture: wgpu::Texture,
    aspect: Option<f32>,
}

fn load_image_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    index: usize,
    path: &Path,
) -> Result<LoadedTexture> {
    let image = image::open(path)
        .with_context(|| format!("failed to open strip image {}", path.display()))?;
    let rgba = image.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    if width == 0 || height == 0 {
        anyhow::bail!("image at {} has zero extent", path.display());
    }

    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(&format!("strip item texture #{index}")),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        TextureDataOrder::LayerMajor,
        rgba.as_raw(),
    );

    tracing::info!(item = index, path = %path.display(), width, height, "loaded strip image");
    Ok(LoadedTexture {
        texture,
        aspect: Some(width as f32 / height as f32),
    })
}

fn placeholder_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    index: usize,
) -> ItemTexture {
    let data = [220u8, 220, 224, 230];
    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(&format!("strip placeholder #{index}")),
            size: wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        TextureDataOrder::LayerMajor,
        &data,
    );
    texture_bind_group(
        device,
        layout,
        LoadedTexture {
            texture,
            aspect: None,
        },
    )
}

fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    loaded: LoadedTexture,
) -> ItemTexture {
    let view = loaded
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("strip item bind group"),
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
    ItemTexture {
        _texture: loaded.texture,
        bind_group,
        aspect: loaded.aspect,
    }
}
