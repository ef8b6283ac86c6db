//! Fullscreen-quad renderer for the byte canvas.

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use super::quad::{QuadVertex, SCREEN_QUAD};
use crate::canvas::Canvas;
use crate::error::{Result, ShaderStage, VizError};
use crate::util::format_bytes;

/// Texel format of the uploaded canvas.
const CANVAS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Bytes per uploaded texel (RGB expanded to RGBA).
const TEXEL_SIZE: u32 = 4;

/// The uploaded canvas and the bind group that samples it.
struct CanvasTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// Owns the GPU context and every resource needed to draw the canvas.
pub struct Renderer {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    /// Built by `initialize`; the linked shader program.
    pipeline: Option<wgpu::RenderPipeline>,
    vertex_buffer: Option<wgpu::Buffer>,
    texture: Option<CanvasTexture>,
}

impl Renderer {
    /// Create the GPU context for `window` and configure its surface.
    pub fn new(window: Arc<Window>) -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::util::backend_bits_from_env().unwrap_or(wgpu::Backends::all()),
            ..Default::default()
        });

        let surface = instance
            .create_surface(Arc::clone(&window))
            .map_err(|e| VizError::Init(format!("surface creation failed: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| VizError::Init("no compatible GPU adapter found".into()))?;

        let info = adapter.get_info();
        tracing::info!(
            adapter = %info.name,
            backend = ?info.backend,
            "selected GPU adapter"
        );

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("ByteCanvas Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::Performance,
            },
            None,
        ))
        .map_err(|e| VizError::Init(format!("device request failed: {e}")))?;

        // Errors outside an explicit scope are observational only.
        device.on_uncaptured_error(Box::new(|error: wgpu::Error| {
            tracing::error!("wgpu error: {error}");
        }));

        let caps = surface.get_capabilities(&adapter);
        // Prefer a linear format so byte values reach the screen unaltered.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| VizError::Init("surface reports no supported formats".into()))?;

        let size = window.inner_size();
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
        tracing::debug!(
            ?format,
            width = config.width,
            height = config.height,
            "surface configured"
        );

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Canvas Bind Group Layout"),
            entries: &[
                // Canvas texture
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // Nearest sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Canvas Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            bind_group_layout,
            sampler,
            pipeline: None,
            vertex_buffer: None,
            texture: None,
        })
    }

    /// Compile both shader stages, link them into the quad pipeline and
    /// create the quad vertex buffer.
    pub fn initialize(&mut self) -> Result<()> {
        let vertex_module = self.compile_stage(
            ShaderStage::Vertex,
            include_str!("shaders/quad_vertex.wgsl"),
        )?;
        let fragment_module = self.compile_stage(
            ShaderStage::Fragment,
            include_str!("shaders/quad_fragment.wgsl"),
        )?;

        self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Quad Pipeline Layout"),
                bind_group_layouts: &[&self.bind_group_layout],
                push_constant_ranges: &[],
            });

        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Quad Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &vertex_module,
                    entry_point: Some("main"),
                    compilation_options: Default::default(),
                    buffers: &[QuadVertex::layout()],
                },
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &fragment_module,
                    entry_point: Some("main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.config.format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                multiview: None,
                cache: None,
            });

        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(VizError::Link {
                log: error.to_string(),
            });
        }

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Screen Quad Buffer"),
                contents: bytemuck::cast_slice(&SCREEN_QUAD),
                usage: wgpu::BufferUsages::VERTEX,
            });

        self.pipeline = Some(pipeline);
        self.vertex_buffer = Some(vertex_buffer);
        tracing::debug!("quad pipeline linked");
        Ok(())
    }

    fn compile_stage(&self, stage: ShaderStage, source: &str) -> Result<wgpu::ShaderModule> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(match stage {
                    ShaderStage::Vertex => "Quad Vertex Shader",
                    ShaderStage::Fragment => "Quad Fragment Shader",
                }),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });

        match pollster::block_on(self.device.pop_error_scope()) {
            Some(error) => Err(VizError::ShaderCompile {
                stage,
                log: error.to_string(),
            }),
            None => Ok(module),
        }
    }

    /// Upload `canvas` as the displayed texture, replacing any previous one.
    pub fn upload(&mut self, canvas: Canvas) -> Result<()> {
        let max = self.device.limits().max_texture_dimension_2d;
        let dimension = u32::try_from(canvas.dimension())
            .ok()
            .filter(|&d| d <= max)
            .ok_or(VizError::TextureTooLarge {
                dimension: canvas.dimension(),
                max,
            })?;

        if let Some(old) = self.texture.take() {
            old.texture.destroy();
        }

        let rgba = canvas.to_rgba8();
        let source_len = canvas.source_len();
        drop(canvas);

        let size = wgpu::Extent3d {
            width: dimension,
            height: dimension,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Canvas Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: CANVAS_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(dimension * TEXEL_SIZE),
                rows_per_image: Some(dimension),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Canvas Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        tracing::info!(
            source_len,
            texture_size = %format_bytes(rgba.len() as u64),
            dimension,
            "canvas uploaded"
        );

        self.texture = Some(CanvasTexture {
            texture,
            bind_group,
        });
        Ok(())
    }

    /// Reconfigure the surface after the drawable size changed.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Clear, draw the quad once and present.
    ///
    /// Frame-level failures are logged and the frame is skipped.
    pub fn render_frame(&mut self) {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.window.inner_size();
                self.resize(size.width, size.height);
                return;
            }
            Err(e) => {
                tracing::warn!("failed to acquire frame: {e}");
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Canvas Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let (Some(pipeline), Some(vertex_buffer), Some(canvas)) =
                (&self.pipeline, &self.vertex_buffer, &self.texture)
            {
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &canvas.bind_group, &[]);
                pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                pass.draw(0..SCREEN_QUAD.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        frame.present();
    }

    /// Release the texture, vertex buffer and pipeline. Safe to call twice.
    pub fn shutdown(&mut self) {
        if let Some(canvas) = self.texture.take() {
            canvas.texture.destroy();
        }
        if let Some(buffer) = self.vertex_buffer.take() {
            buffer.destroy();
        }
        if self.pipeline.take().is_some() {
            tracing::debug!("renderer resources released");
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
