//! wgpu backend

use std::sync::Arc;

use morph_core::Color;

use crate::backend::{DrawSurface, RenderBackend};
use crate::error::{RendererError, ResizeError};
use crate::point_cloud::{FrameUniforms, PointCloudBuffer};
use crate::shaders::POINT_SHADER;

/// Configuration for creating a renderer
#[derive(Clone, Debug)]
pub struct RendererConfig {
    /// Preferred texture format (None = use surface preferred)
    pub texture_format: Option<wgpu::TextureFormat>,
    pub present_mode: wgpu::PresentMode,
    /// Color the surface is cleared to every frame
    pub clear_color: Color,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            texture_format: None,
            present_mode: wgpu::PresentMode::AutoVsync,
            clear_color: Color::BLACK,
        }
    }
}

/// Get the preferred backend for the current platform
///
/// Using the primary backend instead of all backends reduces memory usage
/// by avoiding initialization of multiple GPU driver stacks.
fn preferred_backends() -> wgpu::Backends {
    #[cfg(target_os = "macos")]
    {
        wgpu::Backends::METAL
    }
    #[cfg(target_os = "windows")]
    {
        wgpu::Backends::DX12
    }
    #[cfg(target_os = "linux")]
    {
        wgpu::Backends::VULKAN
    }
    #[cfg(target_arch = "wasm32")]
    {
        wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL
    }
    #[cfg(not(any(
        target_os = "macos",
        target_os = "windows",
        target_os = "linux",
        target_arch = "wasm32"
    )))]
    {
        wgpu::Backends::PRIMARY
    }
}

/// Backend that creates wgpu surfaces for a window
pub struct WgpuBackend<W> {
    window: Arc<W>,
    config: RendererConfig,
}

impl<W> WgpuBackend<W>
where
    W: raw_window_handle::HasWindowHandle
        + raw_window_handle::HasDisplayHandle
        + Send
        + Sync
        + 'static,
{
    pub fn new(window: Arc<W>, config: RendererConfig) -> Self {
        Self { window, config }
    }

    async fn create_surface(&self, width: u32, height: u32) -> Result<WgpuSurface, RendererError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: preferred_backends(),
            ..Default::default()
        });

        let surface = instance.create_surface(self.window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RendererError::AdapterNotFound)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Particle Morph Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        tracing::debug!("Surface capabilities - formats: {:?}", surface_caps.formats);
        tracing::debug!(
            "Surface capabilities - alpha modes: {:?}",
            surface_caps.alpha_modes
        );

        let format = match self.config.texture_format {
            Some(format) => format,
            None => surface_caps
                .formats
                .iter()
                .find(|f| f.is_srgb())
                .or_else(|| surface_caps.formats.first())
                .copied()
                .ok_or_else(|| RendererError::Capability("surface reports no formats".into()))?,
        };
        let alpha_mode = if surface_caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::Opaque)
        {
            wgpu::CompositeAlphaMode::Opaque
        } else {
            surface_caps
                .alpha_modes
                .first()
                .copied()
                .ok_or_else(|| RendererError::Capability("surface reports no alpha modes".into()))?
        };
        tracing::debug!("Selected texture format: {:?}", format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: self.config.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let (pipeline, bind_group_layout) = create_pipeline(&device, format);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(WgpuSurface {
            surface,
            device,
            queue,
            config,
            pipeline,
            bind_group_layout,
            uniform_buffer,
            clear_color: self.config.clear_color,
            clouds: 0,
        })
    }
}

impl<W> RenderBackend for WgpuBackend<W>
where
    W: raw_window_handle::HasWindowHandle
        + raw_window_handle::HasDisplayHandle
        + Send
        + Sync
        + 'static,
{
    type Surface = WgpuSurface;

    fn acquire(&mut self, width: u32, height: u32) -> Result<WgpuSurface, RendererError> {
        pollster::block_on(self.create_surface(width, height))
    }

    fn detach(&mut self, surface: WgpuSurface) {
        if surface.clouds > 0 {
            tracing::warn!(
                "Detaching surface with {} point clouds still allocated",
                surface.clouds
            );
        }
        surface.uniform_buffer.destroy();
        drop(surface);
        tracing::debug!("Surface detached");
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
) -> (wgpu::RenderPipeline, wgpu::BindGroupLayout) {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Point Shader"),
        source: wgpu::ShaderSource::Wgsl(POINT_SHADER.into()),
    });

    let storage_entry = |binding| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only: true },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    };

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Point Bind Group Layout"),
        entries: &[
            // Frame uniforms
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
            // Positions
            storage_entry(1),
            // Colors
            storage_entry(2),
        ],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Point Pipeline Layout"),
        bind_group_layouts: &[&bind_group_layout],
        push_constant_ranges: &[],
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Point Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                // Additive: overlapping sprites brighten
                blend: Some(wgpu::BlendState {
                    color: wgpu::BlendComponent {
                        src_factor: wgpu::BlendFactor::SrcAlpha,
                        dst_factor: wgpu::BlendFactor::One,
                        operation: wgpu::BlendOperation::Add,
                    },
                    alpha: wgpu::BlendComponent {
                        src_factor: wgpu::BlendFactor::Zero,
                        dst_factor: wgpu::BlendFactor::One,
                        operation: wgpu::BlendOperation::Add,
                    },
                }),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None, // Billboards face camera
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    (pipeline, bind_group_layout)
}

/// A configured wgpu surface with the point pipeline
pub struct WgpuSurface {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    clear_color: Color,
    clouds: usize,
}

impl WgpuSurface {
    fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}

impl DrawSurface for WgpuSurface {
    type PointCloud = PointCloudBuffer;

    fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn create_point_cloud(
        &mut self,
        positions: &[f32],
        colors: &[f32],
    ) -> Result<PointCloudBuffer, RendererError> {
        let cloud = PointCloudBuffer::new(
            &self.device,
            &self.queue,
            &self.bind_group_layout,
            &self.uniform_buffer,
            positions,
            colors,
        )?;
        self.clouds += 1;
        Ok(cloud)
    }

    fn write_positions(&mut self, cloud: &PointCloudBuffer, positions: &[f32]) {
        cloud.write_positions(&self.queue, positions);
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), ResizeError> {
        if width == 0 || height == 0 {
            return Err(ResizeError::ZeroSize { width, height });
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
        tracing::debug!("Surface resized to {}x{}", width, height);
        Ok(())
    }

    fn draw(
        &mut self,
        cloud: &PointCloudBuffer,
        uniforms: &FrameUniforms,
    ) -> Result<(), RendererError> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("Out of GPU memory");
                return Err(RendererError::OutOfMemory);
            }
            Err(e) => {
                tracing::warn!("Surface error: {:?}", e);
                return Ok(());
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Point Encoder"),
            });

        {
            let clear = self.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Point Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, cloud.bind_group(), &[]);
            pass.draw(0..6, 0..cloud.count()); // 6 vertices per quad (2 triangles)
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn release_point_cloud(&mut self, cloud: PointCloudBuffer) {
        cloud.destroy();
        self.clouds = self.clouds.saturating_sub(1);
    }
}
