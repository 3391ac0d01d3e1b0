use anyhow::{Context, Result};
use std::sync::Arc;
use winit::window::Window;

use crate::camera::OrbitCamera;
use crate::composer::FrameDescription;
use crate::core::{GpuContext, WindowDimensions};
use crate::math::srgb_to_linear;
use crate::mesh::{build_scene_mesh, SceneMesh};
use crate::types::{CameraUniform, LightUniform, Vertex};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const COMMON_WGSL: &str = include_str!("shaders/common.wgsl");

/// Pack the lighting of a frame for the GPU, colours converted to linear
pub fn light_uniform(frame: &FrameDescription) -> LightUniform {
    let lighting = &frame.lighting;
    let direction = lighting.sun.direction();
    let [sr, sg, sb] = srgb_to_linear(lighting.sun.color);
    let [ar, ag, ab] = srgb_to_linear(lighting.ambient.color);
    let [tr, tg, tb] = srgb_to_linear(frame.torch_light.color);
    let torch = frame.torch_light.position;
    let stars = &lighting.stars;

    LightUniform {
        light_view_proj: lighting.shadow.view_proj().to_cols_array_2d(),
        sun_direction: [direction.x, direction.y, direction.z, lighting.sun.intensity],
        sun_color: [sr, sg, sb, 1.0],
        ambient: [ar, ag, ab, lighting.ambient.intensity],
        torch_position: [torch.x, torch.y, torch.z, frame.torch_light.intensity],
        torch_color: [tr, tg, tb, frame.torch_light.distance],
        sky: [
            lighting.sky.turbidity,
            lighting.sky.rayleigh,
            lighting.sky.mie_coefficient,
            lighting.sky.mie_directional_g,
        ],
        stars: [stars.count as f32, stars.factor, stars.visibility, stars.radius],
        params: [
            lighting.shadow.bias,
            1.0 / lighting.shadow.map_size as f32,
            frame.torch_light.decay,
            frame.time,
        ],
    }
}

/// Growable vertex buffer re-filled every frame
struct VertexStream {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
}

impl VertexStream {
    fn new(device: &wgpu::Device, label: &'static str, capacity: usize) -> Self {
        Self {
            label,
            buffer: Self::allocate(device, label, capacity),
            capacity,
            len: 0,
        }
    }

    fn allocate(device: &wgpu::Device, label: &'static str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity.max(1) * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[Vertex]) {
        if vertices.len() > self.capacity {
            self.capacity = vertices.len().next_power_of_two();
            self.buffer = Self::allocate(device, self.label, self.capacity);
            log::debug!("{} grown to {} vertices", self.label, self.capacity);
        }
        if !vertices.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(vertices));
        }
        self.len = vertices.len() as u32;
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.len > 0 {
            pass.set_vertex_buffer(0, self.buffer.slice(..));
            pass.draw(0..self.len, 0..1);
        }
    }
}

struct Pipelines {
    sky: wgpu::RenderPipeline,
    shadow: wgpu::RenderPipeline,
    opaque: wgpu::RenderPipeline,
    transparent: wgpu::RenderPipeline,
}

pub struct Renderer {
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    size: WindowDimensions,
    depth_view: wgpu::TextureView,
    camera_buffer: wgpu::Buffer,
    light_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    shadow_bind_group: wgpu::BindGroup,
    shadow_view: wgpu::TextureView,
    pipelines: Pipelines,
    casters: VertexStream,
    opaque: VertexStream,
    transparent: VertexStream,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
    last_triangles: usize,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = WindowDimensions::from(window.inner_size());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create window surface")?;
        let gpu = GpuContext::for_surface(&instance, &surface).await?;
        let device = gpu.device();

        let surface_config = Self::create_surface_config(&surface, gpu.adapter(), size)?;
        surface.configure(device, &surface_config);

        let depth_view = Self::create_depth_texture(device, size);
        let (shadow_view, shadow_sampler) = Self::create_shadow_map(device, crate::sun::SHADOW_MAP_SIZE);

        let camera_buffer = Self::create_uniform_buffer::<CameraUniform>(device, "Camera Buffer");
        let light_buffer = Self::create_uniform_buffer::<LightUniform>(device, "Light Buffer");

        let scene_layout = Self::create_scene_layout(device);
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &scene_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: light_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&shadow_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
            label: Some("scene_bind_group"),
        });

        let shadow_layout = Self::create_shadow_layout(device);
        let shadow_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &shadow_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            }],
            label: Some("shadow_bind_group"),
        });

        let pipelines = Self::create_pipelines(device, &scene_layout, &shadow_layout, surface_config.format);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let casters = VertexStream::new(device, "Shadow Casters", 1 << 15);
        let opaque = VertexStream::new(device, "Opaque Vertices", 1 << 16);
        let transparent = VertexStream::new(device, "Transparent Vertices", 1 << 10);

        log::info!(
            "Renderer initialized: {}x{} {:?}",
            size.width,
            size.height,
            surface_config.format
        );

        Ok(Self {
            gpu,
            surface,
            surface_config,
            size,
            depth_view,
            camera_buffer,
            light_buffer,
            scene_bind_group,
            shadow_bind_group,
            shadow_view,
            pipelines,
            casters,
            opaque,
            transparent,
            egui_renderer,
            egui_state,
            egui_ctx,
            last_triangles: 0,
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: WindowDimensions,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("Surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    fn create_depth_texture(device: &wgpu::Device, size: WindowDimensions) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_shadow_map(device: &wgpu::Device, resolution: u32) -> (wgpu::TextureView, wgpu::Sampler) {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Shadow Map"),
            size: wgpu::Extent3d {
                width: resolution,
                height: resolution,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Shadow Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        (texture.create_view(&wgpu::TextureViewDescriptor::default()), sampler)
    }

    fn create_uniform_buffer<T: bytemuck::Pod>(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<T>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }
    }

    fn create_scene_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        let stages = wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT;
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                Self::uniform_entry(0, stages),
                Self::uniform_entry(1, stages),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
            label: Some("scene_bind_group_layout"),
        })
    }

    fn create_shadow_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[Self::uniform_entry(0, wgpu::ShaderStages::VERTEX)],
            label: Some("shadow_bind_group_layout"),
        })
    }

    fn create_shader(device: &wgpu::Device, label: &str, source: &str) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(format!("{}\n{}", COMMON_WGSL, source).into()),
        })
    }

    fn depth_state(write: bool, compare: wgpu::CompareFunction) -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: write,
            depth_compare: compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }

    fn primitive_state() -> wgpu::PrimitiveState {
        wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        }
    }

    fn create_pipelines(
        device: &wgpu::Device,
        scene_layout: &wgpu::BindGroupLayout,
        shadow_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
    ) -> Pipelines {
        let sky_shader = Self::create_shader(device, "Sky Shader", include_str!("shaders/sky.wgsl"));
        let mesh_shader = Self::create_shader(device, "Mesh Shader", include_str!("shaders/mesh.wgsl"));
        let shadow_shader = Self::create_shader(device, "Shadow Shader", include_str!("shaders/shadow.wgsl"));

        let scene_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[scene_layout],
            push_constant_ranges: &[],
        });
        let shadow_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shadow Pipeline Layout"),
            bind_group_layouts: &[shadow_layout],
            push_constant_ranges: &[],
        });

        let sky = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sky Pipeline"),
            layout: Some(&scene_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &sky_shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &sky_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: Self::primitive_state(),
            depth_stencil: Some(Self::depth_state(false, wgpu::CompareFunction::Always)),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let shadow = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shadow Pipeline"),
            layout: Some(&shadow_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shadow_shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: None,
            primitive: Self::primitive_state(),
            depth_stencil: Some(wgpu::DepthStencilState {
                bias: wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 2.0,
                    clamp: 0.0,
                },
                ..Self::depth_state(true, wgpu::CompareFunction::LessEqual)
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let mesh_pipeline = |label: &str, blend: wgpu::BlendState, depth_write: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&scene_pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &mesh_shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &mesh_shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: Self::primitive_state(),
                depth_stencil: Some(Self::depth_state(depth_write, wgpu::CompareFunction::Less)),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        Pipelines {
            sky,
            shadow,
            opaque: mesh_pipeline("Opaque Pipeline", wgpu::BlendState::REPLACE, true),
            transparent: mesh_pipeline("Transparent Pipeline", wgpu::BlendState::ALPHA_BLENDING, false),
        }
    }

    pub fn dimensions(&self) -> WindowDimensions {
        self.size
    }

    /// Triangles drawn in the last frame, excluding the shadow pass
    pub fn triangle_count(&self) -> usize {
        self.last_triangles
    }

    pub fn resize(&mut self, size: WindowDimensions) {
        if size.is_empty() || size == self.size {
            return;
        }
        self.size = size;
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(self.gpu.device(), &self.surface_config);
        self.depth_view = Self::create_depth_texture(self.gpu.device(), size);
        log::debug!("Surface resized to {}x{}", size.width, size.height);
    }

    /// Re-apply the current configuration after the surface was lost
    pub fn reconfigure(&mut self) {
        log::warn!("Reconfiguring surface ({}x{})", self.size.width, self.size.height);
        self.surface.configure(self.gpu.device(), &self.surface_config);
    }

    fn upload(&mut self, frame: &FrameDescription, camera: &OrbitCamera) -> SceneMesh {
        let device = self.gpu.device();
        let queue = self.gpu.queue();

        let camera_uniform = camera.to_uniform(self.size.aspect(), frame.time);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera_uniform]));
        queue.write_buffer(&self.light_buffer, 0, bytemuck::cast_slice(&[light_uniform(frame)]));

        let mesh = build_scene_mesh(frame);
        self.casters.upload(device, queue, &mesh.casters);
        self.opaque.upload(device, queue, &mesh.opaque);
        self.transparent.upload(device, queue, &mesh.transparent);
        mesh
    }

    pub fn render(
        &mut self,
        window: &Window,
        frame: &FrameDescription,
        camera: &OrbitCamera,
        ui: impl FnMut(&egui::Context),
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        if self.size.is_empty() {
            return Ok(());
        }

        let mesh = self.upload(frame, camera);
        self.last_triangles = mesh.triangle_count();

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            shadow_pass.set_pipeline(&self.pipelines.shadow);
            shadow_pass.set_bind_group(0, &self.shadow_bind_group, &[]);
            self.casters.draw(&mut shadow_pass);
        }

        {
            let mut scene_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            scene_pass.set_bind_group(0, &self.scene_bind_group, &[]);

            scene_pass.set_pipeline(&self.pipelines.sky);
            scene_pass.draw(0..3, 0..1);

            scene_pass.set_pipeline(&self.pipelines.opaque);
            self.opaque.draw(&mut scene_pass);

            scene_pass.set_pipeline(&self.pipelines.transparent);
            self.transparent.draw(&mut scene_pass);
        }

        self.render_ui(window, &mut encoder, &view, ui);

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn render_ui(
        &mut self,
        window: &Window,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mut ui: impl FnMut(&egui::Context),
    ) {
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| ui(ctx));

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(self.gpu.device(), self.gpu.queue(), *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.size.width, self.size.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        self.egui_renderer.update_buffers(
            self.gpu.device(),
            self.gpu.queue(),
            encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }

    /// Feed a window event to egui; true when egui consumed it
    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }

    /// True while the pointer is over a panel, so drags should not move the camera
    pub fn ui_wants_pointer(&self) -> bool {
        self.egui_ctx.wants_pointer_input() || self.egui_ctx.is_pointer_over_area()
    }

    pub fn ui_wants_keyboard(&self) -> bool {
        self.egui_ctx.wants_keyboard_input()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::SceneComposer;
    use crate::settings::SceneSettings;

    #[test]
    fn test_uniform_layouts_match_wgsl() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 144);
        assert_eq!(std::mem::size_of::<LightUniform>(), 64 + 16 * 8);
        assert_eq!(std::mem::size_of::<Vertex>(), 4 * (3 + 3 + 4 + 4 + 4));
    }

    #[test]
    fn test_light_uniform_packs_frame() {
        let mut composer = SceneComposer::new(Some(1), 0);
        let frame = composer.render(&SceneSettings::default().with_sun(135.0, 5.0), 2.0);
        let uniform = light_uniform(&frame);

        let dir = glam::Vec3::from_slice(&uniform.sun_direction[..3]);
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert_eq!(uniform.sun_direction[3], 1.5);
        assert_eq!(uniform.ambient[3], 0.3);
        assert_eq!(uniform.torch_color[3], 10.0);
        assert_eq!(uniform.params[0], -0.0001);
        assert!((uniform.params[1] - 1.0 / 2048.0).abs() < 1e-9);
        assert_eq!(uniform.params[2], 2.0);
        assert!((uniform.stars[2] - (1.0 - 5.0 / 15.0)).abs() < 1e-6);
        assert_eq!(uniform.sky, [8.0, 6.0, 0.005, 0.8]);
    }
}
