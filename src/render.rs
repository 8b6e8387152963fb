use crate::constants::*;
use glam::Mat4;
use scrollscape_core::constants::CAMERA_Z;
use scrollscape_core::{Camera, FrameOutput, SceneId, Transform};
use web_sys as web;
use wgpu;

mod fluid;
mod helpers;
mod sprites;

use fluid::{create_fluid_resources, FluidResources, FluidUniforms};
use sprites::{create_sprite_resources, BillboardInstance, DrawUniforms, SpriteResources};

// Shaders bundled as string constants
pub static FLUID_WGSL: &str = include_str!("../shaders/fluid.wgsl");
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    fluid: FluidResources,
    sprites: SpriteResources,
    billboard_scratch: Vec<BillboardInstance>,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        point_capacity: u64,
        billboard_capacity: u64,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let fluid = create_fluid_resources(&device, format);
        let sprites = create_sprite_resources(&device, format, point_capacity, billboard_capacity);
        log::info!(
            "[render] surface {}x{} {:?}, point capacity {}",
            width,
            height,
            format,
            point_capacity
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            fluid,
            sprites,
            billboard_scratch: Vec::with_capacity(billboard_capacity as usize),
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_LINEAR,
                g: CLEAR_LINEAR,
                b: CLEAR_LINEAR,
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn draw_uniforms(camera: &Camera, model: Mat4, opacity: f32, params: [f32; 4]) -> DrawUniforms {
        DrawUniforms {
            view: camera.view_matrix().to_cols_array(),
            proj: camera.projection_matrix().to_cols_array(),
            model: model.to_cols_array(),
            tint: [1.0, 1.0, 1.0, opacity.clamp(0.0, 1.0)],
            params,
            glow_core: BILLBOARD_CORE_RGBA,
            glow_edge: BILLBOARD_EDGE_RGBA,
        }
    }

    /// Upload this frame's buffers and draw fluid, depth clouds, then billboards.
    pub fn render(&mut self, out: &FrameOutput) -> Result<(), wgpu::SurfaceError> {
        let camera = Camera::stage(self.width as f32 / self.height.max(1) as f32);

        // Fluid backdrop recedes along -z; shrink it as a perspective plane would.
        let fluid_z = out
            .scenes
            .get(SceneId::Fluid)
            .map_or(0.0, |v| v.transform.position.z);
        let fluid = FluidUniforms {
            resolution: [self.width as f32, self.height as f32],
            time: out.fluid.time,
            opacity: out.fluid.opacity,
            scale: CAMERA_Z / (CAMERA_Z - fluid_z).max(1e-3),
            _pad: [0.0; 3],
        };
        self.queue
            .write_buffer(&self.fluid.uniform_buffer, 0, bytemuck::bytes_of(&fluid));

        let depth_draws = out.depth_instances.len().min(MAX_DEPTH_DRAWS);
        if depth_draws > 0 {
            self.sprites.points.write(
                &self.device,
                &self.queue,
                bytemuck::cast_slice(&out.depth_points),
            );
        }
        for (slot, inst) in self.sprites.slots.iter().zip(&out.depth_instances[..depth_draws]) {
            let model = depth_model(&inst.group, &inst.pose);
            let scale = inst.group.scale.x * inst.pose.scale.x;
            let u = Self::draw_uniforms(
                &camera,
                model,
                inst.opacity,
                [DEPTH_POINT_SIZE, scale, 0.0, 0.0],
            );
            self.queue.write_buffer(&slot.buffer, 0, bytemuck::bytes_of(&u));
        }

        let draw_billboards = out.network_opacity > 0.0 && !out.billboards.is_empty();
        if draw_billboards {
            self.billboard_scratch.clear();
            self.billboard_scratch
                .extend(out.billboards.iter().map(BillboardInstance::from));
            self.sprites.billboards.write(
                &self.device,
                &self.queue,
                bytemuck::cast_slice(&self.billboard_scratch),
            );
            let u = Self::draw_uniforms(
                &camera,
                out.network_group.matrix(),
                out.network_opacity,
                [0.0, out.network_group.scale.x, 1.0, 0.0],
            );
            self.queue.write_buffer(
                &self.sprites.billboard_slot().buffer,
                0,
                bytemuck::bytes_of(&u),
            );
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("stage_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if out.fluid.opacity > 0.0 {
                rpass.set_pipeline(&self.fluid.pipeline);
                rpass.set_bind_group(0, &self.fluid.bind_group, &[]);
                rpass.draw(0..3, 0..1);
            }

            let point_count = out.depth_points.len() as u32;
            if depth_draws > 0 && point_count > 0 {
                rpass.set_pipeline(&self.sprites.point_pipeline);
                rpass.set_vertex_buffer(0, self.sprites.points.buffer.slice(..));
                for slot in &self.sprites.slots[..depth_draws] {
                    rpass.set_bind_group(0, &slot.bind_group, &[]);
                    rpass.draw(0..6, 0..point_count);
                }
            }

            if draw_billboards {
                rpass.set_pipeline(&self.sprites.billboard_pipeline);
                rpass.set_bind_group(0, &self.sprites.billboard_slot().bind_group, &[]);
                rpass.set_vertex_buffer(0, self.sprites.billboards.buffer.slice(..));
                rpass.draw(0..6, 0..self.billboard_scratch.len() as u32);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Model matrix of a depth cloud: group placement, then the cloud's own pose.
fn depth_model(group: &Transform, pose: &Transform) -> Mat4 {
    group.matrix() * pose.matrix()
}
