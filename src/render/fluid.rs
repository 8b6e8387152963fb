use super::helpers::{uniform_layout, uniform_slot};
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FluidUniforms {
    pub(crate) resolution: [f32; 2],
    pub(crate) time: f32,
    pub(crate) opacity: f32,
    /// Apparent size of the receding backdrop plane, 1 at rest.
    pub(crate) scale: f32,
    pub(crate) _pad: [f32; 3],
}

pub(crate) struct FluidResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_fluid_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> FluidResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("fluid_shader"),
        source: wgpu::ShaderSource::Wgsl(super::FLUID_WGSL.into()),
    });
    let bgl = uniform_layout(
        device,
        "fluid_bgl",
        wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
    );
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("fluid_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("fluid_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_fullscreen"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_fluid"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let (uniform_buffer, bind_group) = uniform_slot(
        device,
        &bgl,
        "fluid_uniforms",
        std::mem::size_of::<FluidUniforms>() as u64,
    );

    FluidResources {
        pipeline,
        uniform_buffer,
        bind_group,
    }
}
