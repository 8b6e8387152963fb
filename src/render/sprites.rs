use super::helpers::{additive_blend, uniform_layout, uniform_slot, InstanceBuffer};
use crate::constants::MAX_DEPTH_DRAWS;
use scrollscape_core::{Billboard, DepthPoint};
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BillboardInstance {
    pub(crate) pos_scale: [f32; 4],
    pub(crate) rotation: [f32; 4],
}

impl From<&Billboard> for BillboardInstance {
    fn from(b: &Billboard) -> Self {
        Self {
            pos_scale: [b.position.x, b.position.y, b.position.z, b.scale],
            rotation: b.rotation.to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct DrawUniforms {
    pub(crate) view: [f32; 16],
    pub(crate) proj: [f32; 16],
    pub(crate) model: [f32; 16],
    pub(crate) tint: [f32; 4],
    pub(crate) params: [f32; 4],
    pub(crate) glow_core: [f32; 4],
    pub(crate) glow_edge: [f32; 4],
}

pub(crate) struct DrawSlot {
    pub(crate) buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) struct SpriteResources {
    pub(crate) point_pipeline: wgpu::RenderPipeline,
    pub(crate) billboard_pipeline: wgpu::RenderPipeline,
    /// One per depth cloud, then one for the billboards.
    pub(crate) slots: Vec<DrawSlot>,
    pub(crate) points: InstanceBuffer,
    pub(crate) billboards: InstanceBuffer,
}

impl SpriteResources {
    pub(crate) fn billboard_slot(&self) -> &DrawSlot {
        &self.slots[MAX_DEPTH_DRAWS]
    }
}

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

fn sprite_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    vs_entry: &str,
    stride: u64,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs_entry),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: stride,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &INSTANCE_ATTRS,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..wgpu::PrimitiveState::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_sprite"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(additive_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

pub(crate) fn create_sprite_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    point_capacity: u64,
    billboard_capacity: u64,
) -> SpriteResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("points_shader"),
        source: wgpu::ShaderSource::Wgsl(super::POINTS_WGSL.into()),
    });
    let bgl = uniform_layout(
        device,
        "sprite_bgl",
        wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
    );
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("sprite_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let point_pipeline = sprite_pipeline(
        device,
        &pl,
        &shader,
        "depth_points_pipeline",
        "vs_point",
        std::mem::size_of::<DepthPoint>() as u64,
        color_format,
    );
    let billboard_pipeline = sprite_pipeline(
        device,
        &pl,
        &shader,
        "billboard_pipeline",
        "vs_billboard",
        std::mem::size_of::<BillboardInstance>() as u64,
        color_format,
    );
    let slots = (0..=MAX_DEPTH_DRAWS)
        .map(|i| {
            let label = if i == MAX_DEPTH_DRAWS {
                "billboard_draw"
            } else {
                "depth_draw"
            };
            let (buffer, bind_group) = uniform_slot(
                device,
                &bgl,
                label,
                std::mem::size_of::<DrawUniforms>() as u64,
            );
            DrawSlot { buffer, bind_group }
        })
        .collect();

    SpriteResources {
        point_pipeline,
        billboard_pipeline,
        slots,
        points: InstanceBuffer::new(
            device,
            "depth_points",
            std::mem::size_of::<DepthPoint>() as u64,
            point_capacity,
        ),
        billboards: InstanceBuffer::new(
            device,
            "billboards",
            std::mem::size_of::<BillboardInstance>() as u64,
            billboard_capacity,
        ),
    }
}
