use glam::Vec3;
use noel_core::PointAttributes;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) resolution: [f32; 2],
    pub(crate) time: f32,
    pub(crate) size_multiplier: f32,
}

// Unit quad centred on the origin (two triangles), shared by every sprite.
const QUAD_VERTICES: [f32; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
];

const QUAD_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: (std::mem::size_of::<f32>() * 2) as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: 0,
    }],
};

const POSITION_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<Vec3>() as u64,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &[wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 1,
    }],
};

const ATTRIBUTE_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<PointAttributes>() as u64,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &[
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 2,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32,
            offset: 12,
            shader_location: 3,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32,
            offset: 16,
            shader_location: 4,
        },
    ],
};

// Additive: color * alpha + destination, like glowing lights.
const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// A uniform buffer with its bind group.
pub(crate) struct UniformSlot {
    pub(crate) buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

/// Instance buffers for one point set. Buffers are never empty; `count`
/// may be zero, in which case the set is not drawn.
pub(crate) struct CloudBuffers {
    pub(crate) positions: wgpu::Buffer,
    pub(crate) attributes: Option<wgpu::Buffer>,
    pub(crate) count: u32,
}

impl CloudBuffers {
    pub(crate) fn new(
        device: &wgpu::Device,
        label: &str,
        positions: &[Vec3],
        attributes: Option<&[PointAttributes]>,
    ) -> Self {
        let positions_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (std::mem::size_of_val(positions) as u64).max(16),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let attributes = attributes.filter(|a| !a.is_empty()).map(|a| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(a),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        Self {
            positions: positions_buf,
            attributes,
            count: positions.len() as u32,
        }
    }

    pub(crate) fn upload(&self, queue: &wgpu::Queue, positions: &[Vec3]) {
        if self.count == 0 {
            return;
        }
        queue.write_buffer(&self.positions, 0, bytemuck::cast_slice(positions));
    }

    pub(crate) fn destroy(&self) {
        self.positions.destroy();
        if let Some(a) = &self.attributes {
            a.destroy();
        }
    }
}

pub(crate) struct PointsResources {
    pub(crate) points_pipeline: wgpu::RenderPipeline,
    pub(crate) snow_pipeline: wgpu::RenderPipeline,
    pub(crate) quad_vb: wgpu::Buffer,
    /// Carries the tree rotation in `model`.
    pub(crate) tree_uniforms: UniformSlot,
    /// Identity `model`, used by the star and the snow.
    pub(crate) world_uniforms: UniformSlot,
}

pub(crate) fn create_points_resources(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
) -> PointsResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("points_shader"),
        source: wgpu::ShaderSource::Wgsl(noel_core::POINTS_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("points_bgl"),
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
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("points_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });

    let points_pipeline = super::helpers::make_sprite_pipeline(
        device,
        "points_pipeline",
        &pl,
        &shader,
        ("vs_main", "fs_main"),
        &[QUAD_LAYOUT, POSITION_LAYOUT, ATTRIBUTE_LAYOUT],
        surface_format,
        ADDITIVE,
    );
    let snow_pipeline = super::helpers::make_sprite_pipeline(
        device,
        "snow_pipeline",
        &pl,
        &shader,
        ("vs_snow", "fs_snow"),
        &[QUAD_LAYOUT, POSITION_LAYOUT],
        surface_format,
        wgpu::BlendState::ALPHA_BLENDING,
    );

    let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("quad_vb"),
        contents: bytemuck::cast_slice(&QUAD_VERTICES),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let uniform_slot = |label: &str| {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<PointUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        UniformSlot { buffer, bind_group }
    };

    PointsResources {
        points_pipeline,
        snow_pipeline,
        quad_vb,
        tree_uniforms: uniform_slot("tree_uniforms"),
        world_uniforms: uniform_slot("world_uniforms"),
    }
}

impl PointsResources {
    pub(crate) fn destroy(&self) {
        self.quad_vb.destroy();
        self.tree_uniforms.buffer.destroy();
        self.world_uniforms.buffer.destroy();
    }
}
