//! Instanced solid-color quad renderer.
//!
//! Geometry is a unit quad scaled per instance in the vertex shader; all
//! coordinates are physical pixels, converted to NDC via a viewport
//! uniform. Pipeline and buffers build lazily on first use and rebuild if
//! the surface format changes.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use aster_platform::device::Canvas;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadVertex {
    pos: [f32; 2], // 0..1
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct QuadInstance {
    pub origin: [f32; 2],
    pub extent: [f32; 2],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    size: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

impl QuadInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![1 => Float32x2, 2 => Float32x2, 3 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[derive(Default)]
pub struct QuadRenderer {
    pipeline: Option<wgpu::RenderPipeline>,
    pipeline_format: Option<wgpu::TextureFormat>,

    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl QuadRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the frame with `clear` and draws `quads` over it in one pass.
    pub fn render(&mut self, canvas: &mut Canvas<'_>, clear: wgpu::Color, quads: &[QuadInstance]) {
        self.ensure_pipeline(canvas);
        self.ensure_buffers(canvas, quads.len());

        let (
            Some(pipeline),
            Some(bind_group),
            Some(viewport_ubo),
            Some(quad_vbo),
            Some(quad_ibo),
            Some(instance_vbo),
        ) = (
            self.pipeline.as_ref(),
            self.bind_group.as_ref(),
            self.viewport_ubo.as_ref(),
            self.quad_vbo.as_ref(),
            self.quad_ibo.as_ref(),
            self.instance_vbo.as_ref(),
        )
        else {
            return;
        };

        canvas.queue.write_buffer(
            viewport_ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform {
                size: [canvas.width as f32, canvas.height as f32],
                _pad: [0.0; 2],
            }),
        );

        if !quads.is_empty() {
            canvas.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(quads));
        }

        let mut rpass = canvas.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("aster quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: canvas.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if quads.is_empty() {
            return;
        }

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..quads.len() as u32);
    }

    fn ensure_pipeline(&mut self, canvas: &Canvas<'_>) {
        if self.pipeline_format == Some(canvas.format) && self.pipeline.is_some() {
            return;
        }

        let shader = canvas.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("aster quad shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/quad.wgsl").into()),
        });

        let bind_group_layout =
            canvas
                .device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("aster quad bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(viewport_ubo_size()),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            canvas
                .device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("aster quad pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = canvas
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("aster quad pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[QuadVertex::layout(), QuadInstance::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: canvas.format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        self.pipeline_format = Some(canvas.format);
        self.pipeline = Some(pipeline);

        let viewport_ubo = canvas.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("aster quad viewport ubo"),
            size: u64::from(viewport_ubo_size()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        self.bind_group = Some(canvas.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("aster quad bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        }));
        self.viewport_ubo = Some(viewport_ubo);
    }

    fn ensure_buffers(&mut self, canvas: &Canvas<'_>, instances: usize) {
        if self.quad_vbo.is_none() {
            self.quad_vbo = Some(canvas.device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some("aster quad vbo"),
                    contents: bytemuck::cast_slice(&QUAD_VERTICES),
                    usage: wgpu::BufferUsages::VERTEX,
                },
            ));
            self.quad_ibo = Some(canvas.device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some("aster quad ibo"),
                    contents: bytemuck::cast_slice(&QUAD_INDICES),
                    usage: wgpu::BufferUsages::INDEX,
                },
            ));
        }

        if instances > self.instance_capacity || self.instance_vbo.is_none() {
            let capacity = instances.max(4);
            self.instance_vbo = Some(canvas.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("aster quad instances"),
                size: (capacity * std::mem::size_of::<QuadInstance>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.instance_capacity = capacity;
        }
    }
}

/// Minimum binding size for the viewport uniform; non-zero by construction.
fn viewport_ubo_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64)
        .expect("ViewportUniform has non-zero size")
}
