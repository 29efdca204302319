//! Splat Render Pass
//!
//! Draws the resident splat cloud as instanced camera-facing quads,
//! alpha-blended over the mesh scene. Splats test against the scene depth
//! but do not write it, and are sorted back-to-front each frame along the
//! camera-to-target axis so blending composites correctly.

use glam::Vec3;

use super::cloud::{SplatCloud, SplatPoint};
use crate::camera::CameraRig;
use crate::render::gpu_context::GpuContext;
use crate::render::shaders::SPLAT_SHADER;
use crate::render::uniforms::SplatUniforms;

/// Unit quad corners expanded per instance in the vertex shader.
const QUAD_CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Instanced splat pass over the mesh scene.
pub struct SplatPass {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    uniforms: SplatUniforms,
    quad_vertices: wgpu::Buffer,
    quad_indices: wgpu::Buffer,
    instances: Option<wgpu::Buffer>,
    instance_capacity: usize,
    instance_count: u32,
    /// Reused per-frame scratch for the depth sort.
    sort_scratch: Vec<SplatPoint>,
}

impl SplatPass {
    pub fn new(gpu: &GpuContext) -> Self {
        let uniforms = SplatUniforms::default();
        let uniform_buffer = gpu.create_uniform_buffer("Splat Uniforms", &uniforms);

        let bind_group_layout =
            gpu.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Splat Bind Group Layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Splat Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = gpu
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Splat Shader"),
                source: wgpu::ShaderSource::Wgsl(SPLAT_SHADER.into()),
            });

        let pipeline_layout = gpu
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Splat Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let pipeline = gpu
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Splat Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[
                        wgpu::VertexBufferLayout {
                            array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                            step_mode: wgpu::VertexStepMode::Vertex,
                            attributes: &[wgpu::VertexAttribute {
                                format: wgpu::VertexFormat::Float32x2,
                                offset: 0,
                                shader_location: 0,
                            }],
                        },
                        wgpu::VertexBufferLayout {
                            array_stride: std::mem::size_of::<SplatPoint>() as u64,
                            step_mode: wgpu::VertexStepMode::Instance,
                            attributes: &[
                                wgpu::VertexAttribute {
                                    format: wgpu::VertexFormat::Float32x3,
                                    offset: 0,
                                    shader_location: 1,
                                },
                                wgpu::VertexAttribute {
                                    format: wgpu::VertexFormat::Float32,
                                    offset: 12,
                                    shader_location: 2,
                                },
                                wgpu::VertexAttribute {
                                    format: wgpu::VertexFormat::Unorm8x4,
                                    offset: 16,
                                    shader_location: 3,
                                },
                            ],
                        },
                    ],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: gpu.surface_config.format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
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
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth32Float,
                    depth_write_enabled: false,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        let quad_vertices = gpu.create_vertex_buffer("Splat Quad", &QUAD_CORNERS);
        let quad_indices = gpu.create_index_buffer("Splat Quad Indices", &QUAD_INDICES);

        Self {
            pipeline,
            bind_group,
            uniform_buffer,
            uniforms,
            quad_vertices,
            quad_indices,
            instances: None,
            instance_capacity: 0,
            instance_count: 0,
            sort_scratch: Vec::new(),
        }
    }

    /// Upload the frame's sorted instances and camera uniforms.
    ///
    /// `target` is the orbit pivot; the sort axis runs from the camera
    /// through it, which keeps blending stable while orbiting.
    pub fn prepare(
        &mut self,
        gpu: &GpuContext,
        cloud: &SplatCloud,
        rig: &CameraRig,
        target: Vec3,
    ) {
        self.uniforms
            .set_camera(rig.view_matrix(), rig.projection_matrix());
        gpu.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));

        self.instance_count = cloud.len() as u32;
        if cloud.is_empty() {
            return;
        }

        let to_target = target - rig.position;
        let view_dir = if to_target.length_squared() > 1e-12 {
            to_target.normalize()
        } else {
            rig.forward()
        };

        self.sort_scratch.clear();
        self.sort_scratch.extend_from_slice(cloud.points());
        let origin = rig.position;
        self.sort_scratch.sort_unstable_by(|a, b| {
            let da = (Vec3::from(a.position) - origin).dot(view_dir);
            let db = (Vec3::from(b.position) - origin).dot(view_dir);
            db.total_cmp(&da) // farthest first
        });

        if cloud.len() > self.instance_capacity {
            self.instance_capacity = cloud.len().next_power_of_two();
            self.instances = Some(gpu.create_dynamic_vertex_buffer(
                "Splat Instances",
                (self.instance_capacity * std::mem::size_of::<SplatPoint>()) as u64,
            ));
        }
        if let Some(buffer) = &self.instances {
            gpu.write_buffer(buffer, &self.sort_scratch);
        }
    }

    /// Encode the splat pass over the existing frame contents.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
    ) {
        let Some(instances) = &self.instances else {
            return;
        };
        if self.instance_count == 0 {
            return;
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Splat Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load, // Composite over the mesh scene
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.quad_vertices.slice(..));
        render_pass.set_vertex_buffer(1, instances.slice(..));
        render_pass.set_index_buffer(self.quad_indices.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..self.instance_count);
    }
}
