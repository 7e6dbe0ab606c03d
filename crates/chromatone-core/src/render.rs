//! wgpu pipelines for the composed scene: one line-list pass for the ring,
//! triad, drop lines and grid, then instanced sphere impostors on top.

use crate::gpu::{self, Globals, LineVertex, SphereInstance};
use crate::scene::{EmotionScene, SceneFrame};
use crate::state::Camera;
use wgpu::util::DeviceExt;

const INITIAL_SPHERES: usize = 1024;
const INITIAL_LINE_VERTICES: usize = 512;

pub struct SceneRenderer {
    sphere_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    sphere_vb: wgpu::Buffer,
    sphere_capacity: usize,
    line_vb: wgpu::Buffer,
    line_capacity: usize,
    spheres: Vec<SphereInstance>,
    lines: Vec<LineVertex>,
    clear: wgpu::Color,
    encode_srgb: bool,
}

fn vertex_buffer(device: &wgpu::Device, label: &str, bytes: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: bytes as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl SceneRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, background: [f32; 3]) -> Self {
        let encode_srgb = !format.is_srgb();
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
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
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Quad corners for two triangles
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let targets = [Some(wgpu::ColorTargetState {
            format,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            write_mask: wgpu::ColorWrites::ALL,
        })];

        let sphere_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::SCENE_WGSL.into()),
        });
        let sphere_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: per-sphere data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<SphereInstance>() as u64,
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
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 32,
                        shader_location: 4,
                    },
                ],
            },
        ];
        let sphere_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sphere_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &sphere_shader,
                entry_point: Some("vs_main"),
                buffers: &sphere_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &sphere_shader,
                entry_point: Some("fs_main"),
                targets: &targets,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let line_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lines_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::LINES_WGSL.into()),
        });
        let line_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }];
        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &line_shader,
                entry_point: Some("vs_main"),
                buffers: &line_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &line_shader,
                entry_point: Some("fs_main"),
                targets: &targets,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let encode = |c: f32| (if encode_srgb { c.powf(1.0 / 2.2) } else { c }) as f64;
        log::info!("[render] pipelines ready (format {:?}, manual sRGB {})", format, encode_srgb);
        Self {
            sphere_pipeline,
            line_pipeline,
            globals_buffer,
            bind_group,
            quad_vb,
            sphere_vb: vertex_buffer(
                device,
                "sphere_vb",
                std::mem::size_of::<SphereInstance>() * INITIAL_SPHERES,
            ),
            sphere_capacity: INITIAL_SPHERES,
            line_vb: vertex_buffer(
                device,
                "line_vb",
                std::mem::size_of::<LineVertex>() * INITIAL_LINE_VERTICES,
            ),
            line_capacity: INITIAL_LINE_VERTICES,
            spheres: Vec::with_capacity(INITIAL_SPHERES),
            lines: Vec::with_capacity(INITIAL_LINE_VERTICES),
            clear: wgpu::Color {
                r: encode(background[0]),
                g: encode(background[1]),
                b: encode(background[2]),
                a: 1.0,
            },
            encode_srgb,
        }
    }

    /// Pack the frame and upload it, growing buffers when needed.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &EmotionScene,
        frame: &SceneFrame,
        camera: &Camera,
    ) {
        let globals = Globals::new(camera, scene.layout(), frame.elapsed, self.encode_srgb);
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        gpu::build_line_vertices(scene.layout(), frame.rotation, &mut self.lines);
        gpu::build_sphere_instances(frame, scene.backdrop(), camera, &mut self.spheres);

        if self.lines.len() > self.line_capacity {
            self.line_capacity = self.lines.len().next_power_of_two();
            self.line_vb = vertex_buffer(
                device,
                "line_vb",
                std::mem::size_of::<LineVertex>() * self.line_capacity,
            );
        }
        if self.spheres.len() > self.sphere_capacity {
            self.sphere_capacity = self.spheres.len().next_power_of_two();
            self.sphere_vb = vertex_buffer(
                device,
                "sphere_vb",
                std::mem::size_of::<SphereInstance>() * self.sphere_capacity,
            );
        }
        queue.write_buffer(&self.line_vb, 0, bytemuck::cast_slice(&self.lines));
        queue.write_buffer(&self.sphere_vb, 0, bytemuck::cast_slice(&self.spheres));
    }

    pub fn draw(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_bind_group(0, &self.bind_group, &[]);

        rpass.set_pipeline(&self.line_pipeline);
        rpass.set_vertex_buffer(0, self.line_vb.slice(..));
        rpass.draw(0..self.lines.len() as u32, 0..1);

        rpass.set_pipeline(&self.sphere_pipeline);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        rpass.set_vertex_buffer(1, self.sphere_vb.slice(..));
        rpass.draw(0..6, 0..self.spheres.len() as u32);
    }
}
