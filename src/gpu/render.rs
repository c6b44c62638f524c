use wgpu::{BindGroup, BindGroupLayout, Buffer, Device, RenderPipeline, TextureView};

use super::canvas::CANVAS_FORMAT;

/// Pipelines that paint a frame onto the persistent canvas: the fade layer
/// followed by the instanced squares.
pub struct CanvasPipeline {
    fade_pipeline: RenderPipeline,
    squares_pipeline: RenderPipeline,
    bind_group_layout: BindGroupLayout,
}

impl CanvasPipeline {
    pub fn new(device: &Device) -> Self {
        let fade_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fade-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/fade.wgsl").into()),
        });
        let squares_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("squares-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/squares.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("canvas-bind-group-layout"),
            entries: &[
                // Squares storage buffer (read-only)
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Draw parameters (uniform)
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("canvas-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let fade_pipeline =
            create_blended_pipeline(device, &pipeline_layout, &fade_shader, "fade-pipeline");
        let squares_pipeline =
            create_blended_pipeline(device, &pipeline_layout, &squares_shader, "squares-pipeline");

        Self {
            fade_pipeline,
            squares_pipeline,
            bind_group_layout,
        }
    }

    /// Create a bind group for the given squares and params buffers
    pub fn create_bind_group(
        &self,
        device: &Device,
        squares_buffer: &Buffer,
        params_buffer: &Buffer,
    ) -> BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("canvas-bind-group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: squares_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: params_buffer.as_entire_binding(),
                },
            ],
        })
    }

    /// Fade the canvas, then draw `square_count` squares over it
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        canvas: &TextureView,
        bind_group: &BindGroup,
        square_count: u32,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("canvas-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: canvas,
                resolve_target: None,
                ops: wgpu::Operations {
                    // Never cleared: previous frames fade under the black layer
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_bind_group(0, bind_group, &[]);

        pass.set_pipeline(&self.fade_pipeline);
        pass.draw(0..3, 0..1); // Fullscreen triangle

        if square_count > 0 {
            pass.set_pipeline(&self.squares_pipeline);
            pass.draw(0..6, 0..square_count);
        }
    }
}

fn create_blended_pipeline(
    device: &Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
) -> RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: CANVAS_FORMAT,
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
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
