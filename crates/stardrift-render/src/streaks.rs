//! The streak pipeline: alpha-blended quads for particle trails.
//!
//! Streaks arrive as line segments with a stroke width; on the CPU each one is
//! expanded into a quad (two triangles) so the width survives rasterization.
//! Line-list topology cannot carry per-primitive widths.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use std::num::NonZeroU64;

use stardrift_paint::Rgba;

/// Uniform carrying the logical viewport size for the position-to-clip
/// transform. Padded to 16 bytes for uniform buffer alignment.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ViewportUniform {
    pub size: [f32; 2],
    pub _pad: [f32; 2],
}

impl ViewportUniform {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: [width, height],
            _pad: [0.0; 2],
        }
    }
}

/// One streak quad vertex: logical position plus premultipliable color.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct StreakVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl StreakVertex {
    /// Get the vertex buffer layout for this vertex type.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        use wgpu::{VertexAttribute, VertexFormat};

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<StreakVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x2,
                },
                VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Expand a streak segment into six quad vertices (two triangles).
///
/// The quad is the segment inflated by half the stroke width on each side.
/// Degenerate segments fall back to a horizontal direction so the quad keeps
/// its area instead of collapsing.
pub fn expand_streak(from: Vec2, to: Vec2, width: f32, color: Rgba) -> [StreakVertex; 6] {
    let dir = to - from;
    let dir = if dir.length_squared() > f32::EPSILON {
        dir.normalize()
    } else {
        Vec2::X
    };
    let normal = Vec2::new(-dir.y, dir.x) * (width * 0.5);

    let c = color.to_array();
    let v = |p: Vec2| StreakVertex {
        position: [p.x, p.y],
        color: c,
    };

    let (a, b) = (from - normal, from + normal);
    let (c2, d) = (to + normal, to - normal);

    [v(a), v(b), v(c2), v(a), v(c2), v(d)]
}

/// Alpha-blended pipeline drawing streak quads in logical coordinates.
pub struct StreakPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub viewport_bind_group_layout: wgpu::BindGroupLayout,
}

impl StreakPipeline {
    /// Create a new streak pipeline.
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let viewport_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("viewport-bind-group-layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(16),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("streak-pipeline-layout"),
            bind_group_layouts: &[&viewport_bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("streak-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[StreakVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            viewport_bind_group_layout,
        }
    }
}

/// The WGSL source code for the streak shader.
pub const STREAK_SHADER_SOURCE: &str = r#"
struct ViewportUniform {
    size: vec2<f32>,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> viewport: ViewportUniform;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let x = in.position.x * 2.0 / viewport.size.x - 1.0;
    let y = 1.0 - in.position.y * 2.0 / viewport.size.y;
    out.clip_position = vec4<f32>(x, y, 0.0, 1.0);
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
