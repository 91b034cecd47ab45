//! The backdrop pipeline: a fullscreen pass compositing two radial washes
//! over the cleared base color.

use bytemuck::{Pod, Zeroable};
use std::num::NonZeroU64;

use stardrift_paint::GradientWash;

/// Uniform carrying both washes. Each wash packs its relative center and
/// radius into one vec4 alongside its color.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct BackdropUniform {
    pub wash0_center_radius: [f32; 4],
    pub wash0_color: [f32; 4],
    pub wash1_center_radius: [f32; 4],
    pub wash1_color: [f32; 4],
}

impl BackdropUniform {
    /// Pack up to two washes; missing slots get a zero radius, which the
    /// shader treats as fully transparent.
    pub fn from_washes(washes: &[GradientWash]) -> Self {
        let pack = |wash: Option<&GradientWash>| -> ([f32; 4], [f32; 4]) {
            match wash {
                Some(w) => (
                    [w.center.x, w.center.y, w.radius, 0.0],
                    w.color.to_array(),
                ),
                None => ([0.0; 4], [0.0; 4]),
            }
        };

        let (cr0, c0) = pack(washes.first());
        let (cr1, c1) = pack(washes.get(1));
        Self {
            wash0_center_radius: cr0,
            wash0_color: c0,
            wash1_center_radius: cr1,
            wash1_color: c1,
        }
    }
}

/// Fullscreen-triangle pipeline blending the washes over the clear color.
pub struct BackdropPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub backdrop_bind_group_layout: wgpu::BindGroupLayout,
}

impl BackdropPipeline {
    /// Create a new backdrop pipeline.
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let backdrop_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("backdrop-bind-group-layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(64),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("backdrop-pipeline-layout"),
            bind_group_layouts: &[&backdrop_bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("backdrop-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[],
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
            backdrop_bind_group_layout,
        }
    }
}

/// The WGSL source code for the backdrop shader.
///
/// The vertex stage emits a single fullscreen triangle from the vertex index;
/// the fragment stage evaluates both washes in relative UV space, each fading
/// linearly from its color at the center to transparent at its radius.
pub const BACKDROP_SHADER_SOURCE: &str = r#"
struct BackdropUniform {
    wash0_center_radius: vec4<f32>,
    wash0_color: vec4<f32>,
    wash1_center_radius: vec4<f32>,
    wash1_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> backdrop: BackdropUniform;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) idx: u32) -> VertexOutput {
    var out: VertexOutput;
    let corner = vec2<f32>(f32((idx << 1u) & 2u), f32(idx & 2u));
    out.clip_position = vec4<f32>(corner * 2.0 - 1.0, 0.0, 1.0);
    out.uv = vec2<f32>(corner.x, 1.0 - corner.y);
    return out;
}

fn wash(uv: vec2<f32>, center_radius: vec4<f32>, color: vec4<f32>) -> vec4<f32> {
    let radius = max(center_radius.z, 1e-6);
    let d = distance(uv, center_radius.xy);
    let fade = clamp(1.0 - d / radius, 0.0, 1.0);
    return vec4<f32>(color.rgb, color.a * fade);
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let a = wash(in.uv, backdrop.wash0_center_radius, backdrop.wash0_color);
    let b = wash(in.uv, backdrop.wash1_center_radius, backdrop.wash1_color);
    let rgb = mix(a.rgb, b.rgb, b.a);
    let alpha = a.a + b.a * (1.0 - a.a);
    return vec4<f32>(rgb, alpha);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use stardrift_paint::Rgba;

    #[test]
    fn test_backdrop_uniform_size() {
        // Four vec4s.
        assert_eq!(std::mem::size_of::<BackdropUniform>(), 64);
    }

    #[test]
    fn test_from_washes_packs_both() {
        let washes = [
            GradientWash {
                center: Vec2::new(0.2, 0.2),
                radius: 0.6,
                color: Rgba::new(0.1, 0.2, 0.8, 0.12),
            },
            GradientWash {
                center: Vec2::new(0.8, 0.9),
                radius: 0.5,
                color: Rgba::new(0.5, 0.2, 0.7, 0.10),
            },
        ];
        let uniform = BackdropUniform::from_washes(&washes);

        assert_eq!(uniform.wash0_center_radius, [0.2, 0.2, 0.6, 0.0]);
        assert_eq!(uniform.wash0_color, [0.1, 0.2, 0.8, 0.12]);
        assert_eq!(uniform.wash1_center_radius, [0.8, 0.9, 0.5, 0.0]);
        assert_eq!(uniform.wash1_color, [0.5, 0.2, 0.7, 0.10]);
    }

    #[test]
    fn test_from_washes_missing_slot_is_transparent() {
        let uniform = BackdropUniform::from_washes(&[]);
        assert_eq!(uniform.wash0_color[3], 0.0);
        assert_eq!(uniform.wash1_color[3], 0.0);
    }

    #[test]
    fn test_shader_entry_points() {
        assert!(BACKDROP_SHADER_SOURCE.contains("fn vs_main"));
        assert!(BACKDROP_SHADER_SOURCE.contains("fn fs_main"));
    }
}
