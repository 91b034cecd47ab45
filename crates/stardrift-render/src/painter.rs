//! The wgpu [`Painter`](stardrift_paint::Painter) backend.
//!
//! Paint calls are buffered on the CPU into a [`FramePlan`] during the
//! engine's render pass, then [`WgpuPainter::flush`] uploads the plan and
//! draws it: a cleared base color, the fullscreen backdrop washes, and one
//! alpha-blended quad batch for all streaks.

use glam::Vec2;

use stardrift_paint::{GradientWash, Painter, Rgba};

use crate::backdrop::{BACKDROP_SHADER_SOURCE, BackdropPipeline, BackdropUniform};
use crate::context::{RenderContext, SurfaceError};
use crate::streaks::{
    STREAK_SHADER_SOURCE, StreakPipeline, StreakVertex, ViewportUniform, expand_streak,
};

/// One frame's worth of buffered paint operations.
///
/// Exists separately from the GPU state so the buffering logic is testable
/// without a device.
#[derive(Debug, Default)]
pub(crate) struct FramePlan {
    pub clear_color: Option<Rgba>,
    pub washes: Vec<GradientWash>,
    pub vertices: Vec<StreakVertex>,
}

impl FramePlan {
    fn reset(&mut self) {
        self.clear_color = None;
        self.washes.clear();
        self.vertices.clear();
    }
}

impl Painter for FramePlan {
    fn fill(&mut self, color: Rgba) {
        // A fill restarts the frame; everything painted before it is covered.
        self.reset();
        self.clear_color = Some(color);
    }

    fn radial_fade(&mut self, wash: &GradientWash) {
        self.washes.push(wash.clone());
    }

    fn streak(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.vertices
            .extend_from_slice(&expand_streak(from, to, width, color));
    }
}

/// GPU painter: pipelines, uniform buffers, and a growable vertex buffer.
pub struct WgpuPainter {
    plan: FramePlan,
    backdrop_pipeline: BackdropPipeline,
    streak_pipeline: StreakPipeline,
    backdrop_uniform: wgpu::Buffer,
    backdrop_bind_group: wgpu::BindGroup,
    viewport_uniform: wgpu::Buffer,
    viewport_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
}

/// Initial vertex buffer capacity, in vertices. Grows on demand.
const INITIAL_VERTEX_CAPACITY: usize = 4096;

impl WgpuPainter {
    /// Create the painter's pipelines and buffers for the given surface format.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let backdrop_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("backdrop-shader"),
            source: wgpu::ShaderSource::Wgsl(BACKDROP_SHADER_SOURCE.into()),
        });
        let streak_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("streak-shader"),
            source: wgpu::ShaderSource::Wgsl(STREAK_SHADER_SOURCE.into()),
        });

        let backdrop_pipeline = BackdropPipeline::new(device, &backdrop_shader, surface_format);
        let streak_pipeline = StreakPipeline::new(device, &streak_shader, surface_format);

        let backdrop_uniform = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("backdrop-uniform"),
            size: std::mem::size_of::<BackdropUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let backdrop_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("backdrop-bind-group"),
            layout: &backdrop_pipeline.backdrop_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: backdrop_uniform.as_entire_binding(),
            }],
        });

        let viewport_uniform = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("viewport-uniform"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let viewport_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("viewport-bind-group"),
            layout: &streak_pipeline.viewport_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_uniform.as_entire_binding(),
            }],
        });

        let vertex_buffer = create_vertex_buffer(device, INITIAL_VERTEX_CAPACITY);

        Self {
            plan: FramePlan::default(),
            backdrop_pipeline,
            streak_pipeline,
            backdrop_uniform,
            backdrop_bind_group,
            viewport_uniform,
            viewport_bind_group,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
        }
    }

    /// Upload the buffered frame and draw it to the current surface texture.
    ///
    /// `logical_width`/`logical_height` are the dimensions the streak
    /// coordinates were painted in.
    pub fn flush(
        &mut self,
        ctx: &RenderContext,
        logical_width: f32,
        logical_height: f32,
    ) -> Result<(), SurfaceError> {
        let surface_texture = ctx.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        ctx.queue.write_buffer(
            &self.viewport_uniform,
            0,
            bytemuck::bytes_of(&ViewportUniform::new(logical_width, logical_height)),
        );
        ctx.queue.write_buffer(
            &self.backdrop_uniform,
            0,
            bytemuck::bytes_of(&BackdropUniform::from_washes(&self.plan.washes)),
        );

        // Grow-or-reuse: recreate the vertex buffer only when the frame
        // outgrows it.
        if self.plan.vertices.len() > self.vertex_capacity {
            self.vertex_capacity = self.plan.vertices.len().next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&ctx.device, self.vertex_capacity);
        }
        if !self.plan.vertices.is_empty() {
            ctx.queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&self.plan.vertices),
            );
        }

        let clear_color = self.plan.clear_color.unwrap_or(Rgba::BLACK);
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("starfield-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(to_wgpu_color(clear_color)),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if !self.plan.washes.is_empty() {
                pass.set_pipeline(&self.backdrop_pipeline.pipeline);
                pass.set_bind_group(0, &self.backdrop_bind_group, &[]);
                pass.draw(0..3, 0..1);
            }

            if !self.plan.vertices.is_empty() {
                pass.set_pipeline(&self.streak_pipeline.pipeline);
                pass.set_bind_group(0, &self.viewport_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.draw(0..self.plan.vertices.len() as u32, 0..1);
            }
        }

        ctx.queue.submit([encoder.finish()]);
        surface_texture.present();

        self.plan.reset();
        Ok(())
    }
}

impl Painter for WgpuPainter {
    fn fill(&mut self, color: Rgba) {
        self.plan.fill(color);
    }

    fn radial_fade(&mut self, wash: &GradientWash) {
        self.plan.radial_fade(wash);
    }

    fn streak(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.plan.streak(from, to, width, color);
    }
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("streak-vertices"),
        size: (capacity * std::mem::size_of::<StreakVertex>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn to_wgpu_color(color: Rgba) -> wgpu::Color {
    wgpu::Color {
        r: f64::from(color.r),
        g: f64::from(color.g),
        b: f64::from(color.b),
        a: f64::from(color.a),
    }
}
