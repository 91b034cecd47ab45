//! wgpu rendering backend: surface management, streak and backdrop pipelines,
//! and a [`Painter`](stardrift_paint::Painter) implementation that rasterizes
//! recorded frames.

pub mod backdrop;
pub mod context;
pub mod painter;
pub mod streaks;
pub mod viewport;

pub use backdrop::{BACKDROP_SHADER_SOURCE, BackdropPipeline, BackdropUniform};
pub use context::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use painter::WgpuPainter;
pub use streaks::{STREAK_SHADER_SOURCE, StreakPipeline, StreakVertex, ViewportUniform};
pub use viewport::{PhysicalSize, Viewport, ViewportResize};
