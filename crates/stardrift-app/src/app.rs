//! Window creation and event handling via winit.
//!
//! Provides [`StardriftApp`] which implements winit's [`ApplicationHandler`]
//! trait: it owns the window, the GPU context, the field engine, and the
//! frame driver, and routes window events between them.

use std::sync::Arc;

use stardrift_config::{Config, FieldConfig};
use stardrift_field::{
    FieldBounds, FieldEngine, FieldTuning, FrameDriver, FrameScheduler,
};
use stardrift_input::PointerTracker;
use stardrift_paint::Rgba;
use stardrift_render::{
    RenderContext, SurfaceError, Viewport, WgpuPainter, init_render_context_blocking,
};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{TouchPhase, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId};

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Schedules frames by asking the window for a redraw.
struct WindowScheduler(Arc<Window>);

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) {
        self.0.request_redraw();
    }
}

/// Build engine tuning from the field config. Config values come from a
/// user-edited file, so every bad value is logged and replaced by the
/// engine default instead of reaching the engine; the simulation assumes
/// `0 < min_depth <= 1` and finite tunables.
fn tuning_from_config(field: &FieldConfig) -> FieldTuning {
    let defaults = FieldTuning::default();

    let star_color = match Rgba::from_hex(&field.star_color) {
        Some(color) => color,
        None => {
            warn!(color = %field.star_color, "invalid star color in config, using white");
            Rgba::WHITE
        }
    };

    FieldTuning {
        star_color,
        star_size: checked_tunable(
            "star_size",
            field.star_size,
            defaults.star_size,
            |v| v.is_finite() && v > 0.0,
        ),
        min_depth: checked_tunable(
            "min_depth",
            field.min_depth,
            defaults.min_depth,
            |v| v > 0.0 && v <= 1.0,
        ),
        overflow_margin: checked_tunable(
            "overflow_margin",
            field.overflow_margin,
            defaults.overflow_margin,
            |v| v.is_finite() && v >= 0.0,
        ),
        drift: checked_tunable("drift", field.drift, defaults.drift, f32::is_finite),
    }
}

/// A tunable that passes `valid`, or its default with a warning.
fn checked_tunable(name: &str, value: f32, fallback: f32, valid: impl Fn(f32) -> bool) -> f32 {
    if valid(value) {
        value
    } else {
        warn!(setting = name, value, fallback, "invalid field setting in config, using default");
        fallback
    }
}

/// Application state that manages the window, GPU context, and field engine.
pub struct StardriftApp {
    /// The window handle, wrapped in `Arc` for sharing with the renderer.
    window: Option<Arc<Window>>,
    /// GPU context owning device, queue, and surface.
    gpu: Option<RenderContext>,
    /// The wgpu painter frames are flushed through.
    painter: Option<WgpuPainter>,
    /// Cross-platform viewport that normalizes resize/DPI behavior.
    viewport: Viewport,
    /// The particle field; created once the window dimensions are known.
    engine: Option<FieldEngine>,
    /// Frame driver pacing the animation off redraw events.
    driver: FrameDriver,
    /// Pointer position tracker feeding deltas to the engine.
    tracker: PointerTracker,
    /// Application configuration.
    config: Config,
}

impl StardriftApp {
    /// Creates a new `StardriftApp` from a [`Config`]. The window, GPU, and
    /// engine come to life in [`resumed`](ApplicationHandler::resumed).
    pub fn with_config(config: Config) -> Self {
        Self {
            window: None,
            gpu: None,
            painter: None,
            viewport: Viewport::new(config.window.width, config.window.height, 1.0),
            engine: None,
            driver: FrameDriver::new(),
            tracker: PointerTracker::new(),
            config,
        }
    }

    /// Convert a physical pointer position to logical field coordinates.
    fn to_logical(&self, x: f64, y: f64) -> (f64, f64) {
        let scale = self.viewport.scale_factor();
        (x / scale, y / scale)
    }

    /// Propagate new viewport dimensions to the GPU surface and the engine.
    fn apply_resize(&mut self, resize: stardrift_render::ViewportResize) {
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(resize.physical.width, resize.physical.height);
        }
        if let Some(engine) = &mut self.engine {
            engine.resize(
                resize.logical_width as f32,
                resize.logical_height as f32,
                resize.scale_factor as f32,
            );
        }
        info!(
            width = resize.physical.width,
            height = resize.physical.height,
            scale = resize.scale_factor,
            "window resized"
        );
    }
}

impl ApplicationHandler for StardriftApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = window_attributes_from_config(&self.config);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let scale_factor = window.scale_factor();
        let inner_size = window.inner_size();
        self.viewport = Viewport::new(inner_size.width, inner_size.height, scale_factor);
        info!(
            width = inner_size.width,
            height = inner_size.height,
            scale = scale_factor,
            "viewport initialized"
        );

        match init_render_context_blocking(window.clone()) {
            Ok(ctx) => {
                self.painter = Some(WgpuPainter::new(&ctx.device, ctx.surface_format()));
                self.gpu = Some(ctx);
            }
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        }

        let seed = self.config.field.seed.unwrap_or_else(rand::random);
        info!(seed, "seeding field");
        let bounds = FieldBounds::new(
            self.viewport.logical_width() as f32,
            self.viewport.logical_height() as f32,
            scale_factor as f32,
        );
        self.engine = Some(FieldEngine::seeded_with_tuning(
            bounds,
            tuning_from_config(&self.config.field),
            seed,
        ));

        self.driver.start(&mut WindowScheduler(window.clone()));
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                self.driver.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(resize) = self
                    .viewport
                    .handle_resize(new_size.width, new_size.height)
                {
                    self.apply_resize(resize);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                // Get the new physical size from the window after the scale change
                if let Some(window) = &self.window {
                    let new_inner = window.inner_size();
                    if let Some(resize) = self.viewport.handle_scale_factor_changed(
                        scale_factor,
                        new_inner.width,
                        new_inner.height,
                    ) {
                        self.apply_resize(resize);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = self.to_logical(position.x, position.y);
                if let Some((delta, source)) = self.tracker.on_cursor_moved(x, y)
                    && let Some(engine) = &mut self.engine
                {
                    engine.pointer_delta(delta, source);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.tracker.on_cursor_left();
            }
            WindowEvent::Touch(touch) => match touch.phase {
                TouchPhase::Started | TouchPhase::Moved => {
                    let (x, y) = self.to_logical(touch.location.x, touch.location.y);
                    if let Some((delta, source)) = self.tracker.on_touch_moved(touch.id, x, y)
                        && let Some(engine) = &mut self.engine
                    {
                        engine.pointer_delta(delta, source);
                    }
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    self.tracker.on_touch_ended(touch.id);
                }
            },
            WindowEvent::RedrawRequested => {
                let (Some(window), Some(gpu), Some(painter), Some(engine)) = (
                    &self.window,
                    &self.gpu,
                    &mut self.painter,
                    &mut self.engine,
                ) else {
                    return;
                };

                let mut scheduler = WindowScheduler(window.clone());
                self.driver.frame(engine, painter, &mut scheduler);

                let logical_width = self.viewport.logical_width() as f32;
                let logical_height = self.viewport.logical_height() as f32;
                match painter.flush(gpu, logical_width, logical_height) {
                    Ok(()) => {}
                    Err(SurfaceError::Timeout) => {
                        warn!("surface timeout, skipping frame");
                    }
                    Err(SurfaceError::Lost) => {
                        warn!("surface lost, skipping frame");
                    }
                    Err(SurfaceError::OutOfMemory) => {
                        error!("GPU out of memory");
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }
}
