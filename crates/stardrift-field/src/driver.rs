//! Frame scheduling: one step + one render per delivered frame.

use stardrift_paint::Painter;
use tracing::debug;

use crate::engine::FieldEngine;
use rand::Rng;

/// Requests delivery of the next frame callback.
///
/// The windowing host implements this over `Window::request_redraw`; tests
/// implement it with a counter.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Drives the engine one frame at a time through a [`FrameScheduler`].
///
/// The driver never runs a timer of its own; it only reacts to delivered
/// frames and re-requests the next one, so the host's vsync (or test loop)
/// sets the pace.
#[derive(Debug)]
pub struct FrameDriver {
    running: bool,
    frame_count: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            running: false,
            frame_count: 0,
        }
    }

    /// Begin animating: marks the driver running and requests the first
    /// frame. Idempotent; a second call while running requests nothing.
    pub fn start(&mut self, scheduler: &mut impl FrameScheduler) {
        if self.running {
            return;
        }
        self.running = true;
        debug!("frame driver started");
        scheduler.request_frame();
    }

    /// Stop animating. Frames already requested will be delivered but
    /// [`frame`](Self::frame) ignores them while stopped.
    pub fn stop(&mut self) {
        if self.running {
            debug!(frames = self.frame_count, "frame driver stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames stepped and rendered since creation.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Handle one delivered frame: step the engine, render it, and request
    /// the next frame. A no-op while stopped.
    pub fn frame<R: Rng>(
        &mut self,
        engine: &mut FieldEngine<R>,
        painter: &mut impl Painter,
        scheduler: &mut impl FrameScheduler,
    ) {
        if !self.running {
            return;
        }
        engine.step();
        engine.render(painter);
        self.frame_count += 1;
        scheduler.request_frame();
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}
