//! The particle data type.

use glam::Vec2;

/// One star in the field.
///
/// Particles live in a contiguous arena owned by the engine; they are never
/// dropped, only repositioned (recycled) when they leave the inflated bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position in logical surface units. Unbounded while in flight; only
    /// recycling pulls it back.
    pub pos: Vec2,
    /// Simulated distance from the camera in `(0.0, 1.0]` after creation or
    /// recycling; smaller is farther. Grows by the drift constant each frame.
    pub depth: f32,
}

impl Particle {
    pub const fn new(pos: Vec2, depth: f32) -> Self {
        Self { pos, depth }
    }
}
