//! The [`Painter`] trait and a recording implementation for headless use.

use glam::Vec2;

use crate::color::Rgba;
use crate::backdrop::GradientWash;

/// A drawable surface the engine paints one frame into.
///
/// Coordinates are logical units with the origin at the top-left. Implementors
/// must not leak alpha or compositing state between calls: every operation
/// carries its own color/alpha, and a finished frame leaves the surface in its
/// default compositing state.
pub trait Painter {
    /// Fill the whole surface with an opaque color.
    fn fill(&mut self, color: Rgba);

    /// Composite a radial wash over the surface: `wash.color` at the center,
    /// fading linearly to fully transparent at `wash.radius`.
    fn radial_fade(&mut self, wash: &GradientWash);

    /// Stroke one streak segment from `from` to `to`. `width` is in logical
    /// units; `color.a` is the per-streak alpha.
    fn streak(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}

/// One recorded paint operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Fill(Rgba),
    RadialFade(GradientWash),
    Streak {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
}

/// A [`Painter`] that records operations instead of rasterizing them.
///
/// The headless backend: engine tests drive a frame into a recorder and
/// assert on the recorded operations.
#[derive(Debug, Default)]
pub struct DrawRecorder {
    ops: Vec<DrawOp>,
}

impl DrawRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All operations recorded so far, in paint order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Only the streak operations, in paint order.
    pub fn streaks(&self) -> impl Iterator<Item = (Vec2, Vec2, f32, Rgba)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Streak {
                from,
                to,
                width,
                color,
            } => Some((*from, *to, *width, *color)),
            _ => None,
        })
    }

    /// Forget everything recorded, keeping the allocation.
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Painter for DrawRecorder {
    fn fill(&mut self, color: Rgba) {
        self.ops.push(DrawOp::Fill(color));
    }

    fn radial_fade(&mut self, wash: &GradientWash) {
        self.ops.push(DrawOp::RadialFade(wash.clone()));
    }

    fn streak(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.ops.push(DrawOp::Streak {
            from,
            to,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_preserves_order() {
        let mut rec = DrawRecorder::new();
        rec.fill(Rgba::BLACK);
        rec.streak(Vec2::ZERO, Vec2::ONE, 1.0, Rgba::WHITE);

        assert_eq!(rec.ops().len(), 2);
        assert!(matches!(rec.ops()[0], DrawOp::Fill(_)));
        assert!(matches!(rec.ops()[1], DrawOp::Streak { .. }));
    }

    #[test]
    fn test_streaks_filter() {
        let mut rec = DrawRecorder::new();
        rec.fill(Rgba::BLACK);
        rec.streak(Vec2::ZERO, Vec2::ONE, 2.0, Rgba::WHITE.with_alpha(0.5));
        rec.streak(Vec2::ONE, Vec2::ZERO, 3.0, Rgba::WHITE);

        let streaks: Vec<_> = rec.streaks().collect();
        assert_eq!(streaks.len(), 2);
        assert!((streaks[0].2 - 2.0).abs() < f32::EPSILON);
        assert!((streaks[0].3.a - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_clear_empties_recorder() {
        let mut rec = DrawRecorder::new();
        rec.fill(Rgba::BLACK);
        rec.clear();
        assert!(rec.ops().is_empty());
    }
}
