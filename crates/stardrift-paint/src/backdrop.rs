//! The backdrop painted under the particle field each frame.

use glam::Vec2;

use crate::color::Rgba;
use crate::painter::Painter;

/// A radial gradient wash: `color` (including its low alpha) at `center`,
/// fading linearly to fully transparent at `radius`.
///
/// `center` and `radius` are fractions of the surface size, so the wash keeps
/// its relative position across resizes.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientWash {
    /// Center as a fraction of surface dimensions, `(0,0)` top-left.
    pub center: Vec2,
    /// Radius as a fraction of the larger surface dimension.
    pub radius: f32,
    /// Wash hue; the alpha is the peak intensity at the center.
    pub color: Rgba,
}

/// The full backdrop: a solid base fill plus two gradient washes of distinct
/// hue at fixed relative positions.
#[derive(Clone, Debug, PartialEq)]
pub struct Backdrop {
    pub base: Rgba,
    pub washes: [GradientWash; 2],
}

impl Default for Backdrop {
    fn default() -> Self {
        Self {
            // Near-black navy base.
            base: Rgba::new(0.016, 0.023, 0.047, 1.0),
            washes: [
                // Cool blue wash, upper left.
                GradientWash {
                    center: Vec2::new(0.22, 0.18),
                    radius: 0.65,
                    color: Rgba::new(0.23, 0.38, 0.85, 0.12),
                },
                // Violet wash, lower right.
                GradientWash {
                    center: Vec2::new(0.80, 0.86),
                    radius: 0.60,
                    color: Rgba::new(0.55, 0.27, 0.78, 0.10),
                },
            ],
        }
    }
}

impl Backdrop {
    /// Paint the base fill and both washes, in that order.
    pub fn paint(&self, painter: &mut impl Painter) {
        painter.fill(self.base);
        for wash in &self.washes {
            painter.radial_fade(wash);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::{DrawOp, DrawRecorder};

    #[test]
    fn test_paint_order_is_fill_then_washes() {
        let backdrop = Backdrop::default();
        let mut rec = DrawRecorder::new();
        backdrop.paint(&mut rec);

        assert_eq!(rec.ops().len(), 3);
        assert!(matches!(rec.ops()[0], DrawOp::Fill(_)));
        assert!(matches!(rec.ops()[1], DrawOp::RadialFade(_)));
        assert!(matches!(rec.ops()[2], DrawOp::RadialFade(_)));
    }

    #[test]
    fn test_washes_have_distinct_hues_and_low_alpha() {
        let backdrop = Backdrop::default();
        let [a, b] = &backdrop.washes;

        assert_ne!((a.color.r, a.color.g, a.color.b), (b.color.r, b.color.g, b.color.b));
        assert!(a.color.a < 0.2 && b.color.a < 0.2);
    }

    #[test]
    fn test_wash_positions_are_relative() {
        let backdrop = Backdrop::default();
        for wash in &backdrop.washes {
            assert!((0.0..=1.0).contains(&wash.center.x));
            assert!((0.0..=1.0).contains(&wash.center.y));
        }
    }

    #[test]
    fn test_base_is_opaque() {
        assert!((Backdrop::default().base.a - 1.0).abs() < f32::EPSILON);
    }
}
