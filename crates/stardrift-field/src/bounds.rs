//! Logical surface dimensions the field lives in.

use glam::Vec2;

use crate::constants::PARTICLE_DENSITY;

/// Minimum logical dimension; zero-size windows exist transiently on Wayland.
pub const MIN_DIMENSION: f32 = 1.0;

/// The logical width/height of the drawing surface plus the device scale
/// factor. All particle placement and recycling bounds derive from this;
/// stroke widths are multiplied by the scale factor so streaks keep their
/// apparent size on high-DPI displays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldBounds {
    width: f32,
    height: f32,
    scale: f32,
}

impl FieldBounds {
    /// Create bounds, clamping dimensions to a 1×1 minimum.
    pub fn new(width: f32, height: f32, scale: f32) -> Self {
        Self {
            width: width.max(MIN_DIMENSION),
            height: height.max(MIN_DIMENSION),
            scale,
        }
    }

    /// Replace the dimensions and scale, with the same clamping as [`new`](Self::new).
    pub fn set(&mut self, width: f32, height: f32, scale: f32) {
        *self = Self::new(width, height, scale);
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The center the radial drift term pushes away from.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// How many particles this surface carries: `(width + height) / 5`.
    pub fn particle_count(&self) -> usize {
        ((self.width + self.height) / PARTICLE_DENSITY) as usize
    }

    /// Whether a position lies inside the bounds inflated by `margin` on all
    /// sides. Particles outside get recycled.
    pub fn contains_with_margin(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.x <= self.width + margin
            && pos.y >= -margin
            && pos.y <= self.height + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_count_derivation() {
        let bounds = FieldBounds::new(1000.0, 500.0, 1.0);
        assert_eq!(bounds.particle_count(), 300);
    }

    #[test]
    fn test_zero_size_clamped() {
        let bounds = FieldBounds::new(0.0, 0.0, 1.0);
        assert!((bounds.width() - 1.0).abs() < f32::EPSILON);
        assert!((bounds.height() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_center() {
        let bounds = FieldBounds::new(800.0, 600.0, 1.0);
        assert_eq!(bounds.center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_margin_containment() {
        let bounds = FieldBounds::new(800.0, 600.0, 1.0);
        assert!(bounds.contains_with_margin(Vec2::new(-100.0, 0.0), 100.0));
        assert!(bounds.contains_with_margin(Vec2::new(900.0, 700.0), 100.0));
        assert!(!bounds.contains_with_margin(Vec2::new(-100.1, 0.0), 100.0));
        assert!(!bounds.contains_with_margin(Vec2::new(0.0, 700.1), 100.0));
    }

    #[test]
    fn test_set_reclamps() {
        let mut bounds = FieldBounds::new(800.0, 600.0, 1.0);
        bounds.set(400.0, 0.0, 2.0);
        assert!((bounds.width() - 400.0).abs() < f32::EPSILON);
        assert!((bounds.height() - 1.0).abs() < f32::EPSILON);
        assert!((bounds.scale() - 2.0).abs() < f32::EPSILON);
    }
}
