//! Pointer-driven velocity state.

use glam::Vec2;

use crate::constants::{DIRECTIONAL_THRESHOLD, POINTER_GAIN, TARGET_DECAY, VELOCITY_EASE};

/// Which kind of pointer produced a movement delta.
///
/// Mouse deltas are sign-inverted (the field moves opposite the cursor, like a
/// camera pan); touch deltas are applied directly (the field follows the
/// finger).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// The field's shared velocity: a current value smoothed toward a target that
/// pointer input nudges and that decays geometrically on its own, plus the
/// constant depth drift applied every frame regardless of input.
///
/// Absent input, `target` shrinks by ×0.90 per frame and `current` chases it
/// at 60% per frame, so the field always settles back to drift-only motion.
#[derive(Clone, Copy, Debug)]
pub struct VelocityState {
    pub(crate) current: Vec2,
    pub(crate) target: Vec2,
    drift: f32,
}

impl VelocityState {
    /// A resting state with the given depth drift.
    pub fn new(drift: f32) -> Self {
        Self {
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            drift,
        }
    }

    /// One frame of target decay and current-toward-target easing. Runs
    /// before any particle movement in a step.
    pub fn decay_and_ease(&mut self) {
        self.target *= TARGET_DECAY;
        self.current += (self.target - self.current) * VELOCITY_EASE;
    }

    /// Fold one pointer movement delta into the target velocity.
    pub fn apply_pointer_delta(&mut self, delta: Vec2, source: PointerSource) {
        let sign = match source {
            PointerSource::Mouse => -1.0,
            PointerSource::Touch => 1.0,
        };
        self.target += delta * POINTER_GAIN * sign;
    }

    /// The smoothed velocity applied to particles this frame.
    pub fn current(&self) -> Vec2 {
        self.current
    }

    /// The decaying target the current velocity chases.
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// The constant per-frame depth increment.
    pub fn drift(&self) -> f32 {
        self.drift
    }

    /// Whether the field is moving fast enough for recycling to stream
    /// particles in from an edge instead of respawning them centrally.
    pub fn is_directional(&self) -> bool {
        self.current.x.abs() > DIRECTIONAL_THRESHOLD
            || self.current.y.abs() > DIRECTIONAL_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_matches_closed_form() {
        // With target and current both starting at v, the recurrence
        //   t[n] = 0.9^n * v
        //   x[n+1] = x[n] + (t[n+1] - x[n]) * 0.6
        // solves to x[n] = v * (1.08 * 0.9^n - 0.08 * 0.4^n).
        let v = 4.0_f32;
        let mut state = VelocityState::new(0.0);
        state.current = Vec2::new(v, 0.0);
        state.target = Vec2::new(v, 0.0);

        for n in 1..=40 {
            state.decay_and_ease();
            let expected = v * (1.08 * 0.9_f32.powi(n) - 0.08 * 0.4_f32.powi(n));
            assert!(
                (state.current.x - expected).abs() < 1e-3,
                "frame {n}: {} != {expected}",
                state.current.x
            );
        }
    }

    #[test]
    fn test_velocity_magnitude_shrinks_every_frame() {
        let mut state = VelocityState::new(0.0);
        state.current = Vec2::new(3.0, -2.0);
        state.target = Vec2::new(3.0, -2.0);

        let mut prev = state.current.length();
        for _ in 0..100 {
            state.decay_and_ease();
            let len = state.current.length();
            assert!(len <= prev);
            prev = len;
        }
        assert!(prev < 1e-3);
    }

    #[test]
    fn test_mouse_delta_is_inverted() {
        let mut state = VelocityState::new(0.0);
        state.apply_pointer_delta(Vec2::new(8.0, -8.0), PointerSource::Mouse);
        assert!((state.target.x - (-1.0)).abs() < f32::EPSILON);
        assert!((state.target.y - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_touch_delta_is_direct() {
        let mut state = VelocityState::new(0.0);
        state.apply_pointer_delta(Vec2::new(8.0, 16.0), PointerSource::Touch);
        assert!((state.target.x - 1.0).abs() < f32::EPSILON);
        assert!((state.target.y - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_deltas_accumulate() {
        let mut state = VelocityState::new(0.0);
        state.apply_pointer_delta(Vec2::new(8.0, 0.0), PointerSource::Touch);
        state.apply_pointer_delta(Vec2::new(8.0, 0.0), PointerSource::Touch);
        assert!((state.target.x - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_directional_threshold_is_per_axis() {
        let mut state = VelocityState::new(0.0);
        assert!(!state.is_directional());

        state.current = Vec2::new(0.9, 0.9);
        assert!(!state.is_directional());

        state.current = Vec2::new(0.0, -1.1);
        assert!(state.is_directional());

        state.current = Vec2::new(1.1, 0.0);
        assert!(state.is_directional());
    }

    #[test]
    fn test_drift_untouched_by_decay() {
        let mut state = VelocityState::new(0.000_25);
        for _ in 0..10 {
            state.decay_and_ease();
        }
        assert!((state.drift() - 0.000_25).abs() < f32::EPSILON);
    }
}
