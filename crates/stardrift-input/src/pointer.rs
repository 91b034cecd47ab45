//! Pointer delta tracker.
//!
//! [`PointerTracker`] turns a stream of absolute pointer positions into
//! movement deltas for the field engine. Mouse and the active touch share one
//! baseline: only the position delta matters, and the engine applies the
//! source-specific sign. Touches are keyed by finger id — the first finger
//! down owns the gesture and later fingers are ignored, so two alternating
//! fingers never fight over the baseline.

use glam::Vec2;
use stardrift_field::PointerSource;

/// Tracks the last pointer position and emits per-move deltas.
///
/// # Usage
///
/// 1. Forward window pointer events via the `on_*` methods.
/// 2. Feed each returned `(delta, source)` into the engine.
/// 3. The leave/end handlers clear the baseline so a pointer re-entering far
///    away never produces a spurious jump.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    last: Option<Vec2>,
    active_touch: Option<u64>,
}

impl PointerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event. Returns a delta once a baseline exists;
    /// the first move after a gap only establishes the baseline.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) -> Option<(Vec2, PointerSource)> {
        self.moved(Vec2::new(x as f32, y as f32), PointerSource::Mouse)
    }

    /// Process a touch movement for the given finger id. Only the finger that
    /// started the gesture moves the field; other fingers are ignored.
    pub fn on_touch_moved(&mut self, id: u64, x: f64, y: f64) -> Option<(Vec2, PointerSource)> {
        match self.active_touch {
            Some(active) if active != id => return None,
            _ => self.active_touch = Some(id),
        }
        self.moved(Vec2::new(x as f32, y as f32), PointerSource::Touch)
    }

    /// Process a `CursorLeft` event: the baseline is dropped.
    pub fn on_cursor_left(&mut self) {
        self.last = None;
    }

    /// Process the end or cancellation of the touch with the given id. Ending
    /// a finger that never owned the gesture changes nothing.
    pub fn on_touch_ended(&mut self, id: u64) {
        if self.active_touch == Some(id) {
            self.active_touch = None;
            self.last = None;
        }
    }

    /// Whether a baseline position is currently held.
    #[must_use]
    pub fn has_baseline(&self) -> bool {
        self.last.is_some()
    }

    fn moved(&mut self, pos: Vec2, source: PointerSource) -> Option<(Vec2, PointerSource)> {
        let delta = self.last.map(|last| pos - last);
        self.last = Some(pos);
        delta.map(|d| (d, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_only_sets_baseline() {
        let mut tracker = PointerTracker::new();
        assert!(tracker.on_cursor_moved(100.0, 200.0).is_none());
        assert!(tracker.has_baseline());
    }

    #[test]
    fn test_second_move_emits_delta() {
        let mut tracker = PointerTracker::new();
        tracker.on_cursor_moved(100.0, 200.0);
        let (delta, source) = tracker.on_cursor_moved(110.0, 195.0).unwrap();
        assert!((delta.x - 10.0).abs() < f32::EPSILON);
        assert!((delta.y - (-5.0)).abs() < f32::EPSILON);
        assert_eq!(source, PointerSource::Mouse);
    }

    #[test]
    fn test_touch_moves_tagged_as_touch() {
        let mut tracker = PointerTracker::new();
        tracker.on_touch_moved(0, 50.0, 50.0);
        let (_, source) = tracker.on_touch_moved(0, 60.0, 60.0).unwrap();
        assert_eq!(source, PointerSource::Touch);
    }

    #[test]
    fn test_leave_clears_baseline() {
        let mut tracker = PointerTracker::new();
        tracker.on_cursor_moved(100.0, 100.0);
        tracker.on_cursor_left();

        assert!(!tracker.has_baseline());
        // Re-entry far away produces no jump.
        assert!(tracker.on_cursor_moved(900.0, 900.0).is_none());
    }

    #[test]
    fn test_touch_end_clears_baseline() {
        let mut tracker = PointerTracker::new();
        tracker.on_touch_moved(0, 10.0, 10.0);
        tracker.on_touch_ended(0);
        assert!(tracker.on_touch_moved(0, 400.0, 400.0).is_none());
    }

    #[test]
    fn test_second_finger_is_ignored() {
        let mut tracker = PointerTracker::new();
        tracker.on_touch_moved(1, 100.0, 100.0);
        tracker.on_touch_moved(1, 110.0, 100.0);

        // A second finger far away must not yank the baseline.
        assert!(tracker.on_touch_moved(2, 600.0, 600.0).is_none());

        let (delta, _) = tracker.on_touch_moved(1, 120.0, 100.0).unwrap();
        assert!((delta.x - 10.0).abs() < f32::EPSILON);
        assert!(delta.y.abs() < f32::EPSILON);
    }

    #[test]
    fn test_ending_ignored_finger_keeps_gesture() {
        let mut tracker = PointerTracker::new();
        tracker.on_touch_moved(1, 100.0, 100.0);
        tracker.on_touch_moved(2, 600.0, 600.0);
        tracker.on_touch_ended(2);

        assert!(tracker.has_baseline());
        let (delta, _) = tracker.on_touch_moved(1, 105.0, 100.0).unwrap();
        assert!((delta.x - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_next_finger_can_own_after_gesture_ends() {
        let mut tracker = PointerTracker::new();
        tracker.on_touch_moved(1, 100.0, 100.0);
        tracker.on_touch_ended(1);

        // A fresh gesture from another finger starts with a clean baseline.
        assert!(tracker.on_touch_moved(2, 600.0, 600.0).is_none());
        let (delta, _) = tracker.on_touch_moved(2, 610.0, 600.0).unwrap();
        assert!((delta.x - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_mouse_and_touch_share_baseline() {
        let mut tracker = PointerTracker::new();
        tracker.on_cursor_moved(10.0, 10.0);
        let (delta, source) = tracker.on_touch_moved(0, 20.0, 10.0).unwrap();
        assert!((delta.x - 10.0).abs() < f32::EPSILON);
        assert_eq!(source, PointerSource::Touch);
    }
}
