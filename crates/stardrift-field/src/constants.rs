//! Field tuning constants.
//!
//! These are the engine's implicit configuration; `stardrift-config` exposes a
//! subset of them as user tunables with these values as defaults.

/// Default star color (CSS hex).
pub const STAR_COLOR: &str = "#fff";

/// Base stroke width of a streak at depth 1.0, in logical units.
pub const STAR_SIZE: f32 = 3.0;

/// Smallest depth a particle can be created or recycled at (except the fixed
/// center-respawn depth below).
pub const MIN_DEPTH: f32 = 0.2;

/// How far outside the bounds a particle may fly before it is recycled, and
/// how far outside a directional recycle places it, in logical units.
pub const OVERFLOW_MARGIN: f32 = 100.0;

/// Per-frame depth increment; the constant forward motion of the field.
pub const DRIFT: f32 = 0.000_25;

/// Geometric decay applied to the target velocity every frame.
pub const TARGET_DECAY: f32 = 0.90;

/// Fraction of the target-to-current gap closed every frame.
pub const VELOCITY_EASE: f32 = 0.6;

/// Per-axis velocity magnitude above which recycling becomes directional.
pub const DIRECTIONAL_THRESHOLD: f32 = 1.0;

/// Fixed "far away" depth for center respawns.
pub const RESPAWN_DEPTH: f32 = 0.1;

/// Particle count is `(width + height) / PARTICLE_DENSITY`.
pub const PARTICLE_DENSITY: f32 = 5.0;

/// Fraction of a pointer delta fed into the target velocity.
pub const POINTER_GAIN: f32 = 1.0 / 8.0;

/// Streak tail length as a multiple of the current velocity.
pub const STREAK_GAIN: f32 = 2.0;

/// Tail components below this magnitude are floored so streaks stay visible
/// when the field is nearly still.
pub const STREAK_MIN_COMPONENT: f32 = 0.1;

/// The floored tail component magnitude (sign-preserving).
pub const STREAK_FLOOR: f32 = 0.5;

/// Per-streak twinkle alpha range, re-rolled every particle every frame.
pub const TWINKLE_MIN: f32 = 0.35;
pub const TWINKLE_MAX: f32 = 0.70;
