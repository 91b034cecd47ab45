//! The field engine: seeding, stepping, recycling, resizing, rendering.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stardrift_paint::{Backdrop, Painter, Rgba};
use tracing::debug;

use crate::bounds::FieldBounds;
use crate::constants::{
    DRIFT, MIN_DEPTH, OVERFLOW_MARGIN, RESPAWN_DEPTH, STAR_COLOR, STAR_SIZE, STREAK_FLOOR,
    STREAK_GAIN, STREAK_MIN_COMPONENT, TWINKLE_MAX, TWINKLE_MIN,
};
use crate::particle::Particle;
use crate::velocity::{PointerSource, VelocityState};

/// The RNG the engine runs on in production: seeded ChaCha, so a configured
/// seed reproduces a session exactly.
pub type FieldRng = ChaCha8Rng;

/// User-tunable field parameters; defaults match the constants module.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldTuning {
    /// Streak color.
    pub star_color: Rgba,
    /// Base stroke width at depth 1.0.
    pub star_size: f32,
    /// Lower bound of the random depth range at seed/directional-recycle time.
    pub min_depth: f32,
    /// Out-of-bounds margin for recycling and directional entry placement.
    pub overflow_margin: f32,
    /// Per-frame depth increment.
    pub drift: f32,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            star_color: Rgba::from_hex(STAR_COLOR).unwrap_or(Rgba::WHITE),
            star_size: STAR_SIZE,
            min_depth: MIN_DEPTH,
            overflow_margin: OVERFLOW_MARGIN,
            drift: DRIFT,
        }
    }
}

/// Which region a recycled particle re-enters through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntryEdge {
    Left,
    Right,
    Top,
    Bottom,
    /// Fresh far-away respawn anywhere in bounds.
    Center,
}

/// The starfield engine.
///
/// Owns the particle arena, the velocity state, and its randomness source.
/// All state mutation happens through `&mut self` on whatever thread owns the
/// engine; there is no internal synchronization.
pub struct FieldEngine<R: Rng = FieldRng> {
    particles: Vec<Particle>,
    velocity: VelocityState,
    bounds: FieldBounds,
    tuning: FieldTuning,
    backdrop: Backdrop,
    rng: R,
}

impl FieldEngine<FieldRng> {
    /// Create an engine seeded from a 64-bit seed, with default tuning.
    ///
    /// The particle set is generated here, exactly once; resizing later
    /// repositions it but never regenerates it.
    pub fn seeded(bounds: FieldBounds, seed: u64) -> Self {
        Self::with_rng(bounds, FieldTuning::default(), ChaCha8Rng::seed_from_u64(seed))
    }

    /// Like [`seeded`](Self::seeded) with explicit tuning.
    pub fn seeded_with_tuning(bounds: FieldBounds, tuning: FieldTuning, seed: u64) -> Self {
        Self::with_rng(bounds, tuning, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> FieldEngine<R> {
    /// Create an engine over an injected randomness source.
    pub fn with_rng(bounds: FieldBounds, tuning: FieldTuning, mut rng: R) -> Self {
        let count = bounds.particle_count();
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let pos = random_position(&bounds, &mut rng);
            let depth = rng.random_range(tuning.min_depth..=1.0);
            particles.push(Particle::new(pos, depth));
        }
        debug!(count, "seeded particle field");

        Self {
            particles,
            velocity: VelocityState::new(tuning.drift),
            bounds,
            tuning,
            backdrop: Backdrop::default(),
            rng,
        }
    }

    /// One simulation tick. Decays and eases the velocity, advances every
    /// particle (parallax by depth plus the radial drift term), increments
    /// depths, and recycles whatever left the inflated bounds.
    pub fn step(&mut self) {
        self.velocity.decay_and_ease();

        let v = self.velocity.current();
        let drift = self.velocity.drift();
        let center = self.bounds.center();
        let margin = self.tuning.overflow_margin;

        for i in 0..self.particles.len() {
            let p = &mut self.particles[i];
            p.pos += v * p.depth;
            p.pos += (p.pos - center) * (drift * p.depth);
            p.depth += drift;

            if !self.bounds.contains_with_margin(p.pos, margin) {
                recycle(p, &self.velocity, &self.bounds, &self.tuning, &mut self.rng);
            }
        }
    }

    /// Paint one frame: backdrop first, then a streak per particle.
    ///
    /// The streak runs from the particle to `pos + 2 * velocity`, with each
    /// tail component floored to ±0.5 when the raw value is near zero so
    /// streaks stay visible at rest. Stroke width scales with depth and the
    /// device scale factor; alpha is re-rolled per particle per frame — the
    /// twinkle is intentional.
    pub fn render(&mut self, painter: &mut impl Painter) {
        self.backdrop.paint(painter);

        let raw_tail = self.velocity.current() * STREAK_GAIN;
        let tail = Vec2::new(floor_tail(raw_tail.x), floor_tail(raw_tail.y));
        let scale = self.bounds.scale();

        for p in &self.particles {
            let alpha = self.rng.random_range(TWINKLE_MIN..TWINKLE_MAX);
            painter.streak(
                p.pos,
                p.pos + tail,
                self.tuning.star_size * p.depth * scale,
                self.tuning.star_color.with_alpha(alpha),
            );
        }
    }

    /// Adopt new surface dimensions and reposition every particle uniformly
    /// at random within them. Count and depths are untouched. Positions are
    /// re-randomized on every call, including calls with unchanged
    /// dimensions; that is the contract, not a defect.
    pub fn resize(&mut self, width: f32, height: f32, scale: f32) {
        self.bounds.set(width, height, scale);
        debug!(width, height, scale, "field resized");

        let bounds = self.bounds;
        for p in &mut self.particles {
            p.pos = random_position(&bounds, &mut self.rng);
        }
    }

    /// Fold a pointer movement delta into the target velocity.
    pub fn pointer_delta(&mut self, delta: Vec2, source: PointerSource) {
        self.velocity.apply_pointer_delta(delta, source);
    }

    /// Replace the backdrop.
    pub fn set_backdrop(&mut self, backdrop: Backdrop) {
        self.backdrop = backdrop;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn velocity(&self) -> &VelocityState {
        &self.velocity
    }

    pub fn bounds(&self) -> &FieldBounds {
        &self.bounds
    }

    pub fn tuning(&self) -> &FieldTuning {
        &self.tuning
    }
}

/// A uniformly random in-bounds position.
fn random_position<R: Rng>(bounds: &FieldBounds, rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(0.0..bounds.width()),
        rng.random_range(0.0..bounds.height()),
    )
}

/// Reposition an out-of-bounds particle.
///
/// Two policies, deliberately distinct: while the field is moving fast
/// (either axis above the directional threshold) particles stream in from the
/// edge the field travels away from, at a fresh random depth; otherwise they
/// respawn anywhere in bounds at the fixed far depth. Collapsing the two
/// branches flattens the travel illusion into random popping.
fn recycle<R: Rng>(
    p: &mut Particle,
    velocity: &VelocityState,
    bounds: &FieldBounds,
    tuning: &FieldTuning,
    rng: &mut R,
) {
    let edge = choose_entry(velocity, rng);
    let margin = tuning.overflow_margin;

    match edge {
        EntryEdge::Center => {
            p.depth = RESPAWN_DEPTH;
            p.pos = random_position(bounds, rng);
        }
        _ => {
            p.depth = rng.random_range(tuning.min_depth..=1.0);
            p.pos = match edge {
                EntryEdge::Left => {
                    Vec2::new(-margin, rng.random_range(0.0..bounds.height()))
                }
                EntryEdge::Right => {
                    Vec2::new(bounds.width() + margin, rng.random_range(0.0..bounds.height()))
                }
                EntryEdge::Top => {
                    Vec2::new(rng.random_range(0.0..bounds.width()), -margin)
                }
                EntryEdge::Bottom => {
                    Vec2::new(rng.random_range(0.0..bounds.width()), bounds.height() + margin)
                }
                EntryEdge::Center => unreachable!(),
            };
        }
    }
}

/// Pick the entry region for a recycled particle.
///
/// Fast field: pick the horizontal axis with probability |vx| / (|vx| + |vy|),
/// then the edge opposite the direction of travel, so particles enter from
/// where the field is headed. Slow field: center respawn.
fn choose_entry<R: Rng>(velocity: &VelocityState, rng: &mut R) -> EntryEdge {
    if !velocity.is_directional() {
        return EntryEdge::Center;
    }

    let v = velocity.current();
    let (vx, vy) = (v.x.abs(), v.y.abs());
    // is_directional guarantees vx + vy > 1, so the ratio is well defined.
    let horizontal = rng.random::<f32>() < vx / (vx + vy);

    if horizontal {
        if v.x > 0.0 { EntryEdge::Left } else { EntryEdge::Right }
    } else if v.y > 0.0 {
        EntryEdge::Top
    } else {
        EntryEdge::Bottom
    }
}

/// Floor a streak tail component to ±0.5 when it is too small to see.
fn floor_tail(t: f32) -> f32 {
    if t.abs() < STREAK_MIN_COMPONENT {
        STREAK_FLOOR.copysign(t)
    } else {
        t
    }
}
