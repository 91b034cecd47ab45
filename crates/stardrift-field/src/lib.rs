//! The stardrift particle engine.
//!
//! Owns a fixed arena of particles, a pointer-driven velocity state, and the
//! per-frame step/render rules that produce the forward-travel illusion:
//! parallax movement scaled by depth, a radial drift term pushing particles
//! away from the center, and a dual recycling policy (directional edge entry
//! while the field is moving, center respawn when it is calm).
//!
//! The engine is host-agnostic: it paints through the
//! [`Painter`](stardrift_paint::Painter) trait and is driven through the
//! [`FrameScheduler`] capability, so a whole session can run headless.

mod bounds;
pub mod constants;
mod driver;
mod engine;
mod particle;
mod velocity;

pub use bounds::FieldBounds;
pub use driver::{FrameDriver, FrameScheduler};
pub use engine::{FieldEngine, FieldRng, FieldTuning};
pub use particle::Particle;
pub use velocity::{PointerSource, VelocityState};
