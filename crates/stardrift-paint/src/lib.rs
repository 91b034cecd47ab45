//! Drawing-surface abstraction for the stardrift backdrop.
//!
//! The engine never talks to a platform canvas directly; it emits paint
//! operations through the [`Painter`] trait. Backends implement the trait
//! (GPU in `stardrift-render`, [`DrawRecorder`] for headless use), which keeps
//! the simulation unit-testable without a display.

mod backdrop;
mod color;
mod painter;

pub use backdrop::{Backdrop, GradientWash};
pub use color::Rgba;
pub use painter::{DrawOp, DrawRecorder, Painter};
