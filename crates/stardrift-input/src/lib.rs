//! Pointer tracking for the starfield.

mod pointer;

pub use pointer::PointerTracker;
