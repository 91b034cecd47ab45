//! The windowed Stardrift application: winit event handling, GPU setup, and
//! the glue between pointer input, the field engine, and the wgpu painter.

pub mod app;
pub mod platform;

pub use app::StardriftApp;
pub use platform::{PlatformDirs, PlatformError};
