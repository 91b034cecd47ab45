//! Configuration system for Stardrift.
//!
//! Runtime-configurable settings that persist to disk as RON files, with CLI
//! overrides via clap, hot-reload detection, and forward/backward compatible
//! serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, FieldConfig, WindowConfig};
pub use error::ConfigError;
