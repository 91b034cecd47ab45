//! Command-line argument parsing for Stardrift.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Stardrift command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "stardrift", about = "A drifting starfield")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Fixed RNG seed for a reproducible field.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Star color as a CSS hex string.
    #[arg(long)]
    pub star_color: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(seed) = args.seed {
            self.field.seed = Some(seed);
        }
        if let Some(ref color) = args.star_color {
            self.field.star_color = color.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            height: None,
            seed: Some(42),
            star_color: None,
            log_level: None,
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.field.seed, Some(42));
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert_eq!(config.field.star_color, "#fff");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        let args = CliArgs {
            width: None,
            height: None,
            seed: None,
            star_color: None,
            log_level: None,
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config, original);
    }
}
