//! Failure modes of the configuration layer.

use std::io;
use std::path::PathBuf;

/// Anything that can go wrong loading or persisting `config.ron`.
///
/// Read/write/parse failures name the offending path, since the config
/// directory is user-selectable via `--config`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("{path} is not valid RON: {source}")]
    Malformed {
        path: PathBuf,
        source: ron::error::SpannedError,
    },

    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] ron::Error),
}
