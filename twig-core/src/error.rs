/// Errors raised at the edges of scene building: config files and names
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scene config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("unknown tree preset '{0}' (expected static, declarative, combinator or spokes)")]
    UnknownPreset(String),

    #[error("unknown attachment policy '{0}' (expected even or fixed)")]
    UnknownPolicy(String),
}

pub type Result<T> = std::result::Result<T, Error>;
