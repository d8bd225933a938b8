use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to render config as TOML: {0}")]
    Render(#[source] toml::ser::Error),

    #[error("{var}='{value}' is invalid: {reason}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("failed to read .env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}
