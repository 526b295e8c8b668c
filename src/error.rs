use std::path::PathBuf;

use thiserror::Error;

use crate::parser::classify::SectionLabel;

/// Startup failures while loading a classifier model. Always fatal.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read model file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {model} model: {source}")]
    Parse {
        model: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{model} model has no weights for label {label}")]
    MissingLabel { model: String, label: SectionLabel },

    #[error("{model} model has a non-finite weight for feature {feature:?}")]
    NonFiniteWeight { model: String, feature: String },

    #[error("{model} model declares an empty character n-gram range")]
    EmptyNgramRange { model: String },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Source(#[from] config::ConfigError),

    #[error("grouping.noise_threshold must lie in [0, 1], got {0}")]
    Threshold(f32),

    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),
}
