use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to serialize form state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("reporting sink `{sink}` failed: {message}")]
    Sink { sink: &'static str, message: String },
}

pub type Result<T, E = FormError> = std::result::Result<T, E>;
