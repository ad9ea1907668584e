use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] blackspot_core::CoreError),

    #[error(transparent)]
    Circuit(#[from] blackspot_circuit::CircuitError),

    #[error("key deserialization failed: {0}")]
    Key(#[from] ark_serialize::SerializationError),

    #[error("proof rejected by the verifier")]
    ProofRejected,
}

impl CliError {
    pub fn io(path: &std::path::Path, source: io::Error) -> CliError {
        CliError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
