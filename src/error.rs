use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, merging or writing documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MergeError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("key '{key}' not found at the top level of '{path}'")]
    MissingKey { path: PathBuf, key: String },

    #[error("referenced content in '{path}' is not a mapping")]
    NotAMapping { path: PathBuf },

    #[error("circular file reference: {}", format_chain(.chain))]
    Cycle { chain: Vec<PathBuf> },

    #[error("mapping key cannot be represented in JSON: {0}")]
    UnsupportedKey(String),

    #[error("failed to serialize merged document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(" -> ")
}

pub type Result<T, E = MergeError> = std::result::Result<T, E>;
