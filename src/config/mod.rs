//! Run configuration
//!
//! A [`MergeConfig`] is built once at startup (usually from CLI arguments)
//! and passed by reference to everything that needs it.

use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "serverless.yml";
pub const DEFAULT_OUTPUT: &str = "serverless-merged.json";
pub const DEFAULT_MARKER_KEY: &str = "$<<";

/// Settings for a single merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    /// Host document to read.
    pub input: PathBuf,
    /// Where the merged JSON is written.
    pub output: PathBuf,
    /// Mapping key that marks a file reference (exact, case-sensitive).
    pub marker_key: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            marker_key: DEFAULT_MARKER_KEY.to_string(),
        }
    }
}

impl MergeConfig {
    /// Create a config for `input` and `output` with the default marker key.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self { input: input.into(), output: output.into(), ..Self::default() }
    }

    /// Set the marker key searched for during the walk.
    pub fn marker_key(mut self, key: impl Into<String>) -> Self {
        self.marker_key = key.into();
        self
    }

    /// Directory every reference in the run is resolved against.
    ///
    /// This is the input document's directory, never the directory of a
    /// referenced file. A bare file name resolves against `.`.
    pub fn base_dir(&self) -> PathBuf {
        match self.input.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        }
    }
}
