//! serverless-merge: merge external YAML fragments into a host document
//!
//! Mapping entries keyed by a marker (default `$<<`) whose value is a
//! Serverless Framework `${file(path):key}` reference, or a list of them, are
//! replaced by the top-level entries of the referenced files. Keys already on
//! the owning mapping take precedence.

pub mod config;
pub mod document;
mod error;
pub mod merge;
pub mod reference;

pub use config::MergeConfig;
pub use error::{MergeError, Result};
pub use merge::{fold_into, merge_file, MergeStats, Merger};
pub use reference::FileReference;
