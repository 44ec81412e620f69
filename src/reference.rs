//! Serverless Framework `${file(...)}` variable references
//!
//! A reference has the shape `${file(../path/to/file.yml):key}`, where the
//! `:key` suffix is optional. Only a reference that terminates the string is
//! recognized; any text in front of it is ignored.

use once_cell::sync::Lazy;
use regex::Regex;

static FILE_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{file\((?P<path>[^)]+)\):?(?P<key>[^}]+)?\}$").expect("valid regex")
});

/// A parsed `${file(path):key}` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    /// Path to the referenced file, relative to the base directory of the run.
    pub path: String,
    /// Optional top-level key to project out of the referenced file.
    pub key: Option<String>,
}

impl FileReference {
    /// Parse a string value as a file reference.
    ///
    /// Returns `None` when the string does not end in a file reference.
    pub fn parse(value: &str) -> Option<Self> {
        let captures = FILE_REFERENCE.captures(value)?;
        let path = captures.name("path")?.as_str().to_string();
        let key = captures.name("key").map(|m| m.as_str().to_string());
        Some(Self { path, key })
    }
}
