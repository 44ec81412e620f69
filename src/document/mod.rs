//! Document loading and JSON output
//!
//! Documents are parsed into [`serde_yaml::Value`]. Non-standard tags such as
//! CloudFormation's `!Ref` or `!GetAtt` parse as [`Value::Tagged`] rather
//! than failing, so host documents and fragments share one permissive schema.
//!
//! Loading also expands YAML `<<` merge keys and turns every scalar mapping
//! key into a string, so key comparisons during merging match the JSON output.

use serde_yaml::Value;
use std::fs;
use std::mem;
use std::path::Path;

use crate::error::{MergeError, Result};

pub mod intrinsic;

pub use intrinsic::to_json;

use intrinsic::key_to_string;

/// Read and parse a YAML document.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .map_err(|source| MergeError::Read { path: path.to_path_buf(), source })?;
    parse_document(&content, path)
}

/// Parse YAML text; `origin` is only used for error reporting.
pub fn parse_document(content: &str, origin: &Path) -> Result<Value> {
    let parse_error =
        |source: serde_yaml::Error| MergeError::Parse { path: origin.to_path_buf(), source };

    let mut document: Value = serde_yaml::from_str(content).map_err(parse_error)?;
    document.apply_merge().map_err(parse_error)?;
    stringify_keys(&mut document)?;
    Ok(document)
}

/// Rewrite every mapping key as a string.
///
/// Keys that collide once stringified keep the first entry. Collection keys
/// fail with [`MergeError::UnsupportedKey`].
fn stringify_keys(value: &mut Value) -> Result<()> {
    match value {
        Value::Mapping(map) => {
            for (key, mut child) in mem::take(map) {
                stringify_keys(&mut child)?;
                let key = Value::String(key_to_string(&key)?);
                if !map.contains_key(&key) {
                    map.insert(key, child);
                }
            }
            Ok(())
        }
        Value::Sequence(items) => items.iter_mut().try_for_each(stringify_keys),
        Value::Tagged(tagged) => stringify_keys(&mut tagged.value),
        _ => Ok(()),
    }
}

/// Serialize a document as compact JSON and write it to `path`.
///
/// The document is fully converted before the file is touched, so a failed
/// conversion never leaves partial output behind.
pub fn write_json(path: &Path, document: &Value) -> Result<()> {
    let json = serde_json::to_string(&to_json(document)?)?;
    fs::write(path, json).map_err(|source| MergeError::Write { path: path.to_path_buf(), source })
}
