//! Marker walking and first-writer-wins merging
//!
//! The walker searches every mapping in a document for the marker key. The
//! marker's value is one `${file(...)}` reference or a sequence of them; each
//! referenced file is loaded and its top-level entries are folded into the
//! mapping that owned the marker. Keys already present on that mapping are
//! never overwritten, so for a sequence the earlier reference wins.
//!
//! Referenced content is walked for markers before it is folded in, always
//! resolving against the same base directory. A reference back into a file
//! that is still being resolved is reported as a cycle.

use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

use crate::config::MergeConfig;
use crate::document::{load_document, write_json};
use crate::error::{MergeError, Result};
use crate::reference::FileReference;

/// Counters collected during a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Marker entries removed from the tree.
    pub markers_removed: usize,
    /// References loaded and folded into their owner.
    pub references_resolved: usize,
    /// Marker values that were not a file reference.
    pub references_skipped: usize,
    /// Keys added to owner mappings.
    pub keys_added: usize,
}

/// Walks a document tree and resolves marker entries in place.
pub struct Merger<'a> {
    marker_key: &'a str,
    base_dir: PathBuf,
    resolving: Vec<PathBuf>,
    stats: MergeStats,
}

impl<'a> Merger<'a> {
    /// Create a merger using the config's marker key and base directory.
    pub fn new(config: &'a MergeConfig) -> Self {
        Self::with_base_dir(&config.marker_key, config.base_dir())
    }

    /// Create a merger resolving references against `base_dir`.
    pub fn with_base_dir(marker_key: &'a str, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            marker_key,
            base_dir: base_dir.into(),
            resolving: Vec::new(),
            stats: MergeStats::default(),
        }
    }

    pub fn stats(&self) -> &MergeStats {
        &self.stats
    }

    /// Recursively resolve every marker entry below `node`.
    ///
    /// Mappings are searched for the marker; sequences and tagged values are
    /// descended into; scalars are left alone.
    pub fn walk(&mut self, node: &mut Value) -> Result<()> {
        match node {
            Value::Mapping(map) => self.walk_mapping(map),
            Value::Sequence(items) => {
                for item in items {
                    self.walk(item)?;
                }
                Ok(())
            }
            Value::Tagged(tagged) => self.walk(&mut tagged.value),
            _ => Ok(()),
        }
    }

    fn walk_mapping(&mut self, map: &mut Mapping) -> Result<()> {
        let marker = map.shift_remove(self.marker_key);

        // Children first; folded entries are already resolved and are not rescanned.
        for value in map.values_mut() {
            self.walk(value)?;
        }

        if let Some(value) = marker {
            self.stats.markers_removed += 1;
            self.merge_reference(map, &value)?;
        }
        Ok(())
    }

    /// Fold the content named by a marker value into `owner`.
    ///
    /// `value` is either a single reference string or a sequence of them,
    /// processed in order. Anything that is not a reference is skipped.
    pub fn merge_reference(&mut self, owner: &mut Mapping, value: &Value) -> Result<()> {
        match value {
            Value::String(raw) => self.merge_single(owner, raw),
            Value::Sequence(items) => {
                for item in items {
                    match item.as_str() {
                        Some(raw) => self.merge_single(owner, raw)?,
                        None => self.skip(item),
                    }
                }
                Ok(())
            }
            other => {
                self.skip(other);
                Ok(())
            }
        }
    }

    fn merge_single(&mut self, owner: &mut Mapping, raw: &str) -> Result<()> {
        let Some(reference) = FileReference::parse(raw) else {
            self.skip(&Value::String(raw.to_string()));
            return Ok(());
        };

        let payload = self.resolve(&reference)?;
        let added = fold_into(owner, payload);

        tracing::debug!("Merged {} ({} new keys)", raw, added);
        self.stats.references_resolved += 1;
        self.stats.keys_added += added;
        Ok(())
    }

    fn skip(&mut self, value: &Value) {
        tracing::warn!(
            "Ignoring '{}' value that is not a file reference: {:?}",
            self.marker_key,
            value
        );
        self.stats.references_skipped += 1;
    }

    /// Load, project and fully resolve the payload named by `reference`.
    fn resolve(&mut self, reference: &FileReference) -> Result<Mapping> {
        let path = self.base_dir.join(&reference.path);
        let canonical = path
            .canonicalize()
            .map_err(|source| MergeError::Read { path: path.clone(), source })?;

        if self.resolving.contains(&canonical) {
            let mut chain = self.resolving.clone();
            chain.push(canonical);
            return Err(MergeError::Cycle { chain });
        }

        let document = load_document(&path)?;
        let mut payload = project(document, reference.key.as_deref(), &path)?;

        self.resolving.push(canonical);
        let walked = self.walk_mapping(&mut payload);
        self.resolving.pop();
        walked?;

        Ok(payload)
    }
}

/// Select the merge payload from a parsed file.
///
/// With a key, only that top-level entry is used and it must exist. The
/// selected value has to be a mapping.
fn project(document: Value, key: Option<&str>, path: &Path) -> Result<Mapping> {
    let selected = match (key, document) {
        (None, document) => document,
        (Some(key), Value::Mapping(mut map)) => map.shift_remove(key).ok_or_else(|| {
            MergeError::MissingKey { path: path.to_path_buf(), key: key.to_string() }
        })?,
        (Some(key), _) => {
            return Err(MergeError::MissingKey { path: path.to_path_buf(), key: key.to_string() })
        }
    };

    match selected {
        Value::Mapping(map) => Ok(map),
        _ => Err(MergeError::NotAMapping { path: path.to_path_buf() }),
    }
}

/// Insert every payload entry whose key is absent from `owner`.
///
/// Existing entries always win. Returns the number of keys added.
pub fn fold_into(owner: &mut Mapping, payload: Mapping) -> usize {
    let mut added = 0;
    for (key, value) in payload {
        if !owner.contains_key(&key) {
            owner.insert(key, value);
            added += 1;
        }
    }
    added
}

/// Run a complete merge: load the input, resolve markers, write JSON output.
///
/// Output is written only after the whole walk has succeeded.
pub fn merge_file(config: &MergeConfig) -> Result<MergeStats> {
    let mut document = load_document(&config.input)?;

    let mut merger = Merger::new(config);
    merger.walk(&mut document)?;

    write_json(&config.output, &document)?;
    Ok(merger.stats().clone())
}
