//! Data models for geomanifest
//!
//! A manifest maps a group key to the sorted list of layer files in that
//! group. Keys and files are both ordered case-insensitively.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

/// Group used for files whose name has no underscore
pub const DEFAULT_FALLBACK_GROUP: &str = "Other";

/// A group key paired with its layer files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: String,
    pub files: Vec<String>,
}

/// The full manifest, groups in output order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    groups: Vec<Group>,
}

impl Manifest {
    /// Build a manifest from entry filenames.
    ///
    /// Each name is classified with [`group_key`], then both the group keys
    /// and the files within each group are sorted with [`compare_ci`].
    pub fn from_entries<I, S>(entries: I, fallback: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut by_key: HashMap<String, Vec<String>> = HashMap::new();
        for entry in entries {
            let name = entry.into();
            let key = group_key(&name, fallback).to_string();
            by_key.entry(key).or_default().push(name);
        }

        let mut groups: Vec<Group> = by_key
            .into_iter()
            .map(|(key, mut files)| {
                files.sort_by(|a, b| compare_ci(a, b));
                Group { key, files }
            })
            .collect();
        groups.sort_by(|a, b| compare_ci(&a.key, &b.key));

        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|g| g.key == key)
            .map(|g| g.files.as_slice())
    }

    /// Total number of layer files across all groups
    pub fn layer_count(&self) -> usize {
        self.groups.iter().map(|g| g.files.len()).sum()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Render as pretty JSON (2-space indent, non-ASCII unescaped)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.key, &group.files)?;
        }
        map.end()
    }
}

/// Case-insensitive ordering with a byte-wise tie-break
pub fn compare_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Compute the group key for a filename.
///
/// Only the base name is considered. The key is everything before the first
/// `_`, or `fallback` when the name has none.
pub fn group_key<'a>(filename: &'a str, fallback: &'a str) -> &'a str {
    let base = base_name(filename);
    match base.split_once('_') {
        Some((prefix, _)) => prefix,
        None => fallback,
    }
}

/// Human-readable layer name shown by the map viewer.
///
/// `Utilities_OTC.geojson` becomes `OTC`, `Roads_main_north.geojson` becomes
/// `main north`, and a name without a group prefix keeps its stem.
pub fn display_name(filename: &str, extension: &str) -> String {
    let base = base_name(filename);
    let stem = strip_suffix_ci(base, extension).unwrap_or(base);
    let tail = match stem.split_once('_') {
        Some((_, rest)) => rest,
        None => stem,
    };
    tail.replace('_', " ")
}

/// True when `name` ends with `extension`, ignoring case
pub fn has_extension(name: &str, extension: &str) -> bool {
    strip_suffix_ci(name, extension).is_some()
}

fn strip_suffix_ci<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let suffix = suffix.to_lowercase();
    if suffix.is_empty() {
        return None;
    }
    name.char_indices()
        .rev()
        .map(|(i, _)| i)
        .find(|&i| name[i..].to_lowercase() == suffix)
        .map(|i| &name[..i])
}

fn base_name(filename: &str) -> &str {
    Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename)
}
