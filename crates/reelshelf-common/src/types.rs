//! Core type definitions shared by the scanner, the resolver, and the API.

use serde::{Deserialize, Serialize};

use crate::paths;

/// A single playable file in the media tree.
///
/// Items are keyed by `name` (the filename without extension). That key is
/// only unique within one folder; the flat catalog keeps whichever item was
/// scanned last when two folders share a file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Filename without extension.
    pub name: String,
    /// Path relative to the media root, always `/`-separated.
    pub path: String,
    /// Normalized label of the top-level directory, if the file is not at the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Relative path of the matching sidecar subtitle, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

impl MediaItem {
    /// Build an item from its relative path, deriving name and category.
    pub fn from_relative(path: impl Into<String>) -> Self {
        let path = path.into();
        let file_name = path.rsplit('/').next().unwrap_or(&path);
        let name = match file_name.rfind('.') {
            Some(0) | None => file_name.to_string(),
            Some(idx) => file_name[..idx].to_string(),
        };
        let category = path
            .split_once('/')
            .map(|(top, _)| normalize_category(top));

        Self {
            name,
            path,
            category,
            subtitle: None,
        }
    }

    /// The folder this item lives in, relative to the media root.
    pub fn folder(&self) -> &str {
        paths::parent_folder(&self.path)
    }
}

/// Canonical category label for a top-level directory name.
///
/// Upper-cases the first character and leaves the rest untouched, so `movies`
/// becomes `Movies` and `tv` becomes `Tv`.
///
/// # Examples
///
/// ```
/// use reelshelf_common::normalize_category;
///
/// assert_eq!(normalize_category("movies"), "Movies");
/// assert_eq!(normalize_category("Movies"), "Movies");
/// assert_eq!(normalize_category("tv"), "Tv");
/// ```
pub fn normalize_category(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
