//! Sibling ordering and previous/next navigation.
//!
//! Display order is case-insensitive first and falls back to the raw string,
//! so two names that differ only in case still sort deterministically.

use super::scanner::TreeScanner;
use reelshelf_common::{Error, MediaItem, Result};
use serde::Serialize;
use std::cmp::Ordering;

/// Total order used for every listing and for navigation.
pub fn compare_locale(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort directory or file names into display order.
pub fn sort_names(names: &mut [String]) {
    names.sort_by_cached_key(|name| (name.to_lowercase(), name.clone()));
}

/// Sort items by name, then by path for items sharing a name.
pub fn sort_items(items: &mut [MediaItem]) {
    items.sort_by(|a, b| {
        compare_locale(&a.name, &b.name).then_with(|| compare_locale(&a.path, &b.path))
    });
}

/// Sort items by relative path, the order navigation walks a folder in.
pub fn sort_by_path(items: &mut [MediaItem]) {
    items.sort_by(|a, b| compare_locale(&a.path, &b.path));
}

/// Where an item sits among the playable files of its folder.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationContext {
    /// Folder the siblings were read from, relative to the media root.
    pub folder: String,
    /// Zero-based index of the current item.
    pub position: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<MediaItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<MediaItem>,
    #[serde(skip)]
    pub siblings: Vec<MediaItem>,
}

impl NavigationContext {
    /// Build the context for `current` from already-sorted siblings.
    ///
    /// Returns `None` when `current` is not among them.
    pub fn from_siblings(siblings: Vec<MediaItem>, current: &MediaItem) -> Option<Self> {
        let position = siblings.iter().position(|s| s.path == current.path)?;
        let previous = position
            .checked_sub(1)
            .and_then(|idx| siblings.get(idx))
            .cloned();
        let next = siblings.get(position + 1).cloned();

        Some(Self {
            folder: current.folder().to_string(),
            position,
            total: siblings.len(),
            previous,
            next,
            siblings,
        })
    }

    pub fn is_first(&self) -> bool {
        self.previous.is_none()
    }

    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

/// Computes navigation by listing the item's own folder.
///
/// Siblings come straight from the folder, not from the flat catalog, so an
/// episode whose name collides with a file elsewhere still sees its true
/// neighbours.
pub struct NavigationIndexer<'a> {
    scanner: &'a TreeScanner,
}

impl<'a> NavigationIndexer<'a> {
    pub fn new(scanner: &'a TreeScanner) -> Self {
        Self { scanner }
    }

    pub fn locate(&self, item: &MediaItem) -> Result<NavigationContext> {
        let mut siblings = self
            .scanner
            .list_files(item.folder())
            .map_err(|e| e.into_leaf("media", &item.name))?;
        sort_by_path(&mut siblings);

        NavigationContext::from_siblings(siblings, item)
            .ok_or_else(|| Error::not_found("media", &item.name))
    }
}
