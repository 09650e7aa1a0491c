//! Sidecar subtitle lookup.
//!
//! A subtitle is a file next to the video with the same stem and the
//! configured subtitle extension. Existence is checked on every call.

use reelshelf_common::{
    paths::{replace_extension, resolve_relative},
    MediaItem,
};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SubtitleLocator {
    root: PathBuf,
    extension: String,
}

impl SubtitleLocator {
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Relative path the subtitle for `item` would have.
    pub fn candidate(&self, item: &MediaItem) -> String {
        replace_extension(&item.path, &self.extension)
    }

    /// Relative path of the subtitle for `item`, if it exists as a file.
    pub fn locate(&self, item: &MediaItem) -> Option<String> {
        let candidate = self.candidate(item);
        resolve_relative(&self.root, &candidate)
            .is_file()
            .then_some(candidate)
    }

    /// Fill in `item.subtitle`, clearing any stale value.
    pub fn attach(&self, item: &mut MediaItem) {
        item.subtitle = self.locate(item);
    }
}
