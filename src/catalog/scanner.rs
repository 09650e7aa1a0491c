//! Directory walking for the media tree.
//!
//! The scanner never caches anything: every call reads the filesystem again.
//! Snapshotting, when enabled, lives in [`super::index::CatalogIndex`].

use reelshelf_common::{
    paths::{has_extension, join_slash, resolve_relative, to_slash_path},
    Error, MediaItem, Result,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Flat view of every playable file under the media root, keyed by item name.
///
/// Names are only unique per folder. When two folders hold a file with the same
/// name, the one visited last by the walk wins; the walk runs in file-name
/// order so the winner is stable between scans of an unchanged tree.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: BTreeMap<String, MediaItem>,
}

impl Catalog {
    /// Insert an item, returning the one it replaced.
    pub fn insert(&mut self, item: MediaItem) -> Option<MediaItem> {
        self.items.insert(item.name.clone(), item)
    }

    pub fn get(&self, name: &str) -> Option<&MediaItem> {
        self.items.get(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.values()
    }

    /// Items whose top-level directory normalizes to `label`.
    pub fn in_category(&self, label: &str) -> Vec<MediaItem> {
        self.items
            .values()
            .filter(|item| item.category.as_deref() == Some(label))
            .cloned()
            .collect()
    }
}

impl FromIterator<MediaItem> for Catalog {
    fn from_iter<I: IntoIterator<Item = MediaItem>>(iter: I) -> Self {
        let mut catalog = Catalog::default();
        for item in iter {
            catalog.insert(item);
        }
        catalog
    }
}

/// Walks the media root and lists individual directories.
#[derive(Debug, Clone)]
pub struct TreeScanner {
    root: PathBuf,
    video_extensions: Vec<String>,
}

impl TreeScanner {
    pub fn new(root: impl Into<PathBuf>, video_extensions: Vec<String>) -> Self {
        Self {
            root: root.into(),
            video_extensions,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Host path of a catalog-relative path.
    pub fn absolute(&self, relative: &str) -> PathBuf {
        resolve_relative(&self.root, relative)
    }

    /// Whether `path` carries one of the configured video extensions.
    pub fn is_playable(&self, path: &Path) -> bool {
        has_extension(path, &self.video_extensions)
    }

    /// Scan the entire media root, recursing into every subdirectory.
    ///
    /// Symlinks are followed as long as their target stays under the media
    /// root. Loops and dangling links are logged and skipped; any other read
    /// failure aborts the scan.
    pub fn scan(&self) -> Result<Catalog> {
        info!("Scanning media tree at {:?}", self.root);

        let canonical_root = fs::canonicalize(&self.root).map_err(|e| Error::scan(&self.root, e))?;
        if !canonical_root.is_dir() {
            return Err(Error::scan(&self.root, std::io::Error::other("not a directory")));
        }

        let mut catalog = Catalog::default();
        let mut walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.loop_ancestor().is_some() => {
                    warn!("Skipping symlink loop at {:?}", err.path());
                    continue;
                }
                Err(err) if is_dangling(&err) => {
                    warn!("Skipping dangling entry {:?}", err.path());
                    continue;
                }
                Err(err) => return Err(walk_error(&self.root, err)),
            };

            if entry.path_is_symlink() && !is_contained(&canonical_root, entry.path()) {
                warn!("Skipping {:?}: link target is outside the media root", entry.path());
                if entry.file_type().is_dir() {
                    walker.skip_current_dir();
                }
                continue;
            }

            if !entry.file_type().is_file() || !self.is_playable(entry.path()) {
                continue;
            }

            let relative = self.relative_path(entry.path())?;
            let item = MediaItem::from_relative(relative);
            if let Some(replaced) = catalog.insert(item) {
                debug!(
                    "Duplicate item name {:?}: {} replaced by a later file",
                    replaced.name, replaced.path
                );
            }
        }

        info!("Scan complete: {} items", catalog.len());
        Ok(catalog)
    }

    /// Names of the immediate subdirectories of `relative`, in display order.
    pub fn list_dirs(&self, relative: &str) -> Result<Vec<String>> {
        let mut dirs: Vec<String> = self
            .read_children(relative)?
            .into_iter()
            .filter(|(_, path)| path.is_dir())
            .map(|(name, _)| name)
            .collect();
        super::navigation::sort_names(&mut dirs);
        Ok(dirs)
    }

    /// Playable files directly inside `relative`, not recursing.
    pub fn list_files(&self, relative: &str) -> Result<Vec<MediaItem>> {
        let mut items: Vec<MediaItem> = self
            .read_children(relative)?
            .into_iter()
            .filter(|(_, path)| path.is_file() && self.is_playable(path))
            .map(|(name, _)| MediaItem::from_relative(join_slash(relative, &name)))
            .collect();
        super::navigation::sort_items(&mut items);
        Ok(items)
    }

    fn read_children(&self, relative: &str) -> Result<Vec<(String, PathBuf)>> {
        let dir = self.absolute(relative);
        let entries = fs::read_dir(&dir).map_err(|e| Error::scan(&dir, e))?;

        let mut children = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::scan(&dir, e))?;
            match entry.file_name().into_string() {
                Ok(name) => children.push((name, entry.path())),
                Err(raw) => warn!("Skipping non-UTF-8 entry {:?} in {:?}", raw, dir),
            }
        }
        Ok(children)
    }

    fn relative_path(&self, path: &Path) -> Result<String> {
        path.strip_prefix(&self.root)
            .map(to_slash_path)
            .map_err(|_| Error::internal(format!("{:?} is outside the media root", path)))
    }
}

/// Whether `path` resolves to somewhere strictly below `canonical_root`.
fn is_contained(canonical_root: &Path, path: &Path) -> bool {
    fs::canonicalize(path)
        .map(|target| target != canonical_root && target.starts_with(canonical_root))
        .unwrap_or(false)
}

fn is_dangling(err: &walkdir::Error) -> bool {
    err.io_error()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

fn walk_error(start: &Path, err: walkdir::Error) -> Error {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| start.to_path_buf());
    Error::scan(path, err.into())
}
