//! Validation of caller-supplied path segments.
//!
//! Every segment taken from a request URL passes through here before it is
//! joined onto a filesystem path. A segment is accepted only if it names a
//! single entry and the joined path, after resolving symlinks, stays strictly
//! inside the media root.

use reelshelf_common::{
    paths::{join_slash, resolve_relative},
    Error, Result,
};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// A directory that passed sanitization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDir {
    /// Path relative to the media root, `/`-separated.
    pub relative: String,
    /// Host path, not canonicalized.
    pub absolute: PathBuf,
}

#[derive(Debug, Clone)]
pub struct PathSanitizer {
    root: PathBuf,
}

impl PathSanitizer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Reject anything that is not a single plain path component.
    pub fn check_segment(entity: &str, segment: &str) -> Result<()> {
        let reject =
            |reason: &str| -> Result<()> { Err(Error::invalid_path(entity, segment, reason)) };

        if segment.is_empty() {
            return reject("empty segment");
        }
        if segment.contains("..") {
            return reject("parent directory reference");
        }
        if segment == "." {
            return reject("current directory reference");
        }
        if segment.contains(['/', '\\']) {
            return reject("path separator");
        }
        if segment.contains('\0') {
            return reject("NUL byte");
        }
        if has_drive_prefix(segment) {
            return reject("drive prefix");
        }

        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => reject("not a single path component"),
        }
    }

    /// Resolve `segment` as a directory directly inside the trusted `base`.
    ///
    /// `base` must itself be a relative path that came out of this sanitizer
    /// or out of configuration.
    pub fn resolve_dir(&self, base: &str, entity: &str, segment: &str) -> Result<ResolvedDir> {
        Self::check_segment(entity, segment)?;

        let relative = join_slash(base, segment);
        let absolute = resolve_relative(&self.root, &relative);

        let canonical_root = fs::canonicalize(&self.root).map_err(|e| Error::scan(&self.root, e))?;
        let canonical = match fs::canonicalize(&absolute) {
            Ok(path) => path,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::not_found(entity, segment))
            }
            Err(e) => return Err(Error::scan(&absolute, e)),
        };

        if canonical == canonical_root || !canonical.starts_with(&canonical_root) {
            warn!(
                "Rejected {} segment {:?}: resolves to {:?}, outside the media root",
                entity, segment, canonical
            );
            return Err(Error::invalid_path(entity, segment, "escapes the media root"));
        }

        if !canonical.is_dir() {
            return Err(Error::not_found(entity, segment));
        }

        Ok(ResolvedDir { relative, absolute })
    }
}

fn has_drive_prefix(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, PathSanitizer) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("tv/Show/Season1")).unwrap();
        fs::write(dir.path().join("tv/Show/notes.txt"), b"").unwrap();
        let sanitizer = PathSanitizer::new(dir.path());
        (dir, sanitizer)
    }

    #[test]
    fn test_check_segment_rejects_traversal_and_separators() {
        for bad in [
            "", ".", "..", "a..b", "../etc", "a/b", "a\\b", "nul\0byte", "C:", "c:evil", "/abs",
        ] {
            let err = PathSanitizer::check_segment("show", bad).unwrap_err();
            assert!(
                matches!(err, Error::InvalidPath { .. }),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn test_check_segment_accepts_plain_names() {
        for good in ["Show", "Season 1", "The.Wire", "sub", "Ünïcode", "Dr: No"] {
            assert!(PathSanitizer::check_segment("show", good).is_ok(), "{good:?}");
        }
    }

    #[test]
    fn test_resolve_dir_nested() {
        let (_dir, sanitizer) = fixture();
        let show = sanitizer.resolve_dir("tv", "show", "Show").unwrap();
        assert_eq!(show.relative, "tv/Show");

        let season = sanitizer
            .resolve_dir(&show.relative, "season", "Season1")
            .unwrap();
        assert_eq!(season.relative, "tv/Show/Season1");
        assert!(season.absolute.ends_with("Season1"));
    }

    #[test]
    fn test_resolve_dir_missing_is_not_found() {
        let (_dir, sanitizer) = fixture();
        let err = sanitizer.resolve_dir("tv", "show", "Nope").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_resolve_dir_file_is_not_found() {
        let (_dir, sanitizer) = fixture();
        let err = sanitizer
            .resolve_dir("tv/Show", "season", "notes.txt")
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_resolve_dir_rejects_traversal_before_touching_disk() {
        let (_dir, sanitizer) = fixture();
        let err = sanitizer.resolve_dir("tv", "show", "..").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
        assert_eq!(err.http_status(), 404);
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_dir_rejects_symlink_escape() {
        let (dir, sanitizer) = fixture();
        let outside = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("tv/Escape")).unwrap();

        let err = sanitizer.resolve_dir("tv", "show", "Escape").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_dir_allows_symlink_inside_root() {
        let (dir, sanitizer) = fixture();
        std::os::unix::fs::symlink(dir.path().join("tv/Show"), dir.path().join("tv/Alias"))
            .unwrap();

        let resolved = sanitizer.resolve_dir("tv", "show", "Alias").unwrap();
        assert_eq!(resolved.relative, "tv/Alias");
    }
}
