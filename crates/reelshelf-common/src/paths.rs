//! Path utilities for classifying files and handling catalog-relative paths.
//!
//! Catalog paths are always relative to the media root and always use `/` as
//! the separator, whatever the host platform uses. These helpers are shared by
//! the scanner, the navigation indexer, and the subtitle locator.

use std::path::{Component, Path, PathBuf};

/// Video extensions recognized when no configuration overrides them.
const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mp4"];

/// Sidecar subtitle extension used when no configuration overrides it.
pub const DEFAULT_SUBTITLE_EXTENSION: &str = "vtt";

/// Check if a path has one of the given extensions (case-insensitive).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use reelshelf_common::paths::has_extension;
///
/// let exts = vec!["mp4".to_string(), "mkv".to_string()];
/// assert!(has_extension(Path::new("movie.MKV"), &exts));
/// assert!(!has_extension(Path::new("movie.vtt"), &exts));
/// ```
pub fn has_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            extensions
                .iter()
                .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Get the list of default video file extensions.
#[must_use]
pub fn default_video_extensions() -> &'static [&'static str] {
    DEFAULT_VIDEO_EXTENSIONS
}

/// Join the normal components of a relative path with `/`.
///
/// Root, prefix, and `.` components are dropped, so the result never starts
/// with a separator.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use reelshelf_common::paths::to_slash_path;
///
/// assert_eq!(to_slash_path(Path::new("tv/Show/ep1.mp4")), "tv/Show/ep1.mp4");
/// ```
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a relative directory and a child name with `/`.
///
/// An empty directory means the media root itself.
pub fn join_slash(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Turn a `/`-separated catalog path back into a host path under `root`.
///
/// Callers pass paths produced by the scanner or segments already accepted
/// by the sanitizer; nothing here re-validates them.
pub fn resolve_relative(root: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(root.to_path_buf(), |path, part| path.join(part))
}

/// The folder part of a catalog-relative path, or `""` for root-level files.
///
/// # Examples
///
/// ```
/// use reelshelf_common::paths::parent_folder;
///
/// assert_eq!(parent_folder("tv/Show/S1/ep1.mp4"), "tv/Show/S1");
/// assert_eq!(parent_folder("loose.mp4"), "");
/// ```
pub fn parent_folder(relative: &str) -> &str {
    relative.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Replace the extension of the final path segment.
///
/// Files without an extension get one appended. Dots in folder names are
/// never touched.
///
/// # Examples
///
/// ```
/// use reelshelf_common::paths::replace_extension;
///
/// assert_eq!(replace_extension("Movies/Inception.mp4", "vtt"), "Movies/Inception.vtt");
/// assert_eq!(replace_extension("v1.0/clip", "vtt"), "v1.0/clip.vtt");
/// ```
pub fn replace_extension(relative: &str, extension: &str) -> String {
    let name_start = relative.rfind('/').map(|idx| idx + 1).unwrap_or(0);
    let stem_end = match relative[name_start..].rfind('.') {
        Some(0) | None => relative.len(),
        Some(idx) => name_start + idx,
    };
    format!("{}.{}", &relative[..stem_end], extension)
}
