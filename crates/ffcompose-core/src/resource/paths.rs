//! Splitting full paths into the parts a resource is built from.

use std::path::{Path, PathBuf};

/// Directory, file stem and extension of a full path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts {
    /// Containing directory; empty when the path has no parent.
    pub directory: PathBuf,
    /// File name without its extension.
    pub stem: String,
    /// Extension as written, without the dot; empty when there is none.
    pub extension: String,
}

/// Split `path` into directory, stem and extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ffcompose_core::resource::paths::split_full_path;
///
/// let parts = split_full_path(Path::new("/tmp/clip.MP4"));
/// assert_eq!(parts.directory, Path::new("/tmp"));
/// assert_eq!(parts.stem, "clip");
/// assert_eq!(parts.extension, "MP4");
/// ```
pub fn split_full_path(path: &Path) -> PathParts {
    let directory = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    PathParts {
        directory,
        stem,
        extension,
    }
}

/// Normalize an extension or container name into a registry key.
///
/// ```
/// use ffcompose_core::resource::paths::extension_key;
///
/// assert_eq!(extension_key("Mp4"), "MP4");
/// assert_eq!(extension_key(".mkv"), "MKV");
/// ```
pub fn extension_key(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_uppercase()
}
