//! Directory scanning for input images

use crate::{IoError, IoResult};
use std::path::{Path, PathBuf};

/// Check whether `path` has one of `extensions` (case-insensitive,
/// without the leading dot).
pub fn has_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|want| want.as_ref().trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}

/// List the regular files of `dir` whose extension is in `extensions`.
///
/// Subdirectories are not searched. The result is sorted by path so that
/// repeated runs visit images in the same order.
///
/// # Errors
///
/// Returns [`IoError::DirectoryNotFound`] if `dir` is not a directory.
pub fn list_images<P: AsRef<Path>, S: AsRef<str>>(
    dir: P,
    extensions: &[S],
) -> IoResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(IoError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, extensions) {
            files.push(path);
        }
    }
    files.sort();
    tracing::debug!(dir = %dir.display(), count = files.len(), "listed images");
    Ok(files)
}
