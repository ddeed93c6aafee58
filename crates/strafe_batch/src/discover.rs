//! Demo file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::BatchError;

/// Recursively yield files under `root` whose extension matches
/// `extension`, lazily and in walk order.
///
/// Any walk error (permissions, I/O) surfaces as `Err` and is fatal to the
/// run; callers stop consuming the iterator at the first error.
pub fn walk_demos(
    root: &Path,
    extension: &str,
) -> impl Iterator<Item = Result<PathBuf, BatchError>> {
    WalkDir::new(root).into_iter().filter_map(move |entry| {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => return Some(Err(BatchError::Walk(err))),
        };
        if !entry.file_type().is_file() {
            return None;
        }
        let path = entry.into_path();
        if path.extension().is_some_and(|ext| ext == extension) {
            Some(Ok(path))
        } else {
            None
        }
    })
}
