//! Newest-file lookup inside a single directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Returns the non-directory entry directly under `dir` with the greatest
/// modification time, or `None` if there is no such entry.
///
/// Listing failure is an error. Entries whose type or metadata cannot be read
/// are skipped. On equal timestamps the entry seen first wins, which depends on
/// the filesystem's listing order.
pub fn newest_file(dir: &Path) -> io::Result<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in fs::read_dir(dir)? {
        let Ok(entry) = entry else { continue };
        match entry.file_type() {
            Ok(t) if t.is_dir() => continue,
            Ok(_) => {}
            Err(_) => continue,
        }
        let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
            continue;
        };
        let newer = match &newest {
            Some((best, _)) => modified > *best,
            None => true,
        };
        if newer {
            newest = Some((modified, entry.path()));
        }
    }

    Ok(newest.map(|(_, path)| path))
}
