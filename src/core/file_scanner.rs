use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use super::error::ScanError;

/// Suffix of the files the walker hands to the parser.
pub const SOURCE_FILE_EXTENSION: &str = "rs";

/// Compile exclusion globs, failing on the first invalid one.
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>, ScanError> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|source| ScanError::InvalidPattern {
                pattern: p.clone(),
                source,
            })
        })
        .collect()
}

/// Enumerate source files under `root`, in file-name order.
///
/// Patterns are matched against basenames. A matching file is skipped; a
/// matching directory is pruned together with everything below it. The root
/// itself is never excluded.
pub fn scan_files(
    root: &Path,
    exclude_patterns: &[Pattern],
    cancel: &AtomicBool,
) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry, exclude_patterns));

    for entry in walker {
        if cancel.load(Ordering::Relaxed) {
            return Err(ScanError::Cancelled);
        }

        let entry = entry.map_err(|source| ScanError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;

        if entry.file_type().is_file() && is_scannable_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_excluded(entry: &DirEntry, patterns: &[Pattern]) -> bool {
    let name = entry.file_name().to_string_lossy();
    patterns.iter().any(|p| p.matches(&name))
}

fn is_scannable_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SOURCE_FILE_EXTENSION)
}
