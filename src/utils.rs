/*!
 * Utility functions for unificar
 */

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::config::ExclusionSet;

/// Name of the file every run produces
pub const OUTPUT_FILE: &str = "contexto_completo.txt";

/// Directory names never descended into
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules", ".git", "logs", "dist", "build"];

/// File names never read
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &["package-lock.json", ".DS_Store", OUTPUT_FILE];

/// Image formats skipped by extension
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &["*.png", "*.jpg"];

/// Whether a walk entry is something a run tries to read.
///
/// Directories are walked, not read. Symlinks are not followed into
/// directories, so a link to a directory is neither walked nor read.
pub fn is_file_candidate(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_dir() {
        return false;
    }
    !(file_type.is_symlink() && entry.path().is_dir())
}

/// Whether the walk may enter or yield this entry
pub fn passes_dir_filter(entry: &DirEntry, exclusions: &ExclusionSet) -> bool {
    !entry.file_type().is_dir() || exclusions.allows_dir(&entry.file_name().to_string_lossy())
}

/// Count the files a run will attempt, for progress tracking
pub fn count_files(dir: &Path, exclusions: &ExclusionSet) -> u64 {
    WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| passes_dir_filter(e, exclusions))
        .filter_map(Result::ok)
        .filter(is_file_candidate)
        .filter(|e| exclusions.allows_file(&e.file_name().to_string_lossy()))
        .count() as u64
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
