/*!
 * Directory walking and file reading
 */

use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::ensure;
use crate::error::{Result, SkipReason};
use crate::types::{AggregationBuffer, FileOutcome};
use crate::utils::{is_file_candidate, passes_dir_filter};

/// Everything one walk produced
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Contents of the readable files, in walk order
    pub buffer: AggregationBuffer,
    /// One entry per file attempted, in walk order
    pub files: Vec<FileOutcome>,
}

/// Scanner for directory contents
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Walk the target directory and read every file that survives the filters
    pub fn scan(&self) -> Result<ScanOutcome> {
        let root = &self.config.target_dir;
        ensure!(
            root.is_dir(),
            PathNotFound,
            "Target directory not found: {}",
            root.display()
        );

        let exclusions = &self.config.exclusions;
        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by(files_first)
            .into_iter()
            .filter_entry(|e| passes_dir_filter(e, exclusions));

        let mut outcome = ScanOutcome::default();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.progress
                        .suspend(|| warn!(error = %e, "Skipping unreadable entry"));
                    continue;
                }
            };

            if !is_file_candidate(&entry) || !self.should_read(&entry) {
                continue;
            }

            let path = self.banner_path(entry.path());
            self.progress.inc(1);
            self.progress
                .set_message(format!("Current file: {}", truncate_display(&path, 40)));

            match read_text(entry.path()) {
                Ok(content) => {
                    debug!(path = %path, "Read file");
                    outcome.files.push(FileOutcome::Included {
                        path: path.clone(),
                        lines: content.lines().count(),
                        chars: content.chars().count(),
                    });
                    outcome.buffer.push(path, content);
                }
                Err(reason) => {
                    self.progress
                        .suspend(|| warn!(path = %path, error = %reason, "Could not read file"));
                    outcome.files.push(FileOutcome::Skipped { path, reason });
                }
            }
        }

        Ok(outcome)
    }

    /// Check if a file passes the name and extension filters
    pub fn should_read(&self, entry: &DirEntry) -> bool {
        let file_name = entry.file_name().to_string_lossy();
        self.config.exclusions.allows_file(&file_name)
    }

    /// Path shown in the banner: relative to the root, `./`-prefixed, `/`-separated
    pub fn banner_path(&self, path: &Path) -> String {
        let rel_path = path.strip_prefix(&self.config.target_dir).unwrap_or(path);

        let mut banner = String::from(".");
        for component in rel_path.components() {
            banner.push('/');
            banner.push_str(&component.as_os_str().to_string_lossy());
        }
        banner
    }
}

/// Files of a directory come before its subdirectories, each group by name
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Read a whole file as strict UTF-8
fn read_text(path: &Path) -> std::result::Result<String, SkipReason> {
    // Follows symlinks; a dangling link surfaces as NotFound
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(SkipReason::NotAFile);
    }

    let bytes = fs::read(path)?;
    Ok(String::from_utf8(bytes)?)
}

/// Keep the tail of long paths so the progress line stays on one row
fn truncate_display(path: &str, max_chars: usize) -> String {
    let count = path.chars().count();
    if count <= max_chars {
        return path.to_string();
    }

    let tail: String = path.chars().skip(count - (max_chars - 3)).collect();
    format!("...{}", tail)
}
