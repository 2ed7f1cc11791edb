/*!
 * Configuration handling for unificar
 */

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;
use glob_match::glob_match;

use crate::ensure;
use crate::error::Result;
use crate::utils::{
    DEFAULT_EXCLUDED_DIRS, DEFAULT_EXCLUDED_EXTENSIONS, DEFAULT_EXCLUDED_FILES, OUTPUT_FILE,
};

/// Command-line arguments for unificar
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "unificar",
    version = env!("CARGO_PKG_VERSION"),
    about = "Concatenate the text files of a project tree into a single context file",
    long_about = "Walks a project directory and writes the contents of every non-excluded file, each preceded by a banner naming its path, into contexto_completo.txt."
)]
pub struct Args {
    /// Directory to aggregate (the output file is written here too)
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Log every file as it is read
    #[clap(short, long)]
    pub verbose: bool,

    /// Hide the progress bar and the final report
    #[clap(short, long)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Names excluded from a run
///
/// Directory names prune a whole subtree wherever they appear. File names
/// match exactly. Extension patterns are globs matched against the file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    /// Directory names never descended into
    pub dirs: BTreeSet<String>,
    /// File names never read
    pub files: BTreeSet<String>,
    /// Glob patterns for skipped extensions
    pub extensions: Vec<String>,
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self {
            dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            files: DEFAULT_EXCLUDED_FILES.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_EXCLUDED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ExclusionSet {
    /// Whether a directory with this name may be descended into
    pub fn allows_dir(&self, name: &str) -> bool {
        !self.dirs.contains(name)
    }

    /// Whether a file with this name may be read
    pub fn allows_file(&self, name: &str) -> bool {
        if self.files.contains(name) {
            return false;
        }

        !self
            .extensions
            .iter()
            .any(|pattern| glob_match(pattern, name))
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to walk
    pub target_dir: PathBuf,

    /// Output file path
    pub output_file: PathBuf,

    /// Names skipped during the walk
    pub exclusions: ExclusionSet,
}

impl Config {
    /// Configuration for aggregating `target_dir` with the built-in exclusions
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        let target_dir = target_dir.into();
        Self {
            output_file: target_dir.join(OUTPUT_FILE),
            target_dir,
            exclusions: ExclusionSet::default(),
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: &Args) -> Self {
        Self::new(&args.directory_path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.is_dir(),
            PathNotFound,
            "Target directory not found: {}",
            self.target_dir.display()
        );

        let output_name = self
            .output_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        ensure!(
            !self.exclusions.allows_file(&output_name),
            Config,
            "Output file {} must be excluded from the walk",
            output_name
        );

        Ok(())
    }
}
