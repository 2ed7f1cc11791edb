/*!
 * unificar - Concatenate a project tree into a single context file
 *
 * Walks a directory, skips a fixed set of excluded names, and writes the
 * contents of every remaining file into one text file. Each file is preceded
 * by a banner naming its path.
 */

pub mod aggregator;
pub mod config;
pub mod error;
pub mod report;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use aggregator::Aggregator;
pub use config::{Config, ExclusionSet};
pub use error::{Result, SkipReason, UnificarError};
pub use report::{FileReportInfo, ReportFormat, Reporter, ScanReport, SkippedFile};
pub use scanner::{ScanOutcome, Scanner};
pub use types::{AggregationBuffer, FileOutcome, Segment, StaleArtifact};
pub use utils::{count_files, format_file_size, OUTPUT_FILE};
pub use writer::{render, ContextWriter};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
