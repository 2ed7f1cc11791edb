/*!
 * A single aggregation run: cleanup, walk, write
 */

use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::report::ScanReport;
use crate::scanner::Scanner;
use crate::writer::ContextWriter;

/// Drives one run over a directory tree
pub struct Aggregator {
    config: Config,
    progress: Arc<ProgressBar>,
}

impl Aggregator {
    /// Create an aggregator for the given configuration
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Create an aggregator without a visible progress bar
    pub fn headless(config: Config) -> Self {
        Self::new(config, Arc::new(ProgressBar::hidden()))
    }

    /// Run the whole workflow.
    ///
    /// The previous artifact is removed first; failing to remove it is only a
    /// warning. Unreadable files are recorded in the report and left out.
    /// Nothing is written until the walk has finished, and an error is
    /// returned only when the root is missing or the final write fails.
    pub fn run(&self) -> Result<ScanReport> {
        let start_time = Instant::now();

        let writer = ContextWriter::new(self.config.clone());
        let stale_artifact = writer.remove_stale();

        let scanner = Scanner::new(self.config.clone(), Arc::clone(&self.progress));
        let scan = scanner.scan()?;

        let bytes_written = writer.write(&scan.buffer)?;

        let report = ScanReport::from_outcomes(
            self.config.output_file.display().to_string(),
            start_time.elapsed(),
            stale_artifact,
            &scan.files,
            bytes_written,
        );

        self.progress.suspend(|| {
            info!(
                output = %report.output_file,
                included = report.files_included(),
                skipped = report.files_skipped(),
                "Context file written"
            )
        });

        Ok(report)
    }
}
