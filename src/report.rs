/*!
 * Reporting functionality for unificar
 *
 * Renders the outcome of a run as console tables using the tabled library.
 */

use std::time::Duration;

use chrono::{DateTime, Local};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::error::SkipReason;
use crate::types::{FileOutcome, StaleArtifact};
use crate::utils::format_file_size;

/// Information about an included file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReportInfo {
    /// Banner path
    pub path: String,
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
}

/// A file left out of the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Banner path
    pub path: String,
    /// Why it was left out
    pub reason: SkipReason,
}

/// Summary of one run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Output file path
    pub output_file: String,
    /// When the output was written
    pub finished_at: DateTime<Local>,
    /// Time taken by cleanup, walk and write
    pub duration: Duration,
    /// What happened to the previous artifact
    pub stale_artifact: StaleArtifact,
    /// Included files, in output order
    pub file_details: Vec<FileReportInfo>,
    /// Files that could not be read, in walk order
    pub skipped: Vec<SkippedFile>,
    /// Size of the output file in bytes
    pub bytes_written: usize,
}

impl ScanReport {
    /// Build a report from per-file outcomes
    pub fn from_outcomes(
        output_file: String,
        duration: Duration,
        stale_artifact: StaleArtifact,
        outcomes: &[FileOutcome],
        bytes_written: usize,
    ) -> Self {
        let mut file_details = Vec::new();
        let mut skipped = Vec::new();

        for outcome in outcomes {
            match outcome {
                FileOutcome::Included { path, lines, chars } => {
                    file_details.push(FileReportInfo {
                        path: path.clone(),
                        lines: *lines,
                        chars: *chars,
                    })
                }
                FileOutcome::Skipped { path, reason } => skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: reason.clone(),
                }),
            }
        }

        Self {
            output_file,
            finished_at: Local::now(),
            duration,
            stale_artifact,
            file_details,
            skipped,
            bytes_written,
        }
    }

    /// Number of files written to the output
    pub fn files_included(&self) -> usize {
        self.file_details.len()
    }

    /// Number of files left out after a read failure
    pub fn files_skipped(&self) -> usize {
        self.skipped.len()
    }

    /// Total lines across included files
    pub fn total_lines(&self) -> usize {
        self.file_details.iter().map(|f| f.lines).sum()
    }

    /// Total characters across included files
    pub fn total_chars(&self) -> usize {
        self.file_details.iter().map(|f| f.chars).sum()
    }
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &ScanReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Keep the last path segments that fit in max_len
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.chars().count() <= max_len {
            return path.to_string();
        }

        let parts: Vec<&str> = path.split('/').collect();
        let mut current_len = 3; // "..."
        let mut segments = Vec::new();

        for part in parts.iter().rev() {
            let part_len = part.chars().count() + 1; // +1 for '/'
            if current_len + part_len <= max_len {
                segments.push(*part);
                current_len += part_len;
            } else {
                break;
            }
        }

        let mut result = String::from("...");
        for part in segments.iter().rev() {
            result.push('/');
            result.push_str(part);
        }

        result
    }

    fn styled(mut table: Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "📂 Output File".to_string(),
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "💾 Output Size".to_string(),
                value: format_file_size(report.bytes_written as u64),
            },
            SummaryRow {
                key: "🕒 Finished At".to_string(),
                value: report.finished_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📄 Files Included".to_string(),
                value: self.format_number(report.files_included()),
            },
            SummaryRow {
                key: "❌ Files Skipped".to_string(),
                value: self.format_number(report.files_skipped()),
            },
            SummaryRow {
                key: "📝 Total Lines".to_string(),
                value: self.format_number(report.total_lines()),
            },
            SummaryRow {
                key: "📦 LLM Tokens".to_string(),
                value: format!(
                    "{} tokens (estimated)",
                    self.format_number(report.total_chars() / 4)
                ),
            },
        ];

        if let StaleArtifact::RemovalFailed(e) = &report.stale_artifact {
            rows.push(SummaryRow {
                key: "⚠️ Previous Output".to_string(),
                value: format!("not removed: {}", e),
            });
        }

        Self::styled(Table::new(rows))
    }

    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Est. Tokens")]
            tokens: String,
        }

        let mut files: Vec<_> = report.file_details.iter().collect();
        files.sort_by(|a, b| b.chars.cmp(&a.chars).then_with(|| a.path.cmp(&b.path)));

        let files_to_show = if files.len() > 15 {
            &files[0..10]
        } else {
            &files[..]
        };

        let rows: Vec<FileRow> = files_to_show
            .iter()
            .map(|info| FileRow {
                path: self.format_path(&info.path, 60),
                lines: self.format_number(info.lines),
                tokens: self.format_number(info.chars / 4),
            })
            .collect();

        Self::styled(Table::new(rows))
    }

    fn create_skipped_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SkippedRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Reason")]
            reason: String,
        }

        let rows: Vec<SkippedRow> = report
            .skipped
            .iter()
            .map(|s| SkippedRow {
                path: self.format_path(&s.path, 60),
                reason: s.reason.to_string(),
            })
            .collect();

        Self::styled(Table::new(rows))
    }

    fn generate_console_report(&self, report: &ScanReport) -> String {
        let files_title = if report.file_details.len() > 15 {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT  📋"
        } else {
            "📋  INCLUDED FILES"
        };

        let mut out = format!("{}\n{}\n\n", files_title, self.create_files_table(report));

        if !report.skipped.is_empty() {
            out.push_str(&format!(
                "{}\n{}\n\n",
                "⚠️  SKIPPED FILES",
                self.create_skipped_table(report)
            ));
        }

        out.push_str(&format!(
            "{}\n{}",
            "✅  CONTEXT FILE WRITTEN",
            self.create_summary_table(report)
        ));

        out
    }
}
