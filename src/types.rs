/*!
 * Core types and data structures for unificar
 */

use crate::error::SkipReason;

/// One included file: the banner path and its raw content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Path relative to the walk root, e.g. `./src/main.rs`
    pub path: String,
    /// File content, untouched
    pub content: String,
}

/// Segments accumulated in walk order, written once at the end of a run
#[derive(Debug, Clone, Default)]
pub struct AggregationBuffer {
    segments: Vec<Segment>,
}

impl AggregationBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment after all previous ones
    pub fn push(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.segments.push(Segment {
            path: path.into(),
            content: content.into(),
        });
    }

    /// Segments in the order they were appended
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether no file was appended
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// What happened to one file the walk offered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Content was appended to the buffer
    Included {
        /// Banner path
        path: String,
        /// Number of lines in the content
        lines: usize,
        /// Number of characters in the content
        chars: usize,
    },
    /// The file could not be read and is absent from the output
    Skipped {
        /// Banner path
        path: String,
        /// Why reading failed
        reason: SkipReason,
    },
}

impl FileOutcome {
    /// Banner path of the file
    pub fn path(&self) -> &str {
        match self {
            Self::Included { path, .. } | Self::Skipped { path, .. } => path,
        }
    }

    /// Whether the file made it into the output
    pub fn is_included(&self) -> bool {
        matches!(self, Self::Included { .. })
    }
}

/// Result of removing the previous run's artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleArtifact {
    /// Nothing was there
    Absent,
    /// The old artifact was deleted
    Removed,
    /// Deletion failed; the old artifact may still be on disk
    RemovalFailed(String),
}
