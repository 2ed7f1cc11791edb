/*!
 * Output rendering and writing for unificar
 */

use std::fmt::Write as _;
use std::fs;
use std::io;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Result, ResultExt};
use crate::types::{AggregationBuffer, Segment, StaleArtifact};

/// Width of the `=` rule above and below each banner
pub const DELIMITER_WIDTH: usize = 50;

/// Label preceding the path in each banner
pub const BANNER_LABEL: &str = "ARCHIVO: ";

/// Writer for the concatenated context file
pub struct ContextWriter {
    /// Writer configuration
    config: Config,
}

impl ContextWriter {
    /// Create a new context writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Delete the previous run's artifact, if any.
    ///
    /// Failure only produces a warning. The stale file then stays in place
    /// until the final write replaces it.
    pub fn remove_stale(&self) -> StaleArtifact {
        let path = &self.config.output_file;

        match fs::remove_file(path) {
            Ok(()) => {
                info!(path = %path.display(), "Removed previous output, starting clean");
                StaleArtifact::Removed
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => StaleArtifact::Absent,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not remove previous output");
                StaleArtifact::RemovalFailed(e.to_string())
            }
        }
    }

    /// Write the whole buffer to the output file in one operation.
    ///
    /// Returns the number of bytes written.
    pub fn write(&self, buffer: &AggregationBuffer) -> Result<usize> {
        let text = render(buffer);
        let path = &self.config.output_file;

        fs::write(path, &text).with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(text.len())
    }
}

/// Render every segment of the buffer, in order
pub fn render(buffer: &AggregationBuffer) -> String {
    let capacity = buffer
        .segments()
        .iter()
        .map(|s| s.path.len() + s.content.len() + 2 * DELIMITER_WIDTH + 16)
        .sum();

    let mut out = String::with_capacity(capacity);
    for segment in buffer.segments() {
        write_segment(&mut out, segment);
    }
    out
}

/// Append one banner followed by the raw content
fn write_segment(out: &mut String, segment: &Segment) {
    let rule = "=".repeat(DELIMITER_WIDTH);
    // Writing into a String cannot fail
    let _ = write!(
        out,
        "\n\n{rule}\n{BANNER_LABEL}{path}\n{rule}\n\n",
        path = segment.path
    );
    out.push_str(&segment.content);
}
