//! Stdout sink for exports documents
//!
//! Prints the document as JSON on standard output, for orchestration
//! runtimes that capture the process output instead of reading a file.
//! Write-only: nothing persists, so reads always yield `None`.

use crate::document::ExportsDocument;
use crate::sink::{ExportsSink, SinkError, SinkResult};

/// Sink that prints the exports document to standard output
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportsSink for StdoutSink {
    fn read_document(&self) -> SinkResult<Option<ExportsDocument>> {
        Ok(None)
    }

    fn write_document(&self, document: &ExportsDocument) -> SinkResult<()> {
        let content = serde_json::to_string_pretty(document).map_err(|e| {
            SinkError::Serialization(format!("Failed to serialize exports document: {}", e))
        })?;

        println!("{}", content);
        Ok(())
    }
}
