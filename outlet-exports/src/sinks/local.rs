//! Local file sink for exports documents
//!
//! Writes the exports document as a JSON file (default: outlet.exports.json)
//! next to the stack, where the orchestration runtime picks it up.

use std::path::PathBuf;

use crate::document::ExportsDocument;
use crate::sink::{ExportsSink, SinkConfig, SinkError, SinkResult};

/// Local file sink for development and simple pipelines
pub struct LocalSink {
    /// Path to the exports document
    document_path: PathBuf,
}

impl LocalSink {
    /// Default exports document file name
    pub const DEFAULT_DOCUMENT_FILE: &'static str = "outlet.exports.json";

    /// Create a new LocalSink with the default path in the current directory
    pub fn new() -> Self {
        Self::with_path(PathBuf::from(Self::DEFAULT_DOCUMENT_FILE))
    }

    /// Create a new LocalSink with a specific document path
    pub fn with_path(document_path: PathBuf) -> Self {
        Self { document_path }
    }

    /// Create a LocalSink from configuration
    pub fn from_config(config: &SinkConfig) -> SinkResult<Self> {
        let path = config
            .get_string("path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_DOCUMENT_FILE));

        Ok(Self::with_path(path))
    }

    /// Get the document path
    pub fn document_path(&self) -> &PathBuf {
        &self.document_path
    }
}

impl Default for LocalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportsSink for LocalSink {
    fn read_document(&self) -> SinkResult<Option<ExportsDocument>> {
        if !self.document_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.document_path)
            .map_err(|e| SinkError::Io(format!("Failed to read exports document: {}", e)))?;

        let document: ExportsDocument = serde_json::from_str(&content).map_err(|e| {
            SinkError::InvalidDocument(format!("Failed to parse exports document: {}", e))
        })?;

        Ok(Some(document))
    }

    fn write_document(&self, document: &ExportsDocument) -> SinkResult<()> {
        let content = serde_json::to_string_pretty(document).map_err(|e| {
            SinkError::Serialization(format!("Failed to serialize exports document: {}", e))
        })?;

        std::fs::write(&self.document_path, content)
            .map_err(|e| SinkError::Io(format!("Failed to write exports document: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outlet_core::export::ExportSurface;
    use outlet_core::output::{OutputSet, OutputValue};
    use tempfile::tempdir;

    #[test]
    fn test_local_sink_read_write() {
        let dir = tempdir().unwrap();
        let document_path = dir.path().join("test.exports.json");
        let sink = LocalSink::with_path(document_path);

        // Initially nothing published
        let document = sink.read_document().unwrap();
        assert!(document.is_none());

        // Publish a surface
        let mut surface = ExportSurface::new("hello-world");
        surface.merge(
            OutputSet::new()
                .with_output("bucketName", OutputValue::String("my-bucket".to_string()))
                .with_output("region", OutputValue::String("us-east-1".to_string())),
        );
        let mut document = ExportsDocument::new(surface.module());
        document.republish(&surface);
        sink.write_document(&document).unwrap();

        // Read back
        let read = sink.read_document().unwrap().unwrap();
        assert_eq!(read.serial, 1);
        assert_eq!(read.module, "hello-world");
        let names: Vec<_> = read.outputs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["bucketName", "region"]);
    }

    #[test]
    fn test_local_sink_rejects_corrupt_document() {
        let dir = tempdir().unwrap();
        let document_path = dir.path().join("test.exports.json");
        std::fs::write(&document_path, "not json {").unwrap();

        let sink = LocalSink::with_path(document_path);
        let result = sink.read_document();
        assert!(matches!(result, Err(SinkError::InvalidDocument(_))));
    }

    #[test]
    fn test_local_sink_from_config() {
        use std::collections::HashMap;

        let config = SinkConfig {
            sink_type: "local".to_string(),
            attributes: HashMap::new(),
        };

        let sink = LocalSink::from_config(&config).unwrap();
        assert_eq!(
            sink.document_path(),
            &PathBuf::from(LocalSink::DEFAULT_DOCUMENT_FILE)
        );
    }

    #[test]
    fn test_local_sink_custom_path() {
        use std::collections::HashMap;

        let mut attributes = HashMap::new();
        attributes.insert(
            "path".to_string(),
            OutputValue::String("custom.exports.json".to_string()),
        );

        let config = SinkConfig {
            sink_type: "local".to_string(),
            attributes,
        };

        let sink = LocalSink::from_config(&config).unwrap();
        assert_eq!(sink.document_path(), &PathBuf::from("custom.exports.json"));
    }
}
