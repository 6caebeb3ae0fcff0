//! Exports sink trait and error types

use std::collections::HashMap;

use thiserror::Error;

use crate::document::ExportsDocument;
use outlet_core::output::OutputValue;

/// Errors that can occur when writing or reading published exports
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink type is not supported
    #[error("Unsupported sink type: {0}")]
    UnsupportedSink(String),

    /// Configuration error
    #[error("Sink configuration error: {0}")]
    Configuration(String),

    /// The exports document is corrupted or invalid
    #[error("Invalid exports document: {0}")]
    InvalidDocument(String),

    /// Document lineage mismatch (prevents accidental overwrites)
    #[error("Exports lineage mismatch: expected {expected}, got {actual}")]
    LineageMismatch { expected: String, actual: String },

    /// Network or I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SinkError {
    /// Create an unsupported sink error
    pub fn unsupported_sink(sink_type: impl Into<String>) -> Self {
        Self::UnsupportedSink(sink_type.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Trait for exports destinations
///
/// A sink is where published outputs land so that an external orchestration
/// runtime can discover them. All operations are synchronous: there is
/// exactly one writer and one logical operation per process run.
pub trait ExportsSink {
    /// Read the current exports document
    ///
    /// Returns `None` if nothing has been published yet
    fn read_document(&self) -> SinkResult<Option<ExportsDocument>>;

    /// Write the exports document
    ///
    /// The document's serial should be advanced before calling this
    fn write_document(&self, document: &ExportsDocument) -> SinkResult<()>;

    /// Prepare the sink for first use
    fn init(&self) -> SinkResult<()> {
        Ok(())
    }
}

/// Configuration for an exports sink
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Sink type (e.g., "local", "stdout")
    pub sink_type: String,
    /// Sink-specific attributes
    pub attributes: HashMap<String, OutputValue>,
}

impl SinkConfig {
    /// Get a string attribute value
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.attributes.get(key) {
            Some(OutputValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get a boolean attribute value
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.attributes.get(key) {
            Some(OutputValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Get a boolean attribute with a default value
    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_error_display() {
        let error = SinkError::unsupported_sink("s3");
        assert_eq!(error.to_string(), "Unsupported sink type: s3");

        let error = SinkError::LineageMismatch {
            expected: "a".to_string(),
            actual: "b".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Exports lineage mismatch: expected a, got b"
        );
    }

    #[test]
    fn test_sink_config_accessors() {
        let mut attributes = HashMap::new();
        attributes.insert(
            "path".to_string(),
            OutputValue::String("custom.exports.json".to_string()),
        );
        attributes.insert("pretty".to_string(), OutputValue::Bool(false));

        let config = SinkConfig {
            sink_type: "local".to_string(),
            attributes,
        };

        assert_eq!(config.get_string("path"), Some("custom.exports.json"));
        assert_eq!(config.get_bool("pretty"), Some(false));
        assert!(config.get_bool_or("missing", true));
    }
}
