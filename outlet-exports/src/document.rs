//! Exports document structures for persisting published outputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use outlet_core::export::ExportSurface;

/// The persisted snapshot of a published export surface
///
/// A document always reflects exactly one evaluation of a definition
/// module; republishing replaces the output list wholesale, it never merges
/// with previous outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportsDocument {
    /// Document format version
    pub version: u32,
    /// Monotonically increasing number for each republish
    pub serial: u64,
    /// Unique identifier for this document lineage (prevents accidental overwrites)
    pub lineage: String,
    /// Version of Outlet that last wrote this document
    pub outlet_version: String,
    /// Name of the definition module that produced the outputs
    pub module: String,
    /// When the entry function was evaluated
    pub evaluated_at: DateTime<Utc>,
    /// Published outputs, in evaluation order
    pub outputs: Vec<OutputRecord>,
}

impl ExportsDocument {
    /// Current document format version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new empty document for the named module
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            serial: 0,
            lineage: uuid::Uuid::new_v4().to_string(),
            outlet_version: env!("CARGO_PKG_VERSION").to_string(),
            module: module.into(),
            evaluated_at: Utc::now(),
            outputs: Vec::new(),
        }
    }

    /// Create a new document with a specific lineage
    pub fn with_lineage(module: impl Into<String>, lineage: String) -> Self {
        Self {
            lineage,
            ..Self::new(module)
        }
    }

    /// Snapshot a surface into a fresh document
    pub fn from_surface(surface: &ExportSurface) -> Self {
        let mut document = Self::new(surface.module());
        document.set_outputs(surface);
        document
    }

    /// Replace the outputs with a fresh evaluation and advance the serial
    pub fn republish(&mut self, surface: &ExportSurface) {
        self.module = surface.module().to_string();
        self.evaluated_at = Utc::now();
        self.set_outputs(surface);
        self.increment_serial();
    }

    fn set_outputs(&mut self, surface: &ExportSurface) {
        self.outputs = surface
            .exports()
            .iter()
            .map(|(name, value)| OutputRecord::new(name, value.to_json()))
            .collect();
    }

    /// Increment serial and update the tool version for a new write
    pub fn increment_serial(&mut self) {
        self.serial += 1;
        self.outlet_version = env!("CARGO_PKG_VERSION").to_string();
    }

    /// Find an output by name
    pub fn find_output(&self, name: &str) -> Option<&OutputRecord> {
        self.outputs.iter().find(|o| o.name == name)
    }

    /// Add or replace an output record
    pub fn upsert_output(&mut self, record: OutputRecord) {
        if let Some(existing) = self.outputs.iter_mut().find(|o| o.name == record.name) {
            *existing = record;
        } else {
            self.outputs.push(record);
        }
    }

    /// Remove an output from the document
    pub fn remove_output(&mut self, name: &str) -> Option<OutputRecord> {
        if let Some(pos) = self.outputs.iter().position(|o| o.name == name) {
            Some(self.outputs.remove(pos))
        } else {
            None
        }
    }
}

/// A single published output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Output name
    pub name: String,
    /// Output value as JSON
    pub value: serde_json::Value,
}

impl OutputRecord {
    pub fn new(name: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outlet_core::output::{OutputSet, OutputValue};

    fn surface_with(outputs: OutputSet) -> ExportSurface {
        let mut surface = ExportSurface::new("hello-world");
        surface.merge(outputs);
        surface
    }

    #[test]
    fn test_document_new() {
        let document = ExportsDocument::new("hello-world");
        assert_eq!(document.version, ExportsDocument::CURRENT_VERSION);
        assert_eq!(document.serial, 0);
        assert!(!document.lineage.is_empty());
        assert!(document.outputs.is_empty());
    }

    #[test]
    fn test_document_increment_serial() {
        let mut document = ExportsDocument::new("hello-world");
        assert_eq!(document.serial, 0);
        document.increment_serial();
        assert_eq!(document.serial, 1);
        document.increment_serial();
        assert_eq!(document.serial, 2);
    }

    #[test]
    fn test_from_surface_keeps_output_order() {
        let surface = surface_with(
            OutputSet::new()
                .with_output("zeta", OutputValue::Int(1))
                .with_output("alpha", OutputValue::Int(2)),
        );

        let document = ExportsDocument::from_surface(&surface);
        let names: Vec<_> = document.outputs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_republish_replaces_outputs_wholesale() {
        let first = surface_with(
            OutputSet::new()
                .with_output("bucketName", OutputValue::String("my-bucket".to_string()))
                .with_output("region", OutputValue::String("us-east-1".to_string())),
        );
        let mut document = ExportsDocument::new(first.module());
        document.republish(&first);
        assert_eq!(document.serial, 1);
        assert_eq!(document.outputs.len(), 2);

        // A later evaluation that dropped an output must not leave it behind
        let second = surface_with(
            OutputSet::new().with_output("region", OutputValue::String("us-west-2".to_string())),
        );
        let lineage = document.lineage.clone();
        document.republish(&second);

        assert_eq!(document.serial, 2);
        assert_eq!(document.lineage, lineage);
        assert_eq!(document.outputs.len(), 1);
        assert!(document.find_output("bucketName").is_none());
        assert_eq!(
            document.find_output("region").map(|o| &o.value),
            Some(&serde_json::json!("us-west-2"))
        );
    }

    #[test]
    fn test_document_upsert_output() {
        let mut document = ExportsDocument::new("hello-world");

        document.upsert_output(OutputRecord::new("region", serde_json::json!("us-east-1")));
        assert_eq!(document.outputs.len(), 1);

        document.upsert_output(OutputRecord::new("region", serde_json::json!("us-west-2")));
        assert_eq!(document.outputs.len(), 1);
        assert_eq!(
            document.find_output("region").map(|o| &o.value),
            Some(&serde_json::json!("us-west-2"))
        );
    }

    #[test]
    fn test_document_remove_output() {
        let mut document = ExportsDocument::new("hello-world");
        document.upsert_output(OutputRecord::new("region", serde_json::json!("us-east-1")));

        let removed = document.remove_output("region");
        assert!(removed.is_some());
        assert!(document.outputs.is_empty());

        let removed = document.remove_output("region");
        assert!(removed.is_none());
    }

    #[test]
    fn test_document_serialization() {
        let surface = surface_with(
            OutputSet::new()
                .with_output("bucketName", OutputValue::String("my-bucket".to_string()))
                .with_output("count", OutputValue::Int(3)),
        );
        let document = ExportsDocument::from_surface(&surface);

        let json = serde_json::to_string_pretty(&document).unwrap();
        let deserialized: ExportsDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.version, document.version);
        assert_eq!(deserialized.serial, document.serial);
        assert_eq!(deserialized.lineage, document.lineage);
        assert_eq!(deserialized.outputs.len(), 2);
        assert_eq!(deserialized.outputs[0].name, "bucketName");
    }
}
