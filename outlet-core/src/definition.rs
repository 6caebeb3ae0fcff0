//! Definition - The entry-point seam between compiled modules and the adapter
//!
//! A Definition is anything invocable as a zero-argument entry function
//! producing an output set. Compiled manifests are the common case;
//! in-process implementations are used by embedders and tests.

use crate::adapter::{AdapterError, AdapterResult};
use crate::module::ModuleManifest;
use crate::output::OutputSet;

/// Error raised by an entry function during evaluation
///
/// Carries the underlying failure unchanged in its source chain; the
/// adapter adds no recovery or translation on top.
#[derive(Debug)]
pub struct EntryError {
    pub module: String,
    pub message: String,
    pub cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl EntryError {
    pub fn new(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

impl std::fmt::Display for EntryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.module, self.message)
    }
}

impl std::error::Error for EntryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &dyn std::error::Error)
    }
}

/// A definition module invocable as a zero-argument entry function
pub trait Definition {
    /// Module name
    fn name(&self) -> &str;

    /// Invoke the entry function, producing the outputs of one evaluation
    fn entry(&self) -> AdapterResult<OutputSet>;
}

/// Definition implementation for Box<dyn Definition>
/// This enables dynamic dispatch for definitions
impl Definition for Box<dyn Definition> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn entry(&self) -> AdapterResult<OutputSet> {
        (**self).entry()
    }
}

/// A definition backed by a compiled module manifest
///
/// The entry point is validated once at construction; invocation
/// materializes the declared return payload into an output set.
pub struct CompiledDefinition {
    manifest: ModuleManifest,
}

impl CompiledDefinition {
    /// Wrap a manifest, validating its entry point
    pub fn from_manifest(manifest: ModuleManifest) -> AdapterResult<Self> {
        manifest.entry_function()?;
        Ok(Self { manifest })
    }

    /// The underlying manifest
    pub fn manifest(&self) -> &ModuleManifest {
        &self.manifest
    }
}

impl Definition for CompiledDefinition {
    fn name(&self) -> &str {
        &self.manifest.name
    }

    fn entry(&self) -> AdapterResult<OutputSet> {
        let payload = self.manifest.entry_function()?;
        match payload {
            serde_json::Value::Object(map) => Ok(OutputSet::from_json_object(map)),
            other => Err(AdapterError::InvalidOutputShape {
                module: self.manifest.name.clone(),
                found: json_type_name(other).to_string(),
            }),
        }
    }
}

/// Name of a JSON value's type, for error messages
fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputValue;

    fn manifest_with_payload(payload: serde_json::Value) -> ModuleManifest {
        serde_json::from_value(serde_json::json!({
            "format_version": 1,
            "name": "test-stack",
            "entry": "stack",
            "exports": {
                "stack": { "kind": "function", "params": [], "returns": payload }
            }
        }))
        .unwrap()
    }

    #[test]
    fn entry_materializes_outputs() {
        let manifest = manifest_with_payload(serde_json::json!({
            "bucketName": "my-bucket",
            "region": "us-east-1",
        }));
        let definition = CompiledDefinition::from_manifest(manifest).unwrap();

        let outputs = definition.entry().unwrap();
        assert_eq!(outputs.len(), 2);
        assert_eq!(
            outputs.get("bucketName"),
            Some(&OutputValue::String("my-bucket".to_string()))
        );
        assert_eq!(
            outputs.get("region"),
            Some(&OutputValue::String("us-east-1".to_string()))
        );
    }

    #[test]
    fn empty_payload_is_an_empty_output_set() {
        let manifest = manifest_with_payload(serde_json::json!({}));
        let definition = CompiledDefinition::from_manifest(manifest).unwrap();

        let outputs = definition.entry().unwrap();
        assert!(outputs.is_empty());
    }

    #[test]
    fn non_mapping_payload_is_rejected() {
        let manifest = manifest_with_payload(serde_json::json!(42));
        let definition = CompiledDefinition::from_manifest(manifest).unwrap();

        let result = definition.entry();
        assert!(matches!(
            result,
            Err(AdapterError::InvalidOutputShape { found, .. }) if found == "a number"
        ));
    }

    #[test]
    fn construction_rejects_invalid_entry_point() {
        let manifest: ModuleManifest = serde_json::from_value(serde_json::json!({
            "format_version": 1,
            "name": "broken",
            "entry": "missing",
            "exports": {}
        }))
        .unwrap();

        let result = CompiledDefinition::from_manifest(manifest);
        assert!(matches!(
            result,
            Err(AdapterError::InvalidEntryPoint { .. })
        ));
    }

    #[test]
    fn entry_error_preserves_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let error = EntryError::new("test-stack", "evaluation failed").with_cause(io);

        assert_eq!(error.to_string(), "[test-stack] evaluation failed");
        let source = std::error::Error::source(&error).unwrap();
        assert_eq!(source.to_string(), "boom");
    }
}
