//! Export - The export surface published to the orchestration runtime

use crate::output::{OutputSet, OutputValue};

/// The set of named outputs a stack publishes
///
/// An explicit value in place of an ambient module-export object: the
/// adapter builds a surface from one evaluation and hands it to the caller,
/// which decides where it goes from there.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSurface {
    module: String,
    exports: OutputSet,
}

impl ExportSurface {
    /// Create an empty surface for the named module
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            exports: OutputSet::new(),
        }
    }

    /// Merge an output set into the surface
    ///
    /// Plain union: same-named exports are overwritten by the incoming set.
    pub fn merge(&mut self, outputs: OutputSet) {
        self.exports.merge(outputs);
    }

    /// Name of the module these exports came from
    pub fn module(&self) -> &str {
        &self.module
    }

    /// The published outputs, in order
    pub fn exports(&self) -> &OutputSet {
        &self.exports
    }

    /// Get a published output by name
    pub fn get(&self, name: &str) -> Option<&OutputValue> {
        self.exports.get(name)
    }

    pub fn len(&self) -> usize {
        self.exports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }

    /// Consume the surface, keeping only the outputs
    pub fn into_outputs(self) -> OutputSet {
        self.exports
    }
}
