//! Adapter - Invoke a definition module and publish its outputs
//!
//! The adapter runs the single linear operation of this system: invoke the
//! entry function once and hand the resulting export surface to the caller
//! by value. It performs no local recovery; every failure surfaces to the
//! caller unchanged.

use std::path::Path;

use crate::definition::{Definition, EntryError};
use crate::export::ExportSurface;
use crate::loader::ModuleLoader;

/// Errors from loading or invoking a definition module
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// The compiled module does not exist at the expected location
    #[error("Definition module not found: {0}")]
    ModuleNotFound(String),

    /// The module exists but could not be loaded
    #[error("Failed to load definition module '{path}': {reason}")]
    ModuleLoad { path: String, reason: String },

    /// The named entry export is absent or not a zero-argument function
    #[error("Module '{module}' has no callable entry point '{entry}': {reason}")]
    InvalidEntryPoint {
        module: String,
        entry: String,
        reason: String,
    },

    /// The entry function produced something other than a key/value mapping
    #[error("Entry function of module '{module}' produced {found}, expected a key/value mapping")]
    InvalidOutputShape { module: String, found: String },

    /// The entry function failed during evaluation
    #[error(transparent)]
    Entry(#[from] EntryError),
}

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Adapter configuration
#[derive(Debug, Clone, Default)]
pub struct AdapterConfig {
    /// Evaluate the entry function but leave the surface unpublished
    pub dry_run: bool,
}

/// Output adapter for a single definition module
///
/// Loads nothing and retains nothing across runs: each run invokes the
/// entry function once and returns a fresh surface.
pub struct OutputAdapter<D: Definition> {
    definition: D,
    config: AdapterConfig,
}

impl<D: Definition> OutputAdapter<D> {
    pub fn new(definition: D) -> Self {
        Self {
            definition,
            config: AdapterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    /// Name of the underlying definition module
    pub fn module_name(&self) -> &str {
        self.definition.name()
    }

    /// Invoke the entry function once and return the published surface
    ///
    /// The surface contains exactly the outputs of this evaluation. In
    /// dry-run mode the entry function is still evaluated and its result
    /// shape validated, but the surface stays empty.
    pub fn run(&self) -> AdapterResult<ExportSurface> {
        let outputs = self.definition.entry()?;
        let mut surface = ExportSurface::new(self.definition.name());
        if !self.config.dry_run {
            surface.merge(outputs);
        }
        Ok(surface)
    }

    /// Invoke the entry function and merge the outputs into an existing
    /// surface, overwriting same-named exports
    ///
    /// The surface is left untouched when the evaluation fails.
    pub fn publish_into(&self, surface: &mut ExportSurface) -> AdapterResult<()> {
        let outputs = self.definition.entry()?;
        surface.merge(outputs);
        Ok(())
    }
}

/// Load the module at `path` relative to `base_dir`, invoke its entry
/// function, and return the published surface
pub fn run_module(base_dir: impl AsRef<Path>, path: &str) -> AdapterResult<ExportSurface> {
    let mut loader = ModuleLoader::new(base_dir);
    let definition = loader.load_definition(path)?;
    OutputAdapter::new(definition).run()
}
