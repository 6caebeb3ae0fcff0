//! Loader - Resolve and load compiled definition modules
//!
//! Resolves relative artifact paths against a base directory, parses module
//! manifests, and caches them by resolved path. The compiled module is the
//! output of an external build step and must exist before the loader runs.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::adapter::{AdapterError, AdapterResult};
use crate::definition::CompiledDefinition;
use crate::module::{FORMAT_VERSION, ModuleManifest};

/// Conventional location of the compiled module relative to the stack root
pub const DEFAULT_MODULE_PATH: &str = "generated/stack.json";

/// File name looked up when a module path points at a directory
pub const MANIFEST_FILE: &str = "stack.json";

/// Loader for compiled definition modules
pub struct ModuleLoader {
    /// Base directory for resolving relative module paths
    base_dir: PathBuf,
    /// Cache of loaded manifests: resolved path -> manifest
    manifest_cache: HashMap<PathBuf, ModuleManifest>,
}

impl ModuleLoader {
    /// Create a new loader with the given base directory
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            manifest_cache: HashMap::new(),
        }
    }

    /// Load and cache the manifest at a file or directory path
    pub fn load(&mut self, path: &str) -> AdapterResult<ModuleManifest> {
        let mut full_path = self.resolve_path(path);
        if full_path.is_dir() {
            full_path = full_path.join(MANIFEST_FILE);
        }

        // Check cache
        if let Some(manifest) = self.manifest_cache.get(&full_path) {
            return Ok(manifest.clone());
        }

        if !full_path.exists() {
            return Err(AdapterError::ModuleNotFound(path.to_string()));
        }

        let content = fs::read_to_string(&full_path).map_err(|e| AdapterError::ModuleLoad {
            path: full_path.display().to_string(),
            reason: format!("failed to read module: {}", e),
        })?;

        let manifest: ModuleManifest =
            serde_json::from_str(&content).map_err(|e| AdapterError::ModuleLoad {
                path: full_path.display().to_string(),
                reason: format!("failed to parse manifest: {}", e),
            })?;

        if manifest.format_version != FORMAT_VERSION {
            return Err(AdapterError::ModuleLoad {
                path: full_path.display().to_string(),
                reason: format!(
                    "unsupported format version {} (expected {})",
                    manifest.format_version, FORMAT_VERSION
                ),
            });
        }

        self.manifest_cache.insert(full_path, manifest.clone());

        Ok(manifest)
    }

    /// Load a manifest and wrap it as an invocable definition
    ///
    /// The entry point is validated here, before any invocation.
    pub fn load_definition(&mut self, path: &str) -> AdapterResult<CompiledDefinition> {
        let manifest = self.load(path)?;
        CompiledDefinition::from_manifest(manifest)
    }

    /// Resolve a relative path to an absolute path
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
