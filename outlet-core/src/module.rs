//! Module - Compiled definition module manifests
//!
//! A manifest is the artifact an external compiler emits for a stack
//! program: a JSON document declaring named exports and which of them is
//! invoked as the zero-argument entry function.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::adapter::{AdapterError, AdapterResult};

/// Manifest format version understood by this build
pub const FORMAT_VERSION: u32 = 1;

/// A compiled definition module manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleManifest {
    /// Manifest format version
    pub format_version: u32,
    /// Module name (e.g., "hello-world")
    pub name: String,
    /// Name of the export invoked as the entry function
    pub entry: String,
    /// Exported declarations by name
    pub exports: HashMap<String, ExportDecl>,
}

/// A single exported declaration of a compiled module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportDecl {
    /// A function whose evaluation produces a value
    Function {
        /// Declared parameter names
        #[serde(default)]
        params: Vec<String>,
        /// The value one evaluation produces
        returns: serde_json::Value,
    },
    /// A plain constant
    Value { value: serde_json::Value },
}

impl ExportDecl {
    /// Kind of this export, for display and error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            ExportDecl::Function { .. } => "function",
            ExportDecl::Value { .. } => "value",
        }
    }
}

impl ModuleManifest {
    /// Resolve the entry export, validating that it is a zero-argument
    /// function
    ///
    /// Returns the payload one evaluation of the entry function produces.
    pub fn entry_function(&self) -> AdapterResult<&serde_json::Value> {
        let decl =
            self.exports
                .get(&self.entry)
                .ok_or_else(|| AdapterError::InvalidEntryPoint {
                    module: self.name.clone(),
                    entry: self.entry.clone(),
                    reason: "no export with this name".to_string(),
                })?;

        match decl {
            ExportDecl::Function { params, returns } => {
                if !params.is_empty() {
                    return Err(AdapterError::InvalidEntryPoint {
                        module: self.name.clone(),
                        entry: self.entry.clone(),
                        reason: format!(
                            "entry function takes {} parameters, expected none",
                            params.len()
                        ),
                    });
                }
                Ok(returns)
            }
            ExportDecl::Value { .. } => Err(AdapterError::InvalidEntryPoint {
                module: self.name.clone(),
                entry: self.entry.clone(),
                reason: "export is a value, not a function".to_string(),
            }),
        }
    }

    /// Display the manifest signature as a formatted string
    pub fn display(&self) -> String {
        self.display_with_color(true)
    }

    /// Display with optional color support
    pub fn display_with_color(&self, use_color: bool) -> String {
        let c = Colors::new(use_color);
        let mut output = String::new();

        output.push_str(&format!(
            "{}Module:{} {}{}{}\n\n",
            c.bold, c.reset, c.cyan, self.name, c.reset
        ));

        // ENTRY section
        output.push_str(&format!("{}=== ENTRY ==={}\n\n", c.bold, c.reset));
        output.push_str(&format!("  {}{}{}\n", c.white, self.entry, c.reset));
        output.push('\n');

        // EXPORTS section
        output.push_str(&format!("{}=== EXPORTS ==={}\n\n", c.bold, c.reset));
        if self.exports.is_empty() {
            output.push_str(&format!("  {}(none){}\n", c.dim, c.reset));
        } else {
            let mut names: Vec<_> = self.exports.keys().collect();
            names.sort();
            for name in names {
                let decl = &self.exports[name];
                let entry_marker = if *name == self.entry {
                    format!("  {}(entry){}", c.yellow, c.reset)
                } else {
                    String::new()
                };
                let kind = match decl {
                    ExportDecl::Function { params, .. } => {
                        format!("{}function({}){}", c.green, params.join(", "), c.reset)
                    }
                    ExportDecl::Value { .. } => format!("{}value{}", c.green, c.reset),
                };
                output.push_str(&format!(
                    "  {}{}{}: {}{}\n",
                    c.white, name, c.reset, kind, entry_marker
                ));
            }
        }

        output
    }
}

/// ANSI color codes for terminal output
struct Colors {
    bold: &'static str,
    reset: &'static str,
    dim: &'static str,
    green: &'static str,
    yellow: &'static str,
    cyan: &'static str,
    white: &'static str,
}

impl Colors {
    fn new(use_color: bool) -> Self {
        if use_color {
            Self {
                bold: "\x1b[1m",
                reset: "\x1b[0m",
                dim: "\x1b[2m",
                green: "\x1b[32m",
                yellow: "\x1b[33m",
                cyan: "\x1b[36m",
                white: "\x1b[97m",
            }
        } else {
            Self {
                bold: "",
                reset: "",
                dim: "",
                green: "",
                yellow: "",
                cyan: "",
                white: "",
            }
        }
    }
}
