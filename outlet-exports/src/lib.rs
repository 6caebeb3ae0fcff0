//! Outlet Exports
//!
//! Persistence for published stack outputs. The adapter produces an
//! `ExportSurface`; this crate snapshots it into a versioned exports
//! document and writes it through a sink where an external orchestration
//! runtime can discover it.
//!
//! # Overview
//!
//! - **ExportsDocument**: the persisted snapshot of one evaluation's outputs
//! - **ExportsSink**: a trait for output destinations (local file, stdout)
//!
//! # Example
//!
//! ```ignore
//! use outlet_exports::{ExportsDocument, ExportsSink};
//! use outlet_exports::sinks::LocalSink;
//!
//! let sink = LocalSink::new();
//!
//! // Republish over a previous document, keeping its lineage
//! let mut document = sink
//!     .read_document()?
//!     .unwrap_or_else(|| ExportsDocument::new(surface.module()));
//! document.republish(&surface);
//!
//! sink.write_document(&document)?;
//! ```

pub mod document;
pub mod sink;
pub mod sinks;

// Re-export main types for convenience
pub use document::{ExportsDocument, OutputRecord};
pub use sink::{ExportsSink, SinkConfig, SinkError, SinkResult};
pub use sinks::create_sink;
