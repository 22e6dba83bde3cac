//! Document ingestion pipeline.
//!
//! [`DocumentReader`] takes a path of unknown type, extracts its text or
//! expands it as an archive, and writes `{filename, content}` JSON artifacts
//! whose layout mirrors the archive hierarchy.
//!
//! - `config.rs` - layered configuration
//! - `context.rs` - configuration plus capability registry
//! - `reader.rs` - top-level dispatch
//! - `expand.rs` - recursive archive expansion
//! - `output.rs` - artifact writer
//! - `report.rs` - per-archive results

pub mod config;
mod context;
mod error;
mod expand;
mod output;
mod reader;
mod report;

pub use config::Config;
pub use context::Context;
pub use error::{Error, Result};
pub use expand::ArchiveExpander;
pub use output::{Artifact, OutputWriter};
pub use reader::{DocumentReader, Processed};
pub use report::{ExpansionReport, FailedEntry, SkipReason, SkippedEntry};

pub use docingest_extract::{
    ARCHIVE_EXTENSIONS, Capabilities, Capability, ContentExtractor, Failure, FailureKind, Format,
    OFFICE_EXTENSIONS, PDF_EXTENSIONS, TEXT_EXTENSIONS, classify,
};
