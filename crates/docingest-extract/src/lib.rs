//! Format classification and text extraction for single documents.
//!
//! - `format.rs` - extension table and [`classify`]
//! - `capability.rs` - registry of optional libraries
//! - `failure.rs` - tagged failure type
//! - `extract/` - text, docx and PDF readers

mod capability;
pub mod extract;
mod failure;
mod format;

pub use capability::{Capabilities, Capability};
pub use extract::ContentExtractor;
pub use failure::{Failure, FailureKind};
pub use format::{
    ARCHIVE_EXTENSIONS, Format, OFFICE_EXTENSIONS, PDF_EXTENSIONS, SourceItem, TEXT_EXTENSIONS,
    classify,
};
