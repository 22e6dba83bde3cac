//! Per-format text extraction for single, non-archive files.

use std::path::Path;

use docingest_archive::extension_of;
use tracing::debug;

use crate::capability::{Capabilities, Capability};
use crate::failure::Failure;
use crate::format::Format;

#[cfg(feature = "docx")]
mod docx;
mod pdf;
mod text;

#[cfg(feature = "docx")]
pub use docx::paragraphs;
pub use text::decode_text;

/// Turns one file into text, consulting the capability registry for every
/// optional library.
#[derive(Clone, Debug, Default)]
pub struct ContentExtractor {
    caps: Capabilities,
}

impl ContentExtractor {
    pub fn new(caps: Capabilities) -> Self {
        Self { caps }
    }

    /// Extract the text of `path`, already classified as `format`.
    ///
    /// Archives are never extracted here; they yield `UnsupportedFormat`.
    pub fn extract(&self, path: &Path, format: Format) -> Result<String, Failure> {
        debug!(path = %path.display(), ?format, "extracting");
        match format {
            Format::Text => text::extract(path),
            Format::OfficeModern => self.extract_docx(path),
            Format::OfficeLegacy => Err(Failure::missing(Capability::WordAutomation)),
            Format::Pdf => pdf::extract(path, &self.caps),
            Format::Archive(_) | Format::Unsupported => {
                Err(Failure::unsupported(extension_of(&path.to_string_lossy())))
            }
        }
    }

    fn extract_docx(&self, path: &Path) -> Result<String, Failure> {
        if !self.caps.supports(Capability::Docx) {
            return Err(Failure::missing(Capability::Docx));
        }

        #[cfg(feature = "docx")]
        {
            docx::extract(path)
        }
        #[cfg(not(feature = "docx"))]
        {
            Err(Failure::missing(Capability::Docx))
        }
    }
}
