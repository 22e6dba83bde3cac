use std::path::Path;

use tracing::{debug, warn};

use crate::capability::{Capabilities, Capability};
use crate::failure::Failure;

/// Page-ordered text of a PDF, trying lopdf first and pdf-extract second.
pub(super) fn extract(path: &Path, caps: &Capabilities) -> Result<String, Failure> {
    let primary = caps.supports(Capability::PdfPrimary);
    let fallback = caps.supports(Capability::PdfFallback);
    if !primary && !fallback {
        return Err(Failure::missing(Capability::PdfPrimary));
    }

    let bytes = std::fs::read(path).map_err(|e| Failure::extraction(path, e))?;
    let mut last_error = String::new();

    if primary {
        match with_lopdf(&bytes) {
            Ok(text) => return Ok(text),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "lopdf could not read PDF");
                last_error = e;
            }
        }
    }

    if fallback {
        debug!(path = %path.display(), "falling back to pdf-extract");
        match with_pdf_extract(&bytes) {
            Ok(text) => return Ok(text),
            Err(e) => last_error = e,
        }
    }

    Err(Failure::extraction(path, last_error))
}

#[cfg(feature = "pdf-lopdf")]
fn with_lopdf(bytes: &[u8]) -> Result<String, String> {
    let document = lopdf::Document::load_mem(bytes).map_err(|e| e.to_string())?;
    // `get_pages` is keyed by page number, so iteration is page order.
    let pages: Vec<u32> = document.get_pages().keys().copied().collect();

    let mut text = String::new();
    for page in pages {
        let page_text = document
            .extract_text(&[page])
            .map_err(|e| format!("page {page}: {e}"))?;
        text.push_str(&page_text);
    }
    Ok(text)
}

#[cfg(not(feature = "pdf-lopdf"))]
fn with_lopdf(_bytes: &[u8]) -> Result<String, String> {
    Err("lopdf is not compiled into this build".to_string())
}

#[cfg(feature = "pdf-extract")]
fn with_pdf_extract(bytes: &[u8]) -> Result<String, String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string())
}

#[cfg(not(feature = "pdf-extract"))]
fn with_pdf_extract(_bytes: &[u8]) -> Result<String, String> {
    Err("pdf-extract is not compiled into this build".to_string())
}
