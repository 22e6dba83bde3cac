use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::failure::Failure;

pub(super) fn extract(path: &Path) -> Result<String, Failure> {
    let bytes = std::fs::read(path).map_err(|e| Failure::extraction(path, e))?;
    decode_text(&bytes).map_err(|reason| Failure::extraction(path, reason))
}

/// Decode bytes of unknown encoding.
///
/// A byte-order mark wins; otherwise the encoding is guessed statistically.
/// Input that does not decode cleanly in the chosen encoding is an error.
pub fn decode_text(bytes: &[u8]) -> Result<String, String> {
    let encoding = match Encoding::for_bom(bytes) {
        Some((encoding, _)) => encoding,
        None => {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        }
    };

    let (text, malformed) = encoding.decode_with_bom_removal(bytes);
    if malformed {
        return Err(format!("content is not valid {}", encoding.name()));
    }
    tracing::debug!(encoding = encoding.name(), "decoded text");
    Ok(text.into_owned())
}
