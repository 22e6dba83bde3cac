use std::io::Read;

use flate2::read::GzDecoder;

use crate::entry::{ArchiveEntry, EntryKind};
use crate::error::Result;
use crate::source::EntrySource;

/// A bare gzip stream, exposed as a single entry named after the archive stem.
pub struct GzipSource<R: Read> {
    decoder: Option<GzDecoder<R>>,
    member: String,
}

impl<R: Read> GzipSource<R> {
    pub fn new(reader: R, member: impl Into<String>) -> Self {
        Self {
            decoder: Some(GzDecoder::new(reader)),
            member: member.into(),
        }
    }
}

impl<R: Read> EntrySource for GzipSource<R> {
    fn next_entry(&mut self) -> Option<Result<ArchiveEntry<'_>>> {
        let decoder = self.decoder.take()?;
        Some(Ok(ArchiveEntry::new(
            self.member.clone(),
            EntryKind::File,
            None,
            Box::new(decoder),
        )))
    }
}
