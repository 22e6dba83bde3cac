use std::io::Read;

use crate::entry::{ArchiveEntry, EntryKind};
use crate::error::{Error, Result};
use crate::format::{ArchiveKind, Decoder, TarCompress};
use crate::source::EntrySource;

/// Owns the tar stream; [`TarArchive::entries`] borrows it for one pass.
pub struct TarArchive<R: Read> {
    archive: tar::Archive<Decoder<R>>,
    codec: TarCompress,
}

impl<R: Read> TarArchive<R> {
    pub fn new(reader: R, codec: TarCompress) -> Self {
        Self {
            archive: tar::Archive::new(codec.decoder(reader)),
            codec,
        }
    }

    pub fn entries(&mut self) -> Result<TarSource<'_, Decoder<R>>> {
        let kind = ArchiveKind::Tar(self.codec);
        let entries = self
            .archive
            .entries()
            .map_err(|e| Error::corrupted(kind, e))?;
        Ok(TarSource {
            entries,
            kind,
            done: false,
        })
    }
}

pub struct TarSource<'a, R: 'a + Read> {
    entries: tar::Entries<'a, R>,
    kind: ArchiveKind,
    done: bool,
}

impl<'a, R: Read + 'a> EntrySource for TarSource<'a, R> {
    fn next_entry(&mut self) -> Option<Result<ArchiveEntry<'_>>> {
        if self.done {
            return None;
        }

        let entry = match self.entries.next()? {
            Ok(e) => e,
            Err(e) => {
                // The stream position is lost after a bad header.
                self.done = true;
                return Some(Err(Error::corrupted(self.kind, e)));
            }
        };

        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        let header = entry.header();
        let size = header.size().ok();
        let entry_type = header.entry_type();

        let kind = if entry_type.is_dir() {
            EntryKind::Directory
        } else if entry_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Link
        };

        Some(Ok(ArchiveEntry::new(name, kind, size, Box::new(entry))))
    }
}
