use std::io::{Read, Seek};

use crate::entry::{ArchiveEntry, EntryKind};
use crate::error::{Error, Result};
use crate::format::ArchiveKind;
use crate::source::EntrySource;

pub struct ZipSource<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
    index: usize,
}

impl<R: Read + Seek> ZipSource<R> {
    /// Reads the central directory; a missing or broken one is an error here.
    pub fn new(reader: R) -> zip::result::ZipResult<Self> {
        let archive = zip::ZipArchive::new(reader)?;
        Ok(Self { archive, index: 0 })
    }
}

impl<R: Read + Seek> EntrySource for ZipSource<R> {
    fn next_entry(&mut self) -> Option<Result<ArchiveEntry<'_>>> {
        if self.index >= self.archive.len() {
            return None;
        }
        let index = self.index;
        self.index += 1;

        let file = match self.archive.by_index(index) {
            Ok(f) => f,
            Err(e) => {
                return Some(Err(Error::corrupted(
                    ArchiveKind::Zip,
                    format!("entry #{index}: {e}"),
                )));
            }
        };

        // `name()` is already CP437-decoded when the UTF-8 flag is unset.
        let name = file.name().to_string();
        let size = file.size();
        let kind = if file.is_dir() {
            EntryKind::Directory
        } else if file.is_symlink() {
            EntryKind::Link
        } else {
            EntryKind::File
        };

        Some(Ok(ArchiveEntry::new(name, kind, Some(size), Box::new(file))))
    }
}
