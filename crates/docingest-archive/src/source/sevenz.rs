use std::fs::File;
use std::io;
use std::path::Path;

use sevenz_rust::{Password, SevenZReader};

use crate::entry::{ArchiveEntry, EntryKind};
use crate::error::{Error, Result};
use crate::format::ArchiveKind;

/// 7z only exposes entries through a callback, so it walks instead of
/// implementing [`EntrySource`](crate::source::EntrySource).
pub struct SevenZipArchive {
    reader: SevenZReader<File>,
}

impl SevenZipArchive {
    pub fn open(path: &Path) -> Result<Self> {
        let reader = SevenZReader::open(path, Password::empty())
            .map_err(|e| Error::open(ArchiveKind::SevenZip, path, e))?;
        Ok(Self { reader })
    }

    pub fn for_each<F>(mut self, visit: &mut F) -> usize
    where
        F: FnMut(Result<ArchiveEntry<'_>>),
    {
        let mut count = 0;
        let walked = self.reader.for_each_entries(|entry, data| {
            count += 1;
            let kind = if entry.is_directory() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            visit(Ok(ArchiveEntry::new(
                entry.name().to_string(),
                kind,
                Some(entry.size()),
                Box::new(&mut *data),
            )));
            // Solid blocks require the stream to be consumed in order.
            io::copy(data, &mut io::sink())?;
            Ok(true)
        });

        if let Err(e) = walked {
            count += 1;
            visit(Err(Error::corrupted(ArchiveKind::SevenZip, e)));
        }
        count
    }
}
