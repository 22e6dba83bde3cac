use std::io::{self, Cursor};
use std::path::Path;

use unrar::{CursorBeforeHeader, OpenArchive, Process};

use crate::entry::{ArchiveEntry, EntryKind};
use crate::error::{Error, Result};
use crate::format::ArchiveKind;
use crate::source::EntrySource;

/// RAR entries are decompressed into memory one at a time by the unrar library.
pub struct RarSource {
    archive: Option<OpenArchive<Process, CursorBeforeHeader>>,
}

impl RarSource {
    pub fn open(path: &Path) -> Result<Self> {
        let archive = unrar::Archive::new(path)
            .open_for_processing()
            .map_err(|e| Error::open(ArchiveKind::Rar, path, e))?;
        Ok(Self {
            archive: Some(archive),
        })
    }
}

impl EntrySource for RarSource {
    fn next_entry(&mut self) -> Option<Result<ArchiveEntry<'_>>> {
        let archive = self.archive.take()?;
        let header = match archive.read_header() {
            Ok(Some(header)) => header,
            Ok(None) => return None,
            Err(e) => return Some(Err(Error::corrupted(ArchiveKind::Rar, e))),
        };

        let name = header.entry().filename.to_string_lossy().into_owned();
        let unpacked_size = header.entry().unpacked_size;
        if header.entry().is_directory() {
            return match header.skip() {
                Ok(next) => {
                    self.archive = Some(next);
                    Some(Ok(ArchiveEntry::new(
                        name,
                        EntryKind::Directory,
                        None,
                        Box::new(io::empty()),
                    )))
                }
                Err(e) => Some(Err(Error::corrupted(ArchiveKind::Rar, e))),
            };
        }

        match header.read() {
            Ok((data, next)) => {
                self.archive = Some(next);
                Some(Ok(ArchiveEntry::new(
                    name,
                    EntryKind::File,
                    Some(unpacked_size),
                    Box::new(Cursor::new(data)),
                )))
            }
            Err(e) => Some(Err(Error::corrupted(ArchiveKind::Rar, e))),
        }
    }
}
