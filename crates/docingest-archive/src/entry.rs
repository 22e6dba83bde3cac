use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Symlinks, hardlinks and other records without their own content.
    Link,
}

/// One record read from a container, with its content still unread.
///
/// The entry borrows the container it came from; it must be consumed before
/// the next entry is requested.
pub struct ArchiveEntry<'a> {
    name: String,
    kind: EntryKind,
    size: Option<u64>,
    reader: Box<dyn Read + 'a>,
}

impl<'a> ArchiveEntry<'a> {
    pub fn new(name: String, kind: EntryKind, size: Option<u64>, reader: Box<dyn Read + 'a>) -> Self {
        Self {
            name,
            kind,
            size,
            reader,
        }
    }

    /// Container-relative path as decoded by the container reader.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Uncompressed size as recorded in the container header, if the format
    /// records one.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn reader(&mut self) -> &mut (dyn Read + 'a) {
        &mut *self.reader
    }

    /// Stream the entry content into a new file at `target`.
    ///
    /// Fails with [`io::ErrorKind::UnexpectedEof`] when the stream ends
    /// before the recorded size was reached.
    pub fn copy_to(&mut self, target: &Path) -> io::Result<u64> {
        let mut file = File::create(target)?;
        let written = io::copy(&mut self.reader, &mut file)?;
        match self.size {
            Some(expected) if expected != written => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("entry is truncated: {written} of {expected} bytes"),
            )),
            _ => Ok(written),
        }
    }
}

impl fmt::Debug for ArchiveEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveEntry")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
