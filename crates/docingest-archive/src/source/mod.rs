//! Per-format entry enumeration.
//!
//! [`Archive::open`] is the only step allowed to fail for the archive as a
//! whole. Once it succeeds, [`Archive::for_each_entry`] hands every record to
//! the visitor in the container's native order; problems with individual
//! entries reach the visitor as `Err` values and enumeration continues when
//! the format allows it.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::entry::ArchiveEntry;
use crate::error::{Error, Result};
use crate::format::{self, ArchiveKind, TarCompress};

mod gzip;
#[cfg(feature = "rar")]
mod rar;
#[cfg(feature = "sevenz")]
mod sevenz;
mod tar;
mod zip;

pub use self::gzip::GzipSource;
pub use self::tar::{TarArchive, TarSource};
pub use self::zip::ZipSource;

/// Pull-based access to the entries of one container.
pub trait EntrySource {
    fn next_entry(&mut self) -> Option<Result<ArchiveEntry<'_>>>;
}

type FileReader = BufReader<File>;

enum Opened {
    Zip(ZipSource<FileReader>),
    Tar(TarArchive<FileReader>),
    Gzip(GzipSource<FileReader>),
    #[cfg(feature = "sevenz")]
    SevenZip(sevenz::SevenZipArchive),
    #[cfg(feature = "rar")]
    Rar(rar::RarSource),
}

/// A container that has been opened and validated.
pub struct Archive {
    path: PathBuf,
    kind: ArchiveKind,
    inner: Opened,
}

impl Archive {
    /// Open the container at `path` as `kind`.
    ///
    /// Fails with [`Error::Open`] when the file is unreadable or is not a
    /// valid container of that kind, and with [`Error::NotCompiled`] when the
    /// format's reader is not part of this build. A bare `.gz` that wraps a
    /// tarball is opened as `tar.gz`.
    pub fn open(path: impl AsRef<Path>, kind: ArchiveKind) -> Result<Self> {
        let path = path.as_ref();
        if !kind.is_compiled() {
            return Err(Error::NotCompiled { kind });
        }

        let (kind, inner) = match kind {
            ArchiveKind::Zip => {
                let source = ZipSource::new(open_file(path, kind)?)
                    .map_err(|e| Error::open(kind, path, e))?;
                (kind, Opened::Zip(source))
            }
            ArchiveKind::Tar(codec) => (kind, Opened::Tar(open_tar(path, codec)?)),
            ArchiveKind::Gzip => {
                if gzip_wraps_tar(path)? {
                    let kind = ArchiveKind::Tar(TarCompress::Gzip);
                    (kind, Opened::Tar(open_tar(path, TarCompress::Gzip)?))
                } else {
                    let member = format::stem_of(&path.to_string_lossy());
                    let reader = open_file(path, kind)?;
                    (kind, Opened::Gzip(GzipSource::new(reader, member)))
                }
            }
            #[cfg(feature = "sevenz")]
            ArchiveKind::SevenZip => (kind, Opened::SevenZip(sevenz::SevenZipArchive::open(path)?)),
            #[cfg(feature = "rar")]
            ArchiveKind::Rar => (kind, Opened::Rar(rar::RarSource::open(path)?)),
            #[allow(unreachable_patterns)]
            _ => return Err(Error::NotCompiled { kind }),
        };

        tracing::debug!(archive = %path.display(), %kind, "archive opened");
        Ok(Self {
            path: path.to_path_buf(),
            kind,
            inner,
        })
    }

    /// Format the archive was actually opened as.
    pub fn kind(&self) -> ArchiveKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Feed every entry to `visit` in native order; returns how many records
    /// (including failed ones) were produced.
    pub fn for_each_entry<F>(self, mut visit: F) -> usize
    where
        F: FnMut(Result<ArchiveEntry<'_>>),
    {
        match self.inner {
            Opened::Zip(mut source) => drain(&mut source, &mut visit),
            Opened::Tar(mut archive) => match archive.entries() {
                Ok(mut source) => drain(&mut source, &mut visit),
                Err(e) => {
                    visit(Err(e));
                    1
                }
            },
            Opened::Gzip(mut source) => drain(&mut source, &mut visit),
            #[cfg(feature = "sevenz")]
            Opened::SevenZip(archive) => archive.for_each(&mut visit),
            #[cfg(feature = "rar")]
            Opened::Rar(mut source) => drain(&mut source, &mut visit),
        }
    }
}

fn drain<S, F>(source: &mut S, visit: &mut F) -> usize
where
    S: EntrySource,
    F: FnMut(Result<ArchiveEntry<'_>>),
{
    let mut count = 0;
    while let Some(entry) = source.next_entry() {
        count += 1;
        visit(entry);
    }
    count
}

fn open_file(path: &Path, kind: ArchiveKind) -> Result<FileReader> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::open(kind, path, e))
}

/// Tar has no index to validate up front, so the whole stream is walked once
/// on a throwaway handle: a container with an unreadable header, short entry
/// data, or no entries at all counts as unopenable.
fn open_tar(path: &Path, codec: TarCompress) -> Result<TarArchive<FileReader>> {
    let kind = ArchiveKind::Tar(codec);
    let mut check = ::tar::Archive::new(codec.decoder(open_file(path, kind)?));
    let entries = check.entries().map_err(|e| Error::open(kind, path, e))?;

    let mut headers = 0usize;
    for entry in entries {
        let mut entry = entry.map_err(|e| Error::open(kind, path, e))?;
        let expected = entry.header().size().map_err(|e| Error::open(kind, path, e))?;
        let read = io::copy(&mut entry, &mut io::sink()).map_err(|e| Error::open(kind, path, e))?;
        if read != expected {
            let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            return Err(Error::open(
                kind,
                path,
                format!("entry '{name}' is truncated: {read} of {expected} bytes"),
            ));
        }
        headers += 1;
    }
    if headers == 0 {
        return Err(Error::open(kind, path, "archive contains no entries"));
    }

    Ok(TarArchive::new(open_file(path, kind)?, codec))
}

fn gzip_wraps_tar(path: &Path) -> Result<bool> {
    let mut decoder = flate2::read::GzDecoder::new(open_file(path, ArchiveKind::Gzip)?);
    let mut head = Vec::with_capacity(512);
    (&mut decoder)
        .take(512)
        .read_to_end(&mut head)
        .map_err(|e| Error::open(ArchiveKind::Gzip, path, e))?;
    Ok(format::is_tar_header(&head))
}
