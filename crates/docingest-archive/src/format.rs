use std::fmt;
use std::io::Read;
use std::path::Path;

const TAR_GZ: &str = ".tar.gz";

/// Container formats the expander can walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    Zip,
    Tar(TarCompress),
    /// A bare `.gz` stream; resolves to `Tar(Gzip)` when it wraps a tarball.
    Gzip,
    SevenZip,
    Rar,
}

/// Compression codec for tar archives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TarCompress {
    None,
    Gzip,
}

impl ArchiveKind {
    /// Map a lowercase extension (as returned by [`extension_of`]) to a container kind.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            ".zip" => Some(Self::Zip),
            ".tar" => Some(Self::Tar(TarCompress::None)),
            TAR_GZ => Some(Self::Tar(TarCompress::Gzip)),
            ".gz" => Some(Self::Gzip),
            ".7z" => Some(Self::SevenZip),
            ".rar" => Some(Self::Rar),
            _ => None,
        }
    }

    /// Whether this build can open the format at all.
    pub fn is_compiled(self) -> bool {
        match self {
            Self::Zip | Self::Tar(_) | Self::Gzip => true,
            Self::SevenZip => cfg!(feature = "sevenz"),
            Self::Rar => cfg!(feature = "rar"),
        }
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Zip => "zip",
            Self::Tar(TarCompress::None) => "tar",
            Self::Tar(TarCompress::Gzip) => "tar.gz",
            Self::Gzip => "gzip",
            Self::SevenZip => "7z",
            Self::Rar => "rar",
        };
        f.write_str(name)
    }
}

impl TarCompress {
    pub fn decoder<R: Read>(self, reader: R) -> Decoder<R> {
        match self {
            Self::None => Decoder::Passthrough(reader),
            Self::Gzip => Decoder::Gzip(Box::new(flate2::read::GzDecoder::new(reader))),
        }
    }
}

/// Decoder wrapper for tar decompression.
pub enum Decoder<R> {
    Passthrough(R),
    Gzip(Box<flate2::read::GzDecoder<R>>),
}

impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Self::Passthrough(r) => r.read(buf),
            Self::Gzip(d) => d.read(buf),
        }
    }
}

/// Lowercase extension of the last component of `name`, including the dot.
///
/// `.tar.gz` is recognized as one compound extension. Names without an
/// extension (including dot-files such as `.profile`) yield an empty string.
pub fn extension_of(name: &str) -> String {
    let file_name = last_component(name);
    let lower = file_name.to_lowercase();
    if lower.len() > TAR_GZ.len() && lower.ends_with(TAR_GZ) {
        return TAR_GZ.to_string();
    }
    Path::new(file_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Last component of `name` with its extension removed (`.tar.gz` as a whole).
pub fn stem_of(name: &str) -> String {
    let file_name = last_component(name);
    let extension = extension_of(file_name);
    if extension == TAR_GZ {
        let cut = file_name.len().saturating_sub(TAR_GZ.len());
        return file_name.get(..cut).unwrap_or(file_name).to_string();
    }
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn last_component(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Whether `data` starts with a POSIX ustar header.
pub fn is_tar_header(data: &[u8]) -> bool {
    data.len() >= 512 && &data[257..262] == b"ustar"
}
