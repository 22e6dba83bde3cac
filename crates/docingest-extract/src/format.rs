use std::path::{Path, PathBuf};

use docingest_archive::{ArchiveKind, extension_of, stem_of};

pub const TEXT_EXTENSIONS: &[&str] = &[".txt", ".rtf"];
pub const OFFICE_EXTENSIONS: &[&str] = &[".doc", ".docx"];
pub const PDF_EXTENSIONS: &[&str] = &[".pdf"];
pub const ARCHIVE_EXTENSIONS: &[&str] = &[".zip", ".tar", ".tar.gz", ".gz", ".rar", ".7z"];

/// Processing strategy for a file, decided from its extension alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Text,
    OfficeModern,
    OfficeLegacy,
    Pdf,
    Archive(ArchiveKind),
    Unsupported,
}

impl Format {
    pub fn is_supported(self) -> bool {
        self != Self::Unsupported
    }

    pub fn archive_kind(self) -> Option<ArchiveKind> {
        match self {
            Self::Archive(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Classify an extension such as `.PDF` or `.tar.gz`. Matching ignores case.
pub fn classify(extension: &str) -> Format {
    let extension = extension.to_lowercase();
    match extension.as_str() {
        ".txt" | ".rtf" => Format::Text,
        ".docx" => Format::OfficeModern,
        ".doc" => Format::OfficeLegacy,
        ".pdf" => Format::Pdf,
        other => ArchiveKind::from_extension(other)
            .map(Format::Archive)
            .unwrap_or(Format::Unsupported),
    }
}

/// A path together with its lowercase extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceItem {
    path: PathBuf,
    extension: String,
}

impl SourceItem {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let extension = extension_of(&path.to_string_lossy());
        Self { path, extension }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File name without its extension; `.tar.gz` is removed as a whole.
    pub fn stem(&self) -> String {
        stem_of(&self.path.to_string_lossy())
    }

    pub fn format(&self) -> Format {
        classify(&self.extension)
    }
}

#[cfg(test)]
mod tests {
    use docingest_archive::TarCompress;

    use super::*;

    #[test]
    fn every_listed_extension_classifies_in_any_case() {
        for ext in TEXT_EXTENSIONS {
            assert_eq!(classify(ext), Format::Text);
            assert_eq!(classify(&ext.to_uppercase()), Format::Text);
        }
        for ext in PDF_EXTENSIONS {
            assert_eq!(classify(&ext.to_uppercase()), Format::Pdf);
        }
        for ext in ARCHIVE_EXTENSIONS {
            assert!(matches!(classify(ext), Format::Archive(_)), "{ext}");
            assert!(matches!(classify(&ext.to_uppercase()), Format::Archive(_)), "{ext}");
        }
        assert_eq!(classify(".DOCX"), Format::OfficeModern);
        assert_eq!(classify(".Doc"), Format::OfficeLegacy);
    }

    #[test]
    fn archive_kinds() {
        assert_eq!(classify(".tar.gz"), Format::Archive(ArchiveKind::Tar(TarCompress::Gzip)));
        assert_eq!(classify(".gz"), Format::Archive(ArchiveKind::Gzip));
        assert_eq!(classify(".7Z"), Format::Archive(ArchiveKind::SevenZip));
    }

    #[test]
    fn anything_else_is_unsupported() {
        for ext in ["", ".md", ".xlsx", ".tgz", ".bz2", "txt", ".txt.bak"] {
            assert_eq!(classify(ext), Format::Unsupported, "{ext}");
        }
    }

    #[test]
    fn source_item() {
        let item = SourceItem::new("in/Backup.TAR.GZ");
        assert_eq!(item.extension(), ".tar.gz");
        assert_eq!(item.stem(), "Backup");
        assert_eq!(item.format(), Format::Archive(ArchiveKind::Tar(TarCompress::Gzip)));

        let item = SourceItem::new("notes");
        assert_eq!(item.extension(), "");
        assert_eq!(item.format(), Format::Unsupported);
    }
}
