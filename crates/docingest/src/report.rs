use std::fmt;
use std::path::{Path, PathBuf};

use docingest_extract::Failure;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    UnsupportedExtension(String),
    /// Links and other records without content of their own.
    NotAFile,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedExtension(ext) if ext.is_empty() => f.write_str("no extension"),
            Self::UnsupportedExtension(ext) => write!(f, "unsupported extension '{ext}'"),
            Self::NotAFile => f.write_str("not a regular file"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedEntry {
    pub entry: String,
    pub reason: SkipReason,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedEntry {
    pub entry: String,
    pub failure: Failure,
}

/// What one archive expansion did, nested archives included.
///
/// Entry labels are container-relative paths; entries of nested archives are
/// prefixed with the nested archive's own label (`docs/inner.zip/a.txt`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpansionReport {
    pub archive: PathBuf,
    /// Archive-scoped directory all artifacts were written below.
    pub output_dir: PathBuf,
    /// Every artifact written, recorded diagnostics included.
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedEntry>,
    pub failed: Vec<FailedEntry>,
}

impl ExpansionReport {
    pub fn new(archive: &Path, output_dir: &Path) -> Self {
        Self {
            archive: archive.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            written: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn skip(&mut self, entry: impl Into<String>, reason: SkipReason) {
        self.skipped.push(SkippedEntry {
            entry: entry.into(),
            reason,
        });
    }

    pub fn fail(&mut self, entry: impl Into<String>, failure: Failure) {
        self.failed.push(FailedEntry {
            entry: entry.into(),
            failure,
        });
    }

    /// Fold a nested archive's results into this one.
    pub fn absorb(&mut self, nested: ExpansionReport) {
        self.written.extend(nested.written);
        self.skipped.extend(nested.skipped);
        self.failed.extend(nested.failed);
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for ExpansionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .archive
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        write!(
            f,
            "Files from archive '{name}' saved under '{}' ({} written, {} skipped, {} failed)",
            self.output_dir.display(),
            self.written.len(),
            self.skipped.len(),
            self.failed.len()
        )
    }
}
