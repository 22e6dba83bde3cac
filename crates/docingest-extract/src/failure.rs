use std::path::{Path, PathBuf};

use crate::capability::Capability;

/// Coarse category of a [`Failure`], for callers that branch on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    UnsupportedFormat,
    MissingCapability,
    ArchiveOpen,
    Extraction,
    OutputWrite,
}

/// Why a file could not be turned into content.
///
/// The `Display` form is the human-readable diagnostic handed back to
/// callers and, optionally, persisted in place of content.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    #[error("unsupported file format: '{extension}'")]
    UnsupportedFormat { extension: String },

    #[error("{capability} support is unavailable: {}", .capability.hint())]
    MissingCapability { capability: Capability },

    #[error("cannot open archive '{path}': {reason}")]
    ArchiveOpen { path: PathBuf, reason: String },

    #[error("failed to extract '{path}': {reason}")]
    Extraction { path: PathBuf, reason: String },

    #[error("failed to write '{path}': {reason}")]
    OutputWrite { path: PathBuf, reason: String },
}

impl Failure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::UnsupportedFormat { .. } => FailureKind::UnsupportedFormat,
            Self::MissingCapability { .. } => FailureKind::MissingCapability,
            Self::ArchiveOpen { .. } => FailureKind::ArchiveOpen,
            Self::Extraction { .. } => FailureKind::Extraction,
            Self::OutputWrite { .. } => FailureKind::OutputWrite,
        }
    }

    pub fn unsupported(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    pub fn missing(capability: Capability) -> Self {
        Self::MissingCapability { capability }
    }

    pub fn archive_open(path: &Path, reason: impl ToString) -> Self {
        Self::ArchiveOpen {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn extraction(path: &Path, reason: impl ToString) -> Self {
        Self::Extraction {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn output_write(path: &Path, reason: impl ToString) -> Self {
        Self::OutputWrite {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Point an extraction or archive-open diagnostic at `path`, typically an
    /// entry name in place of the scratch copy that was actually read.
    #[must_use]
    pub fn at(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Extraction { reason, .. } => Self::Extraction {
                path: path.into(),
                reason,
            },
            Self::ArchiveOpen { reason, .. } => Self::ArchiveOpen {
                path: path.into(),
                reason,
            },
            other => other,
        }
    }
}
