use std::path::PathBuf;

use crate::format::ArchiveKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{kind} support is not compiled into this build")]
    NotCompiled { kind: ArchiveKind },

    #[error("cannot open {kind} archive '{path}': {reason}")]
    Open {
        kind: ArchiveKind,
        path: PathBuf,
        reason: String,
    },

    #[error("corrupted {kind} entry: {reason}")]
    Corrupted { kind: ArchiveKind, reason: String },

    #[error("entry path '{entry}' resolves outside '{base}'")]
    EscapesBase { entry: PathBuf, base: PathBuf },

    #[error("entry name '{0}' is empty after sanitization")]
    EmptyName(String),
}

impl Error {
    pub(crate) fn open(kind: ArchiveKind, path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Open {
            kind,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn corrupted(kind: ArchiveKind, reason: impl ToString) -> Self {
        Self::Corrupted {
            kind,
            reason: reason.to_string(),
        }
    }

    /// Whether this error means the container itself could not be opened.
    pub fn is_open_failure(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::NotCompiled { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
