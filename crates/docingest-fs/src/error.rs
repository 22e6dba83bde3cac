use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create directory '{path}': {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to remove '{path}': {source}")]
    Remove { path: PathBuf, source: io::Error },

    #[error("path '{0}' has no parent directory")]
    NoParent(PathBuf),

    #[error("file name '{0}' is not a single path component")]
    InvalidFileName(String),
}

pub type Result<T> = std::result::Result<T, Error>;
