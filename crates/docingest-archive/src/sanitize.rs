use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::names::{decode_name, sanitize_relative_path};

/// Where an archive entry lands once its name has been repaired.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SanitizedPath {
    /// Name as decoded by the container reader.
    pub original: String,
    /// Repaired and sanitized relative path.
    pub relative: PathBuf,
    /// `relative` joined onto the base directory.
    pub resolved: PathBuf,
}

impl SanitizedPath {
    /// Final component of the sanitized path.
    pub fn file_name(&self) -> &str {
        self.relative
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// Repair, sanitize, and resolve an entry name below `base`.
///
/// The entry name goes through [`decode_name`] and then
/// [`sanitize_relative_path`]; the result is checked to stay inside `base`.
pub fn sanitize_entry_path(entry_name: &str, base: impl AsRef<Path>) -> Result<SanitizedPath> {
    let base = base.as_ref();
    let display = decode_name(entry_name);
    let relative =
        sanitize_relative_path(&display).ok_or_else(|| Error::EmptyName(entry_name.to_string()))?;

    let resolved = normalize_path(&base.join(&relative));
    if !resolved.starts_with(normalize_path(base)) {
        return Err(Error::EscapesBase {
            entry: relative,
            base: base.to_path_buf(),
        });
    }

    Ok(SanitizedPath {
        original: entry_name.to_string(),
        relative,
        resolved,
    })
}

/// Resolve `.` and `..` lexically without touching the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::Normal(part) => result.push(part),
            Component::RootDir => result.push(component.as_os_str()),
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::CurDir => {}
        }
    }

    result
}
