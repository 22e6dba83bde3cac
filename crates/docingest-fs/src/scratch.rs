use std::path::{Component, Path, PathBuf};

use tempfile::TempDir;

use crate::{Error, Result};

const PREFIX: &str = "docingest-";

/// A scratch directory owned by one top-level archive expansion.
///
/// Every file handed out by [`ScratchSpace::allocate`] lives in its own
/// numbered slot, so two entries with the same name never collide. The whole
/// tree is removed when the value is dropped, on success and on error paths
/// alike; [`ScratchSpace::close`] does the same but reports removal errors.
pub struct ScratchSpace {
    dir: TempDir,
    next_slot: usize,
}

impl ScratchSpace {
    /// Create a fresh scratch directory under `root`, or under the system
    /// temp dir when `root` is `None`.
    pub fn create(root: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(PREFIX);

        let dir = match root {
            Some(root) => {
                crate::ensure_dir(root)?;
                builder.tempdir_in(root)
            }
            None => builder.tempdir(),
        }
        .map_err(|e| Error::CreateDir {
            path: root.map(Path::to_path_buf).unwrap_or_else(std::env::temp_dir),
            source: e,
        })?;

        tracing::debug!(path = %dir.path().display(), "scratch space created");
        Ok(Self { dir, next_slot: 0 })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Reserve a path for a file called `file_name` in a new, empty slot.
    ///
    /// The slot directory is created; the file itself is not.
    pub fn allocate(&mut self, file_name: &str) -> Result<PathBuf> {
        if !is_single_component(file_name) {
            return Err(Error::InvalidFileName(file_name.to_string()));
        }

        let slot = self.dir.path().join(format!("{:05}", self.next_slot));
        self.next_slot += 1;
        crate::ensure_dir(&slot)?;
        Ok(slot.join(file_name))
    }

    /// Number of slots handed out so far.
    pub fn allocated(&self) -> usize {
        self.next_slot
    }

    /// Remove the scratch tree now and report failures instead of ignoring them.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|e| Error::Remove { path, source: e })
    }
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
