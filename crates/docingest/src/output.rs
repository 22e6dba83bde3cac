use std::path::Path;

use docingest_extract::Failure;
use serde::{Deserialize, Serialize};

/// On-disk shape of one artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Basename of the artifact file itself, `.json` included.
    pub filename: String,
    pub content: String,
}

impl Artifact {
    pub fn new(path: &Path, content: impl Into<String>) -> Self {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            filename,
            content: content.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputWriter;

impl OutputWriter {
    /// Write `content` as a pretty-printed artifact at `path`, creating parent
    /// directories and replacing any existing file.
    ///
    /// Non-ASCII text is written as is, not escaped.
    pub fn write(&self, path: &Path, content: &str) -> Result<(), Failure> {
        let artifact = Artifact::new(path, content);
        let json =
            serde_json::to_vec_pretty(&artifact).map_err(|e| Failure::output_write(path, e))?;

        docingest_fs::atomic_write(path, &json).map_err(|e| Failure::output_write(path, e))?;

        tracing::info!(artifact = %path.display(), "artifact saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use docingest_extract::FailureKind;

    use super::*;

    #[test]
    fn exactly_two_keys_and_literal_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/Отчёт.json");
        OutputWriter.write(&path, "Привет \"мир\"").unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Привет"));
        assert!(raw.contains("\n  \"filename\""));

        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["filename"], "Отчёт.json");
        assert_eq!(object["content"], "Привет \"мир\"");
    }

    #[test]
    fn overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.json");
        OutputWriter.write(&path, "first").unwrap();
        OutputWriter.write(&path, "second").unwrap();

        let artifact: Artifact =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(artifact.content, "second");
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"").unwrap();

        let failure = OutputWriter
            .write(&blocker.join("a.json"), "content")
            .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::OutputWrite);
    }
}
