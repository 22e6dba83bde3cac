use std::fmt;
use std::path::{Path, PathBuf};

use docingest_extract::{ContentExtractor, Failure, Format, SourceItem};
use tracing::{info, info_span, warn};

use crate::context::Context;
use crate::expand::ArchiveExpander;
use crate::output::OutputWriter;
use crate::report::ExpansionReport;

/// Result of processing one input path.
///
/// `Display` gives the single line a caller shows to a user: where the
/// output went, or why there is none.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Processed {
    /// A single document was written to `artifact`.
    Saved { artifact: PathBuf },
    /// An archive was expanded; see the report for per-entry results.
    Expanded(ExpansionReport),
    Failed(Failure),
}

impl Processed {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

impl fmt::Display for Processed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved { artifact } => write!(f, "Saved as JSON: {}", artifact.display()),
            Self::Expanded(report) => write!(f, "{report}"),
            Self::Failed(failure) => write!(f, "{failure}"),
        }
    }
}

/// Entry point of the pipeline: classify a path, then extract it or expand it.
pub struct DocumentReader<'a> {
    ctx: &'a Context,
    extractor: ContentExtractor,
    writer: OutputWriter,
}

impl<'a> DocumentReader<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self {
            ctx,
            extractor: ContentExtractor::new(*ctx.capabilities()),
            writer: OutputWriter,
        }
    }

    /// Extracted text of a single document, without writing anything.
    ///
    /// Archives produce no text of their own and are reported as an
    /// unsupported format here; use [`DocumentReader::process_file`].
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String, Failure> {
        let item = SourceItem::new(path.as_ref());
        self.extractor.extract(item.path(), item.format())
    }

    /// Process `path` into the configured output directory.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Processed {
        self.process_file_into(path, &self.ctx.config().output_dir)
    }

    /// Process `path` into `output_root`.
    ///
    /// A document becomes `<output_root>/<stem>.json`; an archive is expanded
    /// below `<output_root>/<sanitized stem>/`.
    pub fn process_file_into(
        &self,
        path: impl AsRef<Path>,
        output_root: impl AsRef<Path>,
    ) -> Processed {
        let path = path.as_ref();
        let output_root = output_root.as_ref();
        let _span = info_span!("process", path = %path.display()).entered();

        let item = SourceItem::new(path);
        let processed = match item.format() {
            Format::Archive(kind) => {
                match ArchiveExpander::new(self.ctx, &self.extractor).expand(path, kind, output_root)
                {
                    Ok(report) => Processed::Expanded(report),
                    Err(failure) => Processed::Failed(failure),
                }
            }
            format => match self.extractor.extract(path, format) {
                Ok(content) => {
                    let artifact = output_root.join(format!("{}.json", item.stem()));
                    match self.writer.write(&artifact, &content) {
                        Ok(()) => Processed::Saved { artifact },
                        Err(failure) => Processed::Failed(failure),
                    }
                }
                Err(failure) => Processed::Failed(failure),
            },
        };

        match &processed {
            Processed::Failed(failure) => warn!(error = %failure, "not processed"),
            other => info!("{other}"),
        }
        processed
    }
}
