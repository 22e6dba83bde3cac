//! Recursive archive expansion.

use std::path::Path;

use docingest_archive::{
    Archive, ArchiveEntry, ArchiveKind, EntryKind, decode_name, extension_of, sanitize_entry_path,
    sanitize_name, stem_of,
};
use docingest_extract::{Capability, ContentExtractor, Failure, Format, classify};
use docingest_fs::{ScratchSpace, ensure_dir};
use tracing::{debug, debug_span, info, warn};

use crate::context::Context;
use crate::output::OutputWriter;
use crate::report::{ExpansionReport, SkipReason};

/// Directory name used when an archive's stem sanitizes to nothing.
const FALLBACK_DIR: &str = "archive";

/// Walks an archive, writes one artifact per supported entry and recurses
/// into nested archives.
///
/// Only failing to open the top-level archive fails the call; every other
/// problem is recorded against the entry in the [`ExpansionReport`] and the
/// walk continues.
pub struct ArchiveExpander<'a> {
    ctx: &'a Context,
    extractor: &'a ContentExtractor,
    writer: OutputWriter,
}

impl<'a> ArchiveExpander<'a> {
    pub fn new(ctx: &'a Context, extractor: &'a ContentExtractor) -> Self {
        Self {
            ctx,
            extractor,
            writer: OutputWriter,
        }
    }

    /// Expand the archive at `path` below `output_root/<sanitized stem>/`.
    ///
    /// One scratch directory is used for the whole call, nested archives
    /// included, and removed before returning.
    pub fn expand(
        &self,
        path: &Path,
        kind: ArchiveKind,
        output_root: &Path,
    ) -> Result<ExpansionReport, Failure> {
        let mut scratch = ScratchSpace::create(self.ctx.config().scratch_dir.as_deref())
            .map_err(|e| Failure::extraction(path, e))?;

        let result = self.expand_in(&mut scratch, path, kind, output_root, "");

        let staged = scratch.allocated();
        if let Err(e) = scratch.close() {
            warn!(error = %e, "failed to remove scratch space");
        } else {
            debug!(staged, "scratch space removed");
        }
        result
    }

    fn expand_in(
        &self,
        scratch: &mut ScratchSpace,
        path: &Path,
        kind: ArchiveKind,
        output_root: &Path,
        prefix: &str,
    ) -> Result<ExpansionReport, Failure> {
        let _span = debug_span!("expand", archive = %path.display(), %kind).entered();

        if let Some(capability) = Capability::for_archive(kind) {
            if !self.ctx.capabilities().supports(capability) {
                return Err(Failure::missing(capability));
            }
        }
        let archive = Archive::open(path, kind).map_err(|e| open_failure(path, e))?;

        let output_dir = output_root.join(archive_dir_name(path));
        ensure_dir(&output_dir).map_err(|e| Failure::output_write(&output_dir, e))?;

        let mut report = ExpansionReport::new(path, &output_dir);
        let mut index = 0usize;
        archive.for_each_entry(|entry| {
            index += 1;
            match entry {
                Ok(entry) => self.visit(scratch, entry, &output_dir, prefix, &mut report),
                Err(e) => {
                    let label = entry_label(prefix, &format!("#{index}"));
                    warn!(entry = %label, error = %e, "unreadable entry");
                    report.fail(label.clone(), Failure::extraction(Path::new(&label), e));
                }
            }
        });

        info!(
            output = %output_dir.display(),
            written = report.written.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "archive expanded"
        );
        Ok(report)
    }

    fn visit(
        &self,
        scratch: &mut ScratchSpace,
        mut entry: ArchiveEntry<'_>,
        output_dir: &Path,
        prefix: &str,
        report: &mut ExpansionReport,
    ) {
        match entry.kind() {
            EntryKind::Directory => return,
            EntryKind::Link => {
                report.skip(entry_label(prefix, entry.name()), SkipReason::NotAFile);
                return;
            }
            EntryKind::File => {}
        }

        let display = decode_name(entry.name());
        let label = entry_label(prefix, &display);
        let extension = extension_of(&display);
        let format = classify(&extension);
        if !format.is_supported() {
            info!(entry = %label, %extension, "skipping entry");
            report.skip(label, SkipReason::UnsupportedExtension(extension));
            return;
        }

        if let Err(failure) = self.process(scratch, &mut entry, format, output_dir, &label, report)
        {
            warn!(entry = %label, error = %failure, "entry failed");
            report.fail(label, failure);
        }
    }

    fn process(
        &self,
        scratch: &mut ScratchSpace,
        entry: &mut ArchiveEntry<'_>,
        format: Format,
        output_dir: &Path,
        label: &str,
        report: &mut ExpansionReport,
    ) -> Result<(), Failure> {
        let target = sanitize_entry_path(entry.name(), output_dir)
            .map_err(|e| Failure::extraction(Path::new(label), e))?;
        let staged = scratch
            .allocate(target.file_name())
            .map_err(|e| Failure::extraction(Path::new(label), e))?;
        entry
            .copy_to(&staged)
            .map_err(|e| Failure::extraction(Path::new(label), e))?;
        debug!(entry = %label, staged = %staged.display(), "entry staged");

        if let Format::Archive(kind) = format {
            // Nested output mirrors where the archive's own artifact would sit.
            let parent = target.resolved.parent().unwrap_or(output_dir);
            let nested = self
                .expand_in(scratch, &staged, kind, parent, label)
                .map_err(|failure| failure.at(label))?;
            report.absorb(nested);
            return Ok(());
        }

        let artifact = target.resolved.with_extension("json");
        match self.extractor.extract(&staged, format) {
            Ok(content) => {
                self.writer.write(&artifact, &content)?;
                report.written.push(artifact);
                Ok(())
            }
            Err(failure) => {
                let failure = failure.at(label);
                if self.ctx.config().record_failures {
                    match self.writer.write(&artifact, &failure.to_string()) {
                        Ok(()) => report.written.push(artifact),
                        Err(e) => warn!(entry = %label, error = %e, "failed to record diagnostic"),
                    }
                }
                Err(failure)
            }
        }
    }
}

fn open_failure(path: &Path, error: docingest_archive::Error) -> Failure {
    match error {
        docingest_archive::Error::NotCompiled { kind } => match Capability::for_archive(kind) {
            Some(capability) => Failure::missing(capability),
            None => Failure::archive_open(path, format!("{kind} is not supported")),
        },
        other => Failure::archive_open(path, other),
    }
}

fn archive_dir_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = sanitize_name(&stem_of(&file_name));
    if stem.is_empty() {
        FALLBACK_DIR.to_string()
    } else {
        stem
    }
}

fn entry_label(prefix: &str, name: &str) -> String {
    let name = name.trim_start_matches(['/', '\\']);
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
