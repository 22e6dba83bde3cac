use std::fmt;

use docingest_archive::ArchiveKind;

/// An optional library the pipeline may or may not have available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Docx,
    PdfPrimary,
    PdfFallback,
    SevenZip,
    Rar,
    /// Legacy `.doc` reading through a desktop Word installation.
    WordAutomation,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Self::Docx,
        Self::PdfPrimary,
        Self::PdfFallback,
        Self::SevenZip,
        Self::Rar,
        Self::WordAutomation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::PdfPrimary => "pdf-lopdf",
            Self::PdfFallback => "pdf-extract",
            Self::SevenZip => "sevenz",
            Self::Rar => "rar",
            Self::WordAutomation => "word-automation",
        }
    }

    /// What an operator has to do to make the capability available.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Docx => "rebuild with the `docx` feature",
            Self::PdfPrimary | Self::PdfFallback => {
                "rebuild with the `pdf-lopdf` or `pdf-extract` feature"
            }
            Self::SevenZip => "rebuild with the `sevenz` feature",
            Self::Rar => "rebuild with the `rar` feature",
            Self::WordAutomation => {
                "legacy .doc files are not supported on this platform; convert them to .docx"
            }
        }
    }

    /// Capability needed to open an archive of `kind`, if any.
    pub fn for_archive(kind: ArchiveKind) -> Option<Self> {
        match kind {
            ArchiveKind::SevenZip => Some(Self::SevenZip),
            ArchiveKind::Rar => Some(Self::Rar),
            ArchiveKind::Zip | ArchiveKind::Tar(_) | ArchiveKind::Gzip => None,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability registry, resolved once at startup and consulted by the
/// extractor and the archive expander.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    docx: bool,
    pdf_primary: bool,
    pdf_fallback: bool,
    sevenz: bool,
    rar: bool,
}

impl Capabilities {
    /// Everything compiled into this build.
    pub fn detect() -> Self {
        Self {
            docx: cfg!(feature = "docx"),
            pdf_primary: cfg!(feature = "pdf-lopdf"),
            pdf_fallback: cfg!(feature = "pdf-extract"),
            sevenz: ArchiveKind::SevenZip.is_compiled(),
            rar: ArchiveKind::Rar.is_compiled(),
        }
    }

    pub fn none() -> Self {
        Self {
            docx: false,
            pdf_primary: false,
            pdf_fallback: false,
            sevenz: false,
            rar: false,
        }
    }

    /// Disable one capability. Capabilities can only be taken away; a
    /// library that is not compiled in cannot be switched on.
    #[must_use]
    pub fn without(mut self, capability: Capability) -> Self {
        match capability {
            Capability::Docx => self.docx = false,
            Capability::PdfPrimary => self.pdf_primary = false,
            Capability::PdfFallback => self.pdf_fallback = false,
            Capability::SevenZip => self.sevenz = false,
            Capability::Rar => self.rar = false,
            Capability::WordAutomation => {}
        }
        self
    }

    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Docx => self.docx,
            Capability::PdfPrimary => self.pdf_primary,
            Capability::PdfFallback => self.pdf_fallback,
            Capability::SevenZip => self.sevenz,
            Capability::Rar => self.rar,
            Capability::WordAutomation => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Capability, bool)> + '_ {
        Capability::ALL
            .into_iter()
            .map(move |capability| (capability, self.supports(capability)))
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}
