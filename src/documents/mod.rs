//! Document text extraction behind an explicit capability probe.
//!
//! Each format is compiled in through its own cargo feature (`pdf`,
//! `excel`, `word`). [`Capabilities::probe`] reports what this build can
//! read; the indexer checks it before touching a document so unsupported
//! files cost no I/O.

use std::path::Path;

use crate::error::ExtractError;
use crate::indexer::model::DocumentKind;

#[cfg(feature = "excel")]
mod excel;
#[cfg(feature = "pdf")]
mod pdf;
#[cfg(feature = "word")]
mod word;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub pdf: bool,
    pub excel: bool,
    pub word: bool,
}

impl Capabilities {
    /// What the current build can extract.
    pub fn probe() -> Self {
        Self {
            pdf: cfg!(feature = "pdf"),
            excel: cfg!(feature = "excel"),
            word: cfg!(feature = "word"),
        }
    }

    pub fn all() -> Self {
        Self {
            pdf: true,
            excel: true,
            word: true,
        }
    }

    pub fn supports(&self, kind: DocumentKind) -> bool {
        match kind {
            DocumentKind::Pdf => self.pdf,
            DocumentKind::Excel => self.excel,
            DocumentKind::Word => self.word,
        }
    }
}

/// Informational metadata about an extraction. Never stored in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentMeta {
    Pages(usize),
    Sheets(usize),
    Paragraphs(usize),
}

#[derive(Debug, Clone)]
pub struct Extracted {
    pub text: String,
    pub meta: DocumentMeta,
}

pub trait DocumentExtractor {
    fn capabilities(&self) -> Capabilities;

    fn extract(&self, path: &Path, kind: DocumentKind) -> Result<Extracted, ExtractError>;
}

/// Extractor backed by the format crates compiled into this build.
#[derive(Debug, Clone, Copy)]
pub struct NativeExtractor {
    caps: Capabilities,
}

impl NativeExtractor {
    pub fn new(caps: Capabilities) -> Self {
        Self { caps }
    }
}

impl Default for NativeExtractor {
    fn default() -> Self {
        Self::new(Capabilities::probe())
    }
}

impl DocumentExtractor for NativeExtractor {
    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    #[cfg_attr(
        not(any(feature = "pdf", feature = "excel", feature = "word")),
        allow(unused_variables)
    )]
    fn extract(&self, path: &Path, kind: DocumentKind) -> Result<Extracted, ExtractError> {
        if !self.caps.supports(kind) {
            return Err(ExtractError::Unavailable(kind));
        }
        match kind {
            #[cfg(feature = "pdf")]
            DocumentKind::Pdf => pdf::extract(path),
            #[cfg(feature = "excel")]
            DocumentKind::Excel => excel::extract(path),
            #[cfg(feature = "word")]
            DocumentKind::Word => word::extract(path),
            #[allow(unreachable_patterns)]
            _ => Err(ExtractError::Unavailable(kind)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supports_follows_flags() {
        let caps = Capabilities {
            pdf: true,
            excel: false,
            word: true,
        };
        assert!(caps.supports(DocumentKind::Pdf));
        assert!(!caps.supports(DocumentKind::Excel));
        assert!(Capabilities::all().supports(DocumentKind::Excel));
    }

    #[test]
    fn disabled_capability_refuses_without_io() {
        let extractor = NativeExtractor::new(Capabilities::default());
        let err = extractor
            .extract(Path::new("/does/not/exist.pdf"), DocumentKind::Pdf)
            .unwrap_err();
        assert!(matches!(err, ExtractError::Unavailable(DocumentKind::Pdf)));
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn broken_pdf_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf").unwrap();
        let err = NativeExtractor::default()
            .extract(&path, DocumentKind::Pdf)
            .unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }
}
