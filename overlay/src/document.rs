//! Document collaborator seam.
//!
//! The overlay never decodes documents. A host plugs in a [`DocumentSource`]
//! that knows how many pages there are and can rasterize one at a given
//! scale; the engine only reads the page count and asks for page renders
//! through [`crate::engine::Action::PageRenderRequested`].

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tiny_skia::Pixmap;

/// Leading bytes of every PDF file.
const PDF_MAGIC: &[u8; 5] = b"%PDF-";

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to load document: {0}")]
    LoadFailed(String),
    #[error("unsupported file type: {0}; please choose a PDF file")]
    UnsupportedFileType(String),
    #[error("document has no pages")]
    EmptyDocument,
    #[error("page {page} is out of range (document has {page_count} pages)")]
    InvalidPageIndex { page: u32, page_count: u32 },
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// The external renderer the overlay is laid on top of.
pub trait DocumentSource {
    /// Number of pages; at least 1 for a usable document.
    fn page_count(&self) -> u32;

    /// Rasterize 1-based `page` at `scale`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidPageIndex`] for a page outside the
    /// document, or [`DocumentError::LoadFailed`] if rendering fails.
    fn render_page(&self, page: u32, scale: f64) -> Result<Pixmap, DocumentError>;
}

/// Accept only PDF files: a `.pdf` extension (any case) and the `%PDF-` header.
///
/// # Errors
///
/// Returns [`DocumentError::UnsupportedFileType`] when either check fails and
/// [`DocumentError::Io`] if the file cannot be opened or read.
pub fn check_file_type(path: &Path) -> Result<(), DocumentError> {
    let unsupported = || DocumentError::UnsupportedFileType(path.display().to_string());

    let has_pdf_ext = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !has_pdf_ext {
        return Err(unsupported());
    }

    let mut header = [0u8; PDF_MAGIC.len()];
    match File::open(path)?.read_exact(&mut header) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Err(unsupported()),
        Err(e) => return Err(e.into()),
    }
    if &header != PDF_MAGIC {
        return Err(unsupported());
    }
    Ok(())
}
