//! Source import: turns a file on disk into plain text for generation.
//!
//! The pipeline is strictly sequential: validate, read, extract and, for PDFs,
//! optionally OCR each requested page in ascending order.

mod docx;
mod ocr;
mod pages;
mod poppler;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use docx::{DocumentTextExtractor, DocxExtractor};
pub use ocr::{OcrEngine, OcrProgress, TesseractOcr};
pub use pages::{
    OCR_RENDER_SCALE, PageImage, PageRange, PagedDocument, PagedDocumentLoader, extract_pages,
};
pub use poppler::PopplerLoader;

use crate::error::ImportError;

/// How a file's text is obtained, by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    PlainText,
    Document,
    Pdf,
}

impl SourceKind {
    /// # Errors
    ///
    /// Returns `ImportError::UnsupportedExtension` for anything other than
    /// `.txt`, `.md`, `.markdown`, `.docx` or `.pdf`.
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "txt" | "md" | "markdown" => Ok(Self::PlainText),
            "docx" => Ok(Self::Document),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ImportError::UnsupportedExtension { extension }),
        }
    }
}

/// Progress of one import, reported to the status line.
#[derive(Clone, Debug, PartialEq)]
pub enum ImportStatus {
    Reading { file: String },
    Extracting,
    LoadingPdf,
    ReadingPage { page: u32, done: u32, total: u32 },
    Recognizing { page: u32, phase: String, fraction: f32 },
    /// The source is read; the backend is writing cards.
    Generating,
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reading { file } => write!(f, "Reading {file}..."),
            Self::Extracting => f.write_str("Extracting text..."),
            Self::LoadingPdf => f.write_str("Loading PDF..."),
            Self::ReadingPage { page, done, total } => {
                write!(f, "Processing page {page} ({}/{total})...", done + 1)
            }
            Self::Recognizing {
                page,
                phase,
                fraction,
            } => {
                let percent = (fraction * 100.0).round();
                write!(f, "Page {page}: {phase} ({percent}%)")
            }
            Self::Generating => f.write_str("Generating flashcards..."),
        }
    }
}

/// What the user asked to import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportRequest {
    pub path: PathBuf,
    /// PDF pages to read; `None` reads every page.
    pub pages: Option<PageRange>,
    /// Run OCR on PDF pages in addition to their embedded text.
    pub use_ocr: bool,
}

impl ImportRequest {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pages: None,
            use_ocr: false,
        }
    }

    #[must_use]
    pub fn with_pages(mut self, pages: PageRange) -> Self {
        self.pages = Some(pages);
        self
    }

    #[must_use]
    pub fn with_ocr(mut self, use_ocr: bool) -> Self {
        self.use_ocr = use_ocr;
        self
    }

    /// File name used as the study set label.
    #[must_use]
    pub fn label(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |name| {
                name.to_string_lossy().into_owned()
            })
    }
}

/// Text pulled out of an imported file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportedSource {
    pub label: String,
    pub text: String,
}

#[derive(Clone)]
pub struct ImportService {
    documents: Arc<dyn DocumentTextExtractor>,
    pdfs: Arc<dyn PagedDocumentLoader>,
    ocr: Option<Arc<dyn OcrEngine>>,
}

impl ImportService {
    #[must_use]
    pub fn new(
        documents: Arc<dyn DocumentTextExtractor>,
        pdfs: Arc<dyn PagedDocumentLoader>,
        ocr: Option<Arc<dyn OcrEngine>>,
    ) -> Self {
        Self {
            documents,
            pdfs,
            ocr,
        }
    }

    /// Docx extraction, poppler PDFs and tesseract OCR.
    #[must_use]
    pub fn system_default() -> Self {
        Self::new(
            Arc::new(DocxExtractor),
            Arc::new(PopplerLoader),
            Some(Arc::new(TesseractOcr::from_env())),
        )
    }

    #[must_use]
    pub fn ocr_available(&self) -> bool {
        self.ocr.is_some()
    }

    /// Check a request before any file is touched.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::UnsupportedExtension` or
    /// `ImportError::OcrUnavailable`.
    pub fn validate(&self, request: &ImportRequest) -> Result<SourceKind, ImportError> {
        let kind = SourceKind::from_path(&request.path)?;
        if kind == SourceKind::Pdf && request.use_ocr && self.ocr.is_none() {
            return Err(ImportError::OcrUnavailable);
        }
        Ok(kind)
    }

    /// Read and extract a file.
    ///
    /// # Errors
    ///
    /// Returns validation errors before reading, `ImportError::Read` when the
    /// file cannot be read, and extraction errors afterwards.
    pub async fn import(
        &self,
        request: &ImportRequest,
        progress: &(dyn Fn(ImportStatus) + Send + Sync),
    ) -> Result<ImportedSource, ImportError> {
        let kind = self.validate(request)?;
        let label = request.label();

        progress(ImportStatus::Reading {
            file: label.clone(),
        });
        let bytes = tokio::fs::read(&request.path)
            .await
            .map_err(|source| ImportError::Read {
                path: request.path.clone(),
                source,
            })?;
        tracing::debug!(file = %label, bytes = bytes.len(), ?kind, "source file read");

        let text = self
            .extract(kind, bytes, request.pages, request.use_ocr, progress)
            .await?;
        Ok(ImportedSource { label, text })
    }

    /// Extract text from bytes already in memory.
    ///
    /// # Errors
    ///
    /// Returns `ImportError` for load, range or extraction failures.
    pub async fn extract(
        &self,
        kind: SourceKind,
        bytes: Vec<u8>,
        pages: Option<PageRange>,
        use_ocr: bool,
        progress: &(dyn Fn(ImportStatus) + Send + Sync),
    ) -> Result<String, ImportError> {
        let text = match kind {
            SourceKind::PlainText => String::from_utf8_lossy(&bytes).into_owned(),
            SourceKind::Document => {
                progress(ImportStatus::Extracting);
                self.documents.extract_text(&bytes).await.inspect_err(|err| {
                    tracing::warn!(error = %err, "document extraction failed");
                })?
            }
            SourceKind::Pdf => self.extract_pdf(bytes, pages, use_ocr, progress).await?,
        };

        if text.trim().is_empty() {
            return Err(ImportError::NoText);
        }
        Ok(text)
    }

    async fn extract_pdf(
        &self,
        bytes: Vec<u8>,
        pages: Option<PageRange>,
        use_ocr: bool,
        progress: &(dyn Fn(ImportStatus) + Send + Sync),
    ) -> Result<String, ImportError> {
        let ocr = if use_ocr {
            let engine = self.ocr.as_deref().ok_or(ImportError::OcrUnavailable)?;
            engine.prepare().await.map_err(ImportError::OcrInit)?;
            Some(engine)
        } else {
            None
        };

        progress(ImportStatus::LoadingPdf);
        let document = self.pdfs.load(bytes).await.inspect_err(|err| {
            tracing::warn!(error = %err, "pdf load failed");
        })?;
        let page_count = document.page_count();
        let range = match pages {
            Some(range) => range.within(page_count)?,
            None => PageRange::all(page_count)?,
        };
        tracing::info!(
            first = range.start(),
            last = range.end(),
            ocr = ocr.is_some(),
            "extracting pdf pages"
        );

        extract_pages(document.as_ref(), range, ocr, progress).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_map_to_kinds() {
        assert_eq!(
            SourceKind::from_path(Path::new("a/notes.TXT")).unwrap(),
            SourceKind::PlainText
        );
        assert_eq!(
            SourceKind::from_path(Path::new("readme.md")).unwrap(),
            SourceKind::PlainText
        );
        assert_eq!(
            SourceKind::from_path(Path::new("essay.docx")).unwrap(),
            SourceKind::Document
        );
        assert_eq!(
            SourceKind::from_path(Path::new("scan.pdf")).unwrap(),
            SourceKind::Pdf
        );
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        for name in ["photo.png", "archive.zip", "noext"] {
            let err = SourceKind::from_path(Path::new(name)).unwrap_err();
            assert!(matches!(err, ImportError::UnsupportedExtension { .. }), "{name}");
        }
    }

    #[test]
    fn status_lines_read_naturally() {
        assert_eq!(
            ImportStatus::ReadingPage {
                page: 4,
                done: 1,
                total: 3
            }
            .to_string(),
            "Processing page 4 (2/3)..."
        );
        assert_eq!(
            ImportStatus::Recognizing {
                page: 2,
                phase: "recognizing text".into(),
                fraction: 0.5
            }
            .to_string(),
            "Page 2: recognizing text (50%)"
        );
    }

    #[test]
    fn label_is_file_name() {
        assert_eq!(ImportRequest::new("/tmp/biology notes.pdf").label(), "biology notes.pdf");
    }
}
