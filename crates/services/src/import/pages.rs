use std::ops::RangeInclusive;

use async_trait::async_trait;

use crate::error::{ImportError, PageError};
use crate::import::ImportStatus;
use crate::import::ocr::{OcrEngine, OcrProgress};

/// Rasterisation scale used before OCR (1.0 = 72 dpi).
pub const OCR_RENDER_SCALE: f32 = 2.0;

/// A rasterised page, PNG encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageImage {
    pub page: u32,
    pub png: Vec<u8>,
}

/// Opens raw PDF bytes.
#[async_trait]
pub trait PagedDocumentLoader: Send + Sync {
    async fn load(&self, bytes: Vec<u8>) -> Result<Box<dyn PagedDocument>, ImportError>;
}

/// A loaded paged document. Pages are numbered from 1.
#[async_trait]
pub trait PagedDocument: Send + Sync {
    fn page_count(&self) -> u32;

    /// Embedded text content of one page.
    async fn page_text(&self, page: u32) -> Result<String, PageError>;

    /// Rasterise one page at `scale`.
    async fn render_page(&self, page: u32, scale: f32) -> Result<PageImage, PageError>;
}

/// A 1-based inclusive page range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRange {
    start: u32,
    end: u32,
}

impl PageRange {
    /// # Errors
    ///
    /// Returns `ImportError::InvalidPageRange` when `start` is zero or
    /// greater than `end`.
    pub fn new(start: u32, end: u32) -> Result<Self, ImportError> {
        if start == 0 {
            return Err(invalid_range("pages start at 1"));
        }
        if start > end {
            return Err(invalid_range(format!(
                "start page {start} is after end page {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse the two page boxes of the import form.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::InvalidPageRange` for non-numeric or inverted input.
    pub fn parse(start: &str, end: &str) -> Result<Self, ImportError> {
        let parse = |raw: &str, which: &str| {
            raw.trim()
                .parse::<u32>()
                .map_err(|_| invalid_range(format!("{which} page {raw:?} is not a number")))
        };
        Self::new(parse(start, "start")?, parse(end, "end")?)
    }

    /// Every page of a document.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::InvalidPageRange` for a document without pages.
    pub fn all(page_count: u32) -> Result<Self, ImportError> {
        if page_count == 0 {
            return Err(invalid_range("the document has no pages"));
        }
        Self::new(1, page_count)
    }

    /// Check the range against the loaded document.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::InvalidPageRange` when `end` exceeds `page_count`.
    pub fn within(self, page_count: u32) -> Result<Self, ImportError> {
        if self.end > page_count {
            return Err(invalid_range(format!(
                "end page {} is beyond the last page ({page_count})",
                self.end
            )));
        }
        Ok(self)
    }

    #[must_use]
    pub fn start(&self) -> u32 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> u32 {
        self.end
    }

    #[must_use]
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

fn invalid_range(reason: impl Into<String>) -> ImportError {
    ImportError::InvalidPageRange {
        reason: reason.into(),
    }
}

/// Extract text from `range`, one page at a time in ascending order.
///
/// A page that fails (text, render or OCR) is logged and skipped so the rest
/// of the document still contributes.
///
/// # Errors
///
/// Returns `ImportError::NoText` when no page produced any text.
pub async fn extract_pages(
    document: &dyn PagedDocument,
    range: PageRange,
    ocr: Option<&dyn OcrEngine>,
    progress: &(dyn Fn(ImportStatus) + Send + Sync),
) -> Result<String, ImportError> {
    let mut chunks = Vec::new();
    let total = range.len();

    for (done, page) in range.pages().enumerate() {
        progress(ImportStatus::ReadingPage {
            page,
            done: u32::try_from(done).unwrap_or(u32::MAX),
            total,
        });

        match read_page(document, page, ocr, progress).await {
            Ok(text) if !text.trim().is_empty() => chunks.push(text),
            Ok(_) => tracing::debug!(page, "page produced no text"),
            Err(err) => tracing::warn!(page, error = %err, "skipping page"),
        }
    }

    if chunks.is_empty() {
        return Err(ImportError::NoText);
    }
    Ok(chunks.join("\n\n"))
}

async fn read_page(
    document: &dyn PagedDocument,
    page: u32,
    ocr: Option<&dyn OcrEngine>,
    progress: &(dyn Fn(ImportStatus) + Send + Sync),
) -> Result<String, PageError> {
    let mut text = document.page_text(page).await?.trim().to_string();

    if let Some(ocr) = ocr {
        let image = document.render_page(page, OCR_RENDER_SCALE).await?;
        let on_progress = |p: OcrProgress| {
            progress(ImportStatus::Recognizing {
                page,
                phase: p.phase,
                fraction: p.fraction,
            });
        };
        let recognized = ocr
            .recognize(&image, &on_progress)
            .await
            .map_err(|source| PageError::Ocr { page, source })?;
        let recognized = recognized.trim();
        if !recognized.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(recognized);
        }
    }

    Ok(text)
}
