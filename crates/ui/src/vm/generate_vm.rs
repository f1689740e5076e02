use std::path::Path;

use services::{
    DeckBuilder, DeckRequest, GenerationError, ImportRequest, PageRange, SourceKind,
};

/// Raw values of the generation form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateForm {
    pub topic: String,
    pub file_path: String,
    pub page_start: String,
    pub page_end: String,
    pub use_ocr: bool,
}

/// A validated generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerateRequest {
    Topic(String),
    File(ImportRequest),
}

impl GenerateForm {
    /// A file path, when given, wins over the topic box.
    ///
    /// # Errors
    ///
    /// Returns the input validation error to show before any work starts:
    /// empty topic, unsupported extension or a malformed page range.
    pub fn request(&self) -> Result<GenerateRequest, GenerationError> {
        let path = self.file_path.trim();
        if path.is_empty() {
            DeckBuilder::validate(&DeckRequest::from_topic(self.topic.as_str()))?;
            return Ok(GenerateRequest::Topic(self.topic.clone()));
        }

        let kind = SourceKind::from_path(Path::new(path))?;
        let mut request = ImportRequest::new(path);
        if kind == SourceKind::Pdf {
            let (start, end) = (self.page_start.trim(), self.page_end.trim());
            if !start.is_empty() || !end.is_empty() {
                request = request.with_pages(PageRange::parse(start, end)?);
            }
            request = request.with_ocr(self.use_ocr);
        }
        Ok(GenerateRequest::File(request))
    }

    /// Page range and OCR controls only apply to PDFs.
    #[must_use]
    pub fn is_pdf(&self) -> bool {
        matches!(
            SourceKind::from_path(Path::new(self.file_path.trim())),
            Ok(SourceKind::Pdf)
        )
    }
}
