use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use services::{
    CompletionBackend, CompletionError, DeckBuilder, DocxExtractor, GenerationError,
    GeneratorService, ImportError, ImportRequest, ImportService, ImportStatus, OcrEngine,
    OcrError, OcrProgress, PageError, PageImage, PageRange, PagedDocument, PagedDocumentLoader,
};
use tempfile::NamedTempFile;

struct StubDocument {
    pages: Vec<Option<&'static str>>,
}

#[async_trait]
impl PagedDocument for StubDocument {
    fn page_count(&self) -> u32 {
        u32::try_from(self.pages.len()).unwrap()
    }

    async fn page_text(&self, page: u32) -> Result<String, PageError> {
        match self.pages[(page - 1) as usize] {
            Some(text) => Ok(text.to_string()),
            None => Err(PageError::Text {
                page,
                reason: "corrupt content stream".into(),
            }),
        }
    }

    async fn render_page(&self, page: u32, scale: f32) -> Result<PageImage, PageError> {
        assert!((scale - 2.0).abs() < f32::EPSILON);
        Ok(PageImage {
            page,
            png: vec![0x89, b'P', b'N', b'G'],
        })
    }
}

struct StubLoader {
    pages: Vec<Option<&'static str>>,
}

#[async_trait]
impl PagedDocumentLoader for StubLoader {
    async fn load(&self, _bytes: Vec<u8>) -> Result<Box<dyn PagedDocument>, ImportError> {
        Ok(Box::new(StubDocument {
            pages: self.pages.clone(),
        }))
    }
}

struct StubOcr {
    ready: bool,
}

#[async_trait]
impl OcrEngine for StubOcr {
    async fn prepare(&self) -> Result<(), OcrError> {
        if self.ready {
            Ok(())
        } else {
            Err(OcrError::Unavailable("no language data".into()))
        }
    }

    async fn recognize(
        &self,
        image: &PageImage,
        progress: &(dyn Fn(OcrProgress) + Send + Sync),
    ) -> Result<String, OcrError> {
        progress(OcrProgress::new("recognizing text", 1.0));
        Ok(format!("scanned caption {}", image.page))
    }
}

struct RecordingBackend {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl CompletionBackend for RecordingBackend {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("Photosynthesis: light to sugar\nChlorophyll: green pigment".to_string())
    }
}

fn three_page_pdf() -> Vec<Option<&'static str>> {
    vec![
        Some("Photosynthesis turns light into sugar."),
        None,
        Some("Chlorophyll is the green pigment."),
    ]
}

fn import_service(ocr: Option<StubOcr>) -> ImportService {
    ImportService::new(
        Arc::new(DocxExtractor),
        Arc::new(StubLoader {
            pages: three_page_pdf(),
        }),
        ocr.map(|engine| Arc::new(engine) as Arc<dyn OcrEngine>),
    )
}

fn temp_file(suffix: &str, contents: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

fn recorder() -> (
    Arc<Mutex<Vec<ImportStatus>>>,
    impl Fn(ImportStatus) + Send + Sync,
) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |status| sink.lock().unwrap().push(status))
}

#[tokio::test]
async fn failing_page_is_skipped_and_rest_is_kept() {
    let file = temp_file(".pdf", b"%PDF-1.7");
    let (seen, progress) = recorder();

    let source = import_service(None)
        .import(&ImportRequest::new(file.path()), &progress)
        .await
        .unwrap();

    assert_eq!(
        source.text,
        "Photosynthesis turns light into sugar.\n\nChlorophyll is the green pigment."
    );
    let pages: Vec<u32> = seen
        .lock()
        .unwrap()
        .iter()
        .filter_map(|status| match status {
            ImportStatus::ReadingPage { page, .. } => Some(*page),
            _ => None,
        })
        .collect();
    assert_eq!(pages, vec![1, 2, 3]);
}

#[tokio::test]
async fn ocr_text_is_appended_per_page_in_order() {
    let file = temp_file(".pdf", b"%PDF-1.7");
    let (seen, progress) = recorder();
    let request = ImportRequest::new(file.path())
        .with_pages(PageRange::new(2, 3).unwrap())
        .with_ocr(true);

    let source = import_service(Some(StubOcr { ready: true }))
        .import(&request, &progress)
        .await
        .unwrap();

    assert_eq!(
        source.text,
        "Chlorophyll is the green pigment.\nscanned caption 3"
    );
    assert!(seen.lock().unwrap().contains(&ImportStatus::Recognizing {
        page: 3,
        phase: "recognizing text".into(),
        fraction: 1.0,
    }));
}

#[tokio::test]
async fn range_beyond_document_is_rejected() {
    let file = temp_file(".pdf", b"%PDF-1.7");
    let request = ImportRequest::new(file.path()).with_pages(PageRange::new(2, 9).unwrap());

    let err = import_service(None)
        .import(&request, &|_| {})
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::InvalidPageRange { .. }));
}

#[tokio::test]
async fn ocr_is_checked_before_any_page() {
    let file = temp_file(".pdf", b"%PDF-1.7");
    let request = ImportRequest::new(file.path()).with_ocr(true);
    let (seen, progress) = recorder();

    let missing = import_service(None)
        .import(&request, &progress)
        .await
        .unwrap_err();
    assert!(matches!(missing, ImportError::OcrUnavailable));
    assert!(seen.lock().unwrap().is_empty());

    let broken = import_service(Some(StubOcr { ready: false }))
        .import(&request, &progress)
        .await
        .unwrap_err();
    assert!(matches!(broken, ImportError::OcrInit(_)));
    assert!(
        !seen
            .lock()
            .unwrap()
            .iter()
            .any(|status| matches!(status, ImportStatus::ReadingPage { .. }))
    );
}

#[tokio::test]
async fn plain_text_and_unsupported_files() {
    let notes = temp_file(".md", "Enzyme: biological catalyst\n".as_bytes());
    let source = import_service(None)
        .import(&ImportRequest::new(notes.path()), &|_| {})
        .await
        .unwrap();
    assert_eq!(source.text, "Enzyme: biological catalyst\n");

    let blank = temp_file(".txt", b"  \n\n");
    let err = import_service(None)
        .import(&ImportRequest::new(blank.path()), &|_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::NoText));

    let err = import_service(None)
        .import(&ImportRequest::new("slides.pptx"), &|_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedExtension { .. }));

    let err = import_service(None)
        .import(&ImportRequest::new("/definitely/not/here.txt"), &|_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::Read { .. }));
}

#[tokio::test]
async fn imported_file_feeds_generation() {
    let file = temp_file(".pdf", b"%PDF-1.7");
    let backend = Arc::new(RecordingBackend {
        prompts: Mutex::new(Vec::new()),
    });
    let generator = GeneratorService::new(
        DeckBuilder::new(backend.clone()),
        import_service(None),
    );

    let (seen, progress) = recorder();
    let set = generator
        .generate_from_file(&ImportRequest::new(file.path()), &progress)
        .await
        .unwrap();

    let label = file.path().file_name().unwrap().to_string_lossy().into_owned();
    assert_eq!(set.len(), 2);
    assert_eq!(set.topic(), label);
    assert!(set.source_content().unwrap().contains("green pigment"));
    let prompts = backend.prompts.lock().unwrap();
    assert!(prompts[0].contains("Photosynthesis turns light into sugar."));
    assert!(!prompts[0].contains("corrupt"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.last(), Some(&ImportStatus::Generating));
    assert!(matches!(seen[seen.len() - 2], ImportStatus::ReadingPage { page: 3, .. }));
    assert_eq!(
        ImportStatus::Generating.to_string(),
        "Generating flashcards..."
    );
}

#[tokio::test]
async fn import_failure_surfaces_as_generation_error() {
    let backend = Arc::new(RecordingBackend {
        prompts: Mutex::new(Vec::new()),
    });
    let generator = GeneratorService::new(DeckBuilder::new(backend.clone()), import_service(None));

    let err = generator
        .generate_from_file(&ImportRequest::new("notes.rtf"), &|_| {})
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GenerationError::Import(ImportError::UnsupportedExtension { .. })
    ));
    assert!(backend.prompts.lock().unwrap().is_empty());
}
