#![forbid(unsafe_code)]

pub mod completion;
pub mod deck_builder;
pub mod error;
pub mod export_sink;
pub mod generator;
pub mod import;
pub mod prompt;

pub use completion::{ChatCompletionsClient, CompletionBackend, GeneratorConfig};
pub use deck_builder::{DeckBuilder, DeckRequest};
pub use error::{
    BackendFailure, CompletionError, ExportSinkError, GenerationError, ImportError, OcrError,
    PageError,
};
pub use export_sink::{DirectoryExportSink, ExportSink};
pub use generator::GeneratorService;
pub use import::{
    DocumentTextExtractor, DocxExtractor, ImportRequest, ImportService, ImportStatus,
    ImportedSource, OcrEngine, OcrProgress, PageImage, PageRange, PagedDocument,
    PagedDocumentLoader, PopplerLoader, SourceKind, TesseractOcr,
};
pub use prompt::{PromptOptions, PromptSource, build_prompt};
