//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use flash_core::model::DeckError;

/// Errors emitted by a `CompletionBackend`.
///
/// Display strings carry the markers the deck builder classifies on
/// (`api key not valid`, `fetch`, `quota`, `timed out`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompletionError {
    #[error("API key not valid: no API key is configured")]
    MissingApiKey,
    #[error("API key not valid (status {status}): {body}")]
    Unauthorized { status: reqwest::StatusCode, body: String },
    #[error("quota exceeded (status {status}): {body}")]
    QuotaExceeded { status: reqwest::StatusCode, body: String },
    #[error("request timed out")]
    TimedOut,
    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("completion request failed with status {status}: {body}")]
    HttpStatus { status: reqwest::StatusCode, body: String },
    #[error("malformed completion response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

/// Why a backend call failed, from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendFailure {
    AuthenticationFailed,
    Network,
    QuotaExceeded,
    Timeout,
    Other,
}

impl BackendFailure {
    /// Classify a failure by the lower-cased text of its message.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let message = message.to_lowercase();
        if message.contains("api key not valid") {
            Self::AuthenticationFailed
        } else if message.contains("fetch") {
            Self::Network
        } else if message.contains("quota") {
            Self::QuotaExceeded
        } else if message.contains("timed out") {
            Self::Timeout
        } else {
            Self::Other
        }
    }

    #[must_use]
    pub fn user_message(self) -> &'static str {
        match self {
            Self::AuthenticationFailed => {
                "Authentication failed. Please check that your API key is valid."
            }
            Self::Network => "Network error. Please check your internet connection and try again.",
            Self::QuotaExceeded => "The API quota has been exceeded. Please try again later.",
            Self::Timeout => "The request timed out. Please try again.",
            Self::Other => "Failed to generate flashcards. Please try again.",
        }
    }
}

/// Errors emitted while building a deck.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("please enter a topic or some content first")]
    EmptyTopic,
    #[error("a generation is already in progress")]
    Busy,
    #[error("{}", .failure.user_message())]
    Backend {
        failure: BackendFailure,
        #[source]
        source: CompletionError,
    },
    #[error("the AI returned an empty response. Please try again.")]
    EmptyReply,
    #[error(
        "could not create flashcards from the response. Try rephrasing your topic or content."
    )]
    NoCards,
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Import(#[from] ImportError),
}

impl GenerationError {
    /// Text suitable for the status line.
    #[must_use]
    pub fn user_message(&self) -> String {
        let text = self.to_string();
        let mut chars = text.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => text,
        }
    }
}

/// Errors from a single page of a paged document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PageError {
    #[error("page {page} could not be read: {reason}")]
    Text { page: u32, reason: String },
    #[error("page {page} could not be rendered: {reason}")]
    Render { page: u32, reason: String },
    #[error("text recognition failed on page {page}: {source}")]
    Ocr {
        page: u32,
        #[source]
        source: OcrError,
    },
}

/// Errors emitted by an `OcrEngine`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OcrError {
    #[error("OCR engine is unavailable: {0}")]
    Unavailable(String),
    #[error("OCR failed: {0}")]
    Recognition(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors emitted while importing a source file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    #[error("unsupported file type {extension:?}; use .txt, .md, .docx or .pdf")]
    UnsupportedExtension { extension: String },
    #[error("invalid page range: {reason}")]
    InvalidPageRange { reason: String },
    #[error("text recognition was requested but no OCR engine is configured")]
    OcrUnavailable,
    #[error("could not start text recognition: {0}")]
    OcrInit(#[source] OcrError),
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not load the PDF: {0}")]
    Load(String),
    #[error("could not extract text from the document: {0}")]
    Extraction(String),
    #[error("no text could be extracted from the selected file or pages")]
    NoText,
}

/// Errors emitted by an `ExportSink`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportSinkError {
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
