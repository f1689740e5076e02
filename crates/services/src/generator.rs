use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use flash_core::model::StudySet;

use crate::completion::{ChatCompletionsClient, CompletionBackend, GeneratorConfig};
use crate::deck_builder::{DeckBuilder, DeckRequest};
use crate::error::GenerationError;
use crate::import::{ImportRequest, ImportService, ImportStatus};

/// Runs one generation round-trip at a time.
pub struct GeneratorService {
    deck_builder: DeckBuilder,
    import: ImportService,
    busy: AtomicBool,
}

impl GeneratorService {
    #[must_use]
    pub fn new(deck_builder: DeckBuilder, import: ImportService) -> Self {
        Self {
            deck_builder,
            import,
            busy: AtomicBool::new(false),
        }
    }

    /// Chat-completions backend plus the system import tools.
    #[must_use]
    pub fn from_config(config: GeneratorConfig) -> Self {
        if !config.enabled() {
            tracing::warn!("FLASHGEN_AI_API_KEY is not set; generation will fail");
        }
        let backend: Arc<dyn CompletionBackend> = Arc::new(ChatCompletionsClient::new(config));
        Self::new(DeckBuilder::new(backend), ImportService::system_default())
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn import_service(&self) -> &ImportService {
        &self.import
    }

    /// Generate a study set from a typed topic or pasted content.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::EmptyTopic` before any work, `Busy` while
    /// another round-trip runs, and deck builder failures otherwise.
    pub async fn generate_from_topic(&self, topic: &str) -> Result<StudySet, GenerationError> {
        let request = DeckRequest::from_topic(topic);
        DeckBuilder::validate(&request)?;
        let _guard = BusyGuard::acquire(&self.busy)?;
        self.deck_builder.build(request).await
    }

    /// Import a file and generate a study set from its text.
    ///
    /// # Errors
    ///
    /// Returns import validation errors before any work, `Busy` while another
    /// round-trip runs, then import or deck builder failures.
    pub async fn generate_from_file(
        &self,
        request: &ImportRequest,
        progress: &(dyn Fn(ImportStatus) + Send + Sync),
    ) -> Result<StudySet, GenerationError> {
        self.import.validate(request)?;
        let _guard = BusyGuard::acquire(&self.busy)?;

        let source = self.import.import(request, progress).await?;
        tracing::info!(
            file = %source.label,
            chars = source.text.chars().count(),
            "source imported"
        );
        progress(ImportStatus::Generating);
        self.deck_builder
            .build(DeckRequest::from_import(source.label, source.text))
            .await
    }
}

/// Holds the busy flag for the lifetime of one round-trip.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, GenerationError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| GenerationError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
