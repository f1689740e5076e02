use std::sync::Arc;

use flash_core::model::StudySet;
use flash_core::parse_flashcards;

use crate::completion::CompletionBackend;
use crate::error::{BackendFailure, GenerationError};
use crate::prompt::{PromptOptions, PromptSource, build_prompt};

/// Input for one generation round-trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckRequest {
    topic: String,
    source_content: Option<String>,
}

impl DeckRequest {
    /// A request typed into the topic box. Long or multi-line input is
    /// treated as pasted content by the prompt and the study set.
    #[must_use]
    pub fn from_topic(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            source_content: None,
        }
    }

    /// A request built from an imported file: `label` names the set and
    /// `text` is the extracted content.
    #[must_use]
    pub fn from_import(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            topic: label.into(),
            source_content: Some(text.into()),
        }
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn source_content(&self) -> Option<&str> {
        self.source_content.as_deref()
    }

    fn prompt_source(&self) -> PromptSource<'_> {
        match self.source_content.as_deref() {
            Some(content) => PromptSource::Content(content),
            None => PromptSource::infer(&self.topic),
        }
    }
}

/// Invokes the backend once per request and parses the reply into a deck.
#[derive(Clone)]
pub struct DeckBuilder {
    backend: Arc<dyn CompletionBackend>,
    options: PromptOptions,
}

impl DeckBuilder {
    #[must_use]
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            options: PromptOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: PromptOptions) -> Self {
        self.options = options;
        self
    }

    /// Check a request before any async work starts.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::EmptyTopic` for a blank topic.
    pub fn validate(request: &DeckRequest) -> Result<(), GenerationError> {
        if request.topic.trim().is_empty() {
            return Err(GenerationError::EmptyTopic);
        }
        Ok(())
    }

    /// Run one round-trip: prompt, call, parse.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Backend` when the call fails (classified for
    /// display), `GenerationError::EmptyReply` for a blank reply and
    /// `GenerationError::NoCards` when no line parses.
    pub async fn build(&self, request: DeckRequest) -> Result<StudySet, GenerationError> {
        Self::validate(&request)?;

        let prompt = build_prompt(request.prompt_source(), self.options);
        tracing::info!(topic_chars = request.topic.chars().count(), "generating flashcards");

        let reply = match self.backend.complete(&prompt).await {
            Ok(reply) => reply,
            Err(source) => {
                let failure = BackendFailure::classify(&source.to_string());
                tracing::warn!(?failure, error = %source, "completion request failed");
                return Err(GenerationError::Backend { failure, source });
            }
        };

        if reply.trim().is_empty() {
            tracing::warn!("completion reply was empty");
            return Err(GenerationError::EmptyReply);
        }

        let cards = parse_flashcards(&reply);
        if cards.is_empty() {
            tracing::warn!(reply_lines = reply.lines().count(), "no flashcards parsed from reply");
            return Err(GenerationError::NoCards);
        }

        let set = StudySet::new(&request.topic, cards, request.source_content)?;
        tracing::info!(cards = set.len(), topic = set.topic(), "study set ready");
        Ok(set)
    }
}
