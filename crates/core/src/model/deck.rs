use thiserror::Error;

use crate::model::card::Flashcard;

/// Topics longer than this (in chars) are treated as pasted content.
pub const MAX_TOPIC_LABEL_CHARS: usize = 50;

/// Label shown instead of a topic that looks like pasted content.
pub const GENERIC_TOPIC_LABEL: &str = "Custom Study Set";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("study set topic cannot be empty")]
    EmptyTopic,

    #[error("study set must contain at least one card")]
    NoCards,
}

//
// ─── STUDY SET ─────────────────────────────────────────────────────────────────
//

/// The active deck: a display topic plus cards in reply order.
///
/// A `StudySet` always holds at least one card; an empty parse is a failure
/// upstream, never an empty deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudySet {
    topic: String,
    cards: Vec<Flashcard>,
    source_content: Option<String>,
}

impl StudySet {
    /// Creates a study set from a raw topic and parsed cards.
    ///
    /// Topics that are too long or span several lines are displayed as
    /// [`GENERIC_TOPIC_LABEL`]; when no explicit source content is given the
    /// raw topic is kept as the source content instead.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::EmptyTopic` for a blank topic and
    /// `DeckError::NoCards` when `cards` is empty.
    pub fn new(
        raw_topic: &str,
        cards: Vec<Flashcard>,
        source_content: Option<String>,
    ) -> Result<Self, DeckError> {
        let trimmed = raw_topic.trim();
        if trimmed.is_empty() {
            return Err(DeckError::EmptyTopic);
        }
        if cards.is_empty() {
            return Err(DeckError::NoCards);
        }

        let source_content = source_content.filter(|s| !s.trim().is_empty());
        let (topic, source_content) = if looks_like_content(trimmed) {
            let source = source_content.or_else(|| Some(raw_topic.to_owned()));
            (GENERIC_TOPIC_LABEL.to_owned(), source)
        } else {
            (trimmed.to_owned(), source_content)
        };

        Ok(Self {
            topic,
            cards,
            source_content,
        })
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Flashcard> {
        self.cards.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn source_content(&self) -> Option<&str> {
        self.source_content.as_deref()
    }
}

/// True when the topic reads like pasted material rather than a short label.
#[must_use]
pub fn looks_like_content(topic: &str) -> bool {
    let trimmed = topic.trim();
    trimmed.chars().count() > MAX_TOPIC_LABEL_CHARS || trimmed.contains(['\n', '\r'])
}
