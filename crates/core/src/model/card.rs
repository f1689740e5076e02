use thiserror::Error;

use crate::model::text::{DefinitionText, TermText};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("card term cannot be empty")]
    EmptyTerm,

    #[error("card definition cannot be empty")]
    EmptyDefinition,
}

//
// ─── CARD ──────────────────────────────────────────────────────────────────────
//

/// One term/definition pair. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Flashcard {
    term: TermText,
    definition: DefinitionText,
}

impl Flashcard {
    /// Build a card from raw text, trimming both faces.
    ///
    /// # Errors
    ///
    /// Returns `CardError::EmptyTerm` or `CardError::EmptyDefinition` when a face is blank.
    pub fn new(term: impl AsRef<str>, definition: impl AsRef<str>) -> Result<Self, CardError> {
        let term = TermText::parse(term).map_err(|_| CardError::EmptyTerm)?;
        let definition = DefinitionText::parse(definition).map_err(|_| CardError::EmptyDefinition)?;
        Ok(Self { term, definition })
    }

    #[must_use]
    pub fn term(&self) -> &str {
        self.term.as_str()
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        self.definition.as_str()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
