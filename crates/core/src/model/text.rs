use std::fmt;
use std::marker::PhantomData;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("text must not be empty")]
    Empty,
}

/// Trimmed, non-empty text tagged with the card face it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text<T>(String, PhantomData<T>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Definition;

pub type TermText = Text<Term>;
pub type DefinitionText = Text<Definition>;

impl<T> Text<T> {
    /// Trim the input and reject it when nothing is left.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for blank input.
    pub fn parse(s: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = s.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned(), PhantomData))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T> fmt::Display for Text<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let text = TermText::parse("  Hola \t").unwrap();
        assert_eq!(text.as_str(), "Hola");
    }

    #[test]
    fn parse_rejects_blank() {
        assert_eq!(DefinitionText::parse(" \n ").unwrap_err(), TextError::Empty);
    }
}
