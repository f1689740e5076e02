use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::card::Flashcard;

/// Which face of a card is shown before flipping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StudyMode {
    #[default]
    TermFirst,
    DefinitionFirst,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown study mode: {0}")]
pub struct StudyModeParseError(pub String);

impl StudyMode {
    #[must_use]
    pub fn front<'a>(self, card: &'a Flashcard) -> &'a str {
        match self {
            Self::TermFirst => card.term(),
            Self::DefinitionFirst => card.definition(),
        }
    }

    #[must_use]
    pub fn back<'a>(self, card: &'a Flashcard) -> &'a str {
        match self {
            Self::TermFirst => card.definition(),
            Self::DefinitionFirst => card.term(),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TermFirst => "term",
            Self::DefinitionFirst => "definition",
        }
    }
}

impl fmt::Display for StudyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudyMode {
    type Err = StudyModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "term" | "termFirst" => Ok(Self::TermFirst),
            "definition" | "definitionFirst" => Ok(Self::DefinitionFirst),
            other => Err(StudyModeParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_follow_mode() {
        let card = Flashcard::new("Hola", "Hello").unwrap();
        assert_eq!(StudyMode::TermFirst.front(&card), "Hola");
        assert_eq!(StudyMode::TermFirst.back(&card), "Hello");
        assert_eq!(StudyMode::DefinitionFirst.front(&card), "Hello");
        assert_eq!(StudyMode::DefinitionFirst.back(&card), "Hola");
    }

    #[test]
    fn parses_both_spellings() {
        assert_eq!("term".parse::<StudyMode>().unwrap(), StudyMode::TermFirst);
        assert_eq!(
            "definitionFirst".parse::<StudyMode>().unwrap(),
            StudyMode::DefinitionFirst
        );
        assert!("sideways".parse::<StudyMode>().is_err());
    }
}
